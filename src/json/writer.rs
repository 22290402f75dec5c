//! Text serialization.
//!
//! Two deterministic renderings of the same tree:
//!
//! - compact: no whitespace between tokens;
//! - pretty: one member per line, two spaces of indentation per level and
//!   `": "` between key and value.
//!
//! Objects are always written in insertion order. Doubles are written with
//! exactly 8 fractional digits, which existing consumers of this format rely
//! on; values that need more precision do not survive a text round-trip.
//!
//! Strings use the short escapes `\" \\ \/ \b \f \n \r \t \a \v \#`, and
//! `\u00xx` for any other control character. `#` is escaped so that output
//! stays intact when read back with comments enabled.

use super::array::Array;
use super::object::Object;
use super::types::Item;

const INDENT: &str = "  ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Style {
    Compact,
    Pretty,
}

/// Compact JSON text of any item.
pub fn to_compact_string(item: &Item) -> String {
    render(|out| write_item(out, item, Style::Compact, 0))
}

/// Indented JSON text of any item.
pub fn to_pretty_string(item: &Item) -> String {
    render(|out| write_item(out, item, Style::Pretty, 0))
}

/// Compact JSON text of an array.
pub fn array_to_compact_string(array: &Array) -> String {
    render(|out| write_array(out, array, Style::Compact, 0))
}

/// Indented JSON text of an array.
pub fn array_to_pretty_string(array: &Array) -> String {
    render(|out| write_array(out, array, Style::Pretty, 0))
}

/// Compact JSON text of an object.
pub fn object_to_compact_string(object: &Object) -> String {
    render(|out| write_object(out, object, Style::Compact, 0))
}

/// Indented JSON text of an object.
pub fn object_to_pretty_string(object: &Object) -> String {
    render(|out| write_object(out, object, Style::Pretty, 0))
}

/// Quote and escape `s` as a JSON string literal.
///
/// ```
/// use jsonitem::json::escape_str;
///
/// assert_eq!(escape_str("He said \"hi\"\n"), r#""He said \"hi\"\n""#);
/// ```
pub fn escape_str(s: &str) -> String {
    render(|out| write_string(out, s))
}

/// Fixed 8-decimal rendering of a double. Non-finite values become `null`.
pub fn format_double(value: f64) -> String {
    if value.is_finite() {
        format!("{value:.8}")
    } else {
        "null".to_string()
    }
}

fn render(f: impl FnOnce(&mut String)) -> String {
    let mut out = String::new();
    f(&mut out);
    out
}

fn write_item(out: &mut String, item: &Item, style: Style, depth: usize) {
    match item {
        Item::Null => out.push_str("null"),
        Item::Bool(true) => out.push_str("true"),
        Item::Bool(false) => out.push_str("false"),
        Item::Int32(n) => {
            out.push_str(&n.to_string());
        }
        Item::Int64(n) => {
            out.push_str(&n.to_string());
        }
        Item::Double(d) => out.push_str(&format_double(*d)),
        Item::String(s) => write_string(out, s),
        Item::Array(a) => write_array(out, a, style, depth),
        Item::Object(o) => write_object(out, o, style, depth),
    }
}

fn write_string(out: &mut String, s: &str) {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '/' => out.push_str("\\/"),
            '\x08' => out.push_str("\\b"),
            '\x0C' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\x07' => out.push_str("\\a"),
            '\x0B' => out.push_str("\\v"),
            '#' => out.push_str("\\#"),
            c if c < '\x20' => {
                out.push_str(&format!("\\u{:04x}", u32::from(c)));
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

fn write_array(out: &mut String, array: &Array, style: Style, depth: usize) {
    if array.is_empty() {
        out.push_str("[]");
        return;
    }
    out.push('[');
    for (i, item) in array.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        newline(out, style, depth + 1);
        write_item(out, item, style, depth + 1);
    }
    newline(out, style, depth);
    out.push(']');
}

fn write_object(out: &mut String, object: &Object, style: Style, depth: usize) {
    if object.is_empty() {
        out.push_str("{}");
        return;
    }
    out.push('{');
    for (i, (key, value)) in object.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        newline(out, style, depth + 1);
        write_string(out, key);
        out.push_str(match style {
            Style::Compact => ":",
            Style::Pretty => ": ",
        });
        write_item(out, value, style, depth + 1);
    }
    newline(out, style, depth);
    out.push('}');
}

fn newline(out: &mut String, style: Style, depth: usize) {
    if style == Style::Pretty {
        out.push('\n');
        for _ in 0..depth {
            out.push_str(INDENT);
        }
    }
}

impl Item {
    /// Compact JSON text.
    pub fn to_compact_string(&self) -> String {
        to_compact_string(self)
    }

    /// Indented JSON text.
    pub fn to_pretty_string(&self) -> String {
        to_pretty_string(self)
    }
}
