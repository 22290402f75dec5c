//! Text format conformance tests.
//!
//! Exercises the public parse/serialize surface the way a consumer would:
//! documented examples, round-trip idempotence, ordering, and value
//! semantics of the document model.

use jsonitem::json::{
    escape_str, merge, parse, parse_item_at, parse_with_limits, Array, Item, ItemType, Limits,
    Object,
};
use jsonitem::ErrorCode;

fn syntax_line(result: Result<Item, ErrorCode>) -> usize {
    match result {
        Err(ErrorCode::SyntaxError { line, .. }) => line,
        other => panic!("expected a syntax error, got {other:?}"),
    }
}

// ============================================================================
// Documented examples
// ============================================================================

#[test]
fn example_object_parses_and_reproduces() {
    let text = r#"{"a":1,"b":[true,null,"x"]}"#;
    let item = parse(text).unwrap();
    let object = item.to_object().unwrap();

    assert_eq!(object.len(), 2);
    assert_eq!(object.at("a"), Ok(&Item::Int32(1)));

    let b = object.at("b").unwrap().to_array().unwrap();
    assert_eq!(
        b.as_slice(),
        &[Item::Bool(true), Item::Null, Item::from("x")]
    );

    assert_eq!(item.to_compact_string(), text);
}

#[test]
fn example_trailing_comma_rejected() {
    let err = parse("[1,2,3,]").unwrap_err();
    assert_eq!(err.name(), "SyntaxError");
    assert_eq!(err.code(), 100);
}

#[test]
fn example_escape_quote_and_newline() {
    assert_eq!(escape_str("He said \"hi\"\n"), r#""He said \"hi\"\n""#);
}

#[test]
fn example_merge_nested() {
    let mut dst = Object::parse(r#"{"x":{"y":1}}"#).unwrap();
    let src = Object::parse(r#"{"x":{"z":2}}"#).unwrap();
    merge(&mut dst, &src);
    assert_eq!(dst.to_compact_string(), r#"{"x":{"y":1,"z":2}}"#);
}

// ============================================================================
// Parsing
// ============================================================================

#[test]
fn kitchen_sink_document() {
    let text = r#"
[
    "JSON Test Pattern pass1",
    {"object with 1 member":["array with 1 element"]},
    {},
    [],
    -42,
    true,
    false,
    null,
    {
        "integer": 1234567890,
        "real": -9876.543210,
        "e": 0.123456789e-12,
        "E": 1.234567890E+34,
        "":  23456789012E66,
        "zero": 0,
        "one": 1,
        "space": " ",
        "quote": "\"",
        "backslash": "\\",
        "controls": "\b\f\n\r\t",
        "slash": "/ & \/",
        "alpha": "abcdefghijklmnopqrstuvwyz",
        "digit": "0123456789",
        "hex": "\u0123\u4567\u89AB\uCDEF\uabcd\uef4A",
        "true": true,
        "false": false,
        "null": null,
        "array":[  ],
        "object":{  },
        "compact":[1,2,3,4,5,6,7],
        "jsontext": "{\"object with 1 member\":[\"array with 1 element\"]}",
        "quotes": "&#34; \u0022 %22 0x22 034 &#x22;",
        "\/\\\"\uCAFE\uBABE\uAB98\uFCDE\ubcda\uef4A\b\f\n\r\t`1~!@#$%^&*()_+-=[]{}|;:',./<>?"
: "A key can be any string"
    },
    0.5 ,98.6
,
99.44
,

1066,
1e1,
0.1e1,
1e-1,
1e00,2e+00,2e-00
,"rosebud"]
"#;
    let item = parse(text).unwrap();
    let list = item.to_array().unwrap();
    assert_eq!(list.len(), 20);
    assert_eq!(list.at(4), Ok(&Item::Int32(-42)));

    let members = list.at(8).unwrap().to_object().unwrap();
    assert_eq!(members.at("integer"), Ok(&Item::Int32(1234567890)));
    assert_eq!(members.at("real"), Ok(&Item::Double(-9876.543210)));
    assert_eq!(members.at("zero"), Ok(&Item::Int32(0)));
    assert_eq!(members.at("slash").unwrap().as_str(), Some("/ & /"));
    assert_eq!(members.at("controls").unwrap().as_str(), Some("\u{8}\u{c}\n\r\t"));
    assert_eq!(members.at("quotes").unwrap().as_str(), Some("&#34; \" %22 0x22 034 &#x22;"));
    assert_eq!(
        members.keys().next(),
        Some("integer"),
        "members keep their written order"
    );
    assert_eq!(list.last(), Some(&Item::from("rosebud")));

    // Serialized output parses back to the same compact form.
    let once = item.to_compact_string();
    let twice = parse(&once).unwrap().to_compact_string();
    assert_eq!(once, twice);
}

#[test]
fn integer_widths() {
    assert_eq!(parse("2147483647").unwrap(), Item::Int32(i32::MAX));
    assert_eq!(parse("-2147483648").unwrap(), Item::Int32(i32::MIN));
    assert_eq!(parse("2147483648").unwrap(), Item::Int64(2147483648));
    assert_eq!(parse("-9223372036854775808").unwrap(), Item::Int64(i64::MIN));
    assert!(parse("9223372036854775808").unwrap().is_f64());
    assert_eq!(parse("1.0").unwrap(), Item::Double(1.0));
}

#[test]
fn error_line_numbers() {
    assert_eq!(syntax_line(parse("{\n\"a\": 1,\n\"b\": }")), 3);
    assert_eq!(syntax_line(parse("[1,\n2,\n\n  x]")), 4);
    assert_eq!(syntax_line(parse("")), 1);
}

#[test]
fn rejected_documents() {
    for text in [
        "{\"a\":1,}",
        "[1 2]",
        "{\"a\" 1}",
        "{a:1}",
        "'single'",
        "\"unterminated",
        "[1,2",
        "tru",
        "nul",
        "01x",
        "{} {}",
        "\"\\uD800\"",
    ] {
        let err = parse(text).unwrap_err();
        assert_eq!(err.name(), "SyntaxError", "input {text:?}");
    }
}

#[test]
fn comments_only_when_enabled() {
    let text = "# settings\n{\"a\": 1 # inline\n}";
    assert_eq!(parse(text).unwrap_err().name(), "SyntaxError");

    let item = parse_with_limits(text, Limits::with_comments()).unwrap();
    assert_eq!(item.to_compact_string(), r#"{"a":1}"#);

    let object = Object::parse_with_comments(text).unwrap();
    assert_eq!(object.at("a"), Ok(&Item::Int32(1)));
}

#[test]
fn comment_marker_inside_string_is_text() {
    let item = parse_with_limits(r##"{"k":"a # b"}"##, Limits::with_comments()).unwrap();
    assert_eq!(item.to_object().unwrap().at("k").unwrap().as_str(), Some("a # b"));
}

#[test]
fn nesting_depth_is_bounded() {
    let deep = format!("{}{}", "[".repeat(20), "]".repeat(20));
    assert!(parse(&deep).is_ok());

    let err = parse_with_limits(&deep, Limits::strict().max_depth(10)).unwrap_err();
    assert_eq!(err.name(), "SyntaxError");

    let hostile = "[".repeat(100_000);
    assert_eq!(parse(&hostile).unwrap_err().name(), "SyntaxError");
}

#[test]
fn item_at_offset_reports_end() {
    let text = r#"xx{"a":[1]} tail"#;
    let (item, end) = parse_item_at(text, 2, Limits::strict()).unwrap();
    assert_eq!(item.to_compact_string(), r#"{"a":[1]}"#);
    assert_eq!(&text[end..], " tail");
}

#[test]
fn typed_entry_points_check_the_root() {
    assert!(Array::parse("[1]").is_ok());
    assert!(Object::parse("{}").is_ok());
    assert_eq!(Object::parse("[1]").unwrap_err().name(), "SyntaxError");
    assert_eq!(Array::parse("{}").unwrap_err().name(), "SyntaxError");
    assert!(matches!(
        parse("[1]").unwrap().into_object(),
        Err(ErrorCode::TypeMismatch {
            expected: ItemType::Object,
            found: ItemType::Array,
        })
    ));
}

// ============================================================================
// Serialization
// ============================================================================

#[test]
fn compact_output_is_idempotent() {
    let text = r#"{"n":-0.5,"big":1e300,"s":"tab\there","l":[1,[2,[3]]],"o":{"p":{}}}"#;
    let first = parse(text).unwrap().to_compact_string();
    let second = parse(&first).unwrap().to_compact_string();
    assert_eq!(first, second);
}

#[test]
fn pretty_and_compact_agree() {
    let item = parse(r#"{"list":[1,2.5,"three"],"empty":{},"flag":false}"#).unwrap();
    let reparsed = parse(item.to_pretty_string()).unwrap();
    assert_eq!(reparsed, item);
    assert_eq!(reparsed.to_compact_string(), item.to_compact_string());
}

#[test]
fn doubles_use_eight_decimals() {
    let item = parse("[3.14159265358979, 2.0, -1.5, 1e-9]").unwrap();
    assert_eq!(
        item.to_compact_string(),
        "[3.14159265,2.00000000,-1.50000000,0.00000000]"
    );
}

#[test]
fn non_finite_doubles_write_null() {
    let array = Array::from(vec![f64::NAN, f64::NEG_INFINITY]);
    assert_eq!(array.to_compact_string(), "[null,null]");
}

#[test]
fn escapes_survive_round_trip() {
    let raw = "quote\" back\\ slash/ nl\n ctl\u{1} \u{e9}\u{1F600}";
    let item = Item::from(raw);
    let text = item.to_compact_string();
    assert_eq!(parse(&text).unwrap().as_str(), Some(raw));
}

#[test]
fn legacy_escapes_written_for_bell_vtab_and_hash() {
    let item = Item::from("a\x07b\x0Bc#d");
    let text = item.to_compact_string();
    assert_eq!(text, r#""a\ab\vc\#d""#);
    let reread = parse_with_limits(&text, Limits::with_comments()).unwrap();
    assert_eq!(reread, item);
}

#[test]
fn control_whitespace_between_tokens() {
    let item = parse("[1,\x072,\x083,\x0B4,\x0C5]").unwrap();
    assert_eq!(item.to_compact_string(), "[1,2,3,4,5]");
}

// ============================================================================
// Document model
// ============================================================================

#[test]
fn objects_keep_insertion_order() {
    let mut object = Object::new();
    object.add("zeta", 1);
    object.add("alpha", 2);
    object.add("mid", 3);
    assert_eq!(object.keys().collect::<Vec<_>>(), ["zeta", "alpha", "mid"]);

    // Replacing a value keeps the key where it was.
    assert_eq!(object.add("zeta", 9), Some(Item::Int32(1)));
    assert_eq!(object.to_compact_string(), r#"{"zeta":9,"alpha":2,"mid":3}"#);

    object.remove("alpha").unwrap();
    object.add("alpha", 4);
    assert_eq!(object.to_compact_string(), r#"{"zeta":9,"mid":3,"alpha":4}"#);
}

#[test]
fn duplicate_keys_keep_last_value() {
    let object = Object::parse(r#"{"a":1,"b":2,"a":3}"#).unwrap();
    assert_eq!(object.to_compact_string(), r#"{"a":3,"b":2}"#);
}

#[test]
fn clones_are_deep() {
    let mut original = Object::parse(r#"{"inner":{"list":[1,2]}}"#).unwrap();
    let copy = original.clone();

    original
        .get_mut("inner")
        .and_then(Item::as_object_mut)
        .and_then(|inner| inner.get_mut("list"))
        .and_then(Item::as_array_mut)
        .unwrap()
        .add(3);

    assert_eq!(copy.to_compact_string(), r#"{"inner":{"list":[1,2]}}"#);
    assert_eq!(original.to_compact_string(), r#"{"inner":{"list":[1,2,3]}}"#);
}

#[test]
fn lookups_report_misses() {
    let object = Object::parse(r#"{"a":1}"#).unwrap();
    assert!(matches!(object.at("b"), Err(ErrorCode::NotFound(_))));

    let array = Array::parse("[1]").unwrap();
    assert_eq!(array.at(1).unwrap_err().name(), "NotFound");

    assert!(matches!(
        Item::from("s").to_i32(),
        Err(ErrorCode::TypeMismatch {
            expected: ItemType::Int32,
            found: ItemType::String,
        })
    ));
}

#[test]
fn structural_hash_ignores_member_order() {
    let a = parse(r#"{"x":1,"y":[1,2],"z":{"p":true,"q":null}}"#).unwrap();
    let b = parse(r#"{"z":{"q":null,"p":true},"y":[1,2],"x":1}"#).unwrap();
    assert_eq!(a.structural_hash(), b.structural_hash());

    let c = parse(r#"{"x":1,"y":[2,1],"z":{"p":true,"q":null}}"#).unwrap();
    assert_ne!(a.structural_hash(), c.structural_hash());
}

#[test]
fn object_addition_is_shallow() {
    let base = Object::parse(r#"{"a":{"b":1},"c":2}"#).unwrap();
    let patch = Object::parse(r#"{"a":{"d":3},"e":[4]}"#).unwrap();
    let combined = &base + &patch;
    assert_eq!(combined.to_compact_string(), r#"{"a":{"d":3},"c":2,"e":[4]}"#);

    let mut merged = base.clone();
    merge(&mut merged, &patch);
    assert_eq!(merged.to_compact_string(), r#"{"a":{"b":1,"d":3},"c":2,"e":[4]}"#);
    assert_eq!(base.len(), 2, "operands are left untouched");
}
