//! Recursive-descent parser.
//!
//! Each production takes the source and a byte offset and returns the parsed
//! value together with the offset just past it, so productions compose by
//! threading the offset through. Whitespace is skipped at every production
//! boundary. The first error aborts the whole parse.

use std::str::FromStr;

use super::array::Array;
use super::lexer::Source;
use super::limits::Limits;
use super::object::Object;
use super::types::Item;
use crate::error::{ErrorCode, JsonResult};

/// Parse any top-level value with default limits.
pub fn parse(input: impl AsRef<[u8]>) -> JsonResult<Item> {
    parse_with_limits(input, Limits::default())
}

/// Parse any top-level value with explicit limits.
pub fn parse_with_limits(input: impl AsRef<[u8]>, limits: Limits) -> JsonResult<Item> {
    let src = Source::new(input.as_ref(), limits)?;
    document(&src, item_at)
}

/// Parse input whose top-level value must be an array.
pub fn parse_array(input: &[u8], limits: Limits) -> JsonResult<Array> {
    let src = Source::new(input, limits)?;
    document(&src, array_at)
}

/// Parse input whose top-level value must be an object.
pub fn parse_object(input: &[u8], limits: Limits) -> JsonResult<Object> {
    let src = Source::new(input, limits)?;
    document(&src, object_at)
}

/// Parse one value starting at `offset`, returning it and the offset just
/// past it. Content after the value is left for the caller.
pub fn parse_item_at(text: &str, offset: usize, limits: Limits) -> JsonResult<(Item, usize)> {
    let src = Source::from_text(text, limits);
    item_at(&src, offset, 0)
}

type Production<T> = fn(&Source<'_>, usize, usize) -> JsonResult<(T, usize)>;

/// Run `production` over the whole input and reject trailing content.
fn document<T>(src: &Source<'_>, production: Production<T>) -> JsonResult<T> {
    let (value, end) = production(src, 0, 0)?;
    let end = src.skip_whitespace(end);
    match src.peek(end) {
        None => Ok(value),
        Some(b) => Err(src.error(end, format!("unexpected trailing {}", describe(b)))),
    }
}

fn item_at(src: &Source<'_>, pos: usize, depth: usize) -> JsonResult<(Item, usize)> {
    let pos = src.skip_whitespace(pos);
    match src.peek(pos) {
        Some(b'{') => object_at(src, pos, depth).map(|(o, end)| (Item::Object(o), end)),
        Some(b'[') => array_at(src, pos, depth).map(|(a, end)| (Item::Array(a), end)),
        Some(b'"') => src.string(pos).map(|(s, end)| (Item::String(s), end)),
        Some(b'-' | b'0'..=b'9') => src.number(pos),
        Some(b't') => src.literal(pos, "true", Item::Bool(true)),
        Some(b'f') => src.literal(pos, "false", Item::Bool(false)),
        Some(b'n') => src.literal(pos, "null", Item::Null),
        Some(b) => Err(src.error(pos, format!("expected a value, found {}", describe(b)))),
        None => Err(src.error(pos, "expected a value, found end of input")),
    }
}

fn object_at(src: &Source<'_>, pos: usize, depth: usize) -> JsonResult<(Object, usize)> {
    let pos = src.skip_whitespace(pos);
    let depth = enter(src, pos, depth)?;
    let mut pos = src.skip_whitespace(src.expect(pos, b'{', "'{'")?);
    let mut object = Object::new();

    if src.peek(pos) == Some(b'}') {
        return Ok((object, pos + 1));
    }

    loop {
        pos = src.skip_whitespace(pos);
        if src.peek(pos) != Some(b'"') {
            return Err(unexpected(src, pos, "'\"' to start an object key"));
        }
        let (key, next) = src.string(pos)?;
        pos = src.skip_whitespace(next);
        pos = src.expect(pos, b':', "':' after object key")?;

        let (value, next) = item_at(src, pos, depth)?;
        object.add(key, value);

        pos = src.skip_whitespace(next);
        match src.peek(pos) {
            Some(b',') => pos += 1,
            Some(b'}') => return Ok((object, pos + 1)),
            _ => return Err(unexpected(src, pos, "',' or '}'")),
        }
    }
}

fn array_at(src: &Source<'_>, pos: usize, depth: usize) -> JsonResult<(Array, usize)> {
    let pos = src.skip_whitespace(pos);
    let depth = enter(src, pos, depth)?;
    let mut pos = src.skip_whitespace(src.expect(pos, b'[', "'['")?);
    let mut array = Array::new();

    if src.peek(pos) == Some(b']') {
        return Ok((array, pos + 1));
    }

    loop {
        let (value, next) = item_at(src, pos, depth)?;
        array.add(value);

        pos = src.skip_whitespace(next);
        match src.peek(pos) {
            Some(b',') => pos += 1,
            Some(b']') => return Ok((array, pos + 1)),
            _ => return Err(unexpected(src, pos, "',' or ']'")),
        }
    }
}

fn enter(src: &Source<'_>, pos: usize, depth: usize) -> JsonResult<usize> {
    let depth = depth + 1;
    let max = src.limits().max_nesting_depth;
    if depth > max {
        return Err(src.error(pos, format!("nesting deeper than {max} levels")));
    }
    Ok(depth)
}

fn unexpected(src: &Source<'_>, pos: usize, expected: &str) -> ErrorCode {
    let found = src.peek(pos).map_or_else(|| "end of input".to_string(), describe);
    src.error(pos, format!("expected {expected}, found {found}"))
}

fn describe(b: u8) -> String {
    if b.is_ascii_graphic() {
        format!("'{}'", char::from(b))
    } else {
        format!("byte 0x{b:02X}")
    }
}

impl FromStr for Item {
    type Err = ErrorCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}
