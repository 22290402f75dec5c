//! Byte-level scanning shared by the grammar productions.
//!
//! Every scanner is a pure function of the immutable input and a byte offset
//! and returns the offset just past what it consumed. The input is validated
//! as UTF-8 once up front, so string payloads can be sliced directly out of
//! the source between ASCII delimiters.

use super::limits::{Limits, COMMENT_MARKER};
use super::types::Item;
use crate::error::{ErrorCode, JsonResult};

/// Immutable view of the text being parsed.
#[derive(Debug, Clone, Copy)]
pub struct Source<'a> {
    text: &'a str,
    limits: Limits,
}

impl<'a> Source<'a> {
    /// Wrap raw input. Invalid UTF-8 is reported on line 1.
    pub fn new(input: &'a [u8], limits: Limits) -> JsonResult<Self> {
        let text = std::str::from_utf8(input).map_err(|e| {
            ErrorCode::syntax(
                1,
                format!("invalid UTF-8 at byte {}", e.valid_up_to()),
            )
        })?;
        Ok(Self::from_text(text, limits))
    }

    /// Wrap text that is already known to be UTF-8.
    pub fn from_text(text: &'a str, limits: Limits) -> Self {
        Self { text, limits }
    }

    /// Parser configuration.
    pub fn limits(&self) -> Limits {
        self.limits
    }

    /// Byte at `pos`, if in range.
    #[inline]
    pub fn peek(&self, pos: usize) -> Option<u8> {
        self.text.as_bytes().get(pos).copied()
    }

    /// 1-based line number of `offset`.
    pub fn line_at(&self, offset: usize) -> usize {
        let end = offset.min(self.text.len());
        1 + self.text.as_bytes()[..end]
            .iter()
            .filter(|&&b| b == b'\n')
            .count()
    }

    /// Build a syntax error located at `offset`.
    pub fn error(&self, offset: usize, message: impl Into<String>) -> ErrorCode {
        ErrorCode::syntax(self.line_at(offset), message)
    }

    /// Skip whitespace, and `#` comments when enabled. BEL, BS, VT and FF
    /// count as whitespace between tokens.
    pub fn skip_whitespace(&self, mut pos: usize) -> usize {
        while let Some(b) = self.peek(pos) {
            match b {
                b' ' | b'\t' | b'\n' | b'\r' | 0x07 | 0x08 | 0x0B | 0x0C => pos += 1,
                COMMENT_MARKER if self.limits.allow_comments => {
                    pos = self.text.as_bytes()[pos..]
                        .iter()
                        .position(|&c| c == b'\n')
                        .map_or(self.text.len(), |n| pos + n);
                }
                _ => break,
            }
        }
        pos
    }

    /// Require `expected` at `pos` and step over it.
    pub fn expect(&self, pos: usize, expected: u8, what: &str) -> JsonResult<usize> {
        match self.peek(pos) {
            Some(b) if b == expected => Ok(pos + 1),
            Some(b) => Err(self.error(
                pos,
                format!("expected {what}, found '{}'", char::from(b).escape_default()),
            )),
            None => Err(self.error(pos, format!("expected {what}, found end of input"))),
        }
    }

    /// Scan a quoted string starting at the opening quote.
    pub fn string(&self, pos: usize) -> JsonResult<(String, usize)> {
        let mut pos = self.expect(pos, b'"', "'\"'")?;
        let mut out = String::new();
        let mut run = pos;
        loop {
            match self.peek(pos) {
                None => return Err(self.error(pos, "unterminated string, expected '\"'")),
                Some(b'"') => {
                    out.push_str(self.slice(run, pos)?);
                    return Ok((out, pos + 1));
                }
                Some(b'\\') => {
                    out.push_str(self.slice(run, pos)?);
                    pos = self.escape(pos, &mut out)?;
                    run = pos;
                }
                Some(_) => pos += 1,
            }
        }
    }

    /// Decode one `\X` sequence at `pos` into `out`.
    pub fn escape(&self, pos: usize, out: &mut String) -> JsonResult<usize> {
        let pos = self.expect(pos, b'\\', "'\\'")?;
        let decoded = match self.peek(pos) {
            Some(b'"') => '"',
            Some(b'\\') => '\\',
            Some(b'/') => '/',
            Some(b'b') => '\x08',
            Some(b'f') => '\x0C',
            Some(b'n') => '\n',
            Some(b'r') => '\r',
            Some(b't') => '\t',
            // Legacy escapes from older writers of this format.
            Some(b'a') => '\x07',
            Some(b'v') => '\x0B',
            Some(b'#') => '#',
            Some(b'u') => {
                let (ch, end) = self.unicode_escape(pos + 1)?;
                out.push(ch);
                return Ok(end);
            }
            Some(b) => {
                return Err(self.error(
                    pos,
                    format!("unknown escape '\\{}'", char::from(b).escape_default()),
                ))
            }
            None => return Err(self.error(pos, "unterminated escape sequence")),
        };
        out.push(decoded);
        Ok(pos + 1)
    }

    /// Scan a number literal: the maximal run of `[-+0-9.eE]`.
    pub fn number(&self, start: usize) -> JsonResult<(Item, usize)> {
        let end = self.text.as_bytes()[start.min(self.text.len())..]
            .iter()
            .position(|b| !matches!(b, b'-' | b'+' | b'0'..=b'9' | b'.' | b'e' | b'E'))
            .map_or(self.text.len(), |n| start + n);
        let literal = self.slice(start, end)?;
        if literal.is_empty() {
            return Err(self.error(start, "expected a number"));
        }
        let item = if literal.contains(&['.', 'e', 'E'][..]) {
            literal
                .parse::<f64>()
                .map(Item::Double)
                .map_err(|_| self.error(start, format!("invalid number '{literal}'")))?
        } else if let Ok(value) = literal.parse::<i64>() {
            i32::try_from(value).map_or(Item::Int64(value), Item::Int32)
        } else {
            // Integers beyond i64 degrade to a double.
            literal
                .parse::<f64>()
                .map(Item::Double)
                .map_err(|_| self.error(start, format!("invalid integer '{literal}'")))?
        };
        Ok((item, end))
    }

    /// Match a bare keyword such as `true` and yield `item`.
    pub fn literal(&self, pos: usize, word: &str, item: Item) -> JsonResult<(Item, usize)> {
        let end = pos + word.len();
        if self.text.as_bytes().get(pos..end) == Some(word.as_bytes()) {
            Ok((item, end))
        } else {
            Err(self.error(pos, format!("expected '{word}'")))
        }
    }

    fn unicode_escape(&self, pos: usize) -> JsonResult<(char, usize)> {
        let high = self.hex4(pos)?;
        let pos = pos + 4;
        match high {
            0xD800..=0xDBFF => {
                if self.peek(pos) != Some(b'\\') || self.peek(pos + 1) != Some(b'u') {
                    return Err(self.error(pos, "unpaired high surrogate"));
                }
                let low = self.hex4(pos + 2)?;
                if !(0xDC00..=0xDFFF).contains(&low) {
                    return Err(self.error(pos, "invalid low surrogate"));
                }
                let combined = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
                let ch = char::from_u32(combined)
                    .ok_or_else(|| self.error(pos, "invalid code point"))?;
                Ok((ch, pos + 6))
            }
            0xDC00..=0xDFFF => Err(self.error(pos, "unpaired low surrogate")),
            _ => {
                let ch = char::from_u32(high).ok_or_else(|| self.error(pos, "invalid code point"))?;
                Ok((ch, pos))
            }
        }
    }

    fn hex4(&self, pos: usize) -> JsonResult<u32> {
        let digits = self
            .text
            .get(pos..pos + 4)
            .ok_or_else(|| self.error(pos, "truncated \\u escape"))?;
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(self.error(pos, format!("invalid \\u escape '{digits}'")));
        }
        u32::from_str_radix(digits, 16).map_err(|_| self.error(pos, "invalid \\u escape"))
    }

    fn slice(&self, start: usize, end: usize) -> JsonResult<&'a str> {
        self.text
            .get(start..end)
            .ok_or_else(|| self.error(start, "string does not fall on a character boundary"))
    }
}
