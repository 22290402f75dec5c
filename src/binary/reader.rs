//! Decoding side of the codec.
//!
//! Every read is bounds-checked against the enclosing blob's `total_size`.
//! Structural problems are reported as `CorruptData` carrying the absolute
//! byte offset of the failed check.

use byteorder::{ByteOrder, LittleEndian};
use log::trace;

use super::{BLOCK_HEADER_LEN, EMPTY_BLOB_LEN, END_MARKER, SIZE_FIELD_LEN};
use crate::error::{ErrorCode, JsonResult};
use crate::json::{Array, Item, ItemType, Limits, Object};

/// Read the `total_size` field of a blob.
pub fn binary_size(blob: &[u8]) -> JsonResult<usize> {
    let field = blob
        .get(..SIZE_FIELD_LEN)
        .ok_or_else(|| ErrorCode::corrupt(0, "missing total_size field"))?;
    Ok(LittleEndian::read_u32(field) as usize)
}

/// Decode an array blob with default limits.
pub fn decode_array(blob: &[u8]) -> JsonResult<Array> {
    decode_array_with_limits(blob, Limits::default())
}

/// Decode an object blob with default limits.
pub fn decode_object(blob: &[u8]) -> JsonResult<Object> {
    decode_object_with_limits(blob, Limits::default())
}

/// Decode an array blob, bounding nesting by `limits.max_nesting_depth`.
pub fn decode_array_with_limits(blob: &[u8], limits: Limits) -> JsonResult<Array> {
    BlobReader::open(blob, 0, 1, limits.max_nesting_depth)?.read_array()
}

/// Decode an object blob, bounding nesting by `limits.max_nesting_depth`.
pub fn decode_object_with_limits(blob: &[u8], limits: Limits) -> JsonResult<Object> {
    BlobReader::open(blob, 0, 1, limits.max_nesting_depth)?.read_object()
}

/// Cursor over exactly one blob's `total_size` bytes.
struct BlobReader<'a> {
    blob: &'a [u8],
    /// Absolute offset of `blob` in the outermost buffer.
    base: usize,
    pos: usize,
    depth: usize,
    max_depth: usize,
}

impl<'a> BlobReader<'a> {
    fn open(data: &'a [u8], base: usize, depth: usize, max_depth: usize) -> JsonResult<Self> {
        if depth > max_depth {
            return Err(ErrorCode::corrupt(
                base,
                format!("nesting deeper than {max_depth} levels"),
            ));
        }
        let total = binary_size(data).map_err(|_| {
            ErrorCode::corrupt(base, format!("{} bytes cannot hold total_size", data.len()))
        })?;
        if total < EMPTY_BLOB_LEN {
            return Err(ErrorCode::corrupt(
                base,
                format!("total_size {total} below minimum {EMPTY_BLOB_LEN}"),
            ));
        }
        let blob = data.get(..total).ok_or_else(|| {
            ErrorCode::corrupt(
                base,
                format!("total_size {total} exceeds the {} available bytes", data.len()),
            )
        })?;
        Ok(Self {
            blob,
            base,
            pos: SIZE_FIELD_LEN,
            depth,
            max_depth,
        })
    }

    fn read_array(mut self) -> JsonResult<Array> {
        let mut array = Array::new();
        while let Some(block) = self.next_block()? {
            let (item, _) = self.read_payload(block, false)?;
            array.add(item);
        }
        Ok(array)
    }

    fn read_object(mut self) -> JsonResult<Object> {
        let mut object = Object::new();
        while let Some(block) = self.next_block()? {
            let (item, key) = self.read_payload(block, true)?;
            object.add(key, item);
        }
        Ok(object)
    }

    /// Slice out the next block, or `None` at the end marker.
    fn next_block(&mut self) -> JsonResult<Option<Block<'a>>> {
        let start = self.pos;
        let field = self
            .blob
            .get(start..start + SIZE_FIELD_LEN)
            .ok_or_else(|| self.corrupt(start, "missing end marker"))?;
        let size = LittleEndian::read_u32(field);

        if size == END_MARKER {
            let end = start + SIZE_FIELD_LEN;
            if end != self.blob.len() {
                return Err(self.corrupt(
                    start,
                    format!("end marker leaves {} bytes unread", self.blob.len() - end),
                ));
            }
            self.pos = end;
            return Ok(None);
        }

        let size = size as usize;
        if size < BLOCK_HEADER_LEN {
            return Err(self.corrupt(
                start,
                format!("block_size {size} smaller than block header"),
            ));
        }
        // The end marker must still fit after this block.
        let bytes = self
            .blob
            .get(start..start + size)
            .filter(|_| start + size + SIZE_FIELD_LEN <= self.blob.len())
            .ok_or_else(|| {
                self.corrupt(start, format!("block_size {size} runs past total_size"))
            })?;
        let tag = bytes[SIZE_FIELD_LEN];
        let ty = ItemType::from_tag(tag)
            .ok_or_else(|| self.corrupt(start + SIZE_FIELD_LEN, format!("unknown tag {tag}")))?;
        trace!(
            "block at {}: tag {} size {size}",
            self.base + start,
            ty.name()
        );

        self.pos = start + size;
        Ok(Some(Block {
            start,
            ty,
            body: &bytes[BLOCK_HEADER_LEN..],
        }))
    }

    /// Decode a block's optional key and payload.
    fn read_payload(&self, block: Block<'a>, keyed: bool) -> JsonResult<(Item, String)> {
        let mut body = block.body;
        let mut offset = block.start + BLOCK_HEADER_LEN;

        let key = if keyed {
            let (key, rest) = self.cstr(body, offset, "key")?;
            offset += body.len() - rest.len();
            body = rest;
            key.to_string()
        } else {
            String::new()
        };

        let item = match block.ty {
            ItemType::Null => {
                self.fixed(body, offset, 0)?;
                Item::Null
            }
            ItemType::Bool => match self.fixed(body, offset, 1)?[0] {
                0 => Item::Bool(false),
                1 => Item::Bool(true),
                other => return Err(self.corrupt(offset, format!("bool payload {other}"))),
            },
            ItemType::Int32 => Item::Int32(LittleEndian::read_i32(self.fixed(body, offset, 4)?)),
            ItemType::Int64 => Item::Int64(LittleEndian::read_i64(self.fixed(body, offset, 8)?)),
            ItemType::Double => Item::Double(LittleEndian::read_f64(self.fixed(body, offset, 8)?)),
            ItemType::String => {
                let (text, rest) = self.cstr(body, offset, "string")?;
                if !rest.is_empty() {
                    return Err(self.corrupt(
                        offset + text.len() + 1,
                        format!("{} bytes after string payload", rest.len()),
                    ));
                }
                Item::String(text.to_string())
            }
            ItemType::Array => Item::Array(self.nested(body, offset)?.read_array()?),
            ItemType::Object => Item::Object(self.nested(body, offset)?.read_object()?),
        };
        Ok((item, key))
    }

    /// A nested blob must fill its block exactly.
    fn nested(&self, body: &'a [u8], offset: usize) -> JsonResult<BlobReader<'a>> {
        let reader = BlobReader::open(body, self.base + offset, self.depth + 1, self.max_depth)?;
        if reader.blob.len() != body.len() {
            return Err(self.corrupt(
                offset,
                format!(
                    "nested total_size {} disagrees with block payload of {} bytes",
                    reader.blob.len(),
                    body.len()
                ),
            ));
        }
        Ok(reader)
    }

    fn fixed(&self, body: &'a [u8], offset: usize, len: usize) -> JsonResult<&'a [u8]> {
        if body.len() != len {
            return Err(self.corrupt(
                offset,
                format!("expected {len} payload bytes, found {}", body.len()),
            ));
        }
        Ok(body)
    }

    /// Split a NUL-terminated UTF-8 string off the front of `bytes`.
    fn cstr(&self, bytes: &'a [u8], offset: usize, what: &str) -> JsonResult<(&'a str, &'a [u8])> {
        let nul = bytes
            .iter()
            .position(|&b| b == 0)
            .ok_or_else(|| self.corrupt(offset, format!("{what} missing NUL terminator")))?;
        let text = std::str::from_utf8(&bytes[..nul]).map_err(|e| {
            self.corrupt(offset + e.valid_up_to(), format!("{what} is not valid UTF-8"))
        })?;
        Ok((text, &bytes[nul + 1..]))
    }

    fn corrupt(&self, pos: usize, reason: impl Into<String>) -> ErrorCode {
        ErrorCode::corrupt(self.base + pos, reason)
    }
}

/// One block, header already validated.
#[derive(Debug, Clone, Copy)]
struct Block<'a> {
    /// Offset of the block's size field within its blob.
    start: usize,
    ty: ItemType,
    /// Bytes after the tag: optional key then payload.
    body: &'a [u8],
}
