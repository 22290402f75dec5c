//! Encoding side of the codec.

use byteorder::{ByteOrder, LittleEndian};

use super::{END_MARKER, SIZE_FIELD_LEN};
use crate::error::{ErrorCode, JsonResult};
use crate::json::{Array, Item, Object};

/// Encode an array as a standalone blob.
pub fn encode_array(array: &Array) -> JsonResult<Vec<u8>> {
    let mut out = Vec::new();
    write_array(&mut out, array)?;
    Ok(out)
}

/// Encode an object as a standalone blob. Blocks follow insertion order.
pub fn encode_object(object: &Object) -> JsonResult<Vec<u8>> {
    let mut out = Vec::new();
    write_object(&mut out, object)?;
    Ok(out)
}

fn write_array(out: &mut Vec<u8>, array: &Array) -> JsonResult<()> {
    let start = reserve_size(out);
    for item in array {
        write_block(out, None, item)?;
    }
    put_u32(out, END_MARKER);
    patch_size(out, start)
}

fn write_object(out: &mut Vec<u8>, object: &Object) -> JsonResult<()> {
    let start = reserve_size(out);
    for (key, value) in object {
        write_block(out, Some(key), value)?;
    }
    put_u32(out, END_MARKER);
    patch_size(out, start)
}

fn write_block(out: &mut Vec<u8>, key: Option<&str>, item: &Item) -> JsonResult<()> {
    let start = reserve_size(out);
    out.push(item.item_type().tag());
    if let Some(key) = key {
        put_cstr(out, key)?;
    }
    match item {
        Item::Null => {}
        Item::Bool(b) => out.push(u8::from(*b)),
        Item::Int32(n) => {
            let mut buf = [0u8; 4];
            LittleEndian::write_i32(&mut buf, *n);
            out.extend_from_slice(&buf);
        }
        Item::Int64(n) => {
            let mut buf = [0u8; 8];
            LittleEndian::write_i64(&mut buf, *n);
            out.extend_from_slice(&buf);
        }
        Item::Double(d) => {
            let mut buf = [0u8; 8];
            LittleEndian::write_f64(&mut buf, *d);
            out.extend_from_slice(&buf);
        }
        Item::String(s) => put_cstr(out, s)?,
        Item::Array(a) => write_array(out, a)?,
        Item::Object(o) => write_object(out, o)?,
    }
    patch_size(out, start)
}

fn put_u32(out: &mut Vec<u8>, value: u32) {
    let mut buf = [0u8; SIZE_FIELD_LEN];
    LittleEndian::write_u32(&mut buf, value);
    out.extend_from_slice(&buf);
}

/// NUL-terminated text. An interior NUL would truncate the value on decode.
fn put_cstr(out: &mut Vec<u8>, text: &str) -> JsonResult<()> {
    if let Some(pos) = text.bytes().position(|b| b == 0) {
        return Err(ErrorCode::corrupt(
            out.len() + pos,
            "string contains a NUL byte and cannot be encoded",
        ));
    }
    out.extend_from_slice(text.as_bytes());
    out.push(0);
    Ok(())
}

fn reserve_size(out: &mut Vec<u8>) -> usize {
    let start = out.len();
    out.extend_from_slice(&[0; SIZE_FIELD_LEN]);
    start
}

/// Backfill the size field at `start` with the byte count written since.
fn patch_size(out: &mut [u8], start: usize) -> JsonResult<()> {
    let len = out.len() - start;
    let size = u32::try_from(len)
        .ok()
        .filter(|&size| size != END_MARKER)
        .ok_or_else(|| ErrorCode::corrupt(start, format!("{len} bytes overflow a size field")))?;
    LittleEndian::write_u32(&mut out[start..start + SIZE_FIELD_LEN], size);
    Ok(())
}
