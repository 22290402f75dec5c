//! Persisting blobs to disk.

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use log::debug;

use super::{reader, writer, EMPTY_BLOB_LEN, SIZE_FIELD_LEN};
use crate::error::{ErrorCode, JsonResult};
use crate::json::{Array, Object};

/// Encode `array` and write it to `path`, replacing any existing file.
pub fn save_array(path: impl AsRef<Path>, array: &Array) -> JsonResult<()> {
    write_blob(path.as_ref(), &writer::encode_array(array)?)
}

/// Encode `object` and write it to `path`, replacing any existing file.
pub fn save_object(path: impl AsRef<Path>, object: &Object) -> JsonResult<()> {
    write_blob(path.as_ref(), &writer::encode_object(object)?)
}

/// Read and decode an array blob from `path`.
pub fn open_array(path: impl AsRef<Path>) -> JsonResult<Array> {
    reader::decode_array(&read_blob(path.as_ref())?)
}

/// Read and decode an object blob from `path`.
pub fn open_object(path: impl AsRef<Path>) -> JsonResult<Object> {
    reader::decode_object(&read_blob(path.as_ref())?)
}

fn write_blob(path: &Path, blob: &[u8]) -> JsonResult<()> {
    fs::write(path, blob).map_err(|e| ErrorCode::io(path, &e))?;
    debug!("saved {} bytes to {}", blob.len(), path.display());
    Ok(())
}

/// Read exactly `total_size` bytes, taken from the file's first four bytes.
fn read_blob(path: &Path) -> JsonResult<Vec<u8>> {
    let mut file = File::open(path).map_err(|e| ErrorCode::io(path, &e))?;
    let available = file
        .metadata()
        .map_err(|e| ErrorCode::io(path, &e))?
        .len();

    let total_size = file.read_u32::<LittleEndian>().map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => ErrorCode::corrupt(0, "file shorter than total_size field"),
        _ => ErrorCode::io(path, &e),
    })?;
    let total = total_size as usize;
    if total < EMPTY_BLOB_LEN || total as u64 > available {
        return Err(ErrorCode::corrupt(
            0,
            format!("total_size {total} does not fit a {available}-byte file"),
        ));
    }

    let mut blob = Vec::with_capacity(total);
    blob.write_u32::<LittleEndian>(total_size)
        .map_err(|e| ErrorCode::io(path, &e))?;
    blob.resize(total, 0);
    file.read_exact(&mut blob[SIZE_FIELD_LEN..])
        .map_err(|e| match e.kind() {
            io::ErrorKind::UnexpectedEof => {
                ErrorCode::corrupt(SIZE_FIELD_LEN, "file ended before total_size bytes")
            }
            _ => ErrorCode::io(path, &e),
        })?;

    debug!("opened {} ({total} bytes)", path.display());
    Ok(blob)
}
