//! Length-prefixed binary codec for arrays and objects.
//!
//! # Wire format
//!
//! All integers are little-endian.
//!
//! ```text
//! Binary := total_size:u32 Block* end_marker:u32 (= 0xFFFFFFFF)
//! Block  := block_size:u32 tag:u8 [key:NUL-terminated]? payload
//! ```
//!
//! - `total_size` counts the whole blob, including itself and the end marker.
//! - `block_size` counts the whole block, including its own size field.
//! - Array blocks carry no key; object blocks carry the NUL-terminated key.
//! - Payload by tag: Null none, Bool 1 byte, Int32 4 bytes, Int64 8 bytes,
//!   Double 8 bytes, String NUL-terminated bytes, Array/Object a nested
//!   `Binary`.
//!
//! # Example
//!
//! ```
//! use jsonitem::binary::{decode_object, encode_object};
//! use jsonitem::json::Object;
//!
//! let blob = encode_object(&Object::new()).unwrap();
//! assert_eq!(blob, [8, 0, 0, 0, 0xFF, 0xFF, 0xFF, 0xFF]);
//! assert!(decode_object(&blob).unwrap().is_empty());
//! ```

pub mod file;
pub mod reader;
pub mod writer;

pub use file::{open_array, open_object, save_array, save_object};
pub use reader::{
    binary_size, decode_array, decode_array_with_limits, decode_object,
    decode_object_with_limits,
};
pub use writer::{encode_array, encode_object};

/// Sentinel `block_size` that terminates a blob.
pub const END_MARKER: u32 = 0xFFFF_FFFF;

/// Width of every size field.
pub const SIZE_FIELD_LEN: usize = 4;

/// `block_size` + tag.
pub const BLOCK_HEADER_LEN: usize = SIZE_FIELD_LEN + 1;

/// Size of a blob with no blocks.
pub const EMPTY_BLOB_LEN: usize = 2 * SIZE_FIELD_LEN;
