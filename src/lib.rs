//! jsonitem - ordered JSON documents with a compact binary encoding.
//!
//! # Architecture
//!
//! - [`json`] - `Item`/`Array`/`Object` model, parser, serializer, merge,
//!   structural hashing
//! - [`binary`] - length-prefixed binary codec and file persistence
//! - [`interop`] - serde and serde_json bridges
//! - [`conformance`] - byte-exact conformance vectors
//! - [`error`] - error kinds with stable codes
//!
//! # Example
//!
//! ```
//! use jsonitem::json::{merge, Object};
//! use jsonitem::binary::{decode_object, encode_object};
//!
//! let mut config = Object::parse(r#"{"x":{"y":1}}"#).unwrap();
//! merge(&mut config, &Object::parse(r#"{"x":{"z":2}}"#).unwrap());
//! assert_eq!(config.to_compact_string(), r#"{"x":{"y":1,"z":2}}"#);
//!
//! let blob = encode_object(&config).unwrap();
//! assert_eq!(decode_object(&blob).unwrap(), config);
//! ```

// Library code reports every failure through ErrorCode.
// Tests are checked separately with `cargo test`.
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(missing_docs)]

pub mod binary;
pub mod conformance;
pub mod error;
pub mod interop;
pub mod json;

// Re-export commonly used types
pub use error::{ErrorCode, JsonResult};
pub use json::{parse, Array, Item, ItemType, Limits, Object};
