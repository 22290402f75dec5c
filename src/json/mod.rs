//! JSON document model, parser, and serializer.
//!
//! # Architecture
//!
//! - [`types`] - `Item` tagged union and `ItemType` tags
//! - [`array`] - ordered sequence of items
//! - [`object`] - insertion-ordered key/value map
//! - [`merge`] - deep merge of objects
//! - [`hash`] - structural hashing consistent with equality
//! - [`limits`] - parser configuration
//! - [`lexer`] - byte scanning: whitespace, strings, escapes, numbers
//! - [`parser`] - recursive-descent productions
//! - [`writer`] - compact and indented text output
//!
//! # Example
//!
//! ```
//! use jsonitem::json::{parse, Item};
//!
//! let item = parse(r#"{"a":1,"b":[true,null,"x"]}"#).unwrap();
//! let object = item.to_object().unwrap();
//! assert_eq!(object.len(), 2);
//! assert_eq!(object.at("a").unwrap(), &Item::Int32(1));
//! assert_eq!(item.to_compact_string(), r#"{"a":1,"b":[true,null,"x"]}"#);
//! ```

pub mod array;
pub mod hash;
pub mod lexer;
pub mod limits;
pub mod merge;
pub mod object;
pub mod parser;
pub mod types;
pub mod writer;

pub use array::Array;
pub use limits::Limits;
pub use merge::merge;
pub use object::Object;
pub use parser::{parse, parse_item_at, parse_with_limits};
pub use types::{Item, ItemType};
pub use writer::{escape_str, format_double};
