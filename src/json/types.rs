//! The `Item` tagged union and its tag.
//!
//! An `Item` holds exactly one JSON value. Arrays and objects nested inside an
//! item are owned by it outright: cloning an item deep-copies the subtree and
//! dropping it releases the subtree. Moving a value out with [`Item::take`]
//! leaves `Null` behind.

use std::fmt;

use super::array::Array;
use super::object::Object;
use crate::error::{ErrorCode, JsonResult};

/// Discriminant of an [`Item`].
///
/// The numeric values double as the binary codec's tag bytes and must not
/// change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum ItemType {
    /// JSON null
    Null = 0,
    /// JSON boolean
    Bool = 1,
    /// Integer within signed 32-bit range
    Int32 = 2,
    /// Integer outside signed 32-bit range
    Int64 = 3,
    /// IEEE double
    Double = 4,
    /// UTF-8 string
    String = 5,
    /// Ordered sequence of items
    Array = 6,
    /// Insertion-ordered key/item mapping
    Object = 7,
}

impl ItemType {
    /// Map a wire tag byte back to its type.
    pub fn from_tag(tag: u8) -> Option<Self> {
        Some(match tag {
            0 => ItemType::Null,
            1 => ItemType::Bool,
            2 => ItemType::Int32,
            3 => ItemType::Int64,
            4 => ItemType::Double,
            5 => ItemType::String,
            6 => ItemType::Array,
            7 => ItemType::Object,
            _ => return None,
        })
    }

    /// The wire tag byte.
    pub fn tag(self) -> u8 {
        self as u8
    }

    /// Returns the type name for error messages.
    pub fn name(self) -> &'static str {
        match self {
            ItemType::Null => "null",
            ItemType::Bool => "boolean",
            ItemType::Int32 => "int32",
            ItemType::Int64 => "int64",
            ItemType::Double => "double",
            ItemType::String => "string",
            ItemType::Array => "array",
            ItemType::Object => "object",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single JSON value.
///
/// Doubles compare by bit pattern, so `Item` equality is a true equivalence
/// relation (`NaN == NaN`, `0.0 != -0.0`) and agrees with the structural hash.
#[derive(Debug, Clone, Default)]
pub enum Item {
    /// JSON null literal
    #[default]
    Null,
    /// JSON boolean (true/false)
    Bool(bool),
    /// Integer that fits in `i32`
    Int32(i32),
    /// Integer outside `i32` range, or explicitly widened
    Int64(i64),
    /// Number written with a fraction or exponent
    Double(f64),
    /// JSON string
    String(String),
    /// JSON array
    Array(Array),
    /// JSON object
    Object(Object),
}

impl Item {
    /// Returns the active tag.
    pub fn item_type(&self) -> ItemType {
        match self {
            Item::Null => ItemType::Null,
            Item::Bool(_) => ItemType::Bool,
            Item::Int32(_) => ItemType::Int32,
            Item::Int64(_) => ItemType::Int64,
            Item::Double(_) => ItemType::Double,
            Item::String(_) => ItemType::String,
            Item::Array(_) => ItemType::Array,
            Item::Object(_) => ItemType::Object,
        }
    }

    /// Returns true if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Item::Null)
    }

    /// Returns true if this is a boolean value.
    pub fn is_bool(&self) -> bool {
        matches!(self, Item::Bool(_))
    }

    /// Returns true if this is a 32-bit integer.
    pub fn is_i32(&self) -> bool {
        matches!(self, Item::Int32(_))
    }

    /// Returns true if this is a 64-bit integer.
    pub fn is_i64(&self) -> bool {
        matches!(self, Item::Int64(_))
    }

    /// Returns true if this is a double.
    pub fn is_f64(&self) -> bool {
        matches!(self, Item::Double(_))
    }

    /// Returns true if this is a string value.
    pub fn is_string(&self) -> bool {
        matches!(self, Item::String(_))
    }

    /// Returns true if this is an array value.
    pub fn is_array(&self) -> bool {
        matches!(self, Item::Array(_))
    }

    /// Returns true if this is an object value.
    pub fn is_object(&self) -> bool {
        matches!(self, Item::Object(_))
    }

    /// Returns the boolean value if this is a Bool, None otherwise.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Item::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the value if this is an Int32, None otherwise.
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Item::Int32(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the value if this is an Int64, None otherwise.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Item::Int64(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the value if this is a Double, None otherwise.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Item::Double(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns a reference to the string if this is a String, None otherwise.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Item::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns a reference to the array if this is an Array, None otherwise.
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Item::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Mutable variant of [`Item::as_array`].
    pub fn as_array_mut(&mut self) -> Option<&mut Array> {
        match self {
            Item::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Returns a reference to the object if this is an Object, None otherwise.
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Item::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Mutable variant of [`Item::as_object`].
    pub fn as_object_mut(&mut self) -> Option<&mut Object> {
        match self {
            Item::Object(o) => Some(o),
            _ => None,
        }
    }

    fn mismatch(&self, expected: ItemType) -> ErrorCode {
        ErrorCode::TypeMismatch {
            expected,
            found: self.item_type(),
        }
    }

    /// Strict boolean accessor.
    pub fn to_bool(&self) -> JsonResult<bool> {
        self.as_bool().ok_or_else(|| self.mismatch(ItemType::Bool))
    }

    /// Strict 32-bit integer accessor. An `Int64` is a mismatch even when
    /// its value would fit.
    pub fn to_i32(&self) -> JsonResult<i32> {
        self.as_i32().ok_or_else(|| self.mismatch(ItemType::Int32))
    }

    /// Strict 64-bit integer accessor. An `Int32` is a mismatch; use
    /// [`Item::widen`] for an explicit conversion.
    pub fn to_i64(&self) -> JsonResult<i64> {
        self.as_i64().ok_or_else(|| self.mismatch(ItemType::Int64))
    }

    /// Strict double accessor.
    pub fn to_f64(&self) -> JsonResult<f64> {
        self.as_f64().ok_or_else(|| self.mismatch(ItemType::Double))
    }

    /// Strict string accessor.
    pub fn to_str(&self) -> JsonResult<&str> {
        self.as_str().ok_or_else(|| self.mismatch(ItemType::String))
    }

    /// Strict array accessor.
    pub fn to_array(&self) -> JsonResult<&Array> {
        self.as_array().ok_or_else(|| self.mismatch(ItemType::Array))
    }

    /// Strict object accessor.
    pub fn to_object(&self) -> JsonResult<&Object> {
        self.as_object().ok_or_else(|| self.mismatch(ItemType::Object))
    }

    /// Consume the item, returning the owned string.
    pub fn into_string(self) -> JsonResult<String> {
        match self {
            Item::String(s) => Ok(s),
            other => Err(other.mismatch(ItemType::String)),
        }
    }

    /// Consume the item, returning the owned array.
    pub fn into_array(self) -> JsonResult<Array> {
        match self {
            Item::Array(a) => Ok(a),
            other => Err(other.mismatch(ItemType::Array)),
        }
    }

    /// Consume the item, returning the owned object.
    pub fn into_object(self) -> JsonResult<Object> {
        match self {
            Item::Object(o) => Ok(o),
            other => Err(other.mismatch(ItemType::Object)),
        }
    }

    /// Explicitly widen an `Int32` to `Int64`. Other tags are returned as-is.
    pub fn widen(self) -> Item {
        match self {
            Item::Int32(n) => Item::Int64(i64::from(n)),
            other => other,
        }
    }

    /// 1 for scalars and null, character count for strings, element or key
    /// count for containers.
    pub fn size(&self) -> usize {
        match self {
            Item::String(s) => s.chars().count(),
            Item::Array(a) => a.len(),
            Item::Object(o) => o.len(),
            _ => 1,
        }
    }

    /// Move the value out, leaving `Null` in its place.
    pub fn take(&mut self) -> Item {
        std::mem::take(self)
    }

    /// Reset to `Null`, releasing any owned subtree.
    pub fn clear(&mut self) {
        *self = Item::Null;
    }

    /// Compact JSON text of this item.
    pub fn to_raw(&self) -> String {
        super::writer::to_compact_string(self)
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Item::Null, Item::Null) => true,
            (Item::Bool(a), Item::Bool(b)) => a == b,
            (Item::Int32(a), Item::Int32(b)) => a == b,
            (Item::Int64(a), Item::Int64(b)) => a == b,
            (Item::Double(a), Item::Double(b)) => a.to_bits() == b.to_bits(),
            (Item::String(a), Item::String(b)) => a == b,
            (Item::Array(a), Item::Array(b)) => a == b,
            (Item::Object(a), Item::Object(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Item {}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_raw())
    }
}

impl From<()> for Item {
    fn from((): ()) -> Self {
        Item::Null
    }
}

impl From<bool> for Item {
    fn from(value: bool) -> Self {
        Item::Bool(value)
    }
}

impl From<i32> for Item {
    fn from(value: i32) -> Self {
        Item::Int32(value)
    }
}

impl From<i64> for Item {
    fn from(value: i64) -> Self {
        Item::Int64(value)
    }
}

impl From<f64> for Item {
    fn from(value: f64) -> Self {
        Item::Double(value)
    }
}

impl From<&str> for Item {
    fn from(value: &str) -> Self {
        Item::String(value.to_owned())
    }
}

impl From<String> for Item {
    fn from(value: String) -> Self {
        Item::String(value)
    }
}

impl From<Array> for Item {
    fn from(value: Array) -> Self {
        Item::Array(value)
    }
}

impl From<Object> for Item {
    fn from(value: Object) -> Self {
        Item::Object(value)
    }
}

impl<T: Into<Item>> From<Option<T>> for Item {
    fn from(value: Option<T>) -> Self {
        value.map_or(Item::Null, Into::into)
    }
}
