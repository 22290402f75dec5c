//! Bridges to the serde ecosystem.
//!
//! | Item     | serde_json                                    |
//! |----------|-----------------------------------------------|
//! | `Null`   | null                                          |
//! | `Bool`   | true/false                                    |
//! | `Int32`  | integer within i32                            |
//! | `Int64`  | other integer within i64                      |
//! | `Double` | other number; non-finite values become null   |
//! | `String` | string                                        |
//! | `Array`  | array                                         |
//! | `Object` | object, insertion order kept                  |

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::{Map, Number, Value as JsonValue};

use crate::json::{Array, Item, Object};

impl Serialize for Item {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Item::Null => serializer.serialize_unit(),
            Item::Bool(b) => serializer.serialize_bool(*b),
            Item::Int32(n) => serializer.serialize_i32(*n),
            Item::Int64(n) => serializer.serialize_i64(*n),
            Item::Double(d) => serializer.serialize_f64(*d),
            Item::String(s) => serializer.serialize_str(s),
            Item::Array(a) => a.serialize(serializer),
            Item::Object(o) => o.serialize(serializer),
        }
    }
}

impl Serialize for Array {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for item in self {
            seq.serialize_element(item)?;
        }
        seq.end()
    }
}

impl Serialize for Object {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl From<JsonValue> for Item {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => Item::Null,
            JsonValue::Bool(b) => Item::Bool(b),
            JsonValue::Number(n) => number_to_item(&n),
            JsonValue::String(s) => Item::String(s),
            JsonValue::Array(values) => Item::Array(values.into_iter().map(Item::from).collect()),
            JsonValue::Object(map) => Item::Object(
                map.into_iter()
                    .map(|(key, value)| (key, Item::from(value)))
                    .collect(),
            ),
        }
    }
}

fn number_to_item(n: &Number) -> Item {
    match n.as_i64() {
        Some(i) => i32::try_from(i).map_or(Item::Int64(i), Item::Int32),
        // u64 above i64::MAX or a float.
        None => Item::Double(n.as_f64().unwrap_or(f64::NAN)),
    }
}

impl From<&Item> for JsonValue {
    fn from(item: &Item) -> Self {
        match item {
            Item::Null => JsonValue::Null,
            Item::Bool(b) => JsonValue::Bool(*b),
            Item::Int32(n) => JsonValue::Number((*n).into()),
            Item::Int64(n) => JsonValue::Number((*n).into()),
            Item::Double(d) => Number::from_f64(*d).map_or(JsonValue::Null, JsonValue::Number),
            Item::String(s) => JsonValue::String(s.clone()),
            Item::Array(a) => JsonValue::Array(a.iter().map(JsonValue::from).collect()),
            Item::Object(o) => JsonValue::Object(
                o.iter()
                    .map(|(key, value)| (key.to_string(), JsonValue::from(value)))
                    .collect::<Map<String, JsonValue>>(),
            ),
        }
    }
}

impl From<Item> for JsonValue {
    fn from(item: Item) -> Self {
        JsonValue::from(&item)
    }
}
