//! Insertion-ordered mapping from string key to item.
//!
//! The object keeps two structures in lockstep: an insertion-order sequence of
//! entries and a hash index from key to position in that sequence. Every key in
//! the index has exactly one entry, and iteration walks the sequence, so keys
//! come back in first-insertion order. Overwriting a key keeps its position;
//! removing a key drops it from both structures in the same call.

use std::fmt;
use std::ops::AddAssign;
use std::str::FromStr;

use ahash::AHashMap;

use super::limits::Limits;
use super::parser;
use super::types::Item;
use super::writer;
use crate::error::{ErrorCode, JsonResult};

/// A JSON object.
///
/// Equality ignores key order: two objects are equal when they hold the same
/// key set with equal values.
#[derive(Clone, Default)]
pub struct Object {
    entries: Vec<(String, Item)>,
    index: AHashMap<String, usize>,
}

impl Object {
    /// Create an empty object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty object with room for `capacity` keys.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            index: AHashMap::with_capacity(capacity),
        }
    }

    /// Parse text whose top-level value must be an object.
    pub fn parse(text: &str) -> JsonResult<Self> {
        parser::parse_object(text.as_bytes(), Limits::default())
    }

    /// Parse text that may contain `#` line comments.
    pub fn parse_with_comments(text: &str) -> JsonResult<Self> {
        parser::parse_object(text.as_bytes(), Limits::with_comments())
    }

    /// Parse with explicit limits.
    pub fn parse_with_limits(text: &str, limits: Limits) -> JsonResult<Self> {
        parser::parse_object(text.as_bytes(), limits)
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if `key` is present. Never mutates.
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Value stored under `key`, if any.
    pub fn get(&self, key: &str) -> Option<&Item> {
        let pos = *self.index.get(key)?;
        self.entries.get(pos).map(|(_, value)| value)
    }

    /// Mutable value stored under `key`, if any.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Item> {
        let pos = *self.index.get(key)?;
        self.entries.get_mut(pos).map(|(_, value)| value)
    }

    /// Value stored under `key`, or `NotFound`. Never mutates.
    pub fn at(&self, key: &str) -> JsonResult<&Item> {
        self.get(key).ok_or_else(|| missing(key))
    }

    /// Upsert: return the value under `key`, first appending `key` with a
    /// `Null` value if it is missing.
    pub fn get_or_insert(&mut self, key: &str) -> &mut Item {
        let pos = match self.index.get(key) {
            Some(&pos) => pos,
            None => self.push_entry(key.to_owned(), Item::Null),
        };
        &mut self.entries[pos].1
    }

    /// Insert `value` under `key`. An existing key keeps its position and
    /// has its value replaced; the previous value is returned.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<Item>) -> Option<Item> {
        let key = key.into();
        let value = value.into();
        match self.index.get(&key) {
            Some(&pos) => self
                .entries
                .get_mut(pos)
                .map(|(_, slot)| std::mem::replace(slot, value)),
            None => {
                self.push_entry(key, value);
                None
            }
        }
    }

    fn push_entry(&mut self, key: String, value: Item) -> usize {
        let pos = self.entries.len();
        self.index.insert(key.clone(), pos);
        self.entries.push((key, value));
        pos
    }

    /// Remove `key` and return its value.
    pub fn remove(&mut self, key: &str) -> JsonResult<Item> {
        let pos = self.index.remove(key).ok_or_else(|| missing(key))?;
        let (_, value) = self.entries.remove(pos);
        for slot in self.index.values_mut() {
            if *slot > pos {
                *slot -= 1;
            }
        }
        Ok(value)
    }

    /// Remove every key.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &Item> + '_ {
        self.entries.iter().map(|(_, value)| value)
    }

    /// Key/value pairs in insertion order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.entries.iter(),
        }
    }

    /// Mutable key/value pairs in insertion order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut Item)> + '_ {
        self.entries
            .iter_mut()
            .map(|(key, value)| (key.as_str(), value))
    }

    /// Deep copy of the entries as an ordered pair list.
    pub fn to_pairs(&self) -> Vec<(String, Item)> {
        self.entries.clone()
    }

    /// Recursively merge `src` into this object. See [`super::merge::merge`].
    pub fn merge(&mut self, src: &Object) -> &mut Self {
        super::merge::merge(self, src)
    }

    /// Compact JSON text.
    pub fn to_compact_string(&self) -> String {
        writer::object_to_compact_string(self)
    }

    /// Indented JSON text.
    pub fn to_pretty_string(&self) -> String {
        writer::object_to_pretty_string(self)
    }
}

fn missing(key: &str) -> ErrorCode {
    ErrorCode::NotFound(format!("key {key:?}"))
}

/// Iterator over an object's entries in insertion order.
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    inner: std::slice::Iter<'a, (String, Item)>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a Item);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, value)| (key.as_str(), value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner
            .next_back()
            .map(|(key, value)| (key.as_str(), value))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a Object {
    type Item = (&'a str, &'a Item);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for Object {
    type Item = (String, Item);
    type IntoIter = std::vec::IntoIter<(String, Item)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: Into<String>, V: Into<Item>> FromIterator<(K, V)> for Object {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut object = Object::new();
        object.extend(iter);
        object
    }
}

impl<K: Into<String>, V: Into<Item>> Extend<(K, V)> for Object {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.add(key, value);
        }
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, value)| other.get(key) == Some(value))
    }
}

impl Eq for Object {}

/// Shallow union: `other`'s values win, keys new to `self` are appended in
/// `other`'s order.
impl AddAssign<&Object> for Object {
    fn add_assign(&mut self, other: &Object) {
        for (key, value) in other {
            self.add(key, value.clone());
        }
    }
}

impl AddAssign<Object> for Object {
    fn add_assign(&mut self, other: Object) {
        self.extend(other);
    }
}

impl std::ops::Add<&Object> for &Object {
    type Output = Object;

    fn add(self, other: &Object) -> Object {
        let mut union = self.clone();
        union += other;
        union
    }
}

impl std::ops::Add for Object {
    type Output = Object;

    fn add(mut self, other: Object) -> Object {
        self += other;
        self
    }
}

impl FromStr for Object {
    type Err = ErrorCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_compact_string())
    }
}
