//! Ordered sequence of items.

use std::fmt;
use std::ops::AddAssign;
use std::str::FromStr;

use super::limits::Limits;
use super::object::Object;
use super::parser;
use super::types::Item;
use super::writer;
use crate::error::{ErrorCode, JsonResult};

/// A JSON array. Duplicates are allowed and order is significant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Array {
    items: Vec<Item>,
}

impl Array {
    /// Create an empty array.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an array of `len` nulls.
    pub fn with_len(len: usize) -> Self {
        Self::from_elem(len, &Item::Null)
    }

    /// Create an array holding `len` deep copies of `item`.
    pub fn from_elem(len: usize, item: &Item) -> Self {
        Self {
            items: vec![item.clone(); len],
        }
    }

    /// Parse text whose top-level value must be an array.
    pub fn parse(text: &str) -> JsonResult<Self> {
        parser::parse_array(text.as_bytes(), Limits::default())
    }

    /// Parse with explicit limits.
    pub fn parse_with_limits(text: &str, limits: Limits) -> JsonResult<Self> {
        parser::parse_array(text.as_bytes(), limits)
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if there are no elements.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append an item.
    pub fn add(&mut self, item: impl Into<Item>) {
        self.items.push(item.into());
    }

    /// Element at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    /// Mutable element at `index`, if any.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Item> {
        self.items.get_mut(index)
    }

    /// Bounds-checked element access.
    pub fn at(&self, index: usize) -> JsonResult<&Item> {
        let len = self.items.len();
        self.items.get(index).ok_or_else(|| out_of_bounds(index, len))
    }

    /// Bounds-checked mutable element access.
    pub fn at_mut(&mut self, index: usize) -> JsonResult<&mut Item> {
        let len = self.items.len();
        self.items
            .get_mut(index)
            .ok_or_else(|| out_of_bounds(index, len))
    }

    /// Index of the first element equal to `item`.
    pub fn find(&self, item: &Item) -> Option<usize> {
        self.items.iter().position(|candidate| candidate == item)
    }

    /// Remove the first element equal to `item` and return it.
    pub fn remove(&mut self, item: &Item) -> JsonResult<Item> {
        let index = self
            .find(item)
            .ok_or_else(|| ErrorCode::NotFound(format!("item {item} not in array")))?;
        Ok(self.items.remove(index))
    }

    /// Remove the element at `index` and return it.
    pub fn remove_at(&mut self, index: usize) -> JsonResult<Item> {
        if index >= self.items.len() {
            return Err(out_of_bounds(index, self.items.len()));
        }
        Ok(self.items.remove(index))
    }

    /// Truncate, or pad with nulls, to `len` elements.
    pub fn resize(&mut self, len: usize) {
        self.items.resize(len, Item::Null);
    }

    /// Remove all elements.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// First element, if any.
    pub fn first(&self) -> Option<&Item> {
        self.items.first()
    }

    /// Last element, if any.
    pub fn last(&self) -> Option<&Item> {
        self.items.last()
    }

    /// Iterate over elements in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    /// Iterate mutably over elements in order.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Item> {
        self.items.iter_mut()
    }

    /// Borrow the elements as a slice.
    pub fn as_slice(&self) -> &[Item] {
        &self.items
    }

    /// Consume the array, returning its elements.
    pub fn into_vec(self) -> Vec<Item> {
        self.items
    }

    fn to_list<T>(&self, convert: impl Fn(&Item) -> JsonResult<T>) -> JsonResult<Vec<T>> {
        self.items.iter().map(convert).collect()
    }

    /// Every element as a boolean.
    pub fn to_list_bool(&self) -> JsonResult<Vec<bool>> {
        self.to_list(Item::to_bool)
    }

    /// Every element as an `i32`.
    pub fn to_list_i32(&self) -> JsonResult<Vec<i32>> {
        self.to_list(Item::to_i32)
    }

    /// Every element as an `i64`.
    pub fn to_list_i64(&self) -> JsonResult<Vec<i64>> {
        self.to_list(Item::to_i64)
    }

    /// Every element as an `f64`.
    pub fn to_list_f64(&self) -> JsonResult<Vec<f64>> {
        self.to_list(Item::to_f64)
    }

    /// Every element as an owned string.
    pub fn to_list_string(&self) -> JsonResult<Vec<String>> {
        self.to_list(|item| item.to_str().map(str::to_owned))
    }

    /// Every element as a deep-copied array.
    pub fn to_list_array(&self) -> JsonResult<Vec<Array>> {
        self.to_list(|item| item.to_array().cloned())
    }

    /// Every element as a deep-copied object.
    pub fn to_list_object(&self) -> JsonResult<Vec<Object>> {
        self.to_list(|item| item.to_object().cloned())
    }

    /// Compact JSON text.
    pub fn to_compact_string(&self) -> String {
        writer::array_to_compact_string(self)
    }

    /// Indented JSON text.
    pub fn to_pretty_string(&self) -> String {
        writer::array_to_pretty_string(self)
    }
}

fn out_of_bounds(index: usize, len: usize) -> ErrorCode {
    ErrorCode::NotFound(format!("index {index} out of bounds (length {len})"))
}

impl<T: Into<Item>> From<Vec<T>> for Array {
    fn from(values: Vec<T>) -> Self {
        values.into_iter().map(Into::into).collect()
    }
}

impl FromIterator<Item> for Array {
    fn from_iter<I: IntoIterator<Item = Item>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl Extend<Item> for Array {
    fn extend<I: IntoIterator<Item = Item>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl IntoIterator for Array {
    type Item = Item;
    type IntoIter = std::vec::IntoIter<Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Array {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<'a> IntoIterator for &'a mut Array {
    type Item = &'a mut Item;
    type IntoIter = std::slice::IterMut<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter_mut()
    }
}

impl AddAssign<&Array> for Array {
    fn add_assign(&mut self, other: &Array) {
        self.items.extend(other.items.iter().cloned());
    }
}

impl AddAssign<Array> for Array {
    fn add_assign(&mut self, other: Array) {
        self.items.extend(other.items);
    }
}

impl std::ops::Add<&Array> for &Array {
    type Output = Array;

    fn add(self, other: &Array) -> Array {
        let mut joined = self.clone();
        joined += other;
        joined
    }
}

impl std::ops::Add for Array {
    type Output = Array;

    fn add(mut self, other: Array) -> Array {
        self += other;
        self
    }
}

impl FromStr for Array {
    type Err = ErrorCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Array {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_compact_string())
    }
}
