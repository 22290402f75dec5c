//! Deep merge of two objects.

use super::object::Object;
use super::types::Item;

/// Recursively union `src` into `dst`.
///
/// For each key of `src`, in `src`'s order:
/// - missing from `dst`: appended to `dst`;
/// - present in both and both values are objects: merged recursively;
/// - otherwise: `src`'s value replaces `dst`'s in place.
pub fn merge<'a>(dst: &'a mut Object, src: &Object) -> &'a mut Object {
    for (key, value) in src {
        match (dst.get_mut(key), value) {
            (Some(Item::Object(nested)), Item::Object(incoming)) => {
                merge(nested, incoming);
            }
            (Some(slot), _) => *slot = value.clone(),
            (None, _) => {
                dst.add(key, value.clone());
            }
        }
    }
    dst
}
