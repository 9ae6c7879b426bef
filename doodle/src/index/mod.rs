//! Secondary indexes.
//!
//! An index maps the stringified value of one field to the ids of the
//! documents of one collection holding that value. It is stored next to the
//! collections in the same tree, under [derive_index_name].

mod field_index;
mod index_manager;

pub use field_index::*;
pub(crate) use index_manager::*;

use crate::common::{INDEX_NAME_SEPARATOR, INDEX_SUFFIX};

/// Computes the tree key of the index of `field` in `collection`.
///
/// ```
/// use doodle::index::derive_index_name;
///
/// assert_eq!(derive_index_name("items", "age"), "items_age_index");
/// ```
pub fn derive_index_name(collection: &str, field: &str) -> String {
    format!("{}{}{}{}", collection, INDEX_NAME_SEPARATOR, field, INDEX_SUFFIX)
}

/// Checks whether some field of `collection` derives `index_name`.
///
/// Names are not unique: `("a_b", "c")` and `("a", "b_c")` both derive
/// `a_b_c_index`.
pub(crate) fn derives_index_name(collection: &str, index_name: &str) -> bool {
    index_name
        .strip_prefix(collection)
        .and_then(|rest| rest.strip_prefix(INDEX_NAME_SEPARATOR))
        .and_then(|rest| rest.strip_suffix(INDEX_SUFFIX))
        .is_some_and(|field| !field.is_empty())
}
