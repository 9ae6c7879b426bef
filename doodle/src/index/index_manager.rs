use crate::collection::{resolve_for_read, Document, WriteResult};
use crate::common::{is_empty_value, stringify_value, Value};
use crate::errors::{DoodleError, DoodleResult, ErrorKind};
use crate::index::{derive_index_name, derives_index_name, FieldIndex};
use crate::store::StoreTree;

/// Maintains the field indexes of one collection inside a loaded tree.
///
/// Indexes are authoritative: every write path calls into the manager so
/// that an id listed under a value always means the document currently
/// holds that value. Index entries live in the tree under
/// `"<collection>_<field>_index"`.
pub(crate) struct IndexManager {
    collection_name: String,
}

impl IndexManager {
    pub fn new(collection_name: &str) -> Self {
        IndexManager {
            collection_name: collection_name.to_string(),
        }
    }

    pub fn index_name(&self, field: &str) -> String {
        derive_index_name(&self.collection_name, field)
    }

    /// Checks that no other collection of the tree derives the same index
    /// name. A shared index is neither maintained nor used for lookups.
    fn owns_index(&self, tree: &StoreTree, index_name: &str) -> bool {
        tree.collection_names()
            .iter()
            .filter(|other| **other != self.collection_name)
            .all(|other| !derives_index_name(other, index_name))
    }

    fn owned_index_mut<'t>(
        &self,
        tree: &'t mut StoreTree,
        field: &str,
    ) -> Option<&'t mut FieldIndex> {
        let index_name = self.index_name(field);
        if !self.owns_index(tree, &index_name) {
            return None;
        }
        tree.index_mut(&index_name)
    }

    #[cfg(test)]
    fn has_index(&self, tree: &StoreTree, field: &str) -> bool {
        tree.index(&self.index_name(field)).is_some()
    }

    /// Builds the index of `field` from the current documents.
    ///
    /// Existing buckets are discarded first, so running it again over the
    /// same documents gives identical contents.
    pub fn create_index(&self, tree: &mut StoreTree, field: &str) -> DoodleResult<WriteResult> {
        if field.is_empty() {
            log::error!("Cannot create an index on an empty field name");
            return Err(DoodleError::new(
                "Cannot create an index on an empty field name",
                ErrorKind::InvalidOperation,
            ));
        }

        let documents = resolve_for_read(tree, &self.collection_name)?;
        let index_name = self.index_name(field);
        if !self.owns_index(tree, &index_name) {
            log::warn!(
                "Index {} is shared with another collection and will not be used",
                index_name
            );
        }

        let entries: Vec<(u64, Vec<String>)> = documents
            .iter()
            .filter_map(|document| {
                let id = document.id()?;
                let keys = document.get(field).map(index_keys).unwrap_or_default();
                (!keys.is_empty()).then_some((id, keys))
            })
            .collect();

        let index = tree.index_or_insert(&index_name)?;
        index.clear();

        let mut indexed_ids = Vec::with_capacity(entries.len());
        for (id, keys) in entries {
            for key in &keys {
                index.add(key, id);
            }
            indexed_ids.push(id);
        }

        log::debug!(
            "Indexed {} documents of {} on field {}",
            indexed_ids.len(),
            self.collection_name,
            field
        );
        let message = format!(
            "Successfully indexed \"{}\" under collection: {}",
            field, self.collection_name
        );
        Ok(WriteResult::new(message, indexed_ids))
    }

    /// Writes every field of a newly pushed document into the existing
    /// indexes of the collection.
    pub fn record_on_push(&self, tree: &mut StoreTree, document: &Document) {
        let Some(id) = document.id() else {
            return;
        };

        for (field, value) in document.iter() {
            if let Some(index) = self.owned_index_mut(tree, field) {
                for key in index_keys(value) {
                    index.add(&key, id);
                }
            }
        }
    }

    /// Moves `id` to the bucket(s) of the new `value` of `field`.
    ///
    /// The id is taken out of every bucket of the field's index first, so a
    /// stale entry under the previous value never survives an edit. Fields
    /// without an index are left alone.
    pub fn record_on_edit(&self, tree: &mut StoreTree, field: &str, value: &Value, id: u64) {
        if let Some(index) = self.owned_index_mut(tree, field) {
            index.remove_id(id);
            for key in index_keys(value) {
                index.add(&key, id);
            }
        }
    }

    /// Removes `id` from the index of `field`, if there is one.
    pub fn remove_field(&self, tree: &mut StoreTree, field: &str, id: u64) {
        if let Some(index) = self.owned_index_mut(tree, field) {
            index.remove_id(id);
        }
    }

    /// Removes a document from the indexes of all its fields.
    pub fn remove_document(&self, tree: &mut StoreTree, document: &Document) {
        let Some(id) = document.id() else {
            return;
        };

        for field in document.fields() {
            self.remove_field(tree, field, id);
        }
    }

    /// Returns the ids indexed under `value` for `field`, or `None` if the
    /// field has no index of its own.
    pub fn lookup<'t>(&self, tree: &'t StoreTree, field: &str, value: &Value) -> Option<&'t [u64]> {
        let index_name = self.index_name(field);
        if !self.owns_index(tree, &index_name) {
            return None;
        }
        let index = tree.index(&index_name)?;
        Some(index.bucket(&stringify_value(value)).unwrap_or(&[]))
    }
}

/// Bucket keys a field value is indexed under.
///
/// Empty values produce no key, arrays one key per indexable element and
/// objects none.
fn index_keys(value: &Value) -> Vec<String> {
    let mut keys = Vec::new();
    collect_index_keys(value, &mut keys);
    keys
}

fn collect_index_keys(value: &Value, keys: &mut Vec<String>) {
    match value {
        Value::Array(items) => {
            for item in items {
                collect_index_keys(item, keys);
            }
        }
        Value::Object(_) => {}
        scalar if is_empty_value(scalar) => {}
        scalar => {
            let key = stringify_value(scalar);
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
    }
}
