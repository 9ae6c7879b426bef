use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The buckets of one `(collection, field)` index.
///
/// Each bucket maps the stringified field value to the ids of the documents
/// holding that value. Ids inside a bucket are kept ascending and unique,
/// buckets themselves stay in the order they were first created.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldIndex {
    buckets: IndexMap<String, Vec<u64>>,
}

impl FieldIndex {
    pub fn new() -> Self {
        FieldIndex {
            buckets: IndexMap::new(),
        }
    }

    /// Returns the ids indexed under `key`.
    pub fn bucket(&self, key: &str) -> Option<&[u64]> {
        self.buckets.get(key).map(Vec::as_slice)
    }

    /// Checks whether `id` is indexed under `key`.
    pub fn contains(&self, key: &str, id: u64) -> bool {
        self.bucket(key)
            .map(|ids| ids.binary_search(&id).is_ok())
            .unwrap_or(false)
    }

    /// Adds `id` to the bucket of `key`, creating the bucket if needed.
    ///
    /// Returns `false` if the id was already present.
    pub fn add(&mut self, key: &str, id: u64) -> bool {
        let ids = self.buckets.entry(key.to_string()).or_default();
        // index always are in ascending format
        match ids.binary_search(&id) {
            Ok(_) => false,
            Err(position) => {
                ids.insert(position, id);
                true
            }
        }
    }

    /// Removes `id` from every bucket and drops the buckets left empty.
    ///
    /// Returns the number of buckets the id was removed from.
    pub fn remove_id(&mut self, id: u64) -> usize {
        let mut removed = 0;
        for ids in self.buckets.values_mut() {
            if let Ok(position) = ids.binary_search(&id) {
                ids.remove(position);
                removed += 1;
            }
        }
        self.buckets.retain(|_, ids| !ids.is_empty());
        removed
    }

    /// Removes every bucket.
    pub fn clear(&mut self) {
        self.buckets.clear();
    }

    /// Number of distinct indexed values.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<u64>)> {
        self.buckets.iter()
    }

    /// Restores the ascending/unique order of every bucket.
    ///
    /// Files written by other tools may carry unsorted or repeated ids.
    pub(crate) fn normalize(&mut self) {
        for ids in self.buckets.values_mut() {
            ids.sort_unstable();
            ids.dedup();
        }
        self.buckets.retain(|_, ids| !ids.is_empty());
    }
}
