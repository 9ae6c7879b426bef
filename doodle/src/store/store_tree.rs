use crate::collection::Document;
use crate::common::{Value, SEQUENCE_TABLE};
use crate::errors::{DoodleError, DoodleResult, ErrorKind};
use crate::index::FieldIndex;
use indexmap::IndexMap;
use serde_json::Map;

/// A collection is the ordered list of its documents.
pub type Collection = Vec<Document>;

/// One top-level entry of the store file.
#[derive(Clone, Debug, PartialEq)]
pub enum StoreEntry {
    /// A JSON array of documents.
    Collection(Collection),
    /// A JSON object mapping stringified values to id arrays.
    Index(FieldIndex),
    /// The reserved table of the highest id handed out per collection.
    Sequences(IndexMap<String, u64>),
}

impl StoreEntry {
    fn kind_name(&self) -> &'static str {
        match self {
            StoreEntry::Collection(_) => "collection",
            StoreEntry::Index(_) => "index",
            StoreEntry::Sequences(_) => "sequence table",
        }
    }
}

/// The whole store held in memory between a load and a save.
///
/// Entries keep the order they have in the file; new entries are appended.
/// Whether an entry is a collection or an index is decided by its JSON shape
/// (array or object), the sequence table by its reserved key.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StoreTree {
    entries: IndexMap<String, StoreEntry>,
}

impl StoreTree {
    pub fn new() -> Self {
        StoreTree {
            entries: IndexMap::new(),
        }
    }

    /// Parses the text of a store file.
    ///
    /// Blank text is an empty store.
    pub fn parse(text: &str) -> DoodleResult<StoreTree> {
        if text.trim().is_empty() {
            return Ok(StoreTree::new());
        }

        let value: Value = serde_json::from_str(text).map_err(|e| {
            DoodleError::new_with_cause(
                "Error parsing JSON file",
                ErrorKind::ParseError,
                e.into(),
            )
        })?;
        StoreTree::from_value(value)
    }

    /// Builds a tree from an already parsed JSON value.
    pub fn from_value(value: Value) -> DoodleResult<StoreTree> {
        let object = match value {
            Value::Object(object) => object,
            other => {
                return Err(DoodleError::new(
                    &format!("Store must be a JSON object, found {}", json_type(&other)),
                    ErrorKind::ParseError,
                ))
            }
        };

        let mut entries = IndexMap::with_capacity(object.len());
        for (key, value) in object {
            let entry = classify_entry(&key, value)?;
            entries.insert(key, entry);
        }
        Ok(StoreTree { entries })
    }

    /// Converts the tree back into a JSON object, preserving entry order.
    pub fn to_value(&self) -> DoodleResult<Value> {
        let mut object = Map::with_capacity(self.entries.len());
        for (key, entry) in &self.entries {
            let value = match entry {
                StoreEntry::Collection(documents) => serde_json::to_value(documents)?,
                StoreEntry::Index(index) => serde_json::to_value(index)?,
                StoreEntry::Sequences(sequences) => serde_json::to_value(sequences)?,
            };
            object.insert(key.clone(), value);
        }
        Ok(Value::Object(object))
    }

    /// Renders the tree as the store file text (2-space indentation).
    pub fn to_pretty_string(&self) -> DoodleResult<String> {
        Ok(serde_json::to_string_pretty(&self.to_value()?)?)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the named collection, if the key holds one.
    pub fn collection(&self, name: &str) -> Option<&Collection> {
        match self.entries.get(name) {
            Some(StoreEntry::Collection(documents)) => Some(documents),
            _ => None,
        }
    }

    pub fn collection_mut(&mut self, name: &str) -> Option<&mut Collection> {
        match self.entries.get_mut(name) {
            Some(StoreEntry::Collection(documents)) => Some(documents),
            _ => None,
        }
    }

    /// Returns the collection stored under `name`, creating it when the key
    /// is free.
    ///
    /// # Errors
    ///
    /// Returns `InvalidOperation` if the key is held by an index or the
    /// sequence table.
    pub fn collection_or_insert(&mut self, name: &str) -> DoodleResult<&mut Collection> {
        let entry = self
            .entries
            .entry(name.to_string())
            .or_insert_with(|| StoreEntry::Collection(Vec::new()));

        match entry {
            StoreEntry::Collection(documents) => Ok(documents),
            other => {
                let message = format!("'{}' is a {}, not a collection", name, other.kind_name());
                log::error!("{}", message);
                Err(DoodleError::new(&message, ErrorKind::InvalidOperation))
            }
        }
    }

    /// Names of all collections in file order.
    pub fn collection_names(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(_, entry)| matches!(entry, StoreEntry::Collection(_)))
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Returns the index stored under `index_name`, if the key holds one.
    pub fn index(&self, index_name: &str) -> Option<&FieldIndex> {
        match self.entries.get(index_name) {
            Some(StoreEntry::Index(index)) => Some(index),
            _ => None,
        }
    }

    pub fn index_mut(&mut self, index_name: &str) -> Option<&mut FieldIndex> {
        match self.entries.get_mut(index_name) {
            Some(StoreEntry::Index(index)) => Some(index),
            _ => None,
        }
    }

    /// Returns the index stored under `index_name`, creating an empty one when
    /// the key is free.
    pub fn index_or_insert(&mut self, index_name: &str) -> DoodleResult<&mut FieldIndex> {
        let entry = self
            .entries
            .entry(index_name.to_string())
            .or_insert_with(|| StoreEntry::Index(FieldIndex::new()));

        match entry {
            StoreEntry::Index(index) => Ok(index),
            other => {
                let message = format!("'{}' is a {}, not an index", index_name, other.kind_name());
                log::error!("{}", message);
                Err(DoodleError::new(&message, ErrorKind::InvalidOperation))
            }
        }
    }

    /// Returns the highest id recorded for the collection.
    pub fn sequence(&self, collection: &str) -> Option<u64> {
        match self.entries.get(SEQUENCE_TABLE) {
            Some(StoreEntry::Sequences(sequences)) => sequences.get(collection).copied(),
            _ => None,
        }
    }

    /// Records the highest id handed out for the collection.
    pub fn set_sequence(&mut self, collection: &str, last_id: u64) {
        let entry = self
            .entries
            .entry(SEQUENCE_TABLE.to_string())
            .or_insert_with(|| StoreEntry::Sequences(IndexMap::new()));

        if let StoreEntry::Sequences(sequences) = entry {
            sequences.insert(collection.to_string(), last_id);
        }
    }
}

fn classify_entry(key: &str, value: Value) -> DoodleResult<StoreEntry> {
    if key == SEQUENCE_TABLE {
        let sequences = serde_json::from_value(value).map_err(|e| {
            DoodleError::new_with_cause(
                &format!("Invalid sequence table '{}'", key),
                ErrorKind::ParseError,
                e.into(),
            )
        })?;
        return Ok(StoreEntry::Sequences(sequences));
    }

    match value {
        Value::Array(_) => {
            let documents: Collection = serde_json::from_value(value).map_err(|e| {
                DoodleError::new_with_cause(
                    &format!("Invalid document in collection '{}'", key),
                    ErrorKind::ParseError,
                    e.into(),
                )
            })?;
            Ok(StoreEntry::Collection(documents))
        }
        Value::Object(_) => {
            let mut index: FieldIndex = serde_json::from_value(value).map_err(|e| {
                DoodleError::new_with_cause(
                    &format!("Invalid index '{}'", key),
                    ErrorKind::ParseError,
                    e.into(),
                )
            })?;
            index.normalize();
            Ok(StoreEntry::Index(index))
        }
        other => Err(DoodleError::new(
            &format!(
                "Entry '{}' must be an array or an object, found {}",
                key,
                json_type(&other)
            ),
            ErrorKind::ParseError,
        )),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
