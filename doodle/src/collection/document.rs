use crate::common::{Value, DOC_ID};
use crate::errors::{DoodleError, DoodleResult, ErrorKind};
use serde::{Deserialize, Serialize};
use serde_json::Map;
use std::fmt::{Display, Formatter};

/// Represents a document stored in a Doodle collection.
///
/// A document is an ordered set of key-value pairs. The key is always a
/// [String] and the value any JSON [Value]. Field order is insertion order
/// and survives a save/load round trip, so a pushed document is written back
/// with `id` first followed by its own fields.
///
/// The `id` field is reserved: it identifies the document inside its
/// collection and is assigned by [`crate::doodle::Doodle::push`] unless the
/// caller provides one.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    data: Map<String, Value>,
}

impl Document {
    /// Creates a new empty document.
    pub fn new() -> Self {
        Document { data: Map::new() }
    }

    /// Checks if the document has no fields at all.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the number of fields, `id` included.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Associates `value` with `key`, replacing any previous value in place.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidOperation` error if the key is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use doodle::collection::Document;
    ///
    /// let mut doc = Document::new();
    /// doc.put("name", "Alice").unwrap();
    /// doc.put("age", 30).unwrap();
    /// assert_eq!(doc.size(), 2);
    /// assert!(doc.put("", 1).is_err());
    /// ```
    pub fn put<T: Into<Value>>(&mut self, key: impl Into<String>, value: T) -> DoodleResult<()> {
        let key = key.into();
        if key.is_empty() {
            log::error!("Document does not support empty key");
            return Err(DoodleError::new(
                "Document does not support empty key",
                ErrorKind::InvalidOperation,
            ));
        }
        self.data.insert(key, value.into());
        Ok(())
    }

    /// Returns the value of a top-level field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Checks if the document contains the field.
    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Removes a field, keeping the relative order of the remaining fields.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.data.shift_remove(key)
    }

    /// Returns the document id, if the document carries a valid one.
    pub fn id(&self) -> Option<u64> {
        self.data.get(DOC_ID).and_then(as_document_id)
    }

    /// Iterates over the field names in document order.
    pub fn fields(&self) -> impl Iterator<Item = &String> {
        self.data.keys()
    }

    /// Iterates over the fields in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.data.iter()
    }

    /// Builds a document that starts with `id` followed by the fields of
    /// `body`, except a field named `id` which is replaced.
    pub(crate) fn with_leading_id(id: u64, body: Document) -> Document {
        let mut data = Map::with_capacity(body.size() + 1);
        data.insert(DOC_ID.to_string(), Value::from(id));
        for (key, value) in body.data {
            if key != DOC_ID {
                data.insert(key, value);
            }
        }
        Document { data }
    }
}

/// Reads a stored id value.
///
/// Ids are positive integers; integral floats such as `3.0` (which some
/// JSON writers produce) are accepted too.
pub fn as_document_id(value: &Value) -> Option<u64> {
    if let Some(id) = value.as_u64() {
        return (id > 0).then_some(id);
    }
    match value.as_f64() {
        Some(f) if f >= 1.0 && f.fract() == 0.0 && f <= u64::MAX as f64 => Some(f as u64),
        _ => None,
    }
}

impl Display for Document {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Value::Object(self.data.clone()))
    }
}

impl From<Map<String, Value>> for Document {
    fn from(data: Map<String, Value>) -> Self {
        Document { data }
    }
}

impl From<Document> for Value {
    fn from(document: Document) -> Self {
        Value::Object(document.data)
    }
}

impl TryFrom<Value> for Document {
    type Error = DoodleError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(data) => Ok(Document { data }),
            other => Err(DoodleError::new(
                &format!("Expected a JSON object for a document, found {}", other),
                ErrorKind::InvalidOperation,
            )),
        }
    }
}

impl IntoIterator for Document {
    type Item = (String, Value);
    type IntoIter = serde_json::map::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

/// Creates a [Document] from `"key": value` pairs.
///
/// Values may be nested `{ ... }` documents, `[ ... ]` arrays or any
/// expression convertible into a [Value]. Negative literals and other
/// multi-token expressions need parentheses.
///
/// # Examples
///
/// ```
/// use doodle::doc;
///
/// let doc = doc!{
///     "name": "a",
///     "age": 5,
///     "tags": ["x", "y"],
///     "address": { "city": "Oslo" },
///     "offset": (-2),
/// };
/// assert_eq!(doc.size(), 5);
/// assert_eq!(doc.get("age"), Some(&serde_json::json!(5)));
/// ```
#[macro_export]
macro_rules! doc {
    () => {
        $crate::collection::Document::new()
    };

    ($($key:literal : $value:tt),* $(,)?) => {
        {
            let mut doc = $crate::collection::Document::new();
            $(
                doc.put($key, $crate::doc_value!($value))
                    .expect(&format!("Failed to put value {} in document", stringify!($value)));
            )*
            doc
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! doc_value {
    ({ $($key:literal : $value:tt),* $(,)? }) => {
        $crate::common::Value::from($crate::doc!{ $($key : $value),* })
    };

    ([ $($value:tt),* $(,)? ]) => {
        $crate::common::Value::Array(vec![$($crate::doc_value!($value)),*])
    };

    ($value:expr) => {
        $crate::common::Value::from($value)
    };
}
