use std::fmt::{Display, Formatter};

/// The result of a write operation (push, edit, delete, create index).
///
/// Carries the human-readable success message of the operation and the ids
/// of the documents it touched.
///
/// # Examples
///
/// ```rust
/// use doodle::doc;
/// use doodle::doodle::Doodle;
///
/// let db = Doodle::builder().in_memory().open().unwrap();
/// let result = db.push("items", doc!{ "name": "a" }).unwrap();
///
/// assert_eq!(result.affected_ids(), &[1]);
/// assert_eq!(result.message(), "New data has been added to the JSON file successfully!");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteResult {
    message: String,
    affected_ids: Vec<u64>,
}

impl WriteResult {
    /// Creates a new `WriteResult` with the message and the affected ids.
    pub fn new(message: impl Into<String>, affected_ids: Vec<u64>) -> Self {
        Self {
            message: message.into(),
            affected_ids,
        }
    }

    /// Gets the success message of the operation.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Gets the ids of the documents affected by the operation.
    pub fn affected_ids(&self) -> &[u64] {
        &self.affected_ids
    }
}

impl Display for WriteResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Iterator for WriteResult {
    type Item = u64;

    fn next(&mut self) -> Option<Self::Item> {
        self.affected_ids.pop()
    }
}
