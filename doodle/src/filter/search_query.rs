use crate::collection::Document;
use crate::common::Value;
use indexmap::IndexMap;

/// How the conditions of a [SearchQuery] are combined.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MatchMode {
    /// A document matches if at least one condition holds.
    #[default]
    Any,
    /// A document matches only if every condition holds.
    All,
}

/// An ordered set of `field → value` conditions.
///
/// Setting the same field twice replaces the earlier value but keeps its
/// position.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchQuery {
    conditions: IndexMap<String, Value>,
    match_mode: MatchMode,
}

impl SearchQuery {
    /// Creates an empty query. An empty query matches nothing.
    pub fn new() -> Self {
        SearchQuery {
            conditions: IndexMap::new(),
            match_mode: MatchMode::Any,
        }
    }

    /// Adds a condition on `field_name`.
    pub fn field<T: Into<Value>>(mut self, field_name: &str, value: T) -> Self {
        self.conditions.insert(field_name.to_string(), value.into());
        self
    }

    /// Sets how conditions are combined.
    pub fn with_match_mode(mut self, match_mode: MatchMode) -> Self {
        self.match_mode = match_mode;
        self
    }

    /// Shorthand for `with_match_mode(MatchMode::All)`.
    pub fn match_all(self) -> Self {
        self.with_match_mode(MatchMode::All)
    }

    pub fn match_mode(&self) -> MatchMode {
        self.match_mode
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Returns the query value of a field.
    pub fn get(&self, field_name: &str) -> Option<&Value> {
        self.conditions.get(field_name)
    }

    /// Iterates over the conditions in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.conditions.iter()
    }
}

impl From<Document> for SearchQuery {
    fn from(document: Document) -> Self {
        SearchQuery {
            conditions: document.into_iter().collect(),
            match_mode: MatchMode::Any,
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for SearchQuery {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        SearchQuery {
            conditions: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
            match_mode: MatchMode::Any,
        }
    }
}
