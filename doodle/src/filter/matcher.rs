use super::{MatchMode, SearchQuery};
use crate::collection::Document;
use crate::common::{parse_number, stringify_value, Value};

/// Compares a document value against a query value without any index.
///
/// The values match when both string forms parse as equal numbers, or when
/// the lower-cased document string contains the lower-cased query string.
/// A query that is a JSON number matches a numeric document value only by
/// equality, so `5` does not select `15` while `"5"` does.
///
/// ```
/// use doodle::filter::value_matches;
/// use serde_json::json;
///
/// assert!(value_matches(&json!("Alice"), &json!("ali")));
/// assert!(value_matches(&json!(5), &json!("5.0")));
/// assert!(value_matches(&json!(15), &json!("5")));
/// assert!(!value_matches(&json!(15), &json!(5)));
/// ```
pub fn value_matches(document_value: &Value, query_value: &Value) -> bool {
    let document_text = stringify_value(document_value);
    let query_text = stringify_value(query_value);

    let numbers_equal = match (parse_number(&document_text), parse_number(&query_text)) {
        (Some(left), Some(right)) => Some(left == right),
        _ => None,
    };

    match (numbers_equal, query_value) {
        (Some(equal), Value::Number(_)) => equal,
        (Some(true), _) => true,
        _ => document_text
            .to_lowercase()
            .contains(&query_text.to_lowercase()),
    }
}

/// Evaluates a query against documents, with the index bucket of each
/// condition resolved up front.
pub(crate) struct QueryMatcher<'a> {
    conditions: Vec<FieldCondition<'a>>,
    match_mode: MatchMode,
}

struct FieldCondition<'a> {
    field_name: &'a str,
    value: &'a Value,
    // ids under the query value, when the field has an index
    bucket: Option<&'a [u64]>,
}

impl<'a> QueryMatcher<'a> {
    /// Builds a matcher; `lookup` returns the index bucket of a condition or
    /// `None` when the field is not indexed.
    pub fn new<F>(query: &'a SearchQuery, lookup: F) -> Self
    where
        F: Fn(&str, &Value) -> Option<&'a [u64]>,
    {
        let conditions = query
            .iter()
            .map(|(field_name, value)| FieldCondition {
                field_name,
                value,
                bucket: lookup(field_name, value),
            })
            .collect();

        QueryMatcher {
            conditions,
            match_mode: query.match_mode(),
        }
    }

    pub fn matches(&self, document: &Document) -> bool {
        if self.conditions.is_empty() {
            return false;
        }

        let mut results = self
            .conditions
            .iter()
            .map(|condition| condition.matches(document));

        match self.match_mode {
            MatchMode::Any => results.any(|matched| matched),
            MatchMode::All => results.all(|matched| matched),
        }
    }
}

impl FieldCondition<'_> {
    fn matches(&self, document: &Document) -> bool {
        if let (Some(bucket), Some(id)) = (self.bucket, document.id()) {
            if bucket.binary_search(&id).is_ok() {
                return true;
            }
        }

        document
            .get(self.field_name)
            .is_some_and(|document_value| value_matches(document_value, self.value))
    }
}
