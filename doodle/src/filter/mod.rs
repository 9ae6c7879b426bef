//! Search queries for selecting documents from a collection.
//!
//! A [SearchQuery] is an ordered list of `field → value` conditions. A field
//! condition holds when:
//!
//! - the field has an index and the document id is listed under the
//!   stringified query value, or
//! - both stringified values are numbers and the numbers are equal, or
//! - the lower-cased document value contains the lower-cased query value,
//!   unless the query value is a JSON number and the document value is
//!   numeric too.
//!
//! By default a document matches when **any** condition holds
//! ([MatchMode::Any]); [MatchMode::All] requires every condition.
//!
//! # Examples
//!
//! ```rust
//! use doodle::doc;
//! use doodle::filter::SearchQuery;
//!
//! // from a document
//! let query = SearchQuery::from(doc!{ "name": "ali", "age": 30 });
//! assert_eq!(query.len(), 2);
//!
//! // fluent
//! let query = SearchQuery::new().field("name", "ali").match_all();
//! assert!(!query.is_empty());
//! ```

mod matcher;
mod search_query;

pub use matcher::*;
pub use search_query::*;
