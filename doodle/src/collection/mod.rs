//! Collections and documents.
//!
//! A collection is an ordered list of [Document]s stored under a name in the
//! store tree. Every document carries a positive integer `id`, unique within
//! its collection.
//!
//! ```rust
//! use doodle::doc;
//! use doodle::doodle::Doodle;
//!
//! let db = Doodle::builder().in_memory().open().unwrap();
//! db.push("users", doc!{ "name": "Alice", "age": 30 }).unwrap();
//!
//! let users = db.get_collection("users").unwrap();
//! assert_eq!(users[0].id(), Some(1));
//! ```
//!
//! # Reserved Fields
//!
//! - `id` - document id, assigned on push unless provided

mod collection_resolver;
mod document;
pub(crate) mod operation;

pub(crate) use collection_resolver::*;
pub use document::*;
pub use operation::WriteResult;
