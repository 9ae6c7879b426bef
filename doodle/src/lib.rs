//! # Doodle - Embedded JSON Document Store
//!
//! Doodle keeps named collections of documents, plus optional per-field
//! secondary indexes, in a single pretty-printed JSON file. Every operation
//! loads the whole file, works on it in memory and writes it back.
//!
//! ## Key Features
//!
//! - **Embedded**: a library over one JSON file, no server process
//! - **Schemaless**: documents are ordered JSON objects with an integer `id`
//! - **Search**: case-insensitive substring and numeric matching across fields
//! - **Indexing**: field indexes that are kept current on every write
//! - **Safe Saves**: atomic replace of the store file through a temporary file
//! - **Multiple Storage Backends**: file store and in-memory store
//!
//! ## Quick Start
//!
//! ```rust
//! use doodle::doc;
//! use doodle::doodle::Doodle;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let db = Doodle::open(dir.path().join("store.json")).unwrap();
//!
//! db.push("users", doc!{ "name": "Alice", "age": 30 }).unwrap();
//! db.push("users", doc!{ "name": "Bob", "age": 25 }).unwrap();
//! db.create_index("users", "age").unwrap();
//!
//! let found = db.get("users", doc!{ "name": "ali" }).unwrap();
//! assert_eq!(found.len(), 1);
//! assert_eq!(found[0].id(), Some(1));
//! ```
//!
//! ## File Layout
//!
//! ```json
//! {
//!   "users": [
//!     { "id": 1, "name": "Alice", "age": 30 },
//!     { "id": 2, "name": "Bob", "age": 25 }
//!   ],
//!   "$doodle_sequences": { "users": 2 },
//!   "users_age_index": { "30": [1], "25": [2] }
//! }
//! ```
//!
//! ## Core Modules
//!
//! - [`doodle`] - the store handle and its operations
//! - [`doodle_builder`] - configuring and opening a handle
//! - [`collection`] - documents and write results
//! - [`filter`] - search queries
//! - [`index`] - field indexes
//! - [`store`] - storage backends and the store tree
//! - [`errors`] - error types

use crate::common::LockRegistry;
use std::sync::LazyLock;

pub mod collection;
pub mod common;
pub mod doodle;
pub mod doodle_builder;
pub mod doodle_config;
pub mod errors;
pub mod filter;
pub mod index;
pub mod store;

pub(crate) static STORE_LOCKS: LazyLock<LockRegistry> = LazyLock::new(LockRegistry::new);
