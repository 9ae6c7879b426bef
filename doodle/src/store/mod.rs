//! Storage backends and the in-memory store tree.
//!
//! A store is loaded as a whole into a [StoreTree], modified, and written
//! back as a whole. Backends implement [DoodleStoreProvider]:
//!
//! - **File Store**: [FileStore], the backing JSON file (default)
//! - **In-Memory Store**: [InMemoryStore], for tests and scratch stores

mod doodle_store;
pub mod file;
pub mod memory;
mod store_tree;

pub use doodle_store::*;
pub use file::FileStore;
pub use memory::InMemoryStore;
pub use store_tree::*;
