mod constants;
mod lock;
mod util;

pub use constants::*;
pub use lock::*;
pub use util::*;

/// Dynamic JSON value held by documents, queries and index keys.
pub type Value = serde_json::Value;
