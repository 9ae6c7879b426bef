use crate::common::IN_MEMORY_LOCATION_PREFIX;
use crate::errors::{DoodleError, DoodleResult, ErrorKind};
use crate::store::{DoodleStoreProvider, StoreTree};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_STORE_NUMBER: AtomicU64 = AtomicU64::new(1);

/// In-memory implementation of a Doodle store.
///
/// Holds the serialized store text instead of a file, so loads and saves go
/// through exactly the same parsing and rendering as [crate::store::FileStore].
/// Like a missing file, a fresh store reports `FileNotFound` until the first
/// save. Clones share the same content.
///
/// ```text
/// let store = InMemoryStore::new();
/// store.save(&StoreTree::new())?;
/// assert_eq!(store.content(), Some("{}".to_string()));
/// ```
#[derive(Clone)]
pub struct InMemoryStore {
    inner: Arc<InMemoryStoreInner>,
}

impl InMemoryStore {
    /// Creates an empty store with a unique location name.
    pub fn new() -> InMemoryStore {
        let number = NEXT_STORE_NUMBER.fetch_add(1, Ordering::Relaxed);
        InMemoryStore {
            inner: Arc::new(InMemoryStoreInner {
                location: format!("{}{}", IN_MEMORY_LOCATION_PREFIX, number),
                content: RwLock::new(None),
            }),
        }
    }

    /// Creates a store that already holds `content` as its saved text.
    pub fn with_content(content: &str) -> InMemoryStore {
        let store = InMemoryStore::new();
        *store.inner.content.write() = Some(content.to_string());
        store
    }

    /// Returns the last saved text.
    pub fn content(&self) -> Option<String> {
        self.inner.content.read().clone()
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DoodleStoreProvider for InMemoryStore {
    fn load(&self) -> DoodleResult<StoreTree> {
        match self.inner.content.read().as_deref() {
            Some(text) => StoreTree::parse(text),
            None => Err(DoodleError::new(
                &format!("Store {} not found", self.inner.location),
                ErrorKind::FileNotFound,
            )),
        }
    }

    fn save(&self, tree: &StoreTree) -> DoodleResult<()> {
        let text = tree.to_pretty_string().map_err(|err| {
            DoodleError::new_with_cause("Error writing JSON file", ErrorKind::WriteFailure, err)
        })?;
        *self.inner.content.write() = Some(text);
        Ok(())
    }

    fn exists(&self) -> DoodleResult<bool> {
        Ok(self.inner.content.read().is_some())
    }

    fn location(&self) -> String {
        self.inner.location.clone()
    }
}

struct InMemoryStoreInner {
    location: String,
    content: RwLock<Option<String>>,
}
