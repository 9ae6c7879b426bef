use crate::errors::DoodleResult;
use crate::store::StoreTree;
use std::ops::Deref;
use std::sync::Arc;

/// Low-level interface for loading and persisting a whole store.
///
/// # Purpose
/// A provider owns the place where one store lives. It never keeps the tree
/// between calls: every operation loads a fresh [StoreTree], mutates it and
/// saves it back.
///
/// # Implementations
/// - `FileStore`: the backing JSON file
/// - `InMemoryStore`: the same contract held in memory
///
/// # Thread Safety
/// Implementers must be `Send + Sync`. Serializing load/save cycles is the
/// caller's job (see [crate::common::LockRegistry]).
pub trait DoodleStoreProvider: Send + Sync {
    /// Loads the full store tree.
    ///
    /// # Returns
    /// * `Err` with `FileNotFound` if nothing has been saved yet
    /// * `Err` with `ParseError` if the stored content is not a valid tree
    fn load(&self) -> DoodleResult<StoreTree>;

    /// Replaces the stored content with `tree`.
    ///
    /// # Returns
    /// * `Err` with `WriteFailure` if the content could not be written
    fn save(&self, tree: &StoreTree) -> DoodleResult<()>;

    /// Checks whether a store has been saved at this location.
    fn exists(&self) -> DoodleResult<bool>;

    /// A stable, unique name for the location, used as the lock key.
    fn location(&self) -> String;
}

/// Cheaply cloneable handle to a store provider.
#[derive(Clone)]
pub struct DoodleStore {
    inner: Arc<dyn DoodleStoreProvider>,
}

impl DoodleStore {
    /// Wraps a provider implementation.
    pub fn new<T: DoodleStoreProvider + 'static>(inner: T) -> Self {
        DoodleStore {
            inner: Arc::new(inner),
        }
    }
}

impl Deref for DoodleStore {
    type Target = Arc<dyn DoodleStoreProvider>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
