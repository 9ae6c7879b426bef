use crate::collection::operation::{ReadOperations, WriteOperations};
use crate::collection::{resolve_for_write, Document, WriteResult};
use crate::common::LockHandle;
use crate::doodle_builder::DoodleBuilder;
use crate::doodle_config::DoodleConfig;
use crate::errors::DoodleResult;
use crate::filter::SearchQuery;
use crate::store::{DoodleStore, StoreTree};
use crate::STORE_LOCKS;
use std::path::Path;
use std::sync::Arc;

/// A handle to one Doodle store.
///
/// Every operation reloads the whole store, applies its change in memory
/// and, for writes, saves the whole store back. No document state is kept
/// between calls. Handles on the same location, clones included, share one
/// read-write lock, so within a process a write is never interleaved with
/// another read or write of the same store.
///
/// # Examples
///
/// ```rust
/// use doodle::doc;
/// use doodle::doodle::Doodle;
///
/// let dir = tempfile::tempdir().unwrap();
/// let db = Doodle::open(dir.path().join("db.json")).unwrap();
///
/// db.push("items", doc!{ "name": "a", "age": 5 }).unwrap();
/// db.push("items", doc!{ "name": "b", "age": 15 }).unwrap();
///
/// let found = db.get("items", doc!{ "name": "a" }).unwrap();
/// assert_eq!(found, vec![doc!{ "id": 1, "name": "a", "age": 5 }]);
///
/// db.edit("items", 2, doc!{ "age": 20 }).unwrap();
/// let items = db.get_collection("items").unwrap();
/// assert_eq!(items[1].get("age"), Some(&serde_json::json!(20)));
/// ```
#[derive(Clone)]
pub struct Doodle {
    inner: Arc<DoodleInner>,
}

impl Doodle {
    /// Creates a builder for configuring a handle.
    pub fn builder() -> DoodleBuilder {
        DoodleBuilder::new()
    }

    /// Opens a handle on the JSON file at `file_path` with default options.
    pub fn open(file_path: impl AsRef<Path>) -> DoodleResult<Doodle> {
        DoodleBuilder::new().file_path(file_path).open()
    }

    pub(crate) fn new(doodle_config: DoodleConfig, store: DoodleStore) -> Self {
        let lock = STORE_LOCKS.get_lock(&store.location());
        Doodle {
            inner: Arc::new(DoodleInner {
                doodle_config,
                store,
                lock,
            }),
        }
    }

    pub fn config(&self) -> &DoodleConfig {
        &self.inner.doodle_config
    }

    pub fn store(&self) -> DoodleStore {
        self.inner.store.clone()
    }

    /// Checks whether the store has been written yet.
    pub fn exists(&self) -> DoodleResult<bool> {
        let _guard = self.inner.lock.read();
        self.inner.store.exists()
    }

    /// Appends a document to `collection`.
    ///
    /// The document receives the next id of the collection unless it carries
    /// a positive integer `id` of its own. A missing store file is created
    /// with the collection in it before the push.
    ///
    /// # Errors
    ///
    /// * `DuplicateId` if the explicit id is already used
    /// * `InvalidId` if the explicit id is not a positive integer
    /// * `WriteFailure` if the store could not be saved
    pub fn push(&self, collection: &str, document: Document) -> DoodleResult<WriteResult> {
        self.inner.push(collection, document)
    }

    /// Returns the documents of `collection` matching any field of `query`.
    ///
    /// # Errors
    ///
    /// * `FileNotFound` if the store does not exist
    /// * `CollectionNotFound` if the collection does not exist
    pub fn get(&self, collection: &str, query: Document) -> DoodleResult<Vec<Document>> {
        self.get_matching(collection, &SearchQuery::from(query))
    }

    /// Returns the documents of `collection` matching `query`, combining its
    /// conditions by the query's match mode.
    pub fn get_matching(&self, collection: &str, query: &SearchQuery) -> DoodleResult<Vec<Document>> {
        self.inner
            .read(|tree| ReadOperations::new(collection).find(tree, query))
    }

    /// Returns every document of `collection`.
    pub fn get_collection(&self, collection: &str) -> DoodleResult<Vec<Document>> {
        self.inner
            .read(|tree| ReadOperations::new(collection).get_collection(tree))
    }

    /// Sets every field of `patch` on the document with `id`.
    ///
    /// # Errors
    ///
    /// * `CollectionNotFound` / `DocumentNotFound` if the target is missing
    /// * `InvalidOperation` if `patch` carries a different `id`
    pub fn edit(&self, collection: &str, id: u64, patch: Document) -> DoodleResult<WriteResult> {
        self.inner
            .write(|tree| WriteOperations::new(collection).edit(tree, id, patch))
    }

    /// Removes the document with `id` from `collection`.
    pub fn delete_object(&self, collection: &str, id: u64) -> DoodleResult<WriteResult> {
        self.inner
            .write(|tree| WriteOperations::new(collection).delete_object(tree, id))
    }

    /// Removes the named fields from the document with `id`. The `id` field
    /// is never removed.
    pub fn delete_fields(
        &self,
        collection: &str,
        id: u64,
        fields: &[&str],
    ) -> DoodleResult<WriteResult> {
        self.inner
            .write(|tree| WriteOperations::new(collection).delete_fields(tree, id, fields))
    }

    /// Builds the index of `field` in `collection`, replacing any previous
    /// contents of that index.
    pub fn create_index(&self, collection: &str, field: &str) -> DoodleResult<WriteResult> {
        self.inner
            .write(|tree| WriteOperations::new(collection).create_index(tree, field))
    }

    /// Returns the names of all collections, in stored order.
    pub fn collection_names(&self) -> DoodleResult<Vec<String>> {
        self.inner.read(|tree| Ok(tree.collection_names()))
    }
}

struct DoodleInner {
    doodle_config: DoodleConfig,
    store: DoodleStore,
    lock: LockHandle,
}

impl DoodleInner {
    fn read<R, F>(&self, operation: F) -> DoodleResult<R>
    where
        F: FnOnce(&StoreTree) -> DoodleResult<R>,
    {
        let _guard = self.lock.read();
        let tree = self.store.load()?;
        operation(&tree)
    }

    fn write<F>(&self, operation: F) -> DoodleResult<WriteResult>
    where
        F: FnOnce(&mut StoreTree) -> DoodleResult<WriteResult>,
    {
        let _guard = self.lock.write();
        self.load_modify_save(operation)
    }

    fn push(&self, collection: &str, document: Document) -> DoodleResult<WriteResult> {
        let _guard = self.lock.write();

        if !self.store.exists()? {
            let mut seed = StoreTree::new();
            resolve_for_write(&mut seed, collection)?;
            self.store.save(&seed)?;
            log::info!(
                "Created store {} with collection {}",
                self.store.location(),
                collection
            );
        }

        self.load_modify_save(|tree| WriteOperations::new(collection).push(tree, document))
    }

    // caller must hold the write lock
    fn load_modify_save<F>(&self, operation: F) -> DoodleResult<WriteResult>
    where
        F: FnOnce(&mut StoreTree) -> DoodleResult<WriteResult>,
    {
        let mut tree = self.store.load()?;
        let result = operation(&mut tree)?;
        self.store.save(&tree)?;
        Ok(result)
    }
}
