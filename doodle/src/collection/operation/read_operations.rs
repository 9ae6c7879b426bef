use crate::collection::{resolve_for_read, Document};
use crate::errors::DoodleResult;
use crate::filter::{QueryMatcher, SearchQuery};
use crate::index::IndexManager;
use crate::store::StoreTree;

/// Read paths of one collection over a loaded tree.
pub(crate) struct ReadOperations {
    collection_name: String,
    index_manager: IndexManager,
}

impl ReadOperations {
    pub fn new(collection_name: &str) -> Self {
        ReadOperations {
            collection_name: collection_name.to_string(),
            index_manager: IndexManager::new(collection_name),
        }
    }

    /// Returns every document of the collection in stored order.
    pub fn get_collection(&self, tree: &StoreTree) -> DoodleResult<Vec<Document>> {
        let collection = resolve_for_read(tree, &self.collection_name)?;
        Ok(collection.clone())
    }

    /// Returns the documents matching `query` in stored order.
    ///
    /// Indexed fields are answered from their bucket first; the direct
    /// comparison runs for documents the bucket does not list.
    pub fn find(&self, tree: &StoreTree, query: &SearchQuery) -> DoodleResult<Vec<Document>> {
        let collection = resolve_for_read(tree, &self.collection_name)?;
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let matcher = QueryMatcher::new(query, |field_name, value| {
            self.index_manager.lookup(tree, field_name, value)
        });

        let documents: Vec<Document> = collection
            .iter()
            .filter(|document| matcher.matches(document))
            .cloned()
            .collect();

        log::debug!(
            "Found {} of {} documents in {}",
            documents.len(),
            collection.len(),
            self.collection_name
        );
        Ok(documents)
    }
}
