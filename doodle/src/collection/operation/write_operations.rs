use super::WriteResult;
use crate::collection::{as_document_id, resolve_for_update, resolve_for_write, Document};
use crate::common::{is_empty_value, DOC_ID, PUSH_SUCCESS_MESSAGE, UPDATE_SUCCESS_MESSAGE};
use crate::errors::{DoodleError, DoodleResult, ErrorKind};
use crate::index::IndexManager;
use crate::store::{Collection, StoreTree};

/// Write paths of one collection over a loaded tree.
///
/// Every operation mutates the tree in place and keeps the collection's
/// indexes and id sequence in step with the documents. Persisting the tree
/// is up to the caller.
pub(crate) struct WriteOperations {
    collection_name: String,
    index_manager: IndexManager,
}

impl WriteOperations {
    pub fn new(collection_name: &str) -> Self {
        WriteOperations {
            collection_name: collection_name.to_string(),
            index_manager: IndexManager::new(collection_name),
        }
    }

    /// Appends `document` with an id, creating the collection if needed.
    pub fn push(&self, tree: &mut StoreTree, document: Document) -> DoodleResult<WriteResult> {
        let collection = resolve_for_write(tree, &self.collection_name)?;
        let id = match self.assign_id(collection, &document)? {
            Some(id) => id,
            None => self.next_id(tree)?,
        };

        let document = Document::with_leading_id(id, document);
        resolve_for_write(tree, &self.collection_name)?.push(document.clone());

        let last_id = tree.sequence(&self.collection_name).unwrap_or(0).max(id);
        tree.set_sequence(&self.collection_name, last_id);
        self.index_manager.record_on_push(tree, &document);

        log::debug!("Pushed document {} into {}", id, self.collection_name);
        Ok(WriteResult::new(PUSH_SUCCESS_MESSAGE, vec![id]))
    }

    /// Sets every field of `patch` on the document with `id`.
    pub fn edit(&self, tree: &mut StoreTree, id: u64, patch: Document) -> DoodleResult<WriteResult> {
        let collection = resolve_for_update(tree, &self.collection_name)?;
        let document = find_document_mut(collection, id, &self.collection_name)?;

        if let Some(patch_id) = patch.get(DOC_ID) {
            if as_document_id(patch_id) != Some(id) {
                log::error!("Cannot change the id of document {} to {}", id, patch_id);
                return Err(DoodleError::new(
                    &format!("Cannot change the id of document {} to {}", id, patch_id),
                    ErrorKind::InvalidOperation,
                ));
            }
        }
        for (field, value) in patch.iter() {
            if field != DOC_ID {
                document.put(field.as_str(), value.clone())?;
            }
        }

        for (field, value) in patch.iter() {
            if field != DOC_ID {
                self.index_manager.record_on_edit(tree, field, value, id);
            }
        }

        log::debug!("Edited document {} in {}", id, self.collection_name);
        Ok(WriteResult::new(UPDATE_SUCCESS_MESSAGE, vec![id]))
    }

    /// Removes the document with `id`.
    ///
    /// The target is emptied first, then every empty document is dropped
    /// from the collection.
    pub fn delete_object(&self, tree: &mut StoreTree, id: u64) -> DoodleResult<WriteResult> {
        let collection = resolve_for_update(tree, &self.collection_name)?;
        let document = find_document_mut(collection, id, &self.collection_name)?;
        let removed = std::mem::take(document);
        collection.retain(|document| !document.is_empty());

        self.index_manager.remove_document(tree, &removed);

        log::debug!("Deleted document {} from {}", id, self.collection_name);
        Ok(WriteResult::new(UPDATE_SUCCESS_MESSAGE, vec![id]))
    }

    /// Removes the named fields from the document with `id`.
    ///
    /// The `id` field itself is never removed. Documents left without any
    /// field are dropped from the collection.
    pub fn delete_fields(
        &self,
        tree: &mut StoreTree,
        id: u64,
        fields: &[&str],
    ) -> DoodleResult<WriteResult> {
        let collection = resolve_for_update(tree, &self.collection_name)?;
        let document = find_document_mut(collection, id, &self.collection_name)?;

        let mut removed_fields = Vec::with_capacity(fields.len());
        for field in fields {
            if *field == DOC_ID {
                log::warn!("Ignoring request to delete the id field of document {}", id);
                continue;
            }
            if document.remove(field).is_some() {
                removed_fields.push(*field);
            }
        }
        collection.retain(|document| !document.is_empty());

        for field in removed_fields {
            self.index_manager.remove_field(tree, field, id);
        }

        log::debug!("Deleted fields {:?} of document {} in {}", fields, id, self.collection_name);
        Ok(WriteResult::new(UPDATE_SUCCESS_MESSAGE, vec![id]))
    }

    /// Builds (or rebuilds) the index of `field`.
    pub fn create_index(&self, tree: &mut StoreTree, field: &str) -> DoodleResult<WriteResult> {
        self.index_manager.create_index(tree, field)
    }

    /// Validates an explicit id. `None` means one must be generated.
    fn assign_id(&self, collection: &Collection, document: &Document) -> DoodleResult<Option<u64>> {
        let Some(value) = document.get(DOC_ID) else {
            return Ok(None);
        };
        if is_empty_value(value) {
            return Ok(None);
        }

        let Some(id) = as_document_id(value) else {
            log::error!("Invalid document id {} for {}", value, self.collection_name);
            return Err(DoodleError::new(
                &format!("Invalid document id {}, ids must be positive integers", value),
                ErrorKind::InvalidId,
            ));
        };

        if collection.iter().any(|document| document.id() == Some(id)) {
            log::error!("Document with id {} already exists in {}", id, self.collection_name);
            return Err(DoodleError::new(
                &format!("Document with id {} already exists in {}", id, self.collection_name),
                ErrorKind::DuplicateId,
            ));
        }
        Ok(Some(id))
    }

    /// Next id from the sequence table, never below the highest id present.
    fn next_id(&self, tree: &StoreTree) -> DoodleResult<u64> {
        let stored = tree.sequence(&self.collection_name).unwrap_or(0);
        let present = tree
            .collection(&self.collection_name)
            .and_then(|collection| collection.iter().filter_map(Document::id).max())
            .unwrap_or(0);

        stored.max(present).checked_add(1).ok_or_else(|| {
            DoodleError::new(
                &format!("Id sequence of {} is exhausted", self.collection_name),
                ErrorKind::InternalError,
            )
        })
    }
}

fn find_document_mut<'c>(
    collection: &'c mut Collection,
    id: u64,
    collection_name: &str,
) -> DoodleResult<&'c mut Document> {
    collection
        .iter_mut()
        .find(|document| document.id() == Some(id))
        .ok_or_else(|| {
            log::error!("Document with id {} not found in {}", id, collection_name);
            DoodleError::new(
                &format!("Document with id {} not found in {}", id, collection_name),
                ErrorKind::DocumentNotFound,
            )
        })
}
