use crate::errors::{DoodleError, DoodleResult, ErrorKind};
use crate::store::{Collection, StoreTree};

/// Returns the named collection, appending an empty one to the tree if it
/// does not exist yet.
pub(crate) fn resolve_for_write<'t>(
    tree: &'t mut StoreTree,
    collection_name: &str,
) -> DoodleResult<&'t mut Collection> {
    validate_collection_name(collection_name)?;
    tree.collection_or_insert(collection_name)
}

/// Returns the named collection for reading.
pub(crate) fn resolve_for_read<'t>(
    tree: &'t StoreTree,
    collection_name: &str,
) -> DoodleResult<&'t Collection> {
    tree.collection(collection_name)
        .ok_or_else(|| collection_not_found(collection_name))
}

/// Returns the named collection for an in-place update. Unlike
/// [resolve_for_write] it never creates the collection.
pub(crate) fn resolve_for_update<'t>(
    tree: &'t mut StoreTree,
    collection_name: &str,
) -> DoodleResult<&'t mut Collection> {
    tree.collection_mut(collection_name)
        .ok_or_else(|| collection_not_found(collection_name))
}

fn validate_collection_name(collection_name: &str) -> DoodleResult<()> {
    if collection_name.trim().is_empty() {
        log::error!("Collection name cannot be empty");
        return Err(DoodleError::new(
            "Collection name cannot be empty",
            ErrorKind::InvalidOperation,
        ));
    }
    Ok(())
}

fn collection_not_found(collection_name: &str) -> DoodleError {
    log::error!("No data found in the specified dataCollection: {}", collection_name);
    DoodleError::new(
        &format!("No data found in the specified dataCollection: {}", collection_name),
        ErrorKind::CollectionNotFound,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc;

    #[test]
    fn test_resolve_for_write_creates_collection() {
        let mut tree = StoreTree::new();
        resolve_for_write(&mut tree, "items")
            .unwrap()
            .push(doc!{ "id": 1 });

        assert_eq!(tree.collection_names(), vec!["items".to_string()]);
        assert_eq!(resolve_for_read(&tree, "items").unwrap().len(), 1);
    }

    #[test]
    fn test_resolve_for_write_rejects_empty_name() {
        let mut tree = StoreTree::new();
        let err = resolve_for_write(&mut tree, " ").unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::InvalidOperation);
        assert!(tree.is_empty());
    }

    #[test]
    fn test_resolve_for_write_rejects_index_key() {
        let mut tree = StoreTree::new();
        tree.index_or_insert("items_age_index").unwrap();

        let err = resolve_for_write(&mut tree, "items_age_index").unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::InvalidOperation);
    }

    #[test]
    fn test_missing_collection() {
        let mut tree = StoreTree::new();
        tree.index_or_insert("items_age_index").unwrap();

        let err = resolve_for_read(&tree, "items").unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::CollectionNotFound);

        // an index key never resolves as a collection
        let err = resolve_for_update(&mut tree, "items_age_index").unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::CollectionNotFound);
        assert_eq!(tree.len(), 1);
    }
}
