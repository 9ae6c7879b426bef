use doodle::collection::Document;
use doodle::doc;
use doodle::errors::ErrorKind;
use doodle::filter::{MatchMode, SearchQuery};
use doodle_int_test::test_util::{
    cleanup, create_in_memory_test_context, create_test_context, push_test_documents, run_test,
};

fn ids(documents: &[Document]) -> Vec<u64> {
    documents.iter().filter_map(Document::id).collect()
}

#[test]
fn test_get_by_number_and_substring() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db();
            db.push("items", doc!{ "name": "a", "age": 5 })?;
            db.push("items", doc!{ "name": "b", "age": 15 })?;

            let expected = vec![doc!{ "id": 1, "name": "a", "age": 5 }];
            assert_eq!(db.get("items", doc!{ "age": 5 })?, expected);
            assert_eq!(db.get("items", doc!{ "name": "a" })?, expected);

            // a string query still matches numbers by substring
            assert_eq!(ids(&db.get("items", doc!{ "age": "5" })?), vec![1, 2]);

            db.edit("items", 2, doc!{ "age": 20 })?;
            let items = db.get_collection("items")?;
            assert_eq!(items[1].get("age"), Some(&serde_json::json!(20)));
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_get_is_case_insensitive() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db();
            push_test_documents(&db, "test")?;

            let found = db.get("test", doc!{ "body": "QUICK" })?;
            assert_eq!(ids(&found), vec![1, 2]);

            let found = db.get("test", doc!{ "body": "lorem IPSUM" })?;
            assert_eq!(ids(&found), vec![3]);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_get_matches_any_field() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db();
            push_test_documents(&db, "test")?;

            let found = db.get("test", doc!{ "first_name": "fn1", "age": 41 })?;
            assert_eq!(ids(&found), vec![1, 3]);

            let found = db.get("test", doc!{ "first_name": "nobody", "unknown": 1 })?;
            assert!(found.is_empty());
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_get_matching_all_fields() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db();
            push_test_documents(&db, "test")?;

            let query = SearchQuery::new()
                .field("last_name", "ln2")
                .field("age", 41)
                .with_match_mode(MatchMode::All);
            assert_eq!(ids(&db.get_matching("test", &query)?), vec![3]);

            let query = SearchQuery::new()
                .field("last_name", "ln2")
                .field("age", 32)
                .match_all();
            assert!(db.get_matching("test", &query)?.is_empty());
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_get_array_values() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db();
            push_test_documents(&db, "test")?;

            // arrays are compared by their comma joined form
            let found = db.get("test", doc!{ "data": 4 })?;
            assert_eq!(ids(&found), vec![2, 3]);

            let found = db.get("test", doc!{ "data": "1,2" })?;
            assert_eq!(ids(&found), vec![1]);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_get_empty_query() {
    run_test(
        create_in_memory_test_context,
        |ctx| {
            let db = ctx.db();
            push_test_documents(&db, "test")?;

            assert!(db.get("test", doc!{})?.is_empty());
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_get_missing_collection_and_store() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db();

            let err = db.get("test", doc!{ "a": 1 }).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::FileNotFound);

            db.push("other", doc!{ "a": 1 })?;
            let err = db.get("test", doc!{ "a": 1 }).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::CollectionNotFound);

            let err = db.get_collection("test").unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::CollectionNotFound);
            Ok(())
        },
        cleanup,
    )
}
