use doodle::doc;
use doodle::errors::ErrorKind;
use doodle_int_test::test_util::{cleanup, create_test_context, create_test_docs, run_test};
use serde_json::json;
use std::fs;

#[test]
fn test_push() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db();

            let result = db.push(
                "test",
                doc!{
                    "first_name": "John",
                    "last_name": "Doe",
                    "birth_day": 1234567890,
                    "data": [1, 2, 3],
                    "body": "This is a test document"
                },
            )?;
            assert_eq!(result.affected_ids(), &[1]);
            assert_eq!(
                result.message(),
                "New data has been added to the JSON file successfully!"
            );

            let documents = db.get_collection("test")?;
            assert_eq!(documents.len(), 1);
            let document = &documents[0];
            assert_eq!(document.id(), Some(1));
            assert_eq!(document.get("first_name"), Some(&json!("John")));
            assert_eq!(document.get("data"), Some(&json!([1, 2, 3])));
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_push_creates_store_file() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db();
            let path = ctx.path().unwrap().to_path_buf();
            assert!(!path.exists());
            assert!(!db.exists()?);

            db.push("items", doc!{ "name": "a" })?;
            assert!(db.exists()?);

            let text = fs::read_to_string(&path).unwrap();
            let value: serde_json::Value = serde_json::from_str(&text).unwrap();
            assert_eq!(value["items"], json!([{ "id": 1, "name": "a" }]));
            // pretty printed with two spaces
            assert!(text.starts_with("{\n  \"items\": [\n"));
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_push_sequential_ids() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db();
            for (index, document) in create_test_docs().into_iter().enumerate() {
                let result = db.push("test", document)?;
                assert_eq!(result.affected_ids(), &[index as u64 + 1]);
            }

            let ids: Vec<_> = db
                .get_collection("test")?
                .iter()
                .filter_map(|document| document.id())
                .collect();
            assert_eq!(ids, vec![1, 2, 3]);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_pushed_document_is_last_with_id_first() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db();
            db.push("test", doc!{ "name": "a" })?;
            db.push("test", doc!{ "name": "b", "tags": ["x", "y"] })?;

            let documents = db.get_collection("test")?;
            let last = documents.last().unwrap();
            assert_eq!(last, &doc!{ "id": 2, "name": "b", "tags": ["x", "y"] });

            let fields: Vec<_> = last.fields().map(String::as_str).collect();
            assert_eq!(fields, vec!["id", "name", "tags"]);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_ids_are_not_reused_after_delete() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db();
            db.push("test", doc!{ "name": "a" })?;
            db.push("test", doc!{ "name": "b" })?;
            db.delete_object("test", 2)?;

            let result = db.push("test", doc!{ "name": "c" })?;
            assert_eq!(result.affected_ids(), &[3]);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_push_explicit_id() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db();
            let result = db.push("test", doc!{ "id": 42, "name": "a" })?;
            assert_eq!(result.affected_ids(), &[42]);

            let err = db.push("test", doc!{ "id": 42, "name": "b" }).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::DuplicateId);

            let err = db.push("test", doc!{ "id": "abc" }).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::InvalidId);

            let result = db.push("test", doc!{ "name": "c" })?;
            assert_eq!(result.affected_ids(), &[43]);
            assert_eq!(db.get_collection("test")?.len(), 2);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_push_into_several_collections() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db();
            db.push("users", doc!{ "name": "a" })?;
            db.push("orders", doc!{ "total": 10 })?;
            db.push("users", doc!{ "name": "b" })?;

            assert_eq!(db.collection_names()?, vec!["users", "orders"]);
            assert_eq!(db.get_collection("users")?.len(), 2);
            assert_eq!(db.get_collection("orders")?[0].id(), Some(1));
            Ok(())
        },
        cleanup,
    )
}
