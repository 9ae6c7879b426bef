use doodle::collection::Document;
use doodle::doc;
use doodle::errors::ErrorKind;
use doodle::index::derive_index_name;
use doodle_int_test::test_util::{cleanup, create_test_context, push_test_documents, run_test};
use serde_json::{json, Value};
use std::fs;
use std::path::Path;

fn read_store(path: &Path) -> Value {
    let text = fs::read_to_string(path).unwrap();
    serde_json::from_str(&text).unwrap()
}

#[test]
fn test_create_index() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db();
            push_test_documents(&db, "test")?;

            let result = db.create_index("test", "last_name")?;
            assert_eq!(
                result.message(),
                "Successfully indexed \"last_name\" under collection: test"
            );
            assert_eq!(result.affected_ids(), &[1, 2, 3]);

            let store = read_store(ctx.path().unwrap());
            assert_eq!(
                store[derive_index_name("test", "last_name")],
                json!({ "ln1": [1], "ln2": [2, 3] })
            );
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_create_index_twice_is_identical() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db();
            push_test_documents(&db, "test")?;

            db.create_index("test", "data")?;
            let first = read_store(ctx.path().unwrap());
            db.create_index("test", "data")?;
            let second = read_store(ctx.path().unwrap());

            assert_eq!(first, second);
            assert_eq!(
                first["test_data_index"],
                json!({ "1": [1], "2": [1], "3": [1, 2], "4": [2, 3], "9": [3], "8": [3] })
            );
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_index_follows_writes() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db();
            push_test_documents(&db, "test")?;
            db.create_index("test", "age")?;

            db.push("test", doc!{ "first_name": "fn4", "age": 25 })?;
            db.edit("test", 1, doc!{ "age": 26 })?;
            db.delete_fields("test", 3, &["age"])?;
            db.delete_object("test", 2)?;

            let store = read_store(ctx.path().unwrap());
            assert_eq!(store["test_age_index"], json!({ "25": [4], "26": [1] }));
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_results_do_not_depend_on_index() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db();
            push_test_documents(&db, "test")?;

            let queries = vec![
                doc!{ "last_name": "ln2" },
                doc!{ "age": 25 },
                doc!{ "data": 4 },
                doc!{ "first_name": "FN", "age": 99 },
            ];

            let before: Vec<Vec<Document>> = queries
                .iter()
                .map(|query| db.get("test", query.clone()))
                .collect::<Result<_, _>>()?;

            for field in ["last_name", "age", "data", "first_name"] {
                db.create_index("test", field)?;
            }

            let after: Vec<Vec<Document>> = queries
                .iter()
                .map(|query| db.get("test", query.clone()))
                .collect::<Result<_, _>>()?;

            assert_eq!(before, after);
            assert_eq!(after[0].len(), 2);
            assert_eq!(after[3].len(), 3);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_create_index_errors() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db();

            let err = db.create_index("test", "age").unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::FileNotFound);

            push_test_documents(&db, "test")?;
            let err = db.create_index("missing", "age").unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::CollectionNotFound);
            Ok(())
        },
        cleanup,
    )
}
