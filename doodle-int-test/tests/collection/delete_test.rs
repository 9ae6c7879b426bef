use doodle::collection::Document;
use doodle::doc;
use doodle::errors::ErrorKind;
use doodle_int_test::test_util::{cleanup, create_test_context, push_test_documents, run_test};

#[test]
fn test_delete_object() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db();
            push_test_documents(&db, "test")?;

            let result = db.delete_object("test", 2)?;
            assert_eq!(result.message(), "JSON file has been updated successfully!");

            let ids: Vec<_> = db
                .get_collection("test")?
                .iter()
                .filter_map(Document::id)
                .collect();
            assert_eq!(ids, vec![1, 3]);

            let err = db.delete_object("test", 2).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::DocumentNotFound);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_delete_last_object_keeps_collection() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db();
            db.push("test", doc!{ "name": "a" })?;
            db.delete_object("test", 1)?;

            assert!(db.get_collection("test")?.is_empty());
            assert_eq!(db.collection_names()?, vec!["test"]);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_delete_fields() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db();
            push_test_documents(&db, "test")?;

            db.delete_fields("test", 1, &["body", "data"])?;

            let documents = db.get_collection("test")?;
            assert_eq!(
                documents[0],
                doc!{ "id": 1, "first_name": "fn1", "last_name": "ln1", "age": 32 }
            );
            // other documents are untouched
            assert!(documents[1].contains_key("body"));
            assert!(documents[2].contains_key("data"));
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_delete_fields_never_removes_id() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db();
            db.push("test", doc!{ "name": "a" })?;

            db.delete_fields("test", 1, &["id", "name"])?;
            let documents = db.get_collection("test")?;
            assert_eq!(documents, vec![doc!{ "id": 1 }]);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_delete_errors() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db();

            let err = db.delete_object("test", 1).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::FileNotFound);

            push_test_documents(&db, "test")?;
            let err = db.delete_fields("missing", 1, &["age"]).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::CollectionNotFound);

            let err = db.delete_fields("test", 9, &["age"]).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::DocumentNotFound);
            Ok(())
        },
        cleanup,
    )
}
