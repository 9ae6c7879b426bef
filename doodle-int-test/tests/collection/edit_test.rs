use doodle::doc;
use doodle::errors::ErrorKind;
use doodle_int_test::test_util::{cleanup, create_test_context, push_test_documents, run_test};
use serde_json::json;

#[test]
fn test_edit() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db();
            push_test_documents(&db, "test")?;

            let result = db.edit("test", 2, doc!{ "age": 26, "city": "Lyon" })?;
            assert_eq!(result.message(), "JSON file has been updated successfully!");
            assert_eq!(result.affected_ids(), &[2]);

            let document = &db.get_collection("test")?[1];
            assert_eq!(document.get("age"), Some(&json!(26)));
            assert_eq!(document.get("city"), Some(&json!("Lyon")));
            assert_eq!(document.get("first_name"), Some(&json!("fn2")));

            // existing fields keep their position, new ones are appended
            let fields: Vec<_> = document.fields().map(String::as_str).collect();
            assert_eq!(
                fields,
                vec!["id", "first_name", "last_name", "age", "data", "body", "city"]
            );
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_edit_is_visible_to_new_handles() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db();
            push_test_documents(&db, "test")?;
            db.edit("test", 1, doc!{ "last_name": "changed" })?;

            let reopened = doodle::doodle::Doodle::open(ctx.path().unwrap())?;
            let found = reopened.get("test", doc!{ "last_name": "changed" })?;
            assert_eq!(found.len(), 1);
            assert_eq!(found[0].id(), Some(1));
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_edit_errors() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db();
            push_test_documents(&db, "test")?;

            let err = db.edit("missing", 1, doc!{ "age": 1 }).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::CollectionNotFound);

            let err = db.edit("test", 99, doc!{ "age": 1 }).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::DocumentNotFound);

            let err = db.edit("test", 1, doc!{ "id": 7 }).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::InvalidOperation);

            // nothing changed on disk
            assert_eq!(db.get_collection("test")?[0].get("age"), Some(&json!(32)));
            Ok(())
        },
        cleanup,
    )
}
