use doodle::doc;
use doodle::errors::DoodleResult;
use doodle_int_test::test_util::{cleanup, create_test_context};

fn main() -> DoodleResult<()> {
    println!("Starting stress test...");
    let ctx = create_test_context()?;
    let db = ctx.db();

    let count = 2000;
    let start = std::time::Instant::now();
    for i in 0..count {
        db.push(
            "records",
            doc!{
                "first_name": (uuid::Uuid::new_v4().to_string()),
                "processed": false,
                "sequence": i,
            },
        )?;
    }
    println!("Pushed {} records in {:?}", count, start.elapsed());

    let start = std::time::Instant::now();
    db.create_index("records", "processed")?;
    println!("Indexed records in {:?}", start.elapsed());

    let start = std::time::Instant::now();
    let found = db.get("records", doc!{ "sequence": 1999 })?;
    println!("Found {} records in {:?}", found.len(), start.elapsed());

    let start = std::time::Instant::now();
    for id in 1..=100 {
        db.edit("records", id, doc!{ "processed": true })?;
    }
    println!("Edited 100 records in {:?}", start.elapsed());

    cleanup(ctx)
}
