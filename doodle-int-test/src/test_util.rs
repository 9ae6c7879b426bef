use doodle::collection::Document;
use doodle::doc;
use doodle::doodle::Doodle;
use doodle::errors::DoodleResult;
use std::backtrace::Backtrace;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use std::{env, fs, thread};

/// Runs a test with retry logic and error handling.
/// `after` runs even when the test fails, so temp files never outlive a test.
pub fn run_test<T, B, A>(before: B, test: T, after: A)
where
    T: Fn(TestContext) -> DoodleResult<()> + std::panic::UnwindSafe + std::panic::RefUnwindSafe,
    B: Fn() -> DoodleResult<TestContext> + std::panic::UnwindSafe + std::panic::RefUnwindSafe,
    A: Fn(TestContext) -> DoodleResult<()> + std::panic::UnwindSafe + std::panic::RefUnwindSafe,
{
    const MAX_RETRIES: u32 = 3;
    let mut last_error: Option<String> = None;

    for attempt in 1..=MAX_RETRIES {
        let start_time = Instant::now();

        let result = std::panic::catch_unwind(|| {
            let backtrace = Backtrace::capture();
            match before() {
                Ok(ctx) => match test(ctx.clone()) {
                    Ok(_) => after(ctx)
                        .map_err(|e| (format!("After run failed: {:?}", e), backtrace.to_string())),
                    Err(e) => {
                        let _ = after(ctx);
                        Err((format!("Test failed: {:?}", e), backtrace.to_string()))
                    }
                },
                Err(e) => Err((format!("Before run failed: {:?}", e), backtrace.to_string())),
            }
        });

        let elapsed = start_time.elapsed();
        let error = match result {
            Ok(Ok(_)) => return,
            Ok(Err((e, bt))) => {
                if !bt.is_empty() && !bt.contains("disabled") {
                    format!("{}\n{}", e, bt)
                } else {
                    e
                }
            }
            Err(panic_err) => {
                if let Some(s) = panic_err.downcast_ref::<&str>() {
                    format!("Panic: {}", s)
                } else if let Some(s) = panic_err.downcast_ref::<String>() {
                    format!("Panic: {}", s)
                } else {
                    "Panic: unknown payload".to_string()
                }
            }
        };

        if attempt < MAX_RETRIES {
            eprintln!(
                "\n========== Test Attempt {}/{} Failed (took {:?}) ==========",
                attempt, MAX_RETRIES, elapsed
            );
            eprintln!("{}", error);
            thread::sleep(Duration::from_millis(50 * attempt as u64));
        }
        last_error = Some(error);
    }

    panic!(
        "Test failed after {} attempts. Last error: {}",
        MAX_RETRIES,
        last_error.unwrap_or_default()
    );
}

#[derive(Clone)]
pub struct TestContext {
    path: Option<PathBuf>,
    db: Doodle,
}

impl TestContext {
    pub fn new(path: Option<PathBuf>, db: Doodle) -> Self {
        Self { path, db }
    }

    /// The store file, `None` for an in-memory store.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn db(&self) -> Doodle {
        self.db.clone()
    }
}

/// A fresh store file path in the temp directory. The file is not created.
pub fn random_path() -> PathBuf {
    let id = uuid::Uuid::new_v4();
    env::temp_dir().join(format!("doodle-{}.json", id))
}

pub fn create_test_context() -> DoodleResult<TestContext> {
    let path = random_path();
    let db = Doodle::open(&path)?;
    Ok(TestContext::new(Some(path), db))
}

pub fn create_in_memory_test_context() -> DoodleResult<TestContext> {
    let db = Doodle::builder().in_memory().open()?;
    Ok(TestContext::new(None, db))
}

pub fn cleanup(ctx: TestContext) -> DoodleResult<()> {
    if let Some(path) = ctx.path() {
        match fs::remove_file(path) {
            Ok(_) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

pub fn create_test_docs() -> Vec<Document> {
    vec![
        doc!{
            "first_name": "fn1",
            "last_name": "ln1",
            "age": 32,
            "data": [1, 2, 3],
            "body": "a quick brown fox jump over the lazy dog",
        },
        doc!{
            "first_name": "fn2",
            "last_name": "ln2",
            "age": 25,
            "data": [3, 4, 3],
            "body": "quick hello world from doodle",
        },
        doc!{
            "first_name": "fn3",
            "last_name": "ln2",
            "age": 41,
            "data": [9, 4, 8],
            "body": "Lorem ipsum dolor sit amet",
        },
    ]
}

pub fn push_test_documents(db: &Doodle, collection: &str) -> DoodleResult<()> {
    for document in create_test_docs() {
        db.push(collection, document)?;
    }
    Ok(())
}
