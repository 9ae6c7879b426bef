use crate::errors::{DoodleError, DoodleResult, ErrorKind};
use crate::store::{DoodleStoreProvider, StoreTree};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::NamedTempFile;

/// Store provider backed by a single JSON file.
///
/// # Characteristics
/// - **Whole-file I/O**: one read per load, one write per save
/// - **Atomic replace**: with `atomic_write` on, the tree is written to a
///   temporary file next to the target and renamed over it, so a failed save
///   leaves the previous content in place
/// - **Optional fsync**: with `sync_write` on, the temporary file is flushed
///   to disk before the rename
#[derive(Clone)]
pub struct FileStore {
    inner: Arc<FileStoreInner>,
}

impl FileStore {
    /// Creates a file store with atomic writes enabled and fsync disabled.
    pub fn new(path: impl Into<PathBuf>) -> FileStore {
        FileStore::with_options(path, true, false)
    }

    pub fn with_options(path: impl Into<PathBuf>, atomic_write: bool, sync_write: bool) -> FileStore {
        FileStore {
            inner: Arc::new(FileStoreInner {
                path: path.into(),
                atomic_write,
                sync_write,
            }),
        }
    }

    pub fn path(&self) -> &Path {
        &self.inner.path
    }
}

impl DoodleStoreProvider for FileStore {
    fn load(&self) -> DoodleResult<StoreTree> {
        self.inner.load()
    }

    fn save(&self, tree: &StoreTree) -> DoodleResult<()> {
        self.inner.save(tree)
    }

    fn exists(&self) -> DoodleResult<bool> {
        Ok(self.inner.path.try_exists()?)
    }

    fn location(&self) -> String {
        self.inner.location()
    }
}

struct FileStoreInner {
    path: PathBuf,
    atomic_write: bool,
    sync_write: bool,
}

impl FileStoreInner {
    fn location(&self) -> String {
        std::path::absolute(&self.path)
            .unwrap_or_else(|_| self.path.clone())
            .to_string_lossy()
            .into_owned()
    }

    fn load(&self) -> DoodleResult<StoreTree> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(DoodleError::new(
                    &format!("Store file {} not found", self.path.display()),
                    ErrorKind::FileNotFound,
                ));
            }
            Err(err) => {
                log::error!("Error reading JSON file {}: {}", self.path.display(), err);
                return Err(DoodleError::new_with_cause(
                    "Error reading JSON file",
                    ErrorKind::IOError,
                    err.into(),
                ));
            }
        };

        StoreTree::parse(&text).inspect_err(|err| {
            log::error!("Error parsing JSON file {}: {}", self.path.display(), err);
        })
    }

    fn save(&self, tree: &StoreTree) -> DoodleResult<()> {
        let text = tree.to_pretty_string()?;
        let result = if self.atomic_write {
            self.write_atomic(&text)
        } else {
            self.write_in_place(&text)
        };

        result.map_err(|err| {
            log::error!("Error writing JSON file {}: {}", self.path.display(), err);
            DoodleError::new_with_cause("Error writing JSON file", ErrorKind::WriteFailure, err)
        })
    }

    fn write_in_place(&self, text: &str) -> DoodleResult<()> {
        let mut file = fs::File::create(&self.path)?;
        file.write_all(text.as_bytes())?;
        if self.sync_write {
            file.sync_all()?;
        }
        Ok(())
    }

    fn write_atomic(&self, text: &str) -> DoodleResult<()> {
        let directory = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut temp_file = NamedTempFile::new_in(directory)?;
        temp_file.write_all(text.as_bytes())?;

        // keep the permissions of the file being replaced
        if let Ok(metadata) = fs::metadata(&self.path) {
            temp_file.as_file().set_permissions(metadata.permissions())?;
        }
        if self.sync_write {
            temp_file.as_file().sync_all()?;
        }

        temp_file
            .persist(&self.path)
            .map_err(|err| DoodleError::from(err.error))?;
        Ok(())
    }
}
