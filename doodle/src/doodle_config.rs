use crate::errors::{DoodleError, DoodleResult, ErrorKind};
use crate::store::{DoodleStore, FileStore, InMemoryStore};
use std::path::{Path, PathBuf};

/// Configuration of a [crate::doodle::Doodle] handle.
///
/// Usually filled through [crate::doodle_builder::DoodleBuilder]; a config
/// is either backed by a file (`file_path`) or held in memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DoodleConfig {
    file_path: Option<PathBuf>,
    atomic_write: bool,
    sync_write: bool,
    in_memory: bool,
}

impl Default for DoodleConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl DoodleConfig {
    /// Creates a configuration with atomic writes on, fsync off and no store
    /// location yet.
    pub fn new() -> Self {
        DoodleConfig {
            file_path: None,
            atomic_write: true,
            sync_write: false,
            in_memory: false,
        }
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Sets the backing JSON file.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if the path is empty.
    pub fn set_file_path(&mut self, file_path: impl AsRef<Path>) -> DoodleResult<()> {
        let file_path = file_path.as_ref();
        if file_path.as_os_str().is_empty() {
            log::error!("Store file path cannot be empty");
            return Err(DoodleError::new(
                "Store file path cannot be empty",
                ErrorKind::InvalidConfiguration,
            ));
        }
        self.file_path = Some(file_path.to_path_buf());
        Ok(())
    }

    /// Whether saves replace the file through a temporary file and a rename.
    pub fn atomic_write(&self) -> bool {
        self.atomic_write
    }

    pub fn set_atomic_write(&mut self, atomic_write: bool) {
        self.atomic_write = atomic_write;
    }

    /// Whether saves fsync the written data before returning.
    pub fn sync_write(&self) -> bool {
        self.sync_write
    }

    pub fn set_sync_write(&mut self, sync_write: bool) {
        self.sync_write = sync_write;
    }

    pub fn in_memory(&self) -> bool {
        self.in_memory
    }

    pub fn set_in_memory(&mut self, in_memory: bool) {
        self.in_memory = in_memory;
    }

    /// Checks that the configuration names exactly one store location.
    pub fn validate(&self) -> DoodleResult<()> {
        match (&self.file_path, self.in_memory) {
            (None, false) => {
                log::error!("A store file path is required unless the store is in memory");
                Err(DoodleError::new(
                    "A store file path is required unless the store is in memory",
                    ErrorKind::InvalidConfiguration,
                ))
            }
            (Some(_), true) => {
                log::error!("An in-memory store cannot have a file path");
                Err(DoodleError::new(
                    "An in-memory store cannot have a file path",
                    ErrorKind::InvalidConfiguration,
                ))
            }
            _ => Ok(()),
        }
    }

    /// Creates the store provider described by this configuration.
    pub(crate) fn create_store(&self) -> DoodleResult<DoodleStore> {
        self.validate()?;
        match &self.file_path {
            Some(file_path) => Ok(DoodleStore::new(FileStore::with_options(
                file_path,
                self.atomic_write,
                self.sync_write,
            ))),
            None => Ok(DoodleStore::new(InMemoryStore::new())),
        }
    }
}
