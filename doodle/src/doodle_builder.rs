use crate::doodle::Doodle;
use crate::doodle_config::DoodleConfig;
use crate::errors::{DoodleError, DoodleResult};
use std::path::Path;

/// Builder for opening a [Doodle] handle.
///
/// Configuration errors are captured as they happen and the first one is
/// returned from [DoodleBuilder::open].
///
/// # Examples
///
/// ```rust
/// use doodle::doodle::Doodle;
///
/// // scratch store held in memory
/// let db = Doodle::builder().in_memory().open().unwrap();
///
/// // file store with fsync on every save
/// let dir = tempfile::tempdir().unwrap();
/// let db = Doodle::builder()
///     .file_path(dir.path().join("db.json"))
///     .sync_write(true)
///     .open()
///     .unwrap();
/// ```
#[derive(Default)]
pub struct DoodleBuilder {
    error: Option<DoodleError>,
    doodle_config: DoodleConfig,
}

impl DoodleBuilder {
    /// Creates a builder with the default configuration.
    pub fn new() -> Self {
        DoodleBuilder {
            error: None,
            doodle_config: DoodleConfig::new(),
        }
    }

    /// Sets the backing JSON file. The file does not need to exist yet; it
    /// is created by the first push.
    ///
    /// An empty path is captured as an error and returned by `open()`.
    pub fn file_path(mut self, file_path: impl AsRef<Path>) -> Self {
        if self.error.is_none() {
            if let Err(e) = self.doodle_config.set_file_path(file_path) {
                self.error = Some(e);
            }
        }
        self
    }

    /// Writes through a temporary file and a rename (default `true`).
    pub fn atomic_write(mut self, atomic_write: bool) -> Self {
        self.doodle_config.set_atomic_write(atomic_write);
        self
    }

    /// Fsyncs every save before returning (default `false`).
    pub fn sync_write(mut self, sync_write: bool) -> Self {
        self.doodle_config.set_sync_write(sync_write);
        self
    }

    /// Keeps the store in memory instead of a file.
    pub fn in_memory(mut self) -> Self {
        self.doodle_config.set_in_memory(true);
        self
    }

    /// Opens the handle.
    ///
    /// Nothing is read or written here; the store is loaded by each
    /// operation.
    ///
    /// # Errors
    ///
    /// Returns the first captured configuration error, or an
    /// `InvalidConfiguration` error if the configuration names no store
    /// location or two of them.
    pub fn open(self) -> DoodleResult<Doodle> {
        if let Some(error) = self.error {
            return Err(error);
        }

        let store = self.doodle_config.create_store()?;
        log::debug!("Opening doodle store at {}", store.location());
        Ok(Doodle::new(self.doodle_config, store))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    #[test]
    fn test_open_in_memory() {
        let db = DoodleBuilder::new().in_memory().open().unwrap();
        assert!(db.config().in_memory());
        assert!(!db.exists().unwrap());
    }

    #[test]
    fn test_open_file_with_options() {
        let db = DoodleBuilder::new()
            .file_path("builder_test.json")
            .atomic_write(false)
            .sync_write(true)
            .open()
            .unwrap();

        let config = db.config();
        assert_eq!(config.file_path(), Some(Path::new("builder_test.json")));
        assert!(!config.atomic_write());
        assert!(config.sync_write());
    }

    #[test]
    fn test_first_error_is_returned() {
        let result = DoodleBuilder::new()
            .file_path("")
            .file_path("db.json")
            .open();

        let err = result.err().unwrap();
        assert_eq!(err.kind(), &ErrorKind::InvalidConfiguration);
        assert_eq!(err.message(), "Store file path cannot be empty");
    }

    #[test]
    fn test_open_without_location() {
        let err = DoodleBuilder::new().open().err().unwrap();
        assert_eq!(err.kind(), &ErrorKind::InvalidConfiguration);
    }
}
