use backtrace::Backtrace;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::result::Result;

/// Error kinds for Doodle operations
///
/// Each kind describes a category of failure so callers can branch on the
/// cause without parsing messages.
///
/// # Examples
///
/// ```rust
/// use doodle::errors::{DoodleError, DoodleResult, ErrorKind};
///
/// fn example() -> DoodleResult<()> {
///     Err(DoodleError::new("Collection not found.", ErrorKind::CollectionNotFound))
/// }
///
/// assert_eq!(example().unwrap_err().kind(), &ErrorKind::CollectionNotFound);
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ErrorKind {
    // Store file errors
    /// The backing file does not exist
    FileNotFound,
    /// The backing file is not a valid store tree
    ParseError,
    /// Persisting the store tree failed
    WriteFailure,
    /// Generic IO error while reading the store
    IOError,
    /// Permission denied for file operation
    PermissionDenied,

    // Lookup errors
    /// Collection does not exist
    CollectionNotFound,
    /// No document with the requested id exists in the collection
    DocumentNotFound,

    // Id errors
    /// The provided id is not a positive integer
    InvalidId,
    /// The provided id is already taken in the collection
    DuplicateId,

    /// The operation is not valid in the current context
    InvalidOperation,
    /// The builder was given an unusable configuration
    InvalidConfiguration,

    /// Internal error (usually indicates a bug)
    InternalError,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::FileNotFound => write!(f, "File not found"),
            ErrorKind::ParseError => write!(f, "Parse error"),
            ErrorKind::WriteFailure => write!(f, "Write failure"),
            ErrorKind::IOError => write!(f, "IO error"),
            ErrorKind::PermissionDenied => write!(f, "Permission denied"),
            ErrorKind::CollectionNotFound => write!(f, "Collection not found"),
            ErrorKind::DocumentNotFound => write!(f, "Document not found"),
            ErrorKind::InvalidId => write!(f, "Invalid ID"),
            ErrorKind::DuplicateId => write!(f, "Duplicate ID"),
            ErrorKind::InvalidOperation => write!(f, "Invalid operation"),
            ErrorKind::InvalidConfiguration => write!(f, "Invalid configuration"),
            ErrorKind::InternalError => write!(f, "Internal error"),
        }
    }
}

/// Custom Doodle error type.
///
/// `DoodleError` carries a message, an [ErrorKind] and an optional cause, so
/// a failed save can report both "Error writing JSON file" and the IO error
/// underneath it.
///
/// # Examples
///
/// ```rust
/// use doodle::errors::{DoodleError, ErrorKind};
///
/// let cause = DoodleError::new("disk full", ErrorKind::IOError);
/// let err = DoodleError::new_with_cause("Error writing JSON file", ErrorKind::WriteFailure, cause);
/// assert_eq!(err.kind(), &ErrorKind::WriteFailure);
/// assert!(err.cause().is_some());
/// ```
#[derive(Clone)]
pub struct DoodleError {
    message: String,
    error_kind: ErrorKind,
    cause: Option<Box<DoodleError>>,
    backtrace: Backtrace,
}

impl DoodleError {
    /// Creates a new `DoodleError` with the specified message and error kind.
    pub fn new(message: &str, error_kind: ErrorKind) -> Self {
        DoodleError {
            message: message.to_string(),
            error_kind,
            cause: None,
            backtrace: Backtrace::new_unresolved(),
        }
    }

    /// Creates a new `DoodleError` wrapping the error that caused it.
    pub fn new_with_cause(message: &str, error_kind: ErrorKind, cause: DoodleError) -> Self {
        DoodleError {
            message: message.to_string(),
            error_kind,
            cause: Some(Box::new(cause)),
            backtrace: Backtrace::new_unresolved(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.error_kind
    }

    pub fn cause(&self) -> Option<&DoodleError> {
        self.cause.as_deref()
    }
}

impl Display for DoodleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.cause {
            Some(cause) => write!(f, "{}: {}", self.message, cause),
            None => write!(f, "{}", self.message),
        }
    }
}

impl Debug for DoodleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // print error message with stack trace followed by cause
        match &self.cause {
            Some(cause) => write!(f, "{}\nCaused by: {:?}", self.message, cause),
            None => {
                let mut backtrace = self.backtrace.clone();
                backtrace.resolve();
                write!(f, "{}\n{:?}", self.message, backtrace)
            }
        }
    }
}

impl Error for DoodleError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.cause {
            Some(cause) => Some(cause.as_ref()),
            None => None,
        }
    }
}

/// A result type alias for Doodle operations.
pub type DoodleResult<T> = Result<T, DoodleError>;

impl From<std::io::Error> for DoodleError {
    fn from(err: std::io::Error) -> Self {
        let error_kind = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorKind::FileNotFound,
            std::io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied,
            _ => ErrorKind::IOError,
        };
        DoodleError::new(&format!("IO error: {}", err), error_kind)
    }
}

impl From<serde_json::Error> for DoodleError {
    fn from(err: serde_json::Error) -> Self {
        let error_kind = match err.classify() {
            serde_json::error::Category::Io => ErrorKind::IOError,
            _ => ErrorKind::ParseError,
        };
        DoodleError::new(&format!("JSON error: {}", err), error_kind)
    }
}
