//! Crate-level error types
//!
//! One taxonomy shared by the registry, supervisor and router. Validation and
//! conflict errors are user-correctable; `Io`/`Internal` are treated as fatal
//! to the request and logged at the call site rather than recovered from.

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for session manager operations
#[derive(Debug)]
pub enum Error {
    /// Malformed input rejected by a validator
    Validation(&'static str),
    /// Referenced user or stream key does not exist
    NotFound,
    /// Stream key is already broadcasting
    AlreadyActive(String),
    /// Freshly generated credential collided with an existing one
    KeyCollision,
    /// Stream key resolved to zero or multiple owners
    NotAuthorized,
    /// Filesystem or process fault
    Io(std::io::Error),
    /// Unexpected fault in an external collaborator (account store)
    Internal(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Validation(what) => write!(f, "Invalid {}", what),
            Error::NotFound => write!(f, "Not found"),
            Error::AlreadyActive(key) => write!(f, "Stream already active: {}", key),
            Error::KeyCollision => write!(f, "Stream key collision"),
            Error::NotAuthorized => write!(f, "Not authorized"),
            Error::Io(e) => write!(f, "I/O error: {}", e),
            Error::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}
