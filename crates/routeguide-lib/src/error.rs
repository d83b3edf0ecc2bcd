use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the route guide library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Dataset could not be located at the resolved path.
    #[error("dataset not found at {path}")]
    DatasetNotFound { path: PathBuf },

    /// Raised when the dataset does not parse into a sequence of features.
    #[error("malformed feature dataset: {message}")]
    Dataset { message: String },

    /// Raised when a route recorder is driven outside its state machine.
    #[error("cannot {operation} a route recorder that is {state}")]
    InvalidState {
        operation: &'static str,
        state: &'static str,
    },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON encoding errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Build a dataset error from a JSON parse failure, keeping its position.
    pub(crate) fn dataset(err: serde_json::Error) -> Self {
        Error::Dataset {
            message: format!("{} (line {}, column {})", err, err.line(), err.column()),
        }
    }
}
