//! Error types shared across the HBnB client crates

use thiserror::Error;

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core errors
#[derive(Error, Debug)]
pub enum Error {
    /// Filesystem access failed (session file read/write)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored data could not be encoded or decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// No user configuration directory could be resolved
    #[error("No configuration directory available on this system")]
    NoConfigDir,
}
