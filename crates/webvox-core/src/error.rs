//! Error types for the bridge.

use thiserror::Error;

/// Bridge-wide error type.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The configured world does not exist on the host
    #[error("World not found: {0}")]
    WorldNotFound(String),

    /// A material name that the host vocabulary does not know
    #[error("Unknown material: {0}")]
    UnknownMaterial(String),

    /// Configuration error
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The host simulation refused or failed a mutation
    #[error("Host error: {0}")]
    Host(String),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
