//! Error types for satwatch.

use thiserror::Error;

/// Result type alias using the satwatch error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in satwatch.
#[derive(Error, Debug)]
pub enum Error {
    /// The transaction-history provider could not be reached or answered
    /// with a non-success status.
    #[error("provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// The provider answered, but the body did not have the expected shape.
    #[error("malformed provider response: {0}")]
    MalformedResponse(String),

    /// Caller-supplied input was rejected before any work was done.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Key, mnemonic or address handling failed.
    #[error("wallet error: {0}")]
    Wallet(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns true if the error came from the provider side of a query
    /// (transport, status, or body shape) rather than from local input.
    #[must_use]
    pub fn is_provider_error(&self) -> bool {
        matches!(self, Self::ProviderUnavailable(_) | Self::MalformedResponse(_))
    }
}
