//! Addressing Error Types

use derive_more::{Display, Error};

/// An addressing error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for addressing operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The configured archive address cannot have pages below it.
    #[display("invalid archive address: {_0}")]
    InvalidBase(#[error(not(source))] String),
    /// A site-relative path could not be resolved against the archive address.
    #[display("invalid page path: {_0}")]
    InvalidPath(#[error(not(source))] String),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        false
    }
}
