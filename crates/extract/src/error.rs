//! Extraction Error Types
//!
//! Entity extraction never fails with an error: a page that is missing the
//! markup an entity needs simply yields no entity. These errors are raised by
//! the strict parsers underneath (archive vocabularies, chapter progress and
//! dates) which the extractors downgrade to an absent field.

use derive_more::{Display, Error};

/// An extraction error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// A field was found but could not be parsed.
    #[display("failed to parse field '{field}', found value: {value}")]
    ParseError {
        /// The field that failed to parse.
        field: &'static str,
        /// The offending value.
        value: String,
    },
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // Markup either has the field or it doesn't; parsing it again
        // will not change the outcome.
        false
    }
}
