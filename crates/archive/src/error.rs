//! Archive Error Types

use derive_more::{Display, Error};

/// An archive error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for archive operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Chapters are numbered from 1.
    #[display("chapter indexes start at 1")]
    InvalidChapterIndex,
    /// The work's chapter index has no entry at this position.
    #[display("work {work_id} has no chapter {index}")]
    ChapterNotFound { work_id: u64, index: usize },
    /// The page source could not deliver the page.
    #[display("failed to fetch {_0}")]
    Fetch(#[error(not(source))] String),
    /// The page arrived but did not contain the entity.
    #[display("page did not contain a {_0}")]
    Extraction(#[error(not(source))] &'static str),
    /// A page address could not be built from the configured base.
    #[display("invalid page address")]
    InvalidAddress,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Fetch(_))
    }
}
