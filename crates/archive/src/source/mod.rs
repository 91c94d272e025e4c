//! The seam between the archive core and whatever actually downloads pages.

#[cfg(any(test, feature = "mock"))]
mod mock;

#[cfg(any(test, feature = "mock"))]
pub use self::mock::MockSource;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use url::Url;

/// Delivers the HTML of an archive page.
///
/// Implementations own transport concerns (sessions, rate limits, retries);
/// by the time `fetch` returns, success or failure is settled. Failures
/// should be raised as [`ErrorKind::Fetch`](crate::error::ErrorKind::Fetch).
///
/// # Examples
///
/// ```
/// use quill_archive::error::Result;
/// use quill_archive::source::PageSource;
/// use url::Url;
///
/// async fn page_size(source: &dyn PageSource, url: &Url) -> Result<usize> {
///     Ok(source.fetch(url).await?.len())
/// }
/// ```
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<String>;
}

pub type SourceHandle = Arc<dyn PageSource>;
