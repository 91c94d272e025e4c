//! In-memory page source for testing.

use super::PageSource;
use crate::error::{ErrorKind, Result};
use async_trait::async_trait;
use exn::OptionExt;
use std::collections::HashMap;
use tokio::sync::RwLock;
use url::Url;

/// In-memory page source for testing.
///
/// Serves canned HTML keyed by absolute URL and records every request, so
/// tests can assert how many pages an operation loaded. Unknown URLs fail
/// with [`ErrorKind::Fetch`].
#[derive(Debug, Default)]
pub struct MockSource {
    pages: RwLock<HashMap<String, String>>,
    fetches: RwLock<Vec<String>>,
}

impl MockSource {
    /// Create a mock source pre-populated with pages.
    ///
    /// Panics if any key is not an absolute URL. If test setup is wrong,
    /// then test should not pass.
    pub fn with_pages(pages: impl IntoIterator<Item = (impl AsRef<str>, impl Into<String>)>) -> Self {
        let mut map = HashMap::new();
        for (url, html) in pages {
            let Ok(url) = Url::parse(url.as_ref()) else {
                panic!("MockSource::with_pages: invalid URL {}", url.as_ref());
            };
            map.insert(url.to_string(), html.into());
        }
        Self {
            pages: RwLock::new(map),
            fetches: RwLock::default(),
        }
    }

    /// Serve (or replace) a page after construction.
    pub async fn insert(&self, url: &Url, html: impl Into<String>) {
        self.pages.write().await.insert(url.to_string(), html.into());
    }

    /// Stop serving a page; later fetches of it fail.
    pub async fn remove(&self, url: &Url) {
        self.pages.write().await.remove(url.as_str());
    }

    /// Every URL requested so far, in order, including failed requests.
    pub async fn fetches(&self) -> Vec<String> {
        self.fetches.read().await.clone()
    }

    pub async fn fetch_count(&self, url: &Url) -> usize {
        self.fetches.read().await.iter().filter(|u| *u == url.as_str()).count()
    }
}

#[async_trait]
impl PageSource for MockSource {
    async fn fetch(&self, url: &Url) -> Result<String> {
        self.fetches.write().await.push(url.to_string());
        self.pages
            .read()
            .await
            .get(url.as_str())
            .cloned()
            .ok_or_raise(|| ErrorKind::Fetch(url.to_string()))
    }
}
