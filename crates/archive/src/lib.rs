//! Fetching archive pages and turning them into typed entities.
//!
//! [`Archive`] ties a [`PageSource`] to the page addressing of `quill-query`
//! and the extractors of `quill-extract`. Single pages are loaded through
//! typed [`Request`]s; works are resolved chapter by chapter through a
//! [`WorkCache`] that only ever loads the pages it is missing.

mod cache;
pub mod error;
pub mod request;
pub mod source;
mod work;

pub use crate::cache::WorkCache;
use crate::error::{ErrorKind, Result};
use crate::request::{ArticleComments, Dashboard, Profile, Request, WorkChapters};
pub use crate::source::{PageSource, SourceHandle};
pub use crate::work::{ChapterLookup, Work};
use exn::OptionExt;
use quill_config::Config;
use quill_extract::models::{Article, Comment, UserInfo};
use quill_extract::{Extractor, ThreadShape};
use quill_query::{Address, Page};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use url::Url;

pub struct Archive {
    source: SourceHandle,
    address: Address,
    shape: ThreadShape,
    cache: WorkCache,
}

impl Archive {
    pub fn new(source: SourceHandle, address: Address, shape: ThreadShape) -> Self {
        Self {
            source,
            address,
            shape,
            cache: WorkCache::default(),
        }
    }

    pub fn from_config(source: SourceHandle, config: &Config) -> Result<Self> {
        let address = config.address().map_err(|err| err.raise(ErrorKind::InvalidAddress))?;
        let shape = if config.comments.flatten_replies {
            ThreadShape::Flattened
        } else {
            ThreadShape::Nested
        };
        Ok(Self::new(source, address, shape))
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn cache(&self) -> &WorkCache {
        &self.cache
    }

    /// Fetches a request's page and extracts its entity.
    #[instrument(skip_all, fields(entity = R::ENTITY))]
    pub async fn get<R: Request>(&self, request: &R) -> Result<R::Output> {
        let url = self.url(&request.page(), request.page_number())?;
        let html = self.fetch(&url).await?;
        let extractor = Extractor::from_html(&html);
        request.extract(&extractor).ok_or_raise(|| ErrorKind::Extraction(R::ENTITY))
    }

    /// A user's profile followed by their dashboard.
    #[instrument(skip(self))]
    pub async fn user(&self, username: &str) -> Result<UserInfo> {
        let profile = self
            .get(&Profile {
                username: username.to_string(),
            })
            .await?;
        self.get(&Dashboard { profile }).await
    }

    /// The comment forest at a site-relative address.
    pub async fn comments(&self, path: &str) -> Result<Vec<Comment>> {
        self.get(&ArticleComments {
            path: path.to_string(),
            shape: self.shape,
        })
        .await
    }

    /// Fills in an article's comments from its comment page. Articles without
    /// a comments link are left untouched.
    pub async fn load_comments(&self, article: &mut Article) -> Result<()> {
        if let Some(path) = article.comments_url.as_deref() {
            article.comments = self.comments(path).await?;
        }
        Ok(())
    }

    /// Resolves chapter `index` (1-based) of a work, loading only what the
    /// cache lacks.
    ///
    /// A cached chapter is returned without any fetch. Otherwise chapters past
    /// the first need the work's chapter index, and the work page itself
    /// supplies both the chapter and, on first load, the work's metadata. On
    /// failure the cache is left exactly as it was.
    #[instrument(skip(self))]
    pub async fn chapter(&self, work_id: u64, index: usize) -> Result<Arc<Work>> {
        if index == 0 {
            exn::bail!(ErrorKind::InvalidChapterIndex);
        }
        let guard = self.cache.lock(work_id).await;
        let resolved = self.resolve(work_id, index).await;
        self.cache.unlock(work_id, guard).await;
        resolved
    }

    /// Resolves the chapter after the one last resolved, or the first
    /// chapter of a work not read yet.
    pub async fn next_chapter(&self, work_id: u64) -> Result<Arc<Work>> {
        let index = self.cache.last_index(work_id).await.map_or(1, |last| last + 1);
        self.chapter(work_id, index).await
    }

    /// Callers hold the work's lock.
    async fn resolve(&self, work_id: u64, index: usize) -> Result<Arc<Work>> {
        let cached = self.cache.get(work_id).await;
        if let Some(work) = &cached {
            match work.lookup(index) {
                ChapterLookup::Fetched(_) => {
                    info!("chapter served from cache");
                    self.cache.record_index(work_id, index).await;
                    return Ok(Arc::clone(work));
                },
                ChapterLookup::DoesNotExist => {
                    debug!("chapter is past the work's known chapters");
                    exn::bail!(ErrorKind::ChapterNotFound { work_id, index });
                },
                ChapterLookup::NotFetched => {},
            }
        }

        let mut work = cached.map_or_else(|| Work::new(work_id), Arc::unwrap_or_clone);
        let chapter_id = match index {
            1 => None,
            _ => Some(self.chapter_id(&mut work, index).await?),
        };
        let url = self.url(&Page::Work { work_id, chapter_id }, None)?;
        let html = self.fetch(&url).await?;
        let needs_metadata = !work.has_metadata();
        let (chapter, metadata) = {
            let extractor = Extractor::from_html(&html);
            let metadata = needs_metadata
                .then(|| extractor.story_info().zip(extractor.about_info()))
                .flatten();
            (extractor.chapter(), metadata)
        };
        let chapter = chapter.ok_or_raise(|| ErrorKind::Extraction("chapter"))?;
        match metadata {
            Some((story, about)) => work.set_metadata(story, about),
            None if needs_metadata => warn!(%url, "work page is missing story metadata"),
            None => {},
        }
        work.insert_chapter(index, chapter);
        let work = self.cache.replace(work).await;
        self.cache.record_index(work_id, index).await;
        Ok(work)
    }

    async fn chapter_id(&self, work: &mut Work, index: usize) -> Result<u64> {
        if work.chapter_list().is_none() {
            let list = self.get(&WorkChapters { work_id: work.id() }).await?;
            debug!(chapters = list.len(), "loaded chapter index");
            work.set_chapter_list(list);
        }
        work.chapter_list()
            .and_then(|list| list.id(index))
            .ok_or_raise(|| ErrorKind::ChapterNotFound {
                work_id: work.id(),
                index,
            })
    }

    fn url(&self, page: &Page, page_number: Option<u32>) -> Result<Url> {
        self.address
            .url(page, page_number)
            .map_err(|err| err.raise(ErrorKind::InvalidAddress))
    }

    async fn fetch(&self, url: &Url) -> Result<String> {
        info!(%url, "fetching page");
        self.source.fetch(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{MediaFandoms, NewsFeed, RelatedWorks};
    use crate::source::MockSource;
    use quill_query::MediaCategory;
    use time::OffsetDateTime;

    const WORK: &str = "https://archiveofourown.org/works/10?view_adult=true";
    const NAVIGATE: &str = "https://archiveofourown.org/works/10/navigate";

    fn chapter_url(id: u64) -> String {
        format!("https://archiveofourown.org/works/10/chapters/{id}?view_adult=true")
    }

    fn work_page(n: usize) -> String {
        format!(
            r#"<html><body><div id="outer"><div id="inner" class="wrapper"><div id="main">
              <div class="wrapper"><dl class="work meta group">
                <dd class="stats"><dl class="stats">
                  <dd class="published">2020-01-01</dd><dd class="chapters">3/3</dd>
                </dl></dd>
              </dl></div>
              <div id="workskin">
                <div class="preface group"><h2 class="title heading">Lanterns</h2></div>
                <div id="chapters"><div class="chapter" id="chapter-{n}">
                  <div class="userstuff module"><p>Chapter {n} text.</p></div>
                </div></div>
              </div>
            </div></div></div></body></html>"#
        )
    }

    const CHAPTER_INDEX: &str = r#"<div id="outer"><div id="main"><ol class="chapter index group">
        <li><a href="/works/10/chapters/21">1. One</a></li>
        <li><a href="/works/10/chapters/22">2. Two</a></li>
        <li><a href="/works/10/chapters/23">3. Three</a></li>
    </ol></div></div>"#;

    fn archive(source: &Arc<MockSource>) -> Archive {
        Archive::new(source.clone(), Address::default(), ThreadShape::Nested)
    }

    fn full_source() -> Arc<MockSource> {
        Arc::new(MockSource::with_pages([
            (WORK.to_string(), work_page(1)),
            (NAVIGATE.to_string(), CHAPTER_INDEX.to_string()),
            (chapter_url(22), work_page(2)),
            (chapter_url(23), work_page(3)),
        ]))
    }

    fn text_of(work: &Work, index: usize) -> String {
        match &work.chapter(index).unwrap().paragraphs[0] {
            quill_extract::models::Paragraph::Text { text, .. } => text.to_string(),
            other => panic!("unexpected paragraph {other:?}"),
        }
    }

    #[tokio::test]
    async fn first_chapter_and_metadata_come_from_one_page() {
        let source = full_source();
        let archive = archive(&source);
        let work = archive.chapter(10, 1).await.unwrap();
        assert_eq!(source.fetches().await, vec![WORK.to_string()]);
        assert_eq!(work.about_info().unwrap().title, "Lanterns");
        assert!(work.story_info().is_some());
        assert!(work.chapter_list().is_none());
        assert_eq!(text_of(&work, 1), "Chapter 1 text.");
    }

    #[tokio::test]
    async fn cached_chapters_are_served_without_fetching() {
        let source = full_source();
        let archive = archive(&source);
        let first = archive.chapter(10, 1).await.unwrap();
        let again = archive.chapter(10, 1).await.unwrap();
        assert!(Arc::ptr_eq(&first, &again));
        assert_eq!(source.fetches().await.len(), 1);
    }

    #[tokio::test]
    async fn later_chapters_load_the_chapter_index_once() {
        let source = full_source();
        let archive = archive(&source);
        archive.chapter(10, 2).await.unwrap();
        let work = archive.chapter(10, 3).await.unwrap();
        assert_eq!(
            source.fetches().await,
            vec![NAVIGATE.to_string(), chapter_url(22), chapter_url(23)]
        );
        assert_eq!(work.chapter_list().unwrap().len(), 3);
        assert!(work.has_metadata());
        assert_eq!(text_of(&work, 3), "Chapter 3 text.");
        assert_eq!(work.chapters().map(|(index, _)| index).collect::<Vec<_>>(), vec![2, 3]);
    }

    #[tokio::test]
    async fn chapters_resolve_out_of_order() {
        let source = full_source();
        let archive = archive(&source);
        archive.chapter(10, 3).await.unwrap();
        archive.chapter(10, 2).await.unwrap();
        let work = archive.chapter(10, 3).await.unwrap();
        assert_eq!(text_of(&work, 2), "Chapter 2 text.");
        assert_eq!(text_of(&work, 3), "Chapter 3 text.");
        assert_eq!(work.chapters().map(|(index, _)| index).collect::<Vec<_>>(), vec![2, 3]);
        assert_eq!(
            source.fetches().await,
            vec![NAVIGATE.to_string(), chapter_url(23), chapter_url(22)]
        );
        assert_eq!(archive.cache().last_index(10).await, Some(3));
    }

    #[tokio::test]
    async fn known_chapter_counts_reject_indexes_without_fetching() {
        let source = full_source();
        let archive = archive(&source);
        archive.chapter(10, 1).await.unwrap();
        let err = archive.chapter(10, 5).await.unwrap_err();
        assert_eq!(*err, ErrorKind::ChapterNotFound { work_id: 10, index: 5 });
        assert_eq!(source.fetches().await, vec![WORK.to_string()]);
        assert_eq!(archive.cache().lock_count().await, 0);
    }

    #[tokio::test]
    async fn missing_chapters_fail_before_the_work_page() {
        let source = full_source();
        let archive = archive(&source);
        let err = archive.chapter(10, 5).await.unwrap_err();
        assert_eq!(*err, ErrorKind::ChapterNotFound { work_id: 10, index: 5 });
        assert_eq!(source.fetches().await, vec![NAVIGATE.to_string()]);
        assert!(archive.cache().get(10).await.is_none());
        assert_eq!(archive.cache().lock_count().await, 0);
    }

    #[tokio::test]
    async fn index_zero_is_rejected_without_fetching() {
        let source = full_source();
        let err = archive(&source).chapter(10, 0).await.unwrap_err();
        assert_eq!(*err, ErrorKind::InvalidChapterIndex);
        assert!(source.fetches().await.is_empty());
    }

    #[tokio::test]
    async fn failed_fetches_leave_the_cache_untouched() {
        let source = full_source();
        let archive = archive(&source);
        let before = archive.chapter(10, 1).await.unwrap();
        source.remove(&Url::parse(&chapter_url(23)).unwrap()).await;

        let err = archive.chapter(10, 3).await.unwrap_err();
        assert!(matches!(&*err, ErrorKind::Fetch(_)));
        let after = archive.cache().get(10).await.unwrap();
        assert!(Arc::ptr_eq(&before, &after));
        assert!(after.chapter_list().is_none());
        assert_eq!(archive.cache().last_index(10).await, Some(1));
    }

    #[tokio::test]
    async fn pages_without_chapter_text_are_extraction_failures() {
        let source = Arc::new(MockSource::with_pages([(WORK, "<html><body></body></html>")]));
        let err = archive(&source).chapter(10, 1).await.unwrap_err();
        assert_eq!(*err, ErrorKind::Extraction("chapter"));
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn next_chapter_follows_the_last_resolved_index() {
        let source = full_source();
        let archive = archive(&source);
        let work = archive.next_chapter(10).await.unwrap();
        assert!(work.chapter(1).is_some());
        let work = archive.next_chapter(10).await.unwrap();
        assert!(work.chapter(2).is_some());
        assert_eq!(archive.cache().last_index(10).await, Some(2));
    }

    #[tokio::test]
    async fn concurrent_requests_for_one_work_fetch_once() {
        let source = full_source();
        let archive = archive(&source);
        let (a, b) = tokio::join!(archive.chapter(10, 1), archive.chapter(10, 1));
        assert!(Arc::ptr_eq(&a.unwrap(), &b.unwrap()));
        assert_eq!(source.fetch_count(&Url::parse(WORK).unwrap()).await, 1);
    }

    const PROFILE: &str = r#"<div id="outer"><div id="main"><div class="user home profile">
        <div class="primary header module"><h2 class="heading">jinx_writes</h2></div>
    </div></div></div>"#;
    const DASHBOARD: &str = r#"<div id="outer"><div id="main"><div class="user home">
        <div id="user-fandoms" class="fandom listbox group"></div>
    </div></div></div>"#;

    #[tokio::test]
    async fn users_load_profile_then_dashboard() {
        let source = Arc::new(MockSource::with_pages([
            ("https://archiveofourown.org/users/jinx_writes/profile", PROFILE),
            ("https://archiveofourown.org/users/jinx_writes", DASHBOARD),
        ]));
        let user = archive(&source).user("jinx_writes").await.unwrap();
        assert_eq!(user.profile.username, "jinx_writes");
        assert_eq!(user.counts.works, 0);
        assert_eq!(
            source.fetches().await,
            vec![
                "https://archiveofourown.org/users/jinx_writes/profile".to_string(),
                "https://archiveofourown.org/users/jinx_writes".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn missing_profiles_stop_before_the_dashboard() {
        let source = Arc::new(MockSource::with_pages([(
            "https://archiveofourown.org/users/nobody/profile",
            "<html></html>",
        )]));
        let err = archive(&source).user("nobody").await.unwrap_err();
        assert_eq!(*err, ErrorKind::Extraction("user profile"));
        assert_eq!(source.fetches().await.len(), 1);
    }

    fn comment(user: &str) -> String {
        format!(r#"<li class="comment group"><h4 class="heading byline"><a href="/users/{user}/pseuds/{user}">{user}</a></h4></li>"#)
    }

    fn comments_page() -> String {
        format!(
            r#"<div id="outer"><div id="main" class="news admin home"><div id="feedback"><div id="comments_placeholder">
              <ol class="thread">{}<li><ol class="thread">{}<li><ol class="thread">{}</ol></li></ol></li></ol>
            </div></div></div></div>"#,
            comment("ann"),
            comment("bee"),
            comment("cat"),
        )
    }

    const COMMENTS: &str = "https://archiveofourown.org/admin_posts/30?show_comments=true";

    #[tokio::test]
    async fn configured_thread_shape_applies_to_comments() {
        let source = Arc::new(MockSource::with_pages([(COMMENTS.to_string(), comments_page())]));
        let mut config = Config::default();
        config.comments.flatten_replies = true;
        let flattened = Archive::from_config(source.clone(), &config).unwrap();
        let comments = flattened.comments("/admin_posts/30?show_comments=true").await.unwrap();
        let ann = &comments[0];
        assert_eq!(ann.children.len(), 2);
        assert_eq!(ann.children[1].replying_to.as_deref(), Some("bee"));

        let nested = archive(&source).comments("/admin_posts/30?show_comments=true").await.unwrap();
        assert_eq!(nested[0].children.len(), 1);
        assert_eq!(nested[0].children[0].children[0].username(), "cat");
    }

    #[tokio::test]
    async fn articles_gain_their_comments() {
        let source = Arc::new(MockSource::with_pages([(COMMENTS.to_string(), comments_page())]));
        let mut article = Article {
            title: "Update".to_string(),
            published: OffsetDateTime::UNIX_EPOCH.to_utc(),
            tags: Vec::new(),
            comments_url: Some("/admin_posts/30?show_comments=true".to_string()),
            comments_count: 3,
            content: Vec::new(),
            comments: Vec::new(),
        };
        archive(&source).load_comments(&mut article).await.unwrap();
        assert_eq!(article.comments[0].username(), "ann");

        let mut silent = Article {
            comments_url: None,
            comments: Vec::new(),
            ..article
        };
        archive(&source).load_comments(&mut silent).await.unwrap();
        assert!(silent.comments.is_empty());
        assert_eq!(source.fetches().await.len(), 1);
    }

    #[tokio::test]
    async fn listing_requests_pass_their_page_number() {
        let source = Arc::new(MockSource::default());
        let archive = archive(&source);
        let err = archive.get(&RelatedWorks::new("Arcane").on_page(2)).await.unwrap_err();
        assert!(err.is_retryable());
        archive.get(&NewsFeed { page: Some(4) }).await.unwrap_err();
        archive.get(&MediaFandoms(MediaCategory::Anime)).await.unwrap_err();
        assert_eq!(
            source.fetches().await,
            vec![
                "https://archiveofourown.org/tags/Arcane/works?page=2".to_string(),
                "https://archiveofourown.org/admin_posts?page=4".to_string(),
                "https://archiveofourown.org/media/Anime%20*a*%20Manga/fandoms".to_string(),
            ]
        );
    }
}
