//! Page extractors.
//!
//! Each extractor is a pure function from a parsed page to an optional
//! entity. An entity is only produced when the anchors it cannot do without
//! are present; every other field degrades to `None` or empty.

mod chapter;
mod data;
mod feed;
mod media;
mod news;
mod stats;
mod user;
mod work;

use std::convert::Infallible;
use std::str::FromStr;

pub(crate) use self::data::Datalist;
use crate::models::{
    AboutInfo, CategoryInfo, Chapter, ChapterList, Comment, FeedInfo, News, ProfileInfo, StoryInfo, UserInfo,
};
use crate::thread::{self, ThreadNode, ThreadShape};
use scraper::{ElementRef, Html};
use tracing::{debug, instrument};

#[derive(Debug)]
pub struct Extractor {
    document: Html,
}
impl Extractor {
    pub fn from_document(document: Html) -> Self {
        Self { document }
    }

    pub fn from_html(html: &str) -> Self {
        Self::from_document(Html::parse_document(html))
    }

    fn root(&self) -> ElementRef<'_> {
        self.document.root_element()
    }

    /// A page of a work listing (`/tags/<tag>/works`, `/works?<query>`).
    ///
    /// Malformed cards are skipped rather than failing the page. When the
    /// listing has no filter sidebar, the vocabulary is empty for
    /// `fandom_name`.
    #[instrument(skip(self))]
    pub fn feed(&self, fandom_name: &str) -> Option<FeedInfo> {
        missing_logged("feed", feed::feed(self.root(), fandom_name))
    }

    /// Tag and statistics metadata from a work page.
    #[instrument(skip(self))]
    pub fn story_info(&self) -> Option<StoryInfo> {
        missing_logged("story info", work::story_info(self.root()))
    }

    /// Title block from a work page.
    #[instrument(skip(self))]
    pub fn about_info(&self) -> Option<AboutInfo> {
        missing_logged("about info", work::about_info(self.root()))
    }

    /// Chapter content from a work page (the first chapter, or the one the
    /// page is scoped to).
    #[instrument(skip(self))]
    pub fn chapter(&self) -> Option<Chapter> {
        missing_logged("chapter", chapter::chapter(self.root()))
    }

    /// Chapter index from `/works/<id>/navigate`.
    #[instrument(skip(self))]
    pub fn chapter_list(&self) -> Option<ChapterList> {
        missing_logged("chapter list", work::chapter_list(self.root()))
    }

    /// Fandom index from `/media/<category>/fandoms`.
    #[instrument(skip(self))]
    pub fn category(&self) -> Option<CategoryInfo> {
        missing_logged("category index", media::category(self.root()))
    }

    /// Identity fields from a user's profile page.
    #[instrument(skip(self))]
    pub fn profile(&self) -> Option<ProfileInfo> {
        missing_logged("profile", user::profile(self.root()))
    }

    /// Activity fields from a user's dashboard. Identity comes from the
    /// already extracted `profile`; it is not re-read from this page.
    #[instrument(skip(self, profile), fields(username = %profile.username))]
    pub fn dashboard(&self, profile: ProfileInfo) -> Option<UserInfo> {
        missing_logged("dashboard", user::dashboard(self.root(), profile))
    }

    /// A page of admin posts.
    #[instrument(skip(self))]
    pub fn news(&self) -> Option<News> {
        missing_logged("news", news::news(self.root()))
    }

    /// The flat thread encoding of an admin post's comment page.
    pub fn comment_nodes(&self) -> Option<Vec<ThreadNode<Comment>>> {
        news::comment_nodes(self.root())
    }

    /// Reconstructed comment forest of an admin post's comment page.
    #[instrument(skip(self))]
    pub fn comments(&self, shape: ThreadShape) -> Option<Vec<Comment>> {
        let nodes = missing_logged("comments", self.comment_nodes())?;
        Some(thread::build(nodes, shape))
    }
}
impl FromStr for Extractor {
    type Err = Infallible;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::from_html(s))
    }
}
impl From<&str> for Extractor {
    fn from(value: &str) -> Self {
        Self::from_html(value)
    }
}
impl From<String> for Extractor {
    fn from(value: String) -> Self {
        Self::from_html(&value)
    }
}
impl From<Html> for Extractor {
    fn from(document: Html) -> Self {
        Self::from_document(document)
    }
}

fn missing_logged<T>(entity: &'static str, value: Option<T>) -> Option<T> {
    if value.is_none() {
        debug!(entity, "required markup not found on page");
    }
    value
}
