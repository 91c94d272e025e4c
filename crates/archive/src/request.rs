//! The closed set of archive pages, each paired with the entity it yields.

use quill_extract::models::{CategoryInfo, ChapterList, Comment, FeedInfo, News, ProfileInfo, UserInfo};
use quill_extract::{Extractor, ThreadShape};
use quill_query::{FilterSelections, MediaCategory, Page, ProfileSection, encode};

/// A page to fetch and the entity to extract from it.
pub trait Request: Send + Sync {
    type Output: Send;
    /// Entity name reported when extraction comes up empty.
    const ENTITY: &'static str;

    fn page(&self) -> Page;

    /// 1-based page of a paginated listing.
    fn page_number(&self) -> Option<u32> {
        None
    }

    fn extract(&self, extractor: &Extractor) -> Option<Self::Output>;
}

/// Works tagged with a fandom or tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedWorks {
    pub tag: String,
    pub page: Option<u32>,
}
impl RelatedWorks {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            page: None,
        }
    }

    pub fn on_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }
}
impl Request for RelatedWorks {
    type Output = FeedInfo;
    const ENTITY: &'static str = "work feed";

    fn page(&self) -> Page {
        Page::RelatedWorks { tag: self.tag.clone() }
    }

    fn page_number(&self) -> Option<u32> {
        self.page
    }

    fn extract(&self, extractor: &Extractor) -> Option<FeedInfo> {
        extractor.feed(&self.tag)
    }
}

/// A fandom's works narrowed by filter selections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredWorks {
    pub fandom: String,
    pub selections: FilterSelections,
    pub page: Option<u32>,
}
impl FilteredWorks {
    pub fn new(fandom: impl Into<String>, selections: FilterSelections) -> Self {
        Self {
            fandom: fandom.into(),
            selections,
            page: None,
        }
    }

    pub fn on_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }
}
impl Request for FilteredWorks {
    type Output = FeedInfo;
    const ENTITY: &'static str = "work feed";

    fn page(&self) -> Page {
        Page::FilteredWorks {
            query: encode(&self.selections, &self.fandom),
        }
    }

    fn page_number(&self) -> Option<u32> {
        self.page
    }

    fn extract(&self, extractor: &Extractor) -> Option<FeedInfo> {
        extractor.feed(&self.fandom)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NewsFeed {
    pub page: Option<u32>,
}
impl Request for NewsFeed {
    type Output = News;
    const ENTITY: &'static str = "news page";

    fn page(&self) -> Page {
        Page::News
    }

    fn page_number(&self) -> Option<u32> {
        self.page
    }

    fn extract(&self, extractor: &Extractor) -> Option<News> {
        extractor.news()
    }
}

/// The comment threads under one news article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleComments {
    /// Site-relative address, as found in [`Article::comments_url`](quill_extract::models::Article).
    pub path: String,
    pub shape: ThreadShape,
}
impl Request for ArticleComments {
    type Output = Vec<Comment>;
    const ENTITY: &'static str = "comment section";

    fn page(&self) -> Page {
        Page::Comments { path: self.path.clone() }
    }

    fn extract(&self, extractor: &Extractor) -> Option<Vec<Comment>> {
        extractor.comments(self.shape)
    }
}

/// The fandom index of a media category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaFandoms(pub MediaCategory);
impl Request for MediaFandoms {
    type Output = CategoryInfo;
    const ENTITY: &'static str = "fandom index";

    fn page(&self) -> Page {
        Page::Media(self.0)
    }

    fn extract(&self, extractor: &Extractor) -> Option<CategoryInfo> {
        extractor.category()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkChapters {
    pub work_id: u64,
}
impl Request for WorkChapters {
    type Output = ChapterList;
    const ENTITY: &'static str = "chapter index";

    fn page(&self) -> Page {
        Page::WorkChapters { work_id: self.work_id }
    }

    fn extract(&self, extractor: &Extractor) -> Option<ChapterList> {
        extractor.chapter_list()
    }
}

/// Identity fields from a user's profile sub-page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub username: String,
}
impl Request for Profile {
    type Output = ProfileInfo;
    const ENTITY: &'static str = "user profile";

    fn page(&self) -> Page {
        Page::Profile {
            username: self.username.clone(),
            section: ProfileSection::Profile,
        }
    }

    fn extract(&self, extractor: &Extractor) -> Option<ProfileInfo> {
        extractor.profile()
    }
}

/// A user's dashboard, completing a profile fetched beforehand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dashboard {
    pub profile: ProfileInfo,
}
impl Request for Dashboard {
    type Output = UserInfo;
    const ENTITY: &'static str = "user dashboard";

    fn page(&self) -> Page {
        Page::Profile {
            username: self.profile.username.clone(),
            section: ProfileSection::Dashboard,
        }
    }

    fn extract(&self, extractor: &Extractor) -> Option<UserInfo> {
        extractor.dashboard(self.profile.clone())
    }
}
