mod category;
mod chapter;
mod chapters;
mod comment;
mod feed;
mod media;
mod news;
mod rating;
mod rich;
mod story;
mod user;
mod warning;

pub use self::category::Category;
pub use self::chapter::{Alignment, Chapter, ChapterList, Paragraph};
pub use self::chapters::Chapters;
pub use self::comment::Comment;
pub use self::feed::{FacetGroup, FeedCardInfo, FeedFilterInfo, FeedInfo, FeedStats, FilterInfo};
pub use self::media::{CategoryInfo, CategorySort, FandomGroup, FandomItem};
pub use self::news::{Article, Content, News};
pub use self::rating::Rating;
pub(crate) use self::rich::escape_text;
pub use self::rich::RichText;
pub use self::story::{AboutInfo, StoryInfo, StoryStats};
pub use self::user::{ProfileInfo, UserCounts, UserInfo};
pub use self::warning::Warning;

/// A hyperlink as it appears on the page: where it points and what it says.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Link {
    pub url: String,
    pub name: String,
}
impl Link {
    pub fn new(url: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            name: name.into(),
        }
    }
}

fn sanitize(s: impl AsRef<str>) -> String {
    s.as_ref().trim().to_lowercase().replace(['/', '-', '_', ' ', '.'], "")
}
