use crate::error::{ErrorKind, Result};
use exn::{OptionExt, ResultExt};
use quill_extract::web_friendly;
use std::sync::LazyLock;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://archiveofourown.org";
pub static DEFAULT_BASE: LazyLock<Url> = LazyLock::new(|| Url::parse(DEFAULT_BASE_URL).unwrap());

/// Sub-pages of a user's profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ProfileSection {
    #[default]
    Dashboard,
    Profile,
    Works,
    Series,
    Bookmarks,
    Collections,
    Gifts,
}
impl ProfileSection {
    fn segment(&self) -> Option<&'static str> {
        match self {
            Self::Dashboard => None,
            Self::Profile => Some("profile"),
            Self::Works => Some("works"),
            Self::Series => Some("series"),
            Self::Bookmarks => Some("bookmarks"),
            Self::Collections => Some("collections"),
            Self::Gifts => Some("gifts"),
        }
    }
}

/// Top-level media categories of the fandom index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaCategory {
    Anime,
    Books,
    Cartoons,
    Celebrities,
    Movies,
    Music,
    Other,
    Theater,
    Tv,
    Uncategorized,
    VideoGames,
}
impl MediaCategory {
    pub const ALL: [MediaCategory; 11] = [
        Self::Anime,
        Self::Books,
        Self::Cartoons,
        Self::Celebrities,
        Self::Movies,
        Self::Music,
        Self::Other,
        Self::Theater,
        Self::Tv,
        Self::Uncategorized,
        Self::VideoGames,
    ];

    /// The category's name as the archive spells it.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Anime => "Anime & Manga",
            Self::Books => "Books & Literature",
            Self::Cartoons => "Cartoons & Comics & Graphic Novels",
            Self::Celebrities => "Celebrities & Real People",
            Self::Movies => "Movies",
            Self::Music => "Music & Bands",
            Self::Other => "Other Media",
            Self::Theater => "Theater",
            Self::Tv => "TV Shows",
            Self::Uncategorized => "Uncategorized Fandoms",
            Self::VideoGames => "Video Games",
        }
    }
}

/// Every archive page this crate knows how to address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Page {
    /// Works tagged with a fandom or tag.
    RelatedWorks { tag: String },
    /// Work search with an encoded filter query (see [`encode`](crate::encode)).
    FilteredWorks { query: String },
    Profile { username: String, section: ProfileSection },
    News,
    /// A work page, optionally scoped to one chapter.
    Work { work_id: u64, chapter_id: Option<u64> },
    /// The chapter index of a work.
    WorkChapters { work_id: u64 },
    Media(MediaCategory),
    /// A site-relative address taken from a page, such as an article's
    /// comments link.
    Comments { path: String },
}

/// Resolves [`Page`]s against the archive's base address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    base: Url,
    view_adult: bool,
}
impl Address {
    pub fn new(base: Url, view_adult: bool) -> Result<Self> {
        if base.cannot_be_a_base() {
            exn::bail!(ErrorKind::InvalidBase(base.to_string()));
        }
        Ok(Self { base, view_adult })
    }

    pub fn parse(base: &str, view_adult: bool) -> Result<Self> {
        let url = Url::parse(base).or_raise(|| ErrorKind::InvalidBase(base.to_string()))?;
        Self::new(url, view_adult)
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// The page's URL; `page_number` (1-based) selects a page of a
    /// paginated listing.
    pub fn url(&self, page: &Page, page_number: Option<u32>) -> Result<Url> {
        let mut url = match page {
            Page::Comments { path } => self.base.join(path).or_raise(|| ErrorKind::InvalidPath(path.clone()))?,
            _ => {
                let mut url = self.base.clone();
                url.set_query(None);
                url.set_fragment(None);
                self.push_path(&mut url, page)?;
                url
            },
        };
        match page {
            Page::FilteredWorks { query } => url.set_query(Some(query)),
            Page::Work { .. } if self.view_adult => {
                url.query_pairs_mut().append_pair("view_adult", "true");
            },
            _ => {},
        }
        if let Some(number) = page_number {
            url.query_pairs_mut().append_pair("page", &number.to_string());
        }
        Ok(url)
    }

    fn push_path(&self, url: &mut Url, page: &Page) -> Result<()> {
        let mut segments = url
            .path_segments_mut()
            .ok()
            .ok_or_raise(|| ErrorKind::InvalidBase(self.base.to_string()))?;
        segments.pop_if_empty();
        match page {
            Page::RelatedWorks { tag } => {
                segments.extend(["tags", web_friendly(tag).as_str(), "works"]);
            },
            Page::FilteredWorks { .. } => {
                segments.push("works");
            },
            Page::Profile { username, section } => {
                segments.extend(["users", username.as_str()]);
                if let Some(section) = section.segment() {
                    segments.push(section);
                }
            },
            Page::News => {
                segments.push("admin_posts");
            },
            Page::Work { work_id, chapter_id } => {
                segments.extend(["works", work_id.to_string().as_str()]);
                if let Some(chapter_id) = chapter_id {
                    segments.extend(["chapters", chapter_id.to_string().as_str()]);
                }
            },
            Page::WorkChapters { work_id } => {
                segments.extend(["works", work_id.to_string().as_str(), "navigate"]);
            },
            Page::Media(category) => {
                segments.extend(["media", web_friendly(category.name()).as_str(), "fandoms"]);
            },
            Page::Comments { .. } => {},
        }
        Ok(())
    }
}
impl Default for Address {
    fn default() -> Self {
        Self {
            base: DEFAULT_BASE.clone(),
            view_adult: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn default_address_uses_the_archive_root() {
        let address = Address::default();
        assert_eq!(address.base(), &*DEFAULT_BASE);
        assert_eq!(address.base().as_str(), "https://archiveofourown.org/");
        assert_eq!(Address::parse(DEFAULT_BASE_URL, true).unwrap(), address);
    }

    #[rstest]
    #[case(Page::RelatedWorks { tag: "Naruto".to_string() }, None, "https://archiveofourown.org/tags/Naruto/works")]
    #[case(
        Page::RelatedWorks { tag: "Harry Potter - J. K. Rowling".to_string() },
        Some(2),
        "https://archiveofourown.org/tags/Harry%20Potter%20-%20J*d*%20K*d*%20Rowling/works?page=2"
    )]
    #[case(
        Page::Profile { username: "kit".to_string(), section: ProfileSection::Dashboard },
        None,
        "https://archiveofourown.org/users/kit"
    )]
    #[case(
        Page::Profile { username: "kit".to_string(), section: ProfileSection::Profile },
        None,
        "https://archiveofourown.org/users/kit/profile"
    )]
    #[case(Page::News, Some(3), "https://archiveofourown.org/admin_posts?page=3")]
    #[case(
        Page::Work { work_id: 911674, chapter_id: None },
        None,
        "https://archiveofourown.org/works/911674?view_adult=true"
    )]
    #[case(
        Page::Work { work_id: 911674, chapter_id: Some(2011120) },
        None,
        "https://archiveofourown.org/works/911674/chapters/2011120?view_adult=true"
    )]
    #[case(Page::WorkChapters { work_id: 911674 }, None, "https://archiveofourown.org/works/911674/navigate")]
    #[case(
        Page::Media(MediaCategory::Anime),
        None,
        "https://archiveofourown.org/media/Anime%20*a*%20Manga/fandoms"
    )]
    #[case(
        Page::Comments { path: "/admin_posts/100/comments".to_string() },
        None,
        "https://archiveofourown.org/admin_posts/100/comments"
    )]
    fn test_page_urls(#[case] page: Page, #[case] number: Option<u32>, #[case] expected: &str) {
        let url = Address::default().url(&page, number).unwrap();
        assert_eq!(url.as_str(), expected);
    }

    #[test]
    fn filtered_works_keep_literal_brackets() {
        let page = Page::FilteredWorks {
            query: "work_search[sort_column]=revised_at&commit=Sort+and+Filter&tag_id=Naruto".to_string(),
        };
        let url = Address::default().url(&page, Some(2)).unwrap();
        assert_eq!(
            url.as_str(),
            "https://archiveofourown.org/works?work_search[sort_column]=revised_at&commit=Sort+and+Filter&tag_id=Naruto&page=2"
        );
    }

    #[test]
    fn adult_works_can_be_left_gated() {
        let address = Address::parse("https://mirror.example.org/archive/", false).unwrap();
        let url = address.url(&Page::Work { work_id: 5, chapter_id: None }, None).unwrap();
        assert_eq!(url.as_str(), "https://mirror.example.org/archive/works/5");
    }

    #[test]
    fn base_must_have_a_path() {
        assert!(Address::parse("mailto:someone@example.org", true).is_err());
        assert!(Address::parse("not a url", true).is_err());
    }
}
