use super::{Category, Chapters, Link, Rating, RichText, Warning};
use std::hash::{Hash, Hasher};

/// One page of a work listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedInfo {
    pub cards: Vec<FeedCardInfo>,
    /// Total number of pages in the listing; 0 when the page has no pagination.
    pub pages_count: u64,
    /// Facet vocabulary offered by the listing's filter sidebar.
    pub filter: FeedFilterInfo,
}

/// Compact summary of a work, series or bookmark in a listing.
///
/// Cards are identified by their work ID alone: the same work seen twice
/// (say, in two pages fetched a minute apart) is the same card even when
/// its stats or summary changed in between.
#[derive(Debug, Clone)]
pub struct FeedCardInfo {
    pub work_id: u64,
    pub title: Option<String>,
    pub authors: Vec<Link>,
    pub last_updated: Option<String>,
    pub rating: Option<Rating>,
    pub category: Option<Category>,
    pub warnings: Vec<Warning>,
    pub fandoms: Vec<Link>,
    pub relationships: Vec<Link>,
    pub characters: Vec<Link>,
    pub freeforms: Vec<Link>,
    pub summary: Option<RichText>,
    pub stats: FeedStats,
}
impl PartialEq for FeedCardInfo {
    fn eq(&self, other: &Self) -> bool {
        self.work_id == other.work_id
    }
}
impl Eq for FeedCardInfo {}
impl Hash for FeedCardInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.work_id.hash(state);
    }
}

/// Blurb statistics, kept as the text shown on the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedStats {
    pub language: Option<String>,
    pub words: Option<String>,
    pub chapters: Option<Chapters>,
    pub comments: Option<String>,
    pub kudos: Option<String>,
    pub bookmarks: Option<String>,
    pub hits: Option<String>,
}

/// A filterable option: the archive's ID for it and its display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FilterInfo {
    pub id: String,
    pub name: String,
}
impl FilterInfo {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// The tag facets a listing can be filtered on, in the archive's order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FacetGroup {
    Ratings,
    Warnings,
    Categories,
    Fandoms,
    Characters,
    Relationships,
    AdditionalTags,
}
impl FacetGroup {
    pub const ALL: [FacetGroup; 7] = [
        Self::Ratings,
        Self::Warnings,
        Self::Categories,
        Self::Fandoms,
        Self::Characters,
        Self::Relationships,
        Self::AdditionalTags,
    ];

    /// The element ID of the group's checkbox list in the filter sidebar.
    pub(crate) fn sidebar_id(&self) -> &'static str {
        match self {
            Self::Ratings => "include_rating_tags",
            Self::Warnings => "include_archive_warning_tags",
            Self::Categories => "include_category_tags",
            Self::Fandoms => "include_fandom_tags",
            Self::Characters => "include_character_tags",
            Self::Relationships => "include_relationship_tags",
            Self::AdditionalTags => "include_freeform_tags",
        }
    }

    /// Position within [`FacetGroup::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// Facet vocabulary scraped from a listing's filter sidebar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedFilterInfo {
    pub fandom_name: String,
    facets: [Vec<FilterInfo>; 7],
    pub languages: Vec<FilterInfo>,
}
impl FeedFilterInfo {
    /// A vocabulary with no options, for listings without a sidebar.
    pub fn empty(fandom_name: impl Into<String>) -> Self {
        Self {
            fandom_name: fandom_name.into(),
            ..Default::default()
        }
    }

    pub fn options(&self, group: FacetGroup) -> &[FilterInfo] {
        &self.facets[group.index()]
    }

    pub fn with_options(mut self, group: FacetGroup, options: Vec<FilterInfo>) -> Self {
        self.facets[group.index()] = options;
        self
    }

    pub fn with_languages(mut self, languages: Vec<FilterInfo>) -> Self {
        self.languages = languages;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.facets.iter().all(Vec::is_empty) && self.languages.is_empty()
    }
}
