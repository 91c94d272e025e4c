//! Work-search filter selections and their query-string encoding.
//!
//! The archive's listing form submits a bracketed query such as
//! `include_work_search[rating_ids][]=13&work_search[sort_column]=revised_at`.
//! Brackets are written literally; the archive accepts them unescaped and
//! recorded listing URLs carry them that way.

use quill_extract::models::{FacetGroup, FilterInfo};
use quill_extract::web_friendly;
use time::{Date, Duration, Month, UtcDateTime};
use tracing::instrument;
use url::form_urlencoded;

/// Selected option IDs per facet group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSelections {
    ids: [Vec<String>; 7],
}
impl TagSelections {
    /// Selects an option scraped from the listing's filter sidebar.
    pub fn select(&mut self, group: FacetGroup, option: &FilterInfo) {
        self.select_id(group, option.id.clone());
    }

    pub fn select_id(&mut self, group: FacetGroup, id: impl Into<String>) {
        let id = id.into();
        let ids = &mut self.ids[group.index()];
        if !ids.contains(&id) {
            ids.push(id);
        }
    }

    pub fn deselect(&mut self, group: FacetGroup, id: &str) {
        self.ids[group.index()].retain(|selected| selected != id);
    }

    pub fn with(mut self, group: FacetGroup, id: impl Into<String>) -> Self {
        self.select_id(group, id);
        self
    }

    /// Selected IDs of one group, in selection order.
    pub fn ids(&self, group: FacetGroup) -> &[String] {
        &self.ids[group.index()]
    }

    pub fn is_empty(&self) -> bool {
        self.ids.iter().all(Vec::is_empty)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortColumn {
    #[default]
    DateUpdated,
    DateCreated,
    Author,
    Title,
    WordCount,
    Hits,
    Kudos,
    Comments,
    Bookmarks,
}
impl SortColumn {
    pub fn key(&self) -> &'static str {
        match self {
            Self::DateUpdated => "revised_at",
            Self::DateCreated => "created_at",
            Self::Author => "authors_to_sort_on",
            Self::Title => "title_to_sort_on",
            Self::WordCount => "word_count",
            Self::Hits => "hits",
            Self::Kudos => "kudos_count",
            Self::Comments => "comments_count",
            Self::Bookmarks => "bookmarks_count",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Crossover {
    #[default]
    Include,
    Exclude,
    Only,
}
impl Crossover {
    pub fn value(&self) -> &'static str {
        match self {
            Self::Include => "",
            Self::Exclude => "F",
            Self::Only => "T",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Completion {
    #[default]
    All,
    Complete,
    InProgress,
}
impl Completion {
    pub fn value(&self) -> &'static str {
        match self {
            Self::All => "",
            Self::Complete => "T",
            Self::InProgress => "F",
        }
    }
}

/// Stops of the word-count slider. The two ends are unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WordCount {
    Min,
    OneThousand,
    TenThousand,
    FiftyThousand,
    OneHundredThousand,
    FiveHundredThousand,
    Max,
}
impl WordCount {
    pub const STOPS: [WordCount; 7] = [
        Self::Min,
        Self::OneThousand,
        Self::TenThousand,
        Self::FiftyThousand,
        Self::OneHundredThousand,
        Self::FiveHundredThousand,
        Self::Max,
    ];

    /// The bound this stop stands for; `None` at either end of the slider.
    pub fn words(&self) -> Option<u64> {
        match self {
            Self::Min | Self::Max => None,
            Self::OneThousand => Some(1_000),
            Self::TenThousand => Some(10_000),
            Self::FiftyThousand => Some(50_000),
            Self::OneHundredThousand => Some(100_000),
            Self::FiveHundredThousand => Some(500_000),
        }
    }
}

/// Stops of the date slider, oldest first. The two ends are unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DateRange {
    Any,
    FiveYears,
    OneYear,
    SixMonths,
    OneMonth,
    OneWeek,
    Today,
}
impl DateRange {
    pub const STOPS: [DateRange; 7] = [
        Self::Any,
        Self::FiveYears,
        Self::OneYear,
        Self::SixMonths,
        Self::OneMonth,
        Self::OneWeek,
        Self::Today,
    ];

    /// The calendar date this stop stands for, counted back from `today`.
    /// Days that do not exist in the target month clamp to its last day.
    pub fn since(&self, today: Date) -> Option<Date> {
        match self {
            Self::Any | Self::Today => None,
            Self::FiveYears => months_before(today, 60),
            Self::OneYear => months_before(today, 12),
            Self::SixMonths => months_before(today, 6),
            Self::OneMonth => months_before(today, 1),
            Self::OneWeek => today.checked_sub(Duration::days(7)),
        }
    }
}

fn months_before(today: Date, months: i32) -> Option<Date> {
    let total = today.year() * 12 + i32::from(u8::from(today.month())) - 1 - months;
    let month = Month::try_from(u8::try_from(total.rem_euclid(12) + 1).ok()?).ok()?;
    let year = total.div_euclid(12);
    (1..=today.day()).rev().find_map(|day| Date::from_calendar_date(year, month, day).ok())
}

/// A two-handled slider position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slider<T> {
    pub low: T,
    pub high: T,
}
impl Default for Slider<WordCount> {
    fn default() -> Self {
        Self {
            low: WordCount::Min,
            high: WordCount::Max,
        }
    }
}
impl Default for Slider<DateRange> {
    fn default() -> Self {
        Self {
            low: DateRange::Any,
            high: DateRange::Today,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sorting {
    pub sort: SortColumn,
    pub crossover: Crossover,
    pub completion: Completion,
    pub words: Slider<WordCount>,
    pub dates: Slider<DateRange>,
    /// Language ID from the listing's language options.
    pub language: Option<String>,
}
impl Sorting {
    pub fn with_language(mut self, language: &FilterInfo) -> Self {
        self.language = Some(language.id.clone()).filter(|id| !id.is_empty());
        self
    }
}

/// Everything the listing filter form can express.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelections {
    pub include: TagSelections,
    pub exclude: TagSelections,
    pub sorting: Sorting,
}

fn search_key(group: FacetGroup) -> &'static str {
    match group {
        FacetGroup::Ratings => "rating_ids",
        FacetGroup::Warnings => "archive_warning_ids",
        FacetGroup::Categories => "category_ids",
        FacetGroup::Fandoms => "fandom_ids",
        FacetGroup::Characters => "character_ids",
        FacetGroup::Relationships => "relationship_ids",
        FacetGroup::AdditionalTags => "freeform_ids",
    }
}

fn search_field(key: &str, value: impl AsRef<str>) -> String {
    format!("work_search[{key}]={}", value.as_ref())
}

/// Encodes filter selections for a fandom listing, with relative dates
/// counted back from today (UTC).
pub fn encode(selections: &FilterSelections, fandom: &str) -> String {
    encode_on(selections, fandom, UtcDateTime::now().date())
}

/// Encodes filter selections, counting relative dates back from `today`.
///
/// Parameters come out in a fixed order: included tags, excluded tags (each
/// by facet group), the sort and range fields, then the form's commit marker
/// and the fandom tag.
#[instrument(level = "debug", skip(selections))]
pub fn encode_on(selections: &FilterSelections, fandom: &str, today: Date) -> String {
    let mut params = Vec::new();
    for (prefix, tags) in [("include_work_search", &selections.include), ("exclude_work_search", &selections.exclude)] {
        for group in FacetGroup::ALL {
            for id in tags.ids(group) {
                params.push(format!("{prefix}[{}][]={id}", search_key(group)));
            }
        }
    }

    let sorting = &selections.sorting;
    let words = |stop: WordCount| stop.words().map(|n| n.to_string()).unwrap_or_default();
    let date = |stop: DateRange| stop.since(today).map(|d| d.to_string()).unwrap_or_default();
    params.extend([
        search_field("sort_column", sorting.sort.key()),
        search_field("other_tag_names", ""),
        search_field("excluded_tag_names", ""),
        search_field("crossover", sorting.crossover.value()),
        search_field("complete", sorting.completion.value()),
        search_field("words_from", words(sorting.words.low)),
        search_field("words_to", words(sorting.words.high)),
        search_field("date_from", date(sorting.dates.low)),
        search_field("date_to", date(sorting.dates.high)),
        search_field("query", ""),
        search_field("language_id", sorting.language.as_deref().unwrap_or_default()),
    ]);

    params.push("commit=Sort+and+Filter".to_string());
    let tag: String = form_urlencoded::byte_serialize(web_friendly(fandom).as_bytes()).collect();
    params.push(format!("tag_id={tag}"));
    params.join("&")
}
