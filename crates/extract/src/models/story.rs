use super::{Category, Chapters, Link, Rating, RichText, Warning};
use time::Date;

/// Tag and statistics metadata of a single work, from its own page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryInfo {
    pub rating: Option<Rating>,
    pub warnings: Vec<Warning>,
    pub categories: Vec<Category>,
    pub fandoms: Vec<Link>,
    pub relationships: Vec<Link>,
    pub characters: Vec<Link>,
    pub freeforms: Vec<Link>,
    pub language: Option<String>,
    pub collections: Vec<Link>,
    pub stats: StoryStats,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryStats {
    pub published: Date,
    /// Date of the latest update, or of completion.
    pub status: Option<Date>,
    pub words: Option<u64>,
    pub chapters: Option<Chapters>,
    pub comments: u64,
    pub kudos: u64,
    pub bookmarks: u64,
    pub hits: u64,
}
impl StoryStats {
    pub fn is_complete(&self) -> bool {
        self.chapters.is_some_and(|c| c.is_complete())
    }
}

/// Title block of a work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AboutInfo {
    pub title: String,
    pub authors: Vec<Link>,
    pub summary: Option<RichText>,
}
