use super::Datalist;
use crate::consts;
use crate::dom::Select;
use crate::fields::parse_date;
use crate::models::{Chapters, StoryStats};
use scraper::ElementRef;
use tracing::{instrument, trace};

/// Statistics block of a work page (`dd.stats > dl.stats`).
#[derive(Debug)]
pub(crate) struct Stats<'a> {
    list: Datalist<'a>,
}
impl<'a> Stats<'a> {
    pub(crate) fn new(dd: ElementRef<'a>) -> Self {
        Self {
            list: Datalist::by_class(dd.find(&consts::FIRST_DL)),
        }
    }

    pub(crate) fn from_list(list: Datalist<'a>) -> Self {
        Self { list }
    }

    /// Chapter progress; `None` when absent or not "written/expected".
    #[instrument(level = "trace", skip(self))]
    pub(crate) fn chapters(&self) -> Option<Chapters> {
        let text = self.list.text("chapters")?;
        let chapters = text.parse().ok();
        if chapters.is_none() {
            trace!(text, "unparseable chapter progress");
        }
        chapters
    }

    /// Typed statistics. Requires a publication date; sub-counts that are
    /// missing count as zero.
    #[instrument(level = "trace", skip(self))]
    pub(crate) fn story_stats(&self) -> Option<StoryStats> {
        let published = self.list.text("published").as_deref().and_then(parse_date)?;
        Some(StoryStats {
            published,
            status: self.list.text("status").as_deref().and_then(parse_date),
            words: self.list.count("words"),
            chapters: self.chapters(),
            comments: self.list.count("comments").unwrap_or(0),
            kudos: self.list.count("kudos").unwrap_or(0),
            bookmarks: self.list.count("bookmarks").unwrap_or(0),
            hits: self.list.count("hits").unwrap_or(0),
        })
    }

    pub(crate) fn raw(&self, key: &str) -> Option<String> {
        self.list.text(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::data::Datalist;
    use scraper::Html;
    use time::{Date, Month};

    fn stats_of(html: &str) -> Option<StoryStats> {
        let html = Html::parse_fragment(html);
        let root = html.root_element();
        let dd = Datalist::by_class(root.find(&consts::WORK_META)).get("stats")?;
        Stats::new(dd).story_stats()
    }

    #[test]
    fn missing_counts_default_to_zero() {
        let stats = stats_of(
            r#"<dl class="work meta group"><dd class="stats"><dl class="stats">
                <dt>Published:</dt><dd class="published">2019-02-14</dd>
                <dt>Words:</dt><dd class="words">12,345</dd>
                <dt>Chapters:</dt><dd class="chapters">3/?</dd>
                <dt>Kudos:</dt><dd class="kudos">1.024</dd>
            </dl></dd></dl>"#,
        )
        .unwrap();
        assert_eq!(stats.published, Date::from_calendar_date(2019, Month::February, 14).unwrap());
        assert_eq!(stats.status, None);
        assert_eq!(stats.words, Some(12345));
        assert_eq!(stats.chapters, Some(Chapters::new(3, None)));
        assert!(!stats.is_complete());
        assert_eq!((stats.kudos, stats.comments, stats.bookmarks, stats.hits), (1024, 0, 0, 0));
    }

    #[test]
    fn publication_date_is_required() {
        let stats = stats_of(
            r#"<dl class="work meta group"><dd class="stats"><dl class="stats">
                <dd class="words">100</dd>
            </dl></dd></dl>"#,
        );
        assert!(stats.is_none());
    }
}
