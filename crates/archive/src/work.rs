use quill_extract::models::{AboutInfo, Chapter, ChapterList, StoryInfo};
use std::collections::BTreeMap;

/// Everything loaded so far about one work.
///
/// Story and about metadata arrive together or not at all. Chapters are
/// keyed by 1-based index and may be sparse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Work {
    id: u64,
    metadata: Option<(StoryInfo, AboutInfo)>,
    chapter_list: Option<ChapterList>,
    chapters: BTreeMap<usize, Chapter>,
}

/// Where a chapter stands in a [`Work`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChapterLookup<'a> {
    Fetched(&'a Chapter),
    /// Not loaded yet, and not known to be missing.
    NotFetched,
    /// Out of range of the work's known chapters.
    DoesNotExist,
}

impl Work {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            metadata: None,
            chapter_list: None,
            chapters: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn story_info(&self) -> Option<&StoryInfo> {
        self.metadata.as_ref().map(|(story, _)| story)
    }

    pub fn about_info(&self) -> Option<&AboutInfo> {
        self.metadata.as_ref().map(|(_, about)| about)
    }

    pub fn has_metadata(&self) -> bool {
        self.metadata.is_some()
    }

    pub fn chapter_list(&self) -> Option<&ChapterList> {
        self.chapter_list.as_ref()
    }

    pub fn chapter(&self, index: usize) -> Option<&Chapter> {
        self.chapters.get(&index)
    }

    /// Loaded chapters in reading order.
    pub fn chapters(&self) -> impl Iterator<Item = (usize, &Chapter)> {
        self.chapters.iter().map(|(index, chapter)| (*index, chapter))
    }

    pub fn lookup(&self, index: usize) -> ChapterLookup<'_> {
        if let Some(chapter) = self.chapters.get(&index) {
            return ChapterLookup::Fetched(chapter);
        }
        if index == 0 || index > self.known_chapters().unwrap_or(usize::MAX) {
            return ChapterLookup::DoesNotExist;
        }
        ChapterLookup::NotFetched
    }

    /// Number of chapters, from the chapter index or else the posted count.
    fn known_chapters(&self) -> Option<usize> {
        if let Some(list) = &self.chapter_list {
            return Some(list.len());
        }
        let written = self.story_info()?.stats.chapters?.written;
        usize::try_from(written).ok()
    }

    pub(crate) fn set_metadata(&mut self, story: StoryInfo, about: AboutInfo) {
        self.metadata = Some((story, about));
    }

    pub(crate) fn set_chapter_list(&mut self, list: ChapterList) {
        self.chapter_list = Some(list);
    }

    pub(crate) fn insert_chapter(&mut self, index: usize, chapter: Chapter) {
        self.chapters.insert(index, chapter);
    }
}
