use super::{Link, RichText};

/// Horizontal alignment of a paragraph, from its inline markup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}
impl Alignment {
    pub(crate) fn from_keyword(keyword: &str) -> Self {
        match keyword.trim().to_ascii_lowercase().as_str() {
            "center" | "middle" => Self::Center,
            "right" | "end" => Self::Right,
            _ => Self::Left,
        }
    }
}

/// One item of chapter content.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Paragraph {
    Text { text: RichText, alignment: Alignment },
    Image { src: String, alt: Option<String>, alignment: Alignment },
}
impl Paragraph {
    pub fn alignment(&self) -> Alignment {
        match self {
            Self::Text { alignment, .. } | Self::Image { alignment, .. } => *alignment,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
    /// Chapter heading, linking to the chapter's own page. Single-chapter
    /// works have none.
    pub title: Option<Link>,
    pub paragraphs: Vec<Paragraph>,
    pub pre_notes: Vec<Paragraph>,
    pub post_notes: Vec<Paragraph>,
}

/// Chapter names and identifiers of a work, in reading order.
///
/// Both sequences are addressed by 1-based chapter index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChapterList {
    names: Vec<String>,
    ids: Vec<u64>,
}
impl ChapterList {
    pub fn new(entries: impl IntoIterator<Item = (String, u64)>) -> Self {
        let (names, ids) = entries.into_iter().unzip();
        Self { names, ids }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index.checked_sub(1)?).map(String::as_str)
    }

    /// Chapter identifier at a 1-based index.
    pub fn id(&self, index: usize) -> Option<u64> {
        self.ids.get(index.checked_sub(1)?).copied()
    }

    /// 1-based index of a chapter identifier.
    pub fn index_of(&self, id: u64) -> Option<usize> {
        self.ids.iter().position(|&i| i == id).map(|p| p + 1)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn ids(&self) -> &[u64] {
        &self.ids
    }
}
