use super::{Comment, Link, RichText};
use time::UtcDateTime;

/// One page of admin posts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct News {
    pub articles: Vec<Article>,
    /// Tag filter options (tag ID, label).
    pub tags: Vec<Link>,
    /// Translation filter options (language ID, label).
    pub translations: Vec<Link>,
    pub pages_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub title: String,
    pub published: UtcDateTime,
    pub tags: Vec<Link>,
    /// Site-relative address of the article's comment page.
    pub comments_url: Option<String>,
    pub comments_count: u64,
    pub content: Vec<Content>,
    /// Filled in separately, from the comment page.
    pub comments: Vec<Comment>,
}
impl Article {
    /// The first paragraph, used as a teaser.
    pub fn flavor_text(&self) -> Option<&RichText> {
        self.content.iter().find_map(|c| match c {
            Content::Paragraph(text) => Some(text),
            _ => None,
        })
    }

    /// The first image, used as the article's cover.
    pub fn cover_image(&self) -> Option<&str> {
        self.content.iter().find_map(|c| match c {
            Content::Image(src) => Some(src.as_str()),
            _ => None,
        })
    }

    /// Article content with every occurrence of the cover image removed.
    pub fn content_without_cover(&self) -> Vec<&Content> {
        let cover = self.cover_image();
        self.content
            .iter()
            .filter(|c| !matches!((c, cover), (Content::Image(src), Some(cover)) if src == cover))
            .collect()
    }
}

/// A block of article content.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Content {
    Divider,
    Header { level: u8, text: String },
    List(Vec<RichText>),
    Image(String),
    Paragraph(RichText),
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;

    #[test]
    fn cover_image_is_separated_from_content() {
        let intro = RichText::from_html("Welcome!").unwrap();
        let article = Article {
            title: "Update".to_string(),
            published: OffsetDateTime::UNIX_EPOCH.to_utc(),
            tags: vec![],
            comments_url: None,
            comments_count: 0,
            content: vec![
                Content::Image("/banner.png".to_string()),
                Content::Paragraph(intro.clone()),
                Content::Divider,
            ],
            comments: vec![],
        };
        assert_eq!(article.flavor_text(), Some(&intro));
        assert_eq!(article.cover_image(), Some("/banner.png"));
        assert_eq!(article.content_without_cover(), vec![&Content::Paragraph(intro), &Content::Divider]);
    }
}
