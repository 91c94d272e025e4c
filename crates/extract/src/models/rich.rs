use derive_more::Display;
use scraper::ElementRef;

/// Formatted user content (summaries, notes, prose), held as Markdown.
///
/// Rendering is left to the caller. Markup that embeds an image is never
/// converted; images are surfaced as their own items instead.
#[derive(Debug, Display, Clone, PartialEq, Eq, Hash)]
pub struct RichText(String);

impl RichText {
    /// Converts an element's inner markup.
    pub fn from_element(element: ElementRef<'_>) -> Option<Self> {
        Self::from_html(&element.inner_html())
    }

    /// Converts an HTML fragment; `None` for fragments containing images or
    /// without any text.
    pub fn from_html(html: &str) -> Option<Self> {
        if html.contains("<img") {
            return None;
        }
        let text = convert(html);
        let text = text.trim();
        (!text.is_empty()).then(|| Self(text.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}
impl AsRef<str> for RichText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(feature = "markdown")]
fn convert(html: &str) -> String {
    html2md::rewrite_html(html, true)
}

#[cfg(not(feature = "markdown"))]
fn convert(html: &str) -> String {
    let fragment = scraper::Html::parse_fragment(html);
    crate::dom::normalize_whitespace(&fragment.root_element().text().collect::<String>())
}

/// Escapes a text node so it can be concatenated back into a fragment.
pub(crate) fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn images_are_never_rich_text() {
        assert!(RichText::from_html(r#"Look: <img src="/cat.png">"#).is_none());
    }

    #[test]
    fn blank_markup_is_not_rich_text() {
        assert!(RichText::from_html("   ").is_none());
        assert!(RichText::from_html("<br>").is_none());
    }

    #[test]
    fn text_survives_conversion() {
        let text = RichText::from_html("<b>Bold</b> and plain").unwrap();
        assert!(text.as_str().contains("Bold"));
        assert!(text.as_str().contains("and plain"));
    }

    #[test]
    fn escaping_keeps_text_literal() {
        assert_eq!(escape_text("a < b & c"), "a &lt; b &amp; c");
    }
}
