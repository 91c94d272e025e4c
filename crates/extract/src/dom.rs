//! Centralised element lookup.
//!
//! Archive markup identifies almost everything by its `class` attribute, and
//! most of those attributes are fixed strings such as `"work meta group"`. A
//! few (work blurbs, for example) carry per-item classes like `work-123`
//! alongside the fixed ones, so those are matched by membership instead.

use scraper::{ElementRef, Selector};
use std::sync::LazyLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ClassMatch {
    /// Any element matched by the selector.
    Any,
    /// The whole class attribute, ignoring surrounding and repeated whitespace.
    Exact(&'static str),
    /// Every listed class is present; extra classes are allowed.
    AllOf(&'static str),
}
impl ClassMatch {
    pub(crate) fn matches(&self, element: &ElementRef<'_>) -> bool {
        let class = element.value().attr("class").unwrap_or_default();
        match self {
            Self::Any => true,
            Self::Exact(expected) => class.split_whitespace().eq(expected.split_whitespace()),
            Self::AllOf(expected) => {
                expected.split_whitespace().all(|wanted| element.value().classes().any(|c| c == wanted))
            },
        }
    }
}

/// A tag selector paired with the class rule elements must satisfy.
pub(crate) struct Anchor {
    selector: LazyLock<Selector>,
    class: ClassMatch,
}
impl Anchor {
    pub(crate) const fn new(selector: LazyLock<Selector>, class: ClassMatch) -> Self {
        Self { selector, class }
    }

    pub(crate) fn accepts(&self, element: &ElementRef<'_>) -> bool {
        self.selector.matches(element) && self.class.matches(element)
    }
}

/// Anchor-based lookups on any element (or the document root).
pub(crate) trait Select<'a> {
    /// First descendant matching the anchor.
    fn find(&self, anchor: &Anchor) -> Option<ElementRef<'a>>;
    /// All descendants matching the anchor, in document order.
    fn find_all(&self, anchor: &Anchor) -> Vec<ElementRef<'a>>;
    /// Direct children matching the anchor, in document order.
    fn children_matching(&self, anchor: &Anchor) -> Vec<ElementRef<'a>>;
    /// Follow a chain of anchors, each searched within the previous match.
    fn find_path(&self, path: &[&Anchor]) -> Option<ElementRef<'a>>;
    /// Whitespace-normalised text content.
    fn text_normalized(&self) -> String;
    /// Whitespace-normalised text content, `None` when empty.
    fn non_empty_text(&self) -> Option<String>;
}

impl<'a> Select<'a> for ElementRef<'a> {
    fn find(&self, anchor: &Anchor) -> Option<ElementRef<'a>> {
        self.select(&anchor.selector).find(|element| anchor.class.matches(element))
    }

    fn find_all(&self, anchor: &Anchor) -> Vec<ElementRef<'a>> {
        self.select(&anchor.selector).filter(|element| anchor.class.matches(element)).collect()
    }

    fn children_matching(&self, anchor: &Anchor) -> Vec<ElementRef<'a>> {
        self.child_elements().filter(|element| anchor.accepts(element)).collect()
    }

    fn find_path(&self, path: &[&Anchor]) -> Option<ElementRef<'a>> {
        path.iter().try_fold(*self, |scope, anchor| scope.find(anchor))
    }

    fn text_normalized(&self) -> String {
        normalize_whitespace(&self.text().collect::<String>())
    }

    fn non_empty_text(&self) -> Option<String> {
        Some(self.text_normalized()).filter(|text| !text.is_empty())
    }
}

pub(crate) fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
