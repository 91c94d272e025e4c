use crate::consts;
use crate::dom::{Select, normalize_whitespace};
use crate::fields::parse_count;
use crate::models::Link;
use scraper::ElementRef;
use std::collections::HashMap;

/// The `dd` entries of a definition list, keyed either by their class
/// attribute (work metadata, blurb stats) or by the label of the preceding
/// `dt` (profile details).
#[derive(Debug, Default)]
pub(crate) struct Datalist<'a> {
    list: HashMap<String, ElementRef<'a>>,
}

/// Datalist Internals
impl<'a> Datalist<'a> {
    pub(crate) fn by_class(dl: Option<ElementRef<'a>>) -> Self {
        let Some(dl) = dl else {
            return Self::default();
        };
        Self {
            list: Self::entries(dl)
                .filter_map(|dd| dd.value().attr("class").map(|class| (normalize_whitespace(class), dd)))
                .collect(),
        }
    }

    pub(crate) fn by_label(dl: Option<ElementRef<'a>>) -> Self {
        let Some(dl) = dl else {
            return Self::default();
        };
        let mut list = HashMap::new();
        let mut label = None;
        for child in dl.child_elements() {
            match child.value().name() {
                "dt" => label = Some(child.text_normalized().trim_end_matches(':').trim().to_string()),
                "dd" => {
                    if let Some(label) = label.take() {
                        list.insert(label, child);
                    }
                },
                _ => {},
            }
        }
        Self { list }
    }

    /// Direct `dd` children only; nested lists belong to their own entry.
    fn entries(dl: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
        dl.child_elements().filter(|child| child.value().name() == "dd")
    }
}

/// Datalist Public
impl<'a> Datalist<'a> {
    pub(crate) fn get(&self, key: &str) -> Option<ElementRef<'a>> {
        self.list.get(key).copied()
    }

    pub(crate) fn text(&self, key: &str) -> Option<String> {
        self.get(key).and_then(|dd| dd.non_empty_text())
    }

    /// A count, or `None` when absent or unparseable.
    pub(crate) fn count(&self, key: &str) -> Option<u64> {
        self.text(key).as_deref().and_then(parse_count)
    }

    /// Every link inside the entry, in order.
    pub(crate) fn links(&self, key: &str) -> Vec<Link> {
        self.get(key).map(links_in).unwrap_or_default()
    }

    /// The link texts of the entry.
    pub(crate) fn link_texts(&self, key: &str) -> Vec<String> {
        self.links(key).into_iter().map(|link| link.name).collect()
    }
}

/// Every `<a href>` below the element as a [`Link`].
pub(crate) fn links_in(element: ElementRef<'_>) -> Vec<Link> {
    element.select(&consts::ANCHOR_SELECTOR).filter_map(link_of).collect()
}

pub(crate) fn link_of(anchor: ElementRef<'_>) -> Option<Link> {
    let url = anchor.value().attr("href")?;
    Some(Link::new(url, anchor.text_normalized()))
}
