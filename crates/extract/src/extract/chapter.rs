use super::data::link_of;
use crate::consts;
use crate::dom::{Anchor, Select};
use crate::models::{Alignment, Chapter, Link, Paragraph, RichText, escape_text};
use scraper::{ElementRef, Node};
use tracing::trace;

pub(super) fn chapter(root: ElementRef<'_>) -> Option<Chapter> {
    let workskin = root.find_path(&[&consts::OUTER, &consts::WORKSKIN])?;
    let chapters = workskin.find(&consts::CHAPTERS)?;
    // Single-chapter works have no chapter wrapper; their notes live in the
    // work preface instead.
    let (scope, notes_scope) = match chapters.find(&consts::CHAPTER) {
        Some(chapter) => (chapter, chapter),
        None => (chapters, workskin),
    };
    let text = scope.find(&consts::CHAPTER_TEXT)?;
    Some(Chapter {
        title: title(scope),
        paragraphs: paragraphs(text),
        pre_notes: notes(notes_scope, &consts::PRE_NOTES),
        post_notes: notes(notes_scope, &consts::POST_NOTES),
    })
}

fn title(scope: ElementRef<'_>) -> Option<Link> {
    let heading = scope.find_path(&[&consts::CHAPTER_PREFACE, &consts::CHAPTER_TITLE])?;
    let anchor = heading.select(&consts::ANCHOR_SELECTOR).next().and_then(link_of)?;
    Some(Link::new(anchor.url, heading.non_empty_text()?))
}

fn notes(scope: ElementRef<'_>, module: &Anchor) -> Vec<Paragraph> {
    scope
        .find(module)
        .and_then(|module| module.find(&consts::USERSTUFF))
        .map(paragraphs)
        .unwrap_or_default()
}

/// Content blocks of a formatted container, in reading order.
pub(super) fn paragraphs(container: ElementRef<'_>) -> Vec<Paragraph> {
    let mut out = Vec::new();
    collect(container, Alignment::default(), &mut out);
    out
}

fn collect(container: ElementRef<'_>, inherited: Alignment, out: &mut Vec<Paragraph>) {
    for child in container.children() {
        if let Some(text) = child.value().as_text() {
            push_text(&escape_text(text), inherited, out);
            continue;
        }
        let Some(element) = ElementRef::wrap(child) else {
            continue;
        };
        let alignment = alignment_of(element).unwrap_or(inherited);
        match element.value().name() {
            "hr" | "br" => {},
            _ if element.value().classes().any(|class| class == "landmark") => {},
            "div" | "section" | "article" => collect(element, alignment, out),
            "img" => push_image(element, alignment, out),
            _ if element.select(&consts::IMAGE_SELECTOR).next().is_some() => {
                let mut buffer = String::new();
                split(element, alignment, &mut buffer, out);
                push_text(&buffer, alignment, out);
            },
            _ => push_text(&element.html(), alignment, out),
        }
    }
}

/// Walks a block that embeds images, emitting the text on either side of
/// each image as its own paragraph.
fn split(element: ElementRef<'_>, alignment: Alignment, buffer: &mut String, out: &mut Vec<Paragraph>) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => buffer.push_str(&escape_text(text)),
            Node::Element(_) => {
                let Some(child) = ElementRef::wrap(child) else {
                    continue;
                };
                if child.value().name() == "img" {
                    push_text(&std::mem::take(buffer), alignment, out);
                    push_image(child, alignment, out);
                } else if child.select(&consts::IMAGE_SELECTOR).next().is_some() {
                    split(child, alignment, buffer, out);
                } else {
                    buffer.push_str(&child.html());
                }
            },
            _ => {},
        }
    }
}

fn push_text(html: &str, alignment: Alignment, out: &mut Vec<Paragraph>) {
    if let Some(text) = RichText::from_html(html) {
        out.push(Paragraph::Text { text, alignment });
    }
}

fn push_image(img: ElementRef<'_>, alignment: Alignment, out: &mut Vec<Paragraph>) {
    let Some(src) = img.value().attr("src").filter(|src| !src.trim().is_empty()) else {
        trace!("image without a source");
        return;
    };
    out.push(Paragraph::Image {
        src: src.trim().to_string(),
        alt: img.value().attr("alt").map(str::trim).filter(|alt| !alt.is_empty()).map(str::to_string),
        alignment,
    });
}

/// Alignment declared on the element itself, via `align` or an inline
/// `text-align` style. `<center>` counts as centred.
fn alignment_of(element: ElementRef<'_>) -> Option<Alignment> {
    let value = element.value();
    if value.name() == "center" {
        return Some(Alignment::Center);
    }
    if let Some(align) = value.attr("align") {
        return Some(Alignment::from_keyword(align));
    }
    let style = value.attr("style")?;
    let keyword = consts::ALIGN_STYLE_REGEX.captures(style)?.get(1)?;
    Some(Alignment::from_keyword(keyword.as_str()))
}
