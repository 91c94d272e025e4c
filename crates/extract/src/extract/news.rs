use super::data::link_of;
use super::feed::{pages_count, select_options};
use crate::consts;
use crate::dom::{Anchor, Select};
use crate::fields::{date_from_parts, parse_count, parse_timestamp};
use crate::models::{Article, Comment, Content, Link, News, RichText};
use crate::thread::ThreadNode;
use scraper::ElementRef;
use time::Date;
use tracing::{trace, warn};

pub(super) fn news(root: ElementRef<'_>) -> Option<News> {
    let home = root.find_path(&[&consts::OUTER, &consts::NEWS_HOME])?;
    let nav = home.find(&consts::NEWS_NAV);
    let filter = |select: &Anchor| -> Vec<Link> {
        nav.and_then(|nav| nav.find(select))
            .map(select_options)
            .unwrap_or_default()
            .into_iter()
            .map(|option| Link::new(option.id, option.name))
            .collect()
    };
    Some(News {
        articles: home.find_all(&consts::NEWS_ARTICLE).into_iter().filter_map(article).collect(),
        tags: filter(&consts::NEWS_TAG_SELECT),
        translations: filter(&consts::NEWS_LANGUAGE_SELECT),
        pages_count: pages_count(home),
    })
}

fn article(post: ElementRef<'_>) -> Option<Article> {
    let title = post.find(&consts::NEWS_TITLE)?.non_empty_text()?;
    let Some(published) = post
        .find_path(&[&consts::WRAPPER, &consts::NEWS_PUBLISHED])
        .and_then(|dd| parse_timestamp(&dd.text_normalized()))
    else {
        trace!(title, "skipping article without a publication time");
        return None;
    };
    let action = post
        .find(&consts::NEWS_ACTIONS)
        .and_then(|ul| ul.select(&consts::ANCHOR_SELECTOR).next());
    Some(Article {
        title,
        published,
        tags: post.find(&consts::NEWS_TAGS).map(article_tags).unwrap_or_default(),
        comments_url: action.and_then(|a| a.value().attr("href")).map(str::to_string),
        // "Comments (12)", "12 Comments": whichever token is the number.
        comments_count: action
            .and_then(|a| {
                a.text_normalized()
                    .split_whitespace()
                    .find_map(|token| parse_count(token.trim_matches(['(', ')'])))
            })
            .unwrap_or(0),
        content: post.find(&consts::NEWS_BODY).map(content).unwrap_or_default(),
        comments: Vec::new(),
    })
}

/// Tag links point at `/admin_posts?tag=<id>`; the ID is kept as the URL.
fn article_tags(list: ElementRef<'_>) -> Vec<Link> {
    list.children_matching(&consts::LIST_ITEM)
        .into_iter()
        .filter_map(|li| {
            let href = li.select(&consts::ANCHOR_SELECTOR).next()?.value().attr("href")?;
            let (_, id) = href.split_once('=')?;
            Some(Link::new(id, li.text_normalized()))
        })
        .collect()
}

fn content(body: ElementRef<'_>) -> Vec<Content> {
    let mut out = Vec::new();
    for block in body.child_elements() {
        let name = block.value().name();
        match name {
            "hr" => out.push(Content::Divider),
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                let level = name[1..].parse().unwrap_or(1);
                if let Some(text) = block.non_empty_text() {
                    out.push(Content::Header { level, text });
                }
            },
            "ul" | "ol" => out.push(Content::List(
                block
                    .children_matching(&consts::LIST_ITEM)
                    .into_iter()
                    .filter_map(RichText::from_element)
                    .collect(),
            )),
            "p" | "center" => match block.select(&consts::IMAGE_SELECTOR).next() {
                Some(img) => {
                    if let Some(src) = img.value().attr("src") {
                        out.push(Content::Image(src.to_string()));
                    }
                },
                None => {
                    if let Some(text) = RichText::from_element(block) {
                        out.push(Content::Paragraph(text));
                    }
                },
            },
            _ => warn!(tag = name, "unhandled article content"),
        }
    }
    out
}

pub(super) fn comment_nodes(root: ElementRef<'_>) -> Option<Vec<ThreadNode<Comment>>> {
    let thread = root.find_path(&[
        &consts::OUTER,
        &consts::NEWS_HOME,
        &consts::FEEDBACK,
        &consts::COMMENTS_PLACEHOLDER,
        &consts::THREAD,
    ])?;
    Some(thread_nodes(thread))
}

/// Classed items are comments; unclassed ones wrap the replies to the
/// comment before them.
fn thread_nodes(thread: ElementRef<'_>) -> Vec<ThreadNode<Comment>> {
    thread
        .child_elements()
        .filter_map(|item| {
            let class = item.value().attr("class").unwrap_or_default();
            if class.trim().is_empty() {
                let nested = item.find(&consts::THREAD)?;
                Some(ThreadNode::Replies(thread_nodes(nested)))
            } else {
                comment(item).map(ThreadNode::Comment)
            }
        })
        .collect()
}

fn comment(item: ElementRef<'_>) -> Option<Comment> {
    let byline = item.find(&consts::COMMENT_BYLINE)?;
    let author = byline.select(&consts::ANCHOR_SELECTOR).next().and_then(link_of)?;
    if author.url.split('/').nth(2).is_none_or(str::is_empty) {
        trace!(url = %author.url, "skipping comment without a profile link");
        return None;
    }
    Some(Comment {
        icon: item
            .find(&consts::COMMENT_ICON)
            .and_then(|icon| icon.select(&consts::IMAGE_SELECTOR).next())
            .and_then(|img| img.value().attr("src"))
            .map(str::to_string),
        is_verified: byline.find(&consts::COMMENT_ROLE).is_some(),
        text: item
            .find(&consts::COMMENT_TEXT)
            .map(|quote| {
                quote
                    .find_all(&consts::PARAGRAPH)
                    .into_iter()
                    .filter_map(|p| p.non_empty_text())
                    .collect::<Vec<_>>()
                    .join("\n\n")
            })
            .unwrap_or_default(),
        timestamp: date_in(byline),
        edited_timestamp: item.find(&consts::COMMENT_EDITED).and_then(date_in),
        replying_to: None,
        children: Vec::new(),
        author,
    })
}

/// `<span class="date">7</span> <abbr class="month">Mar</abbr> <span class="year">2024</span>`
fn date_in(scope: ElementRef<'_>) -> Option<Date> {
    let part = |anchor: &Anchor| scope.find(anchor).map(|element| element.text_normalized());
    date_from_parts(
        &part(&consts::DATE_DAY)?,
        &part(&consts::DATE_MONTH)?,
        &part(&consts::DATE_YEAR)?,
    )
}
