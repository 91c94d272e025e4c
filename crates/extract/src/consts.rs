use crate::dom::{Anchor, ClassMatch};
use regex::Regex;
use scraper::Selector;
use std::sync::LazyLock;

macro_rules! selector {
    ($name:ident, $css:expr) => {
        pub(crate) static $name: LazyLock<Selector> = LazyLock::new(|| Selector::parse($css).unwrap());
    };
}

macro_rules! regex {
    ($name:ident, $regex:expr) => {
        pub(crate) static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($regex).unwrap());
    };
}

/// Every class-string the extractors depend on is declared here, so a markup
/// change on the archive is a one-line fix. `exact` compares the whole class
/// attribute, `all` only requires the listed classes to be present.
macro_rules! anchor {
    ($name:ident, $css:expr) => {
        pub(crate) static $name: Anchor = Anchor::new(LazyLock::new(|| Selector::parse($css).unwrap()), ClassMatch::Any);
    };
    ($name:ident, $css:expr, exact $class:expr) => {
        pub(crate) static $name: Anchor =
            Anchor::new(LazyLock::new(|| Selector::parse($css).unwrap()), ClassMatch::Exact($class));
    };
    ($name:ident, $css:expr, all $class:expr) => {
        pub(crate) static $name: Anchor =
            Anchor::new(LazyLock::new(|| Selector::parse($css).unwrap()), ClassMatch::AllOf($class));
    };
}

// Page skeleton
anchor!(OUTER, "div#outer");
anchor!(MAIN, "div#main");
anchor!(WORKSKIN, "div#workskin");
anchor!(CHAPTERS, "div#chapters");
anchor!(WRAPPER, "div", exact "wrapper");
anchor!(PAGINATION, "ol", all "pagination actions");
anchor!(NEXT_PAGE, "li", all "next");

// Generic
selector!(ANCHOR_SELECTOR, "a");
selector!(LIST_ITEM_SELECTOR, "li");
anchor!(LIST_ITEM, "li");
selector!(IMAGE_SELECTOR, "img");
selector!(OPTION_SELECTOR, "option");
selector!(SPAN_SELECTOR, "span");
anchor!(PARAGRAPH, "p");
anchor!(FIRST_LIST, "ul");
anchor!(FIRST_DL, "dl");
anchor!(FIRST_SELECT, "select");
anchor!(FIRST_FIELDSET, "fieldset");
anchor!(FIRST_INPUT, "input");

// Feed
anchor!(WORK_INDEX, "ol", exact "work index group");
anchor!(WORK_BLURB, "li", all "work blurb group");
anchor!(SERIES_BLURB, "li", all "series blurb group");
anchor!(BOOKMARK_BLURB, "li", all "bookmark blurb group");
anchor!(CARD_HEADER, "div", exact "header module");
anchor!(CARD_HEADING, "h4", exact "heading");
anchor!(CARD_FANDOMS, "h5", exact "fandoms heading");
anchor!(CARD_UPDATED, "p", exact "datetime");
anchor!(CARD_REQUIRED_TAGS, "ul", exact "required-tags");
anchor!(CARD_TAG_TEXT, "span", exact "text");
anchor!(CARD_TAGS, "ul", exact "tags commas");
anchor!(CARD_WARNINGS, "li", exact "warnings");
anchor!(CARD_RELATIONSHIPS, "li", exact "relationships");
anchor!(CARD_CHARACTERS, "li", exact "characters");
anchor!(CARD_FREEFORMS, "li", exact "freeforms");
anchor!(CARD_SUMMARY, "blockquote", exact "userstuff summary");
anchor!(CARD_STATS, "dl", exact "stats");
selector!(AUTHOR_SELECTOR, "a[rel='author']");

// Feed filter sidebar
anchor!(FILTER_FORM, "form", exact "narrow-hidden filters");
anchor!(FILTER_INCLUDE, "dd", exact "include tags group");
anchor!(FILTER_MORE, "dd", exact "more group");
anchor!(FILTER_LANGUAGE, "dd", exact "language");
anchor!(FILTER_INDICATOR, "span", all "indicator");

// Work page
anchor!(WORK_META, "dl", exact "work meta group");
anchor!(PREFACE, "div", exact "preface group");
anchor!(WORK_TITLE, "h2", exact "title heading");
anchor!(WORK_BYLINE, "h3", exact "byline heading");
anchor!(WORK_SUMMARY, "div", exact "summary module");
anchor!(BLOCKQUOTE, "blockquote");
anchor!(CHAPTER, "div", all "chapter");
anchor!(CHAPTER_PREFACE, "div", exact "chapter preface group");
anchor!(CHAPTER_TITLE, "h3", exact "title");
anchor!(CHAPTER_TEXT, "div", all "userstuff");
anchor!(PRE_NOTES, "div", exact "notes module");
anchor!(POST_NOTES, "div", exact "end notes module");
anchor!(USERSTUFF, "blockquote", exact "userstuff");
anchor!(CHAPTER_INDEX, "ol", exact "chapter index group");

// Media category index
anchor!(FANDOM_INDEX, "ol", exact "alphabet fandom index group");
anchor!(LETTER_GROUP, "li", exact "letter listbox group");
anchor!(LETTER_HEADING, "h3", exact "heading");

// Users
anchor!(USER_HOME, "div", exact "user home");
anchor!(USER_PROFILE, "div", exact "user home profile");
anchor!(USER_HEADER, "div", exact "primary header module");
anchor!(USER_NAME, "h2", exact "heading");
anchor!(USER_ICON, "p", exact "icon");
anchor!(USER_BIO, "div", exact "bio module");
anchor!(DASHBOARD, "div#dashboard");
anchor!(DASHBOARD_NAV, "ul", exact "navigation actions");
anchor!(FANDOM_LISTBOX, "div", exact "fandom listbox group");
anchor!(INDEX_GROUP, "ol", exact "index group");
anchor!(WORK_LISTBOX, "div", exact "work listbox group");
anchor!(SERIES_LISTBOX, "div", exact "series listbox group");
anchor!(BOOKMARK_LISTBOX, "div", exact "bookmark listbox group");

// News
anchor!(NEWS_HOME, "div", exact "news admin home");
anchor!(NEWS_NAV, "ul", exact "navigation actions");
anchor!(NEWS_TAG_SELECT, "select#tag");
anchor!(NEWS_LANGUAGE_SELECT, "select#language_id");
anchor!(NEWS_ARTICLE, "div", exact "news module group");
anchor!(NEWS_TITLE, "h3", exact "heading");
anchor!(NEWS_PUBLISHED, "dd", exact "published");
anchor!(NEWS_TAGS, "ul", exact "tags commas");
anchor!(NEWS_ACTIONS, "ul", exact "actions");
anchor!(NEWS_BODY, "div", all "userstuff");

// Comments
anchor!(FEEDBACK, "div#feedback");
anchor!(COMMENTS_PLACEHOLDER, "div#comments_placeholder");
anchor!(THREAD, "ol", exact "thread");
anchor!(COMMENT_BYLINE, "h4", exact "heading byline");
anchor!(COMMENT_ROLE, "span", exact "role");
anchor!(COMMENT_ICON, "div", exact "icon");
anchor!(COMMENT_EDITED, "p", exact "edited datetime");
anchor!(COMMENT_TEXT, "blockquote", exact "userstuff");
anchor!(DATE_DAY, "span", exact "date");
anchor!(DATE_MONTH, "abbr", exact "month");
anchor!(DATE_YEAR, "span", exact "year");

regex!(CHAPTERS_REGEX, r"^\s*(\d{1,3}(?:[,.\s]?\d{3})*)\s*/\s*(\d{1,3}(?:[,.\s]?\d{3})*|\?)\s*$");
regex!(DATE_REGEX, r"(\d{4})-(\d{1,2})-(\d{1,2})");
regex!(
    TIMESTAMP_REGEX,
    r"(\d{4})-(\d{1,2})-(\d{1,2})[ T](\d{1,2}):(\d{2})(?::(\d{2}))?\s*(UTC|Z|[+-]\d{2}:?\d{2})?"
);
regex!(ALIGN_STYLE_REGEX, r"text-align\s*:\s*([a-z]+)");
