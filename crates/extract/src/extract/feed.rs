use super::Datalist;
use super::data::{link_of, links_in};
use super::stats::Stats;
use crate::consts;
use crate::dom::{Anchor, Select};
use crate::fields::parse_count;
use crate::models::{
    Category, FacetGroup, FeedCardInfo, FeedFilterInfo, FeedInfo, FeedStats, FilterInfo, Link, Rating, RichText,
};
use scraper::ElementRef;
use tracing::trace;

pub(super) fn feed(root: ElementRef<'_>, fandom_name: &str) -> Option<FeedInfo> {
    let main = root.find_path(&[&consts::OUTER, &consts::MAIN])?;
    let index = main.find(&consts::WORK_INDEX)?;
    let filter = filter(main, fandom_name).unwrap_or_else(|| FeedFilterInfo::empty(fandom_name));
    Some(FeedInfo {
        cards: cards(index, &consts::WORK_BLURB),
        pages_count: pages_count(main),
        filter,
    })
}

/// Total page count: the last pagination entry that isn't "Next".
pub(super) fn pages_count(scope: ElementRef<'_>) -> u64 {
    scope
        .find(&consts::PAGINATION)
        .and_then(|ol| ol.select(&consts::LIST_ITEM_SELECTOR).filter(|li| !consts::NEXT_PAGE.accepts(li)).last())
        .and_then(|li| parse_count(&li.text_normalized()))
        .unwrap_or(0)
}

/// Every well-formed blurb under `scope`; malformed ones are skipped.
pub(super) fn cards(scope: ElementRef<'_>, blurb: &Anchor) -> Vec<FeedCardInfo> {
    scope.find_all(blurb).into_iter().filter_map(card).collect()
}

fn card(blurb: ElementRef<'_>) -> Option<FeedCardInfo> {
    let Some(work_id) = blurb_id(blurb) else {
        trace!(id = ?blurb.value().id(), "skipping blurb without an identifier");
        return None;
    };
    let header = blurb.find(&consts::CARD_HEADER);
    let heading = header.and_then(|h| h.find(&consts::CARD_HEADING));
    let required = header.and_then(|h| h.find(&consts::CARD_REQUIRED_TAGS));
    let required_text = |position: usize| {
        required
            .and_then(|ul| ul.select(&consts::LIST_ITEM_SELECTOR).nth(position))
            .and_then(|li| li.find(&consts::CARD_TAG_TEXT))
            .and_then(|span| span.non_empty_text())
    };
    let tags = blurb.find(&consts::CARD_TAGS);
    let tag_links = |anchor: &Anchor| -> Vec<Link> {
        tags.map(|ul| ul.find_all(anchor).into_iter().flat_map(links_in).collect()).unwrap_or_default()
    };
    let stats = Stats::from_list(Datalist::by_class(blurb.find(&consts::CARD_STATS)));

    Some(FeedCardInfo {
        work_id,
        title: heading
            .and_then(|h| h.select(&consts::ANCHOR_SELECTOR).next())
            .and_then(|a| a.non_empty_text()),
        authors: heading
            .map(|h| h.select(&consts::AUTHOR_SELECTOR).filter_map(link_of).collect())
            .unwrap_or_default(),
        last_updated: header.and_then(|h| h.find(&consts::CARD_UPDATED)).and_then(|p| p.non_empty_text()),
        rating: required_text(0).and_then(|text| text.parse::<Rating>().ok()),
        category: required_text(2).and_then(|text| Category::parse_list(&text).into_iter().next()),
        warnings: tags
            .and_then(|ul| ul.find(&consts::CARD_WARNINGS))
            .map(|li| {
                li.select(&consts::ANCHOR_SELECTOR)
                    .filter_map(|a| a.text_normalized().parse().ok())
                    .collect()
            })
            .unwrap_or_default(),
        fandoms: header
            .and_then(|h| h.find(&consts::CARD_FANDOMS))
            .map(links_in)
            .unwrap_or_default(),
        relationships: tag_links(&consts::CARD_RELATIONSHIPS),
        characters: tag_links(&consts::CARD_CHARACTERS),
        freeforms: tag_links(&consts::CARD_FREEFORMS),
        summary: blurb.find(&consts::CARD_SUMMARY).and_then(RichText::from_element),
        stats: FeedStats {
            language: stats.raw("language"),
            words: stats.raw("words"),
            chapters: stats.chapters(),
            comments: stats.raw("comments"),
            kudos: stats.raw("kudos"),
            bookmarks: stats.raw("bookmarks"),
            hits: stats.raw("hits"),
        },
    })
}

/// Blurb IDs look like `work_123`, `series_45` or `bookmark_678`.
fn blurb_id(blurb: ElementRef<'_>) -> Option<u64> {
    let id = blurb.value().id()?;
    id.rsplit('_').next()?.parse().ok()
}

fn filter(main: ElementRef<'_>, fandom_name: &str) -> Option<FeedFilterInfo> {
    let form = main.find_path(&[&consts::FILTER_FORM, &consts::FIRST_FIELDSET, &consts::FIRST_DL])?;
    let include = form.find(&consts::FILTER_INCLUDE);
    let mut info = FeedFilterInfo::empty(fandom_name);
    for group in FacetGroup::ALL {
        let options = include.and_then(|dd| by_id(dd, group.sidebar_id())).map(checkbox_options).unwrap_or_default();
        info = info.with_options(group, options);
    }
    let languages = form
        .find_path(&[&consts::FILTER_MORE, &consts::FILTER_LANGUAGE, &consts::FIRST_SELECT])
        .map(select_options)
        .unwrap_or_default();
    Some(info.with_languages(languages))
}

fn by_id<'a>(scope: ElementRef<'a>, id: &str) -> Option<ElementRef<'a>> {
    scope.descendants().filter_map(ElementRef::wrap).find(|el| el.value().id() == Some(id))
}

/// `<li><input value="13"><span class="indicator"></span><span>Mature (4)</span></li>`
fn checkbox_options(list: ElementRef<'_>) -> Vec<FilterInfo> {
    list.select(&consts::LIST_ITEM_SELECTOR)
        .map(|li| {
            let id = li
                .find(&consts::FIRST_INPUT)
                .and_then(|input| input.value().attr("value"))
                .unwrap_or_default();
            let name = li
                .select(&consts::SPAN_SELECTOR)
                .find(|span| !consts::FILTER_INDICATOR.accepts(span))
                .map(|span| span.text_normalized())
                .unwrap_or_default();
            FilterInfo::new(id, name)
        })
        .collect()
}

pub(super) fn select_options(select: ElementRef<'_>) -> Vec<FilterInfo> {
    select
        .select(&consts::OPTION_SELECTOR)
        .map(|option| FilterInfo::new(option.value().attr("value").unwrap_or_default(), option.text_normalized()))
        .collect()
}
