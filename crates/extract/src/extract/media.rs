use crate::consts;
use crate::dom::Select;
use crate::fields::{parse_count, slice_between};
use crate::models::{CategoryInfo, FandomGroup, FandomItem};
use scraper::ElementRef;

pub(super) fn category(root: ElementRef<'_>) -> Option<CategoryInfo> {
    let index = root.find_path(&[&consts::OUTER, &consts::FANDOM_INDEX])?;
    Some(CategoryInfo {
        groups: index.children_matching(&consts::LETTER_GROUP).into_iter().filter_map(group).collect(),
    })
}

fn group(letter: ElementRef<'_>) -> Option<FandomGroup> {
    // Headings carry a "back to top" arrow after the letter.
    let name = letter.find(&consts::LETTER_HEADING)?.text_normalized().replace('↑', "").trim().to_string();
    let fandoms = letter
        .find(&consts::FIRST_LIST)
        .map(|list| list.children_matching(&consts::LIST_ITEM).into_iter().filter_map(item).collect())
        .unwrap_or_default();
    Some(FandomGroup { name, fandoms })
}

fn item(li: ElementRef<'_>) -> Option<FandomItem> {
    let name = li.select(&consts::ANCHOR_SELECTOR).next()?.non_empty_text()?;
    let text = li.text_normalized();
    let rest = text.strip_prefix(name.as_str()).unwrap_or(&text);
    Some(FandomItem {
        works_count: slice_between(rest, "(", ")").and_then(parse_count).unwrap_or(0),
        name,
    })
}
