use super::Datalist;
use super::data::{link_of, links_in};
use super::stats::Stats;
use crate::consts;
use crate::dom::Select;
use crate::models::{AboutInfo, Category, ChapterList, Link, RichText, StoryInfo};
use scraper::ElementRef;
use tracing::trace;

pub(super) fn story_info(root: ElementRef<'_>) -> Option<StoryInfo> {
    let meta = root.find_path(&[&consts::OUTER, &consts::WRAPPER, &consts::WORK_META])?;
    let datalist = Datalist::by_class(Some(meta));
    let stats = Stats::new(datalist.get("stats")?).story_stats()?;
    Some(StoryInfo {
        rating: datalist.text("rating tags").and_then(|text| text.parse().ok()),
        warnings: parsed_tags(&datalist, "warning tags"),
        categories: datalist
            .link_texts("category tags")
            .iter()
            .flat_map(|text| Category::parse_list(text))
            .collect(),
        fandoms: tag_links(&datalist, "fandom tags"),
        relationships: tag_links(&datalist, "relationship tags"),
        characters: tag_links(&datalist, "character tags"),
        freeforms: tag_links(&datalist, "freeform tags"),
        language: datalist.text("language"),
        collections: datalist.links("collections"),
        stats,
    })
}

/// Tag entries are `<dd><ul><li><a href>name</a></li>...</ul></dd>`; only the
/// first link of each item is the tag itself.
fn tag_links(datalist: &Datalist<'_>, key: &str) -> Vec<Link> {
    let Some(list) = datalist.get(key).and_then(|dd| dd.find(&consts::FIRST_LIST)) else {
        return Vec::new();
    };
    list.children_matching(&consts::LIST_ITEM)
        .into_iter()
        .filter_map(|li| li.child_elements().next())
        .filter_map(link_of)
        .collect()
}

fn parsed_tags<T: std::str::FromStr>(datalist: &Datalist<'_>, key: &str) -> Vec<T> {
    tag_links(datalist, key)
        .into_iter()
        .filter_map(|link| {
            let parsed = link.name.parse().ok();
            if parsed.is_none() {
                trace!(key, value = %link.name, "unrecognised tag");
            }
            parsed
        })
        .collect()
}

pub(super) fn about_info(root: ElementRef<'_>) -> Option<AboutInfo> {
    let preface = root.find_path(&[&consts::OUTER, &consts::WORKSKIN, &consts::PREFACE])?;
    let title = preface.find(&consts::WORK_TITLE)?.non_empty_text()?;
    Some(AboutInfo {
        title,
        authors: preface.find(&consts::WORK_BYLINE).map(links_in).unwrap_or_default(),
        summary: preface
            .find_path(&[&consts::WORK_SUMMARY, &consts::BLOCKQUOTE])
            .and_then(RichText::from_element),
    })
}

pub(super) fn chapter_list(root: ElementRef<'_>) -> Option<ChapterList> {
    let index = root.find_path(&[&consts::OUTER, &consts::MAIN, &consts::CHAPTER_INDEX])?;
    let entries = index.children_matching(&consts::LIST_ITEM).into_iter().filter_map(|li| {
        let link = li.select(&consts::ANCHOR_SELECTOR).next().and_then(link_of)?;
        let id = link.url.trim_end_matches('/').rsplit('/').next()?.parse::<u64>().ok()?;
        Some((link.name, id))
    });
    Some(ChapterList::new(entries))
}

#[cfg(test)]
mod tests {
    use crate::Extractor;
    use crate::models::{Category, Chapters, Rating, Warning};

    const WORK_PAGE: &str = r#"
        <html><body><div id="outer"><div id="inner" class="wrapper">
          <div id="main" class="works-show region">
            <div class="wrapper">
              <dl class="work meta group">
                <dt class="rating tags">Rating:</dt>
                <dd class="rating tags"><ul class="commas"><li><a class="tag" href="/tags/Mature/works">Mature</a></li></ul></dd>
                <dt class="warning tags">Archive Warning:</dt>
                <dd class="warning tags"><ul class="commas">
                  <li><a class="tag" href="/tags/w1/works">Graphic Depictions Of Violence</a></li>
                  <li><a class="tag" href="/tags/w2/works">Something Else</a></li>
                </ul></dd>
                <dt class="category tags">Category:</dt>
                <dd class="category tags"><ul class="commas"><li><a class="tag" href="/tags/FF/works">F/F</a></li></ul></dd>
                <dt class="fandom tags">Fandom:</dt>
                <dd class="fandom tags"><ul class="commas"><li><a class="tag" href="/tags/Arcane/works">Arcane</a></li></ul></dd>
                <dt class="language">Language:</dt>
                <dd class="language" lang="en">English</dd>
                <dt class="stats">Stats:</dt>
                <dd class="stats"><dl class="stats">
                  <dt class="published">Published:</dt><dd class="published">2021-11-20</dd>
                  <dt class="status">Updated:</dt><dd class="status">2022-01-05</dd>
                  <dt class="words">Words:</dt><dd class="words">45,210</dd>
                  <dt class="chapters">Chapters:</dt><dd class="chapters">7/7</dd>
                  <dt class="comments">Comments:</dt><dd class="comments">310</dd>
                  <dt class="hits">Hits:</dt><dd class="hits">20,001</dd>
                </dl></dd>
              </dl>
            </div>
            <div id="workskin">
              <div class="preface group">
                <h2 class="title heading">Firelight</h2>
                <h3 class="byline heading"><a rel="author" href="/users/vi/pseuds/vi">vi</a></h3>
                <div class="summary module"><h3 class="heading">Summary:</h3>
                  <blockquote class="userstuff"><p>Two sisters.</p></blockquote></div>
              </div>
            </div>
          </div>
        </div></div></body></html>"#;

    #[test]
    fn extracts_story_info() {
        let info = Extractor::from_html(WORK_PAGE).story_info().unwrap();
        assert_eq!(info.rating, Some(Rating::Mature));
        assert_eq!(info.warnings, vec![Warning::GraphicViolence]);
        assert_eq!(info.categories, vec![Category::FemaleFemale]);
        assert_eq!(info.fandoms[0].name, "Arcane");
        assert!(info.relationships.is_empty());
        assert_eq!(info.language.as_deref(), Some("English"));
        assert_eq!(info.stats.words, Some(45210));
        assert_eq!(info.stats.chapters, Some(Chapters::new(7, Some(7))));
        assert!(info.stats.is_complete());
        assert_eq!(info.stats.hits, 20001);
        assert_eq!(info.stats.kudos, 0);
        assert!(info.stats.status.is_some());
    }

    #[test]
    fn extracts_about_info() {
        let about = Extractor::from_html(WORK_PAGE).about_info().unwrap();
        assert_eq!(about.title, "Firelight");
        assert_eq!(about.authors[0].name, "vi");
        assert!(about.summary.unwrap().as_str().contains("Two sisters."));
    }

    #[test]
    fn about_info_requires_a_title() {
        let html = r#"<div id="outer"><div id="workskin"><div class="preface group"><h2 class="title heading"> </h2></div></div></div>"#;
        assert!(Extractor::from_html(html).about_info().is_none());
    }

    #[test]
    fn extracts_chapter_list() {
        let html = r#"<div id="outer"><div id="inner"><div id="main">
            <ol class="chapter index group" role="navigation">
              <li><a href="/works/911674/chapters/2004510">1. Beginnings</a> <span class="datetime">(2013-07-21)</span></li>
              <li><a href="/works/911674/chapters/2011120">2. Middles</a> <span class="datetime">(2013-07-24)</span></li>
              <li><a href="/works/911674/chapters/broken">3. Broken</a></li>
            </ol>
        </div></div></div>"#;
        let list = Extractor::from_html(html).chapter_list().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list.id(1), Some(2004510));
        assert_eq!(list.name(2), Some("2. Middles"));
    }
}
