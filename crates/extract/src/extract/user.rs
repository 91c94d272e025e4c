use super::Datalist;
use super::data::links_in;
use super::feed::cards;
use crate::consts;
use crate::dom::{Anchor, Select};
use crate::fields::{parse_count, parse_date, slice_between};
use crate::models::{FeedCardInfo, ProfileInfo, RichText, UserCounts, UserInfo};
use scraper::ElementRef;

pub(super) fn profile(root: ElementRef<'_>) -> Option<ProfileInfo> {
    let home = root.find_path(&[&consts::MAIN, &consts::USER_PROFILE])?;
    let header = home.find(&consts::USER_HEADER)?;
    let username = header.find(&consts::USER_NAME)?.non_empty_text()?;
    let details = Datalist::by_label(home.find_path(&[&consts::WRAPPER, &consts::FIRST_DL]));
    Some(ProfileInfo {
        username,
        icon: header
            .find(&consts::USER_ICON)
            .and_then(|icon| icon.select(&consts::IMAGE_SELECTOR).next())
            .and_then(|img| img.value().attr("src"))
            .map(str::to_string),
        join_date: details.text("I joined on").as_deref().and_then(parse_date),
        user_id: details.count("My user ID"),
        bio: home.find_path(&[&consts::USER_BIO, &consts::USERSTUFF]).and_then(RichText::from_element),
    })
}

pub(super) fn dashboard(root: ElementRef<'_>, profile: ProfileInfo) -> Option<UserInfo> {
    let home = root.find_path(&[&consts::MAIN, &consts::USER_HOME])?;
    Some(UserInfo {
        profile,
        counts: counts(root),
        fandoms: home
            .find_path(&[&consts::FANDOM_LISTBOX, &consts::INDEX_GROUP])
            .map(links_in)
            .unwrap_or_default(),
        recent_works: listbox(home, &consts::WORK_LISTBOX, &consts::WORK_BLURB),
        recent_series: listbox(home, &consts::SERIES_LISTBOX, &consts::SERIES_BLURB),
        recent_bookmarks: listbox(home, &consts::BOOKMARK_LISTBOX, &consts::BOOKMARK_BLURB),
    })
}

fn listbox(home: ElementRef<'_>, listbox: &Anchor, blurb: &Anchor) -> Vec<FeedCardInfo> {
    home.find(listbox).map(|listbox| cards(listbox, blurb)).unwrap_or_default()
}

/// Section totals from the dashboard sidebar, whose second navigation list
/// reads "Works (12)", "Series (1)", "Bookmarks (40)", "Collections (0)".
fn counts(root: ElementRef<'_>) -> UserCounts {
    let Some(nav) = root
        .find(&consts::DASHBOARD)
        .and_then(|dashboard| dashboard.find_all(&consts::DASHBOARD_NAV).into_iter().nth(1))
    else {
        return UserCounts::default();
    };
    let items = nav.children_matching(&consts::LIST_ITEM);
    let count = |i: usize| {
        items
            .get(i)
            .and_then(|li| slice_between(&li.text_normalized(), "(", ")").and_then(parse_count))
            .unwrap_or(0)
    };
    UserCounts {
        works: count(0),
        series: count(1),
        bookmarks: count(2),
        collections: count(3),
    }
}

#[cfg(test)]
mod tests {
    use crate::Extractor;
    use crate::models::ProfileInfo;
    use time::{Date, Month};

    const PROFILE: &str = r#"<div id="outer"><div id="inner"><div id="main">
        <div class="user home profile">
          <div class="primary header module">
            <h2 class="heading">jinx_writes</h2>
            <p class="icon"><a href="/users/jinx_writes"><img src="https://example.org/icon.png" alt=""></a></p>
          </div>
          <div class="wrapper"><dl class="meta">
            <dt>My pseuds:</dt><dd><a href="/users/jinx_writes/pseuds/jinx_writes">jinx_writes</a></dd>
            <dt>I joined on:</dt><dd>2016-03-09</dd>
            <dt>My user ID:</dt><dd>1,234,567</dd>
          </dl></div>
          <div class="bio module"><h3 class="heading">Bio</h3>
            <blockquote class="userstuff"><p>Chaos gremlin.</p></blockquote></div>
        </div>
    </div></div></div>"#;

    #[test]
    fn extracts_profile() {
        let profile = Extractor::from_html(PROFILE).profile().unwrap();
        assert_eq!(profile.username, "jinx_writes");
        assert_eq!(profile.icon.as_deref(), Some("https://example.org/icon.png"));
        assert_eq!(profile.join_date, Date::from_calendar_date(2016, Month::March, 9).ok());
        assert_eq!(profile.user_id, Some(1234567));
        assert!(profile.bio.unwrap().as_str().contains("Chaos gremlin."));
    }

    #[test]
    fn profile_requires_username() {
        let html = r#"<div id="main"><div class="user home profile"><div class="primary header module"></div></div></div>"#;
        assert!(Extractor::from_html(html).profile().is_none());
    }

    fn profile() -> ProfileInfo {
        ProfileInfo {
            username: "jinx_writes".to_string(),
            icon: None,
            join_date: None,
            user_id: None,
            bio: None,
        }
    }

    #[test]
    fn extracts_dashboard() {
        let html = r#"<div id="outer"><div id="inner">
          <div id="dashboard" class="own region">
            <ul class="navigation actions"><li><a href="/users/jinx_writes">Dashboard</a></li></ul>
            <ul class="navigation actions">
              <li><a href="/users/jinx_writes/works">Works (12)</a></li>
              <li><a href="/users/jinx_writes/series">Series (1)</a></li>
              <li><a href="/users/jinx_writes/bookmarks">Bookmarks (1,040)</a></li>
              <li><a href="/users/jinx_writes/collections">Collections</a></li>
            </ul>
          </div>
          <div id="main"><div class="user home">
            <div class="fandom listbox group"><ol class="index group">
              <li><a href="/users/jinx_writes/works?fandom_id=1">Arcane (10)</a></li>
              <li><a href="/users/jinx_writes/works?fandom_id=2">Overwatch (2)</a></li>
            </ol></div>
            <div class="work listbox group"><ul class="index group">
              <li class="work blurb group work-55 user-3" id="work_55" role="article">
                <div class="header module"><h4 class="heading"><a href="/works/55">Hextech</a></h4></div>
              </li>
            </ul></div>
            <div class="bookmark listbox group"><ol class="bookmark index group">
              <li class="bookmark blurb group" id="bookmark_901" role="article"></li>
            </ol></div>
          </div></div>
        </div></div>"#;
        let info = Extractor::from_html(html).dashboard(profile()).unwrap();
        assert_eq!(info.profile.username, "jinx_writes");
        assert_eq!(info.counts.works, 12);
        assert_eq!(info.counts.bookmarks, 1040);
        assert_eq!(info.counts.collections, 0);
        assert_eq!(info.fandoms.len(), 2);
        assert_eq!(info.recent_works.len(), 1);
        assert_eq!(info.recent_works[0].work_id, 55);
        assert!(info.recent_series.is_empty());
        assert_eq!(info.recent_bookmarks[0].work_id, 901);
    }

    #[test]
    fn dashboard_without_home_is_none() {
        let html = r#"<div id="main"><div class="user home profile"></div></div>"#;
        assert!(Extractor::from_html(html).dashboard(profile()).is_none());
    }
}
