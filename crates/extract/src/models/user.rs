use super::{FeedCardInfo, Link, RichText};
use time::Date;

/// Identity fields from a user's profile page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileInfo {
    pub username: String,
    pub icon: Option<String>,
    pub join_date: Option<Date>,
    pub user_id: Option<u64>,
    pub bio: Option<RichText>,
}

/// Item counts from the dashboard navigation. Missing counts are zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserCounts {
    pub works: u64,
    pub series: u64,
    pub bookmarks: u64,
    pub collections: u64,
}

/// A user's dashboard, combined with the previously extracted profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserInfo {
    pub profile: ProfileInfo,
    pub counts: UserCounts,
    pub fandoms: Vec<Link>,
    pub recent_works: Vec<FeedCardInfo>,
    pub recent_series: Vec<FeedCardInfo>,
    pub recent_bookmarks: Vec<FeedCardInfo>,
}
