use super::Link;
use crate::thread::Reply;
use time::Date;

/// A comment with its reconstructed replies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    /// Commenter's name, linking to their profile.
    pub author: Link,
    pub icon: Option<String>,
    /// Comment left by an archive official.
    pub is_verified: bool,
    pub text: String,
    pub timestamp: Option<Date>,
    pub edited_timestamp: Option<Date>,
    /// Username of the comment this one answers, if any.
    pub replying_to: Option<String>,
    pub children: Vec<Comment>,
}
impl Comment {
    /// Account name, taken from the profile link (`/users/<name>/...`).
    pub fn username(&self) -> &str {
        self.author.url.split('/').nth(2).unwrap_or_default()
    }
}

impl Reply for Comment {
    type Id = String;

    fn id(&self) -> String {
        self.username().to_string()
    }

    fn set_replying_to(&mut self, id: Option<String>) {
        self.replying_to = id;
    }

    fn replies_mut(&mut self) -> &mut Vec<Self> {
        &mut self.children
    }
}
