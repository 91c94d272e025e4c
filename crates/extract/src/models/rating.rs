use std::str::FromStr;

use derive_more::Display;

use super::sanitize;
use crate::error::{Error, ErrorKind};

/// Content rating.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rating {
    #[display("General Audiences")]
    GeneralAudiences,
    #[display("Teen And Up Audiences")]
    TeenAndUp,
    #[display("Mature")]
    Mature,
    #[display("Explicit")]
    Explicit,
    #[display("Not Rated")]
    NotRated,
}
impl Rating {
    pub const ALL: [Rating; 5] = [
        Self::GeneralAudiences,
        Self::TeenAndUp,
        Self::Mature,
        Self::Explicit,
        Self::NotRated,
    ];

    /// Single-letter symbol used on work blurbs.
    pub fn symbol(&self) -> char {
        match self {
            Self::GeneralAudiences => 'G',
            Self::TeenAndUp => 'T',
            Self::Mature => 'M',
            Self::Explicit => 'E',
            Self::NotRated => 'N',
        }
    }
}
impl FromStr for Rating {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match sanitize(s).as_str() {
            "generalaudiences" | "general" | "g" => Self::GeneralAudiences,
            "teenandupaudiences" | "teenandup" | "teen" | "t" => Self::TeenAndUp,
            "mature" | "m" => Self::Mature,
            "explicit" | "e" => Self::Explicit,
            "notrated" | "n" => Self::NotRated,
            _ => exn::bail!(ErrorKind::ParseError {
                field: "rating",
                value: s.to_string(),
            }),
        })
    }
}
