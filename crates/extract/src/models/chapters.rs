use crate::consts;
use crate::error::{Error, ErrorKind};
use crate::fields::parse_count;
use exn::OptionExt;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Chapter progress, as published next to every work: "written/expected".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Chapters {
    /// Number of chapters currently posted
    pub written: u32,
    /// Expected total chapters (None if unknown/`?`)
    pub total: Option<u32>,
}
impl Chapters {
    pub fn new(written: u32, total: Option<u32>) -> Self {
        Self { written, total }
    }

    /// Returns true if the planned chapters have all been written. A work
    /// with an unknown total is never complete.
    pub fn is_complete(&self) -> bool {
        self.total.is_some_and(|t| self.written >= t)
    }
}
impl FromStr for Chapters {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ErrorKind::ParseError {
            field: "chapters",
            value: s.to_string(),
        };
        let captures = consts::CHAPTERS_REGEX.captures(s).ok_or_raise(invalid)?;
        let count = |i: usize| {
            captures
                .get(i)
                .and_then(|m| parse_count(m.as_str()))
                .and_then(|n| u32::try_from(n).ok())
        };
        let written = count(1).ok_or_raise(invalid)?;
        let total = match captures.get(2).map(|m| m.as_str()) {
            Some("?") => None,
            _ => Some(count(2).ok_or_raise(invalid)?),
        };
        Ok(Self { written, total })
    }
}
impl Display for Chapters {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self.total {
            Some(total) => write!(f, "{}/{total}", self.written),
            None => write!(f, "{}/?", self.written),
        }
    }
}
