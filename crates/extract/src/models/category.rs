use std::str::FromStr;

use derive_more::Display;

use super::sanitize;
use crate::error::{Error, ErrorKind};

/// Relationship category of a work.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    #[display("F/M")]
    FemaleMale,
    #[display("F/F")]
    FemaleFemale,
    #[display("M/M")]
    MaleMale,
    #[display("Gen")]
    Gen,
    #[display("Multi")]
    Multi,
    #[display("Other")]
    Other,
}
impl Category {
    /// Parses the comma separated list work blurbs show, such as
    /// `"F/M, Gen"`, skipping anything unrecognised.
    pub fn parse_list(text: &str) -> Vec<Category> {
        text.split(',').filter_map(|part| part.parse().ok()).collect()
    }
}
impl FromStr for Category {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match sanitize(s).as_str() {
            "fm" => Self::FemaleMale,
            "ff" => Self::FemaleFemale,
            "mm" => Self::MaleMale,
            "gen" => Self::Gen,
            "multi" => Self::Multi,
            "other" => Self::Other,
            _ => exn::bail!(ErrorKind::ParseError {
                field: "category",
                value: s.to_string(),
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blurb_lists_skip_unknown_entries() {
        assert_eq!(
            Category::parse_list("F/M, Gen, No category"),
            vec![Category::FemaleMale, Category::Gen]
        );
        assert!(Category::parse_list("").is_empty());
    }
}
