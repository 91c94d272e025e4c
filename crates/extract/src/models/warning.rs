use std::str::FromStr;

use derive_more::Display;

use super::sanitize;
use crate::error::{Error, ErrorKind};

/// Archive warning.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Warning {
    #[display("No Archive Warnings Apply")]
    NoWarningsApply,
    #[display("Creator Chose Not To Use Archive Warnings")]
    CreatorChoseNotToUse,
    #[display("Graphic Depictions Of Violence")]
    GraphicViolence,
    #[display("Major Character Death")]
    MajorCharacterDeath,
    #[display("Underage")]
    Underage,
    #[display("Rape/Non-Con")]
    NonCon,
}
impl FromStr for Warning {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match sanitize(s).as_str() {
            "noarchivewarningsapply" => Self::NoWarningsApply,
            "creatorchosenottousearchivewarnings" | "choosenottousearchivewarnings" => Self::CreatorChoseNotToUse,
            "graphicdepictionsofviolence" => Self::GraphicViolence,
            "majorcharacterdeath" => Self::MajorCharacterDeath,
            "underage" | "underagesex" => Self::Underage,
            "rapenoncon" => Self::NonCon,
            _ => exn::bail!(ErrorKind::ParseError {
                field: "warning",
                value: s.to_string(),
            }),
        })
    }
}
