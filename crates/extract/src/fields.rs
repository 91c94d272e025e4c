//! Field-level coercions shared by every extractor.
//!
//! Everything here is total: text that does not look like the expected
//! value produces `None`, never an error.

use crate::consts;
use time::{Date, Month, PrimitiveDateTime, Time, UtcDateTime, UtcOffset};
use tracing::{instrument, trace};

/// Grouping separators the archive emits in counts, depending on locale.
const GROUPING_SEPARATORS: [char; 6] = [',', '.', ' ', '\u{a0}', '\u{202f}', '\''];

/// Parses a localised integer such as `1,234`, `1.234` or `1 234`.
///
/// # Examples
///
/// ```rust
/// use quill_extract::parse_count;
/// assert_eq!(parse_count("12,345"), Some(12345));
/// assert_eq!(parse_count("twelve"), None);
/// ```
#[instrument(level = "trace")]
pub fn parse_count(text: &str) -> Option<u64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    let mut digits = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
        } else if !GROUPING_SEPARATORS.contains(&c) {
            trace!(text, "not a count");
            return None;
        }
    }
    digits.parse().ok()
}

/// Returns the text strictly between the first `from` and the next `to`.
///
/// ```rust
/// use quill_extract::slice_between;
/// assert_eq!(slice_between("Works (42)", "(", ")"), Some("42"));
/// ```
pub fn slice_between<'a>(text: &'a str, from: &str, to: &str) -> Option<&'a str> {
    let start = text.find(from)? + from.len();
    let end = text[start..].find(to)? + start;
    Some(&text[start..end])
}

/// Escapes a tag name the way the archive does in URLs: `.` and `&` have
/// their own replacements that survive percent-encoding.
pub fn web_friendly(tag: &str) -> String {
    tag.replace('.', "*d*").replace('&', "*a*")
}

/// Parses the first `YYYY-MM-DD` date in the text.
pub(crate) fn parse_date(text: &str) -> Option<Date> {
    let captures = consts::DATE_REGEX.captures(text)?;
    let year = captures.get(1)?.as_str().parse::<i32>().ok()?;
    let month = Month::try_from(captures.get(2)?.as_str().parse::<u8>().ok()?).ok()?;
    let day = captures.get(3)?.as_str().parse::<u8>().ok()?;
    Date::from_calendar_date(year, month, day).ok()
}

/// Parses an admin post timestamp such as `2024-05-02 18:20:44 UTC` or
/// `2024-05-02 14:20 -0400`. A missing offset is taken as UTC.
pub(crate) fn parse_timestamp(text: &str) -> Option<UtcDateTime> {
    let captures = consts::TIMESTAMP_REGEX.captures(text)?;
    let date = parse_date(captures.get(0)?.as_str())?;
    let number = |i: usize| captures.get(i).and_then(|m| m.as_str().parse::<u8>().ok());
    let time = Time::from_hms(number(4)?, number(5)?, number(6).unwrap_or(0)).ok()?;
    let offset = match captures.get(7).map(|m| m.as_str()) {
        None | Some("UTC") | Some("Z") => UtcOffset::UTC,
        Some(raw) => {
            let sign: i8 = if raw.starts_with('-') { -1 } else { 1 };
            let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
            let hours = digits.get(0..2)?.parse::<i8>().ok()?;
            let minutes = digits.get(2..4)?.parse::<i8>().ok()?;
            UtcOffset::from_hms(sign * hours, sign * minutes, 0).ok()?
        },
    };
    Some(PrimitiveDateTime::new(date, time).assume_offset(offset).to_utc())
}

/// Builds a date from the separate day / month-abbreviation / year pieces
/// comment bylines use (`<span class="date">7</span> <abbr class="month">Mar</abbr> ...`).
pub(crate) fn date_from_parts(day: &str, month: &str, year: &str) -> Option<Date> {
    let month = month_from_abbreviation(month)?;
    Date::from_calendar_date(year.trim().parse().ok()?, month, day.trim().parse().ok()?).ok()
}

fn month_from_abbreviation(text: &str) -> Option<Month> {
    let prefix = text.trim().get(0..3)?.to_ascii_lowercase();
    let mut month = Month::January;
    for _ in 0..12 {
        if month.to_string().to_ascii_lowercase().starts_with(&prefix) {
            return Some(month);
        }
        month = month.next();
    }
    None
}
