// Field rules for the catalog forms

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;

use super::{FieldRule, RuleSet};

static AUTHOR_RULES: Lazy<RuleSet> = Lazy::new(|| {
    RuleSet::new(vec![
        FieldRule::new("first_name")
            .check(is_present, "First name must be specified.")
            .check(is_alphanumeric, "First name has non-alphanumeric characters."),
        FieldRule::new("family_name")
            .check(is_present, "Family name must be specified.")
            .check(is_alphanumeric, "Family name has non-alphanumeric characters."),
        FieldRule::new("date_of_birth")
            .optional()
            .check(is_iso8601_date, "Invalid date of birth."),
        FieldRule::new("date_of_death")
            .optional()
            .check(is_iso8601_date, "Invalid date of death."),
    ])
});

static GENRE_RULES: Lazy<RuleSet> = Lazy::new(|| {
    RuleSet::new(vec![
        FieldRule::new("name").check(is_present, "Genre name must be specified.")
    ])
});

pub fn author_rules() -> &'static RuleSet {
    &AUTHOR_RULES
}

pub fn genre_rules() -> &'static RuleSet {
    &GENRE_RULES
}

pub fn is_present(value: &str) -> bool {
    !value.is_empty()
}

/// ASCII letters and digits only; the empty string does not qualify
pub fn is_alphanumeric(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_alphanumeric())
}

pub fn is_iso8601_date(value: &str) -> bool {
    parse_date(value).is_some()
}

/// Parse an ISO 8601 calendar date, or the date part of an ISO 8601 timestamp.
///
/// The date must be written `YYYY-MM-DD` with a year from 0001 to 9999, so
/// every accepted value fits a Postgres `DATE`.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    if !has_calendar_date_prefix(value) {
        return None;
    }

    let date = if value.len() == 10 {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()?
    } else if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        ts.date_naive()
    } else {
        ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"]
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
            .map(|ts| ts.date())?
    };

    (date.year() >= 1).then_some(date)
}

/// `YYYY-MM-DD`, alone or followed by a `T` time part
fn has_calendar_date_prefix(value: &str) -> bool {
    let bytes = value.as_bytes();
    if bytes.len() < 10 || (bytes.len() > 10 && bytes[10] != b'T') {
        return false;
    }
    bytes[..10].iter().enumerate().all(|(i, b)| match i {
        4 | 7 => *b == b'-',
        _ => b.is_ascii_digit(),
    })
}
