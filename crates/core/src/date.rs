//! Date normalisation for transaction date strings.
//!
//! Two textual formats are accepted. Anything else degrades to the Unix
//! epoch so a single malformed row never aborts feature computation.

use chrono::{Datelike, NaiveDate};

/// A strict date layout: three digit groups joined by `separator`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateFormat {
    /// chrono format string used once the shape check passes.
    pub pattern: &'static str,
    pub separator: char,
    /// Allowed digit count (min, max) for each group, in text order.
    pub digits: [(usize, usize); 3],
}

impl DateFormat {
    /// Whether `text` is exactly three all-digit groups of allowed widths.
    /// chrono alone would accept 2-digit years, signs and leading spaces.
    fn matches_shape(&self, text: &str) -> bool {
        let groups: Vec<&str> = text.split(self.separator).collect();
        if groups.len() != 3 {
            return false;
        }
        groups
            .iter()
            .zip(self.digits)
            .all(|(group, (min, max))| (min..=max).contains(&group.len()) && all_digits(group))
    }

    fn parse(&self, text: &str) -> Option<NaiveDate> {
        if !self.matches_shape(text) {
            return None;
        }
        NaiveDate::parse_from_str(text, self.pattern).ok()
    }
}

fn all_digits(text: &str) -> bool {
    text.bytes().all(|b| b.is_ascii_digit())
}

/// Accepted formats, tried in order.
pub const DATE_FORMATS: &[DateFormat] = &[
    DateFormat {
        pattern: "%m/%d/%Y",
        separator: '/',
        digits: [(1, 2), (1, 2), (4, 4)],
    },
    DateFormat {
        pattern: "%Y-%m-%d",
        separator: '-',
        digits: [(4, 4), (1, 2), (1, 2)],
    },
];

/// 1970-01-01, the sentinel returned for unparseable dates.
pub fn epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or_default()
}

/// Parses `text` with the first matching entry of [`DATE_FORMATS`].
pub fn try_parse_date(text: &str) -> Option<NaiveDate> {
    DATE_FORMATS.iter().find_map(|fmt| fmt.parse(text))
}

/// Total version of [`try_parse_date`]: unparseable input yields [`epoch`].
pub fn parse_date(text: &str) -> NaiveDate {
    match try_parse_date(text) {
        Some(date) => date,
        None => {
            tracing::trace!(date = text, "unparseable date, using epoch");
            epoch()
        }
    }
}

/// Whole days between 1970-01-01 and the parsed date. Negative for
/// dates before the epoch.
pub fn days_since_epoch(text: &str) -> i64 {
    (parse_date(text) - epoch()).num_days()
}

/// Day component (1-31) of the parsed date.
pub fn day_of_month(text: &str) -> u32 {
    parse_date(text).day()
}
