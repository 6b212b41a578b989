//! Timestamp normalization into calendar years

use chrono::{Datelike, NaiveDate, NaiveDateTime};

/// Default timestamp layout of the incident export, e.g. `6/1/2020 2:00:00 PM`
pub const DEFAULT_DATE_FORMAT: &str = "%m/%d/%Y %I:%M:%S %p";

/// Extracts the calendar year from raw timestamp cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearParser {
    format: String,
}

impl YearParser {
    /// Create a parser for a chrono `strftime` layout
    pub fn new(format: impl Into<String>) -> Self {
        Self {
            format: format.into(),
        }
    }

    /// The layout this parser expects
    pub fn format(&self) -> &str {
        &self.format
    }

    /// Parse a timestamp cell into its year
    ///
    /// Returns `None` for empty cells and anything that does not match the
    /// layout. Date-only layouts are accepted as well.
    pub fn parse_year(&self, raw: &str) -> Option<i32> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, &self.format) {
            return Some(dt.year());
        }

        NaiveDate::parse_from_str(raw, &self.format)
            .ok()
            .map(|date| date.year())
    }

    /// Check that the layout can round-trip a known date
    ///
    /// Catches layouts that chrono would never match, such as an empty string
    /// or one without a year field.
    pub fn is_usable(&self) -> bool {
        let Some(sample) = NaiveDate::from_ymd_opt(2020, 6, 1).and_then(|d| d.and_hms_opt(14, 0, 0))
        else {
            return false;
        };

        let mut rendered = String::new();
        if std::fmt::write(&mut rendered, format_args!("{}", sample.format(&self.format))).is_err() {
            return false;
        }

        self.parse_year(&rendered) == Some(2020)
    }
}

impl Default for YearParser {
    fn default() -> Self {
        Self::new(DEFAULT_DATE_FORMAT)
    }
}
