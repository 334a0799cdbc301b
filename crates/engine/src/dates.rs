//! Calendar-time boundaries shared by every period rule.
//!
//! Dates travel through the engine as the raw strings the caller sent, and are
//! parsed only where they are compared. This keeps an unparsable transaction
//! date reportable as a per-record rejection instead of a batch failure.

use chrono::NaiveDateTime;

use crate::{EngineError, ResultEngine};

/// The only accepted timestamp format: `YYYY-MM-DD HH:MM:SS`.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse a timestamp in [`DATE_FORMAT`].
pub fn parse_timestamp(value: &str) -> ResultEngine<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, DATE_FORMAT)
        .map_err(|err| EngineError::InvalidDate(format!("{value:?}: {err}")))
}

/// A closed `[start, end]` interval of timestamps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DateRange {
    /// Parse both bounds; `None` if either does not follow [`DATE_FORMAT`].
    ///
    /// A range that cannot be parsed never contains anything, so callers
    /// simply skip it.
    pub fn parse(start: &str, end: &str) -> Option<Self> {
        let start = parse_timestamp(start).ok()?;
        let end = parse_timestamp(end).ok()?;
        Some(Self { start, end })
    }

    /// Inclusive on both ends.
    pub fn contains(&self, at: NaiveDateTime) -> bool {
        self.start <= at && at <= self.end
    }
}
