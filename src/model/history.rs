//! Past cashback offers of a store.

use crate::model::PlatformId;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

/// One historical rate a platform offered for a store.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    /// Platform that offered the rate.
    pub platform_id: PlatformId,
    /// Platform label.
    pub platform_name: String,
    /// Base rate in percent.
    pub value: f64,
    /// Alternate rate, when known.
    pub value_specific: Option<f64>,
    /// Free-text conditions.
    pub description: Option<String>,
    /// When the rate started.
    pub date_start: Option<DateTime<Utc>>,
    /// When the rate ended; absent while still running.
    pub date_end: Option<DateTime<Utc>>,
}

impl HistoryEntry {
    /// Create an entry with only a platform, a base value and a start time.
    pub fn new(
        platform_id: impl Into<PlatformId>,
        platform_name: impl Into<String>,
        value: f64,
        date_start: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            platform_id: platform_id.into(),
            platform_name: platform_name.into(),
            value,
            value_specific: None,
            description: None,
            date_start,
            date_end: None,
        }
    }
}

/// Inclusive calendar-day window for the history view.
///
/// An entry overlaps the window when it has not ended before `start` and
/// started no later than the end of `end`. Open ends are unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HistoryRange {
    /// First day of the window.
    pub start: Option<NaiveDate>,
    /// Last day of the window.
    pub end: Option<NaiveDate>,
}

impl HistoryRange {
    /// Whether `entry` overlaps the window.
    ///
    /// An entry without a start time cannot be placed and is excluded once
    /// `end` is set.
    pub fn contains(&self, entry: &HistoryEntry) -> bool {
        let after_start = match (self.start, entry.date_end) {
            (Some(start), Some(date_end)) => date_end >= start.and_time(NaiveTime::MIN).and_utc(),
            _ => true,
        };
        let before_end = match self.end {
            Some(end) => {
                let last = end.and_hms_opt(23, 59, 59).map(|dt| dt.and_utc());
                matches!((entry.date_start, last), (Some(s), Some(l)) if s <= l)
            }
            None => true,
        };
        after_start && before_end
    }
}
