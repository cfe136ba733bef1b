//! Display formatting for computed values.

use chrono::{DateTime, FixedOffset, Offset, Utc};

/// Hours east of UTC used for timestamps unless configured (Brasília).
pub const DEFAULT_UTC_OFFSET_HOURS: i32 = -3;

/// Render a cashback rate rounded to two decimals, trailing zeros dropped.
///
/// ```
/// use cashlens::view_state::format_percent;
///
/// assert_eq!(format_percent(4.0), "4%");
/// assert_eq!(format_percent(2.5), "2.5%");
/// assert_eq!(format_percent(3.456), "3.46%");
/// ```
pub fn format_percent(value: f64) -> String {
    // Adding 0.0 turns a rounded -0.0 into 0.0.
    let rounded = (value * 100.0).round() / 100.0 + 0.0;
    format!("{rounded}%")
}

/// Render the visible store count.
pub fn count_label(count: usize) -> String {
    match count {
        1 => "1 store".to_string(),
        n => format!("{n} stores"),
    }
}

/// Offset for a whole number of hours east of UTC.
///
/// Returns `None` outside the open range -24..24.
pub fn utc_offset_from_hours(hours: i32) -> Option<FixedOffset> {
    hours.checked_mul(3600).and_then(FixedOffset::east_opt)
}

/// Offset timestamps are displayed in when none is configured.
pub fn default_display_offset() -> FixedOffset {
    utc_offset_from_hours(DEFAULT_UTC_OFFSET_HOURS).unwrap_or_else(|| Utc.fix())
}

/// Render a timestamp day-first in `offset`, labeled with that offset.
///
/// ```
/// use cashlens::view_state::{default_display_offset, format_timestamp};
/// use chrono::{TimeZone, Utc};
///
/// let ts = Utc.with_ymd_and_hms(2025, 3, 7, 14, 5, 0).unwrap();
/// assert_eq!(format_timestamp(ts, default_display_offset()), "07/03/2025 11:05 UTC-03:00");
/// ```
pub fn format_timestamp(ts: DateTime<Utc>, offset: FixedOffset) -> String {
    ts.with_timezone(&offset)
        .format("%d/%m/%Y %H:%M UTC%:z")
        .to_string()
}

/// Render the catalog's last synchronization time.
pub fn format_synced_at(synced_at: Option<DateTime<Utc>>, offset: FixedOffset) -> String {
    match synced_at {
        Some(ts) => format_timestamp(ts, offset),
        None => "never".to_string(),
    }
}
