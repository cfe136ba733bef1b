//! Plain-text rendering of a computed store list.
//!
//! Used by `--print` and for the TUI header line. Columns are aligned by
//! display width so accented and wide store names line up.

use crate::model::{Catalog, FilterState};
use crate::view_state::{count_label, format_percent, format_synced_at, ViewModel};
use chrono::FixedOffset;
use unicode_width::UnicodeWidthStr;

/// One-line summary: count, mode, sort and last sync in `offset`.
pub fn summary_line(
    catalog: &Catalog,
    filter: &FilterState,
    view: &ViewModel,
    offset: FixedOffset,
) -> String {
    format!(
        "{} | mode: {} | sort: {} | synced: {}",
        count_label(view.visible_count()),
        filter.view_mode,
        filter.sort_by,
        format_synced_at(catalog.synced_at, offset)
    )
}

/// Pad `text` with spaces up to `width` display columns.
pub(crate) fn pad_to_width(text: &str, width: usize) -> String {
    let mut padded = text.to_string();
    padded.extend(std::iter::repeat(' ').take(width.saturating_sub(text.width())));
    padded
}

/// Render the visible stores as an aligned table, in render order.
///
/// The first line is the [`summary_line`]. Each following line holds the
/// store name, its displayed value and, when badged, the platform name.
pub fn render_plain(
    catalog: &Catalog,
    filter: &FilterState,
    view: &ViewModel,
    offset: FixedOffset,
) -> String {
    let rows: Vec<(&str, String, &str)> = view
        .ordered_visible_stores(&catalog.stores)
        .map(|(store, store_view)| {
            let badge = if store_view.show_badge {
                store_view.display_platform_name.as_str()
            } else {
                ""
            };
            (store.name.as_str(), format_percent(store_view.display_value), badge)
        })
        .collect();

    let name_width = rows.iter().map(|(name, _, _)| name.width()).max().unwrap_or(0);
    let value_width = rows.iter().map(|(_, value, _)| value.width()).max().unwrap_or(0);

    let mut out = summary_line(catalog, filter, view, offset);
    out.push('\n');
    for (name, value, badge) in rows {
        let line = format!(
            "{}  {}  {}",
            pad_to_width(name, name_width),
            pad_to_width(&value, value_width),
            badge
        );
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}
