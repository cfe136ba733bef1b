//! Screen layout rendering.
//!
//! Header and search bar on top, platform checklist and store list side by
//! side, optional detail pane on the right, status bar at the bottom.

use crate::state::{AppState, FocusPane};
use crate::view::print::{pad_to_width, summary_line};
use crate::view_state::{format_percent, format_timestamp, store_detail};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

const PLATFORM_PANE_WIDTH: u16 = 28;
const DETAIL_PANE_WIDTH: u16 = 40;

/// Render the full screen.
pub fn render_layout(frame: &mut Frame, state: &AppState) {
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Length(3), // Search bar
            Constraint::Min(0),    // Panes
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, vertical_chunks[0], state);
    render_search_bar(frame, vertical_chunks[1], state);

    let mut constraints = vec![Constraint::Length(PLATFORM_PANE_WIDTH), Constraint::Min(0)];
    if state.detail_visible {
        constraints.push(Constraint::Length(DETAIL_PANE_WIDTH));
    }
    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(vertical_chunks[2]);

    render_platform_pane(frame, horizontal_chunks[0], state);
    render_store_pane(frame, horizontal_chunks[1], state);
    if state.detail_visible {
        render_detail_pane(frame, horizontal_chunks[2], state);
    }

    render_status_bar(frame, vertical_chunks[3], state);
}

fn pane_block(title: String, focused: bool) -> Block<'static> {
    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Gray)
    };
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(border_style)
}

fn highlight_style() -> Style {
    Style::default()
        .bg(Color::DarkGray)
        .add_modifier(Modifier::BOLD)
}

fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let text = format!(
        "cashlens | {}",
        summary_line(
            state.catalog(),
            state.filter(),
            state.view(),
            state.display_offset()
        )
    );
    let paragraph = Paragraph::new(Line::from(text)).style(Style::default().fg(Color::Cyan));
    frame.render_widget(paragraph, area);
}

fn render_search_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let input = state.search_input();
    let focused = state.focus == FocusPane::Search;

    let line = if focused {
        let before: String = input.text().chars().take(input.cursor()).collect();
        let mut after = input.text().chars().skip(input.cursor());
        let cursor_char = after.next().map_or_else(|| " ".to_string(), |c| c.to_string());
        let remaining: String = after.collect();
        Line::from(vec![
            Span::raw(before),
            Span::styled(
                cursor_char,
                Style::default()
                    .bg(Color::White)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(remaining),
        ])
    } else if input.text().is_empty() {
        Line::from(Span::styled(
            "press / to search",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(input.text().to_string())
    };

    let title = if focused { "Search (typing)" } else { "Search" };
    frame.render_widget(
        Paragraph::new(line).block(pane_block(title.to_string(), focused)),
        area,
    );
}

fn render_platform_pane(frame: &mut Frame, area: Rect, state: &AppState) {
    let focused = state.focus == FocusPane::Platforms;
    let title = if state.filter().platforms_disabled() {
        "Platforms (all)".to_string()
    } else {
        format!("Platforms ({})", state.filter().active_platforms.len())
    };

    let items: Vec<ListItem> = state
        .catalog()
        .platforms
        .iter()
        .map(|platform| {
            let mark = if state.is_platform_active(platform.id) { "x" } else { " " };
            ListItem::new(format!("[{}] {}", mark, platform.name))
        })
        .collect();

    let mut list_state = ListState::default();
    if focused {
        list_state.select(state.highlighted_platform_index());
    }

    let list = List::new(items)
        .block(pane_block(title, focused))
        .highlight_style(highlight_style());
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn render_store_pane(frame: &mut Frame, area: Rect, state: &AppState) {
    let focused = state.focus == FocusPane::Stores;
    let block = pane_block("Stores".to_string(), focused);

    if state.view().visible_count() == 0 {
        let paragraph = Paragraph::new(Line::from(Span::styled(
            "No stores match",
            Style::default().fg(Color::DarkGray),
        )))
        .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let stores = &state.catalog().stores;
    let name_width = state
        .view()
        .ordered_visible_stores(stores)
        .map(|(store, _)| store.name.as_str().width())
        .max()
        .unwrap_or(0);

    let items: Vec<ListItem> = state
        .view()
        .ordered_visible_stores(stores)
        .map(|(store, view)| {
            let mut spans = vec![
                Span::raw(pad_to_width(store.name.as_str(), name_width)),
                Span::raw("  "),
                Span::styled(
                    pad_to_width(&format_percent(view.display_value), 6),
                    Style::default().fg(Color::Green),
                ),
            ];
            if view.show_badge {
                spans.push(Span::styled(
                    format!(" {}", view.display_platform_name),
                    Style::default().fg(Color::Magenta),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let mut list_state = ListState::default();
    list_state.select(state.selected_position());

    let list = List::new(items)
        .block(block)
        .highlight_style(highlight_style());
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn render_detail_pane(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some((store, _)) = state.selected_store() else {
        frame.render_widget(pane_block("Detail".to_string(), false), area);
        return;
    };

    let mut lines: Vec<Line> = Vec::new();
    if let Some(url) = &store.url {
        lines.push(Line::from(Span::styled(
            url.clone(),
            Style::default().fg(Color::Blue),
        )));
    }

    let offset = state.display_offset();
    let dim = Style::default().fg(Color::DarkGray);

    let rows = store_detail(store);
    if rows.is_empty() {
        lines.push(Line::from("No offers"));
    }
    for row in rows {
        lines.push(Line::from(rate_text(&row.platform_name, row.value, row.value_specific)));
        if let Some(description) = row.description {
            lines.push(Line::from(Span::styled(format!("  {description}"), dim)));
        }
        if let Some(date_end) = row.date_end {
            lines.push(Line::from(Span::styled(
                format!("  until {}", format_timestamp(date_end, offset)),
                dim,
            )));
        }
        if let Some(url) = row.url {
            lines.push(Line::from(Span::styled(
                format!("  {url}"),
                Style::default().fg(Color::Blue),
            )));
        }
    }

    let history = state.selected_history();
    if !history.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "History",
            Style::default().add_modifier(Modifier::BOLD),
        )));
    }
    for entry in history {
        let since = entry
            .date_start
            .map_or_else(|| "?".to_string(), |ts| format_timestamp(ts, offset));
        lines.push(Line::from(Span::styled(since, dim)));
        lines.push(Line::from(format!(
            "  {}",
            rate_text(&entry.platform_name, entry.value, entry.value_specific)
        )));
    }

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(pane_block(store.name.as_str().to_string(), false));
    frame.render_widget(paragraph, area);
}

fn rate_text(platform_name: &str, value: f64, value_specific: Option<f64>) -> String {
    let mut text = format!("{}: {}", platform_name, format_percent(value));
    if let Some(specific) = value_specific {
        text.push_str(&format!(" (specific {})", format_percent(specific)));
    }
    text
}

fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let hints = match state.focus {
        FocusPane::Search => "Esc/Enter: done | Backspace: delete | Ctrl+c: quit",
        FocusPane::Platforms => {
            "Space: toggle | c: clear | Tab: stores | m: mode | s: sort | q: quit"
        }
        FocusPane::Stores => {
            "/: search | Tab: platforms | m: mode | s: sort | Enter: detail | q: quit"
        }
    };
    let paragraph = Paragraph::new(Line::from(hints)).style(Style::default().fg(Color::Gray));
    frame.render_widget(paragraph, area);
}
