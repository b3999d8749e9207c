//! Terminal User Interface rendering module
//!
//! This module handles all UI rendering for mdex using the ratatui framework:
//! a table of KeySwitches with vim-style navigation, the manage dialog and
//! the message overlays.
//!
//! # Architecture
//!
//! - `header` - Header bar with store and count
//! - `dialog` - Manage KeySwitch form, delete confirmation and warnings
//! - `help` - Help overlay showing keybindings
//! - `notifications` - Message history panel
//!
//! # Virtual Scrolling
//!
//! Only visible rows are rendered, with a scrollbar indicating position.

mod dialog;
mod header;
mod help;
mod notifications;

use crate::app::{App, Mode};
use crate::controller::Severity;
use crate::model::SwitchField;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{
        Block, Borders, Cell, Paragraph, Row, Scrollbar, ScrollbarOrientation, ScrollbarState,
        Table, TableState,
    },
    Frame,
};

/// Column widths (percent), id first then the editable fields
const COLUMN_WIDTHS: [u16; 6] = [18, 22, 16, 16, 14, 14];

pub fn render(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Header
            Constraint::Min(1),    // Main content (table or describe)
            Constraint::Length(1), // Status line
        ])
        .split(f.area());

    header::render(f, app, chunks[0]);

    match app.mode {
        Mode::Describe => render_describe_view(f, app, chunks[1]),
        _ => render_main_content(f, app, chunks[1]),
    }

    render_status_line(f, app, chunks[2]);

    // Overlays
    match app.mode {
        Mode::Edit | Mode::Confirm | Mode::Warning => dialog::render(f, app),
        Mode::Help => help::render(f, app),
        Mode::Notifications => notifications::render(f, app),
        _ => {},
    }
}

fn render_main_content(f: &mut Frame, app: &mut App, area: Rect) {
    let show_filter = app.filter_active || !app.filter_text.is_empty();

    if show_filter {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(1)])
            .split(area);

        render_filter_bar(f, app, chunks[0]);
        render_table(f, app, chunks[1]);
    } else {
        render_table(f, app, area);
    }
}

fn render_filter_bar(f: &mut Frame, app: &App, area: Rect) {
    let cursor_style = if app.filter_active {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let filter_display = if app.filter_active {
        format!("/{}_", app.filter_text)
    } else {
        format!("/{}", app.filter_text)
    };

    let paragraph = Paragraph::new(Line::from(vec![Span::styled(filter_display, cursor_style)]));
    f.render_widget(paragraph, area);
}

/// Render the snapshot table with virtual scrolling
fn render_table(f: &mut Frame, app: &mut App, area: Rect) {
    let count = app.filtered_items.len();
    let total = app.controller.snapshot().len();
    let title = if app.filter_text.is_empty() {
        format!(" KeySwitches[{}] ", count)
    } else {
        format!(" KeySwitches[{}/{}] ", count, total)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            title,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
        .title_alignment(Alignment::Center);

    let inner_area = block.inner(area);
    f.render_widget(block, area);

    if app.filtered_items.is_empty() {
        let hint = if app.loading {
            "Loading..."
        } else if app.filter_text.is_empty() {
            "No KeySwitches yet. Press n to create one."
        } else {
            "No KeySwitches match the filter."
        };
        let msg = Paragraph::new(hint)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        f.render_widget(msg, inner_area);
        return;
    }

    // Account for header row
    let visible_height = (inner_area.height as usize).saturating_sub(1);
    app.update_viewport(visible_height);
    app.ensure_visible();

    let needs_scrollbar = count > visible_height;
    let table_area = if needs_scrollbar {
        Rect {
            width: inner_area.width.saturating_sub(1),
            ..inner_area
        }
    } else {
        inner_area
    };

    let header_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let mut header_cells = vec![Cell::from(" ID").style(header_style)];
    header_cells.extend(
        SwitchField::ALL
            .iter()
            .map(|field| Cell::from(format!(" {}", field.label().to_uppercase())).style(header_style)),
    );
    let header = Row::new(header_cells).height(1);

    let range = app.visible_range();
    let rows: Vec<Row> = app.filtered_items[range.clone()]
        .iter()
        .map(|ks| {
            let mut cells = vec![Cell::from(format!(
                " {}",
                truncate_string(ks.id.as_deref().unwrap_or("-"), 24)
            ))
            .style(Style::default().fg(Color::DarkGray))];
            cells.extend(
                SwitchField::ALL
                    .iter()
                    .map(|field| Cell::from(format!(" {}", truncate_string(ks.field(*field), 30)))),
            );
            Row::new(cells)
        })
        .collect();

    let widths: Vec<Constraint> = COLUMN_WIDTHS
        .iter()
        .map(|w| Constraint::Percentage(*w))
        .collect();

    let table = Table::new(rows, widths).header(header).row_highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    let mut state = TableState::default();
    if app.selected >= range.start && app.selected < range.end {
        state.select(Some(app.selected - range.start));
    }

    f.render_stateful_widget(table, table_area, &mut state);

    if needs_scrollbar {
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .symbols(symbols::scrollbar::VERTICAL)
            .begin_symbol(Some("↑"))
            .end_symbol(Some("↓"));

        let mut scrollbar_state =
            ScrollbarState::new(count.saturating_sub(visible_height)).position(app.scroll_offset);

        f.render_stateful_widget(scrollbar, inner_area, &mut scrollbar_state);
    }
}

/// Truncate string for display (Unicode-safe)
fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", truncated)
    } else {
        s.to_string()
    }
}

fn render_describe_view(f: &mut Frame, app: &App, area: Rect) {
    let json = app
        .selected_item_json()
        .unwrap_or_else(|| "No item selected".to_string());

    let lines: Vec<Line> = json.lines().map(highlight_json_line).collect();
    let total_lines = lines.len();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Span::styled(
            " KeySwitch Details ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));

    let inner_area = block.inner(area);
    f.render_widget(block, area);

    let visible_lines = inner_area.height as usize;
    let max_scroll = total_lines.saturating_sub(visible_lines);
    let scroll = app.describe_scroll.min(max_scroll);

    f.render_widget(Paragraph::new(lines).scroll((scroll as u16, 0)), inner_area);
}

/// Keys in cyan, string values in green, braces in yellow
fn highlight_json_line(line: &str) -> Line<'static> {
    let trimmed = line.trim_start();
    let indent = line[..line.len() - trimmed.len()].to_string();

    if let Some((key, value)) = trimmed.split_once("\": ") {
        return Line::from(vec![
            Span::raw(indent),
            Span::styled(format!("{}\"", key), Style::default().fg(Color::Cyan)),
            Span::styled(": ".to_string(), Style::default().fg(Color::White)),
            Span::styled(value.to_string(), Style::default().fg(Color::Green)),
        ]);
    }

    Line::from(vec![
        Span::raw(indent),
        Span::styled(trimmed.to_string(), Style::default().fg(Color::Yellow)),
    ])
}

fn render_status_line(f: &mut Frame, app: &App, area: Rect) {
    let toast = app.notification_manager.current_toast();

    let (status_text, style) = if let Some(notif) = toast {
        let color = match notif.severity {
            Severity::Info => Color::Green,
            Severity::Error => Color::Red,
        };
        (notif.toast_message(), Style::default().fg(color))
    } else if app.loading {
        ("Loading...".to_string(), Style::default().fg(Color::Yellow))
    } else {
        let hint = match app.mode {
            Mode::Describe => "j/k: scroll | q/v/Esc: back",
            Mode::Edit => "Tab: next field | Ctrl+g: generate | Enter: save | Esc: cancel",
            _ if app.filter_active => "Type to filter | Enter: apply | Esc: clear",
            _ => "n: new | Enter: edit | d: delete | R: refresh | ?: help",
        };
        (hint.to_string(), Style::default().fg(Color::DarkGray))
    };

    let errors = app.notification_manager.error_count();
    let indicator = if errors > 0 {
        format!(" [N:{}✗]", errors)
    } else if app.notification_manager.has_notifications() {
        " [N]".to_string()
    } else {
        String::new()
    };
    let indicator_style = if errors > 0 {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let crumb = Line::from(vec![
        Span::styled(
            " <keyswitches> ",
            Style::default().fg(Color::Black).bg(Color::Cyan),
        ),
        Span::raw(" "),
        Span::styled(status_text, style),
        Span::styled(indicator, indicator_style),
    ]);

    f.render_widget(Paragraph::new(crumb), area);
}

/// Centered popup area
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::controller::CrudController;
    use crate::store::MemoryKeySwitchService;
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;

    #[test]
    fn test_truncate_string_is_unicode_safe() {
        assert_eq!(truncate_string("Gateron Milky Yellow", 10), "Gateron...");
        assert_eq!(truncate_string("ÄÖÜäöü", 10), "ÄÖÜäöü");
    }

    #[test]
    fn test_highlight_json_line_splits_key() {
        let line = highlight_json_line("  \"switchName\": \"Quiet Red\",");
        assert_eq!(line.spans.len(), 4);
        assert_eq!(line.spans[1].content, "\"switchName\"");
    }

    #[tokio::test]
    async fn test_render_every_mode() {
        let store = Arc::new(MemoryKeySwitchService::with_samples(30));
        let mut app = App::new(CrudController::new(store), Config::default(), false);
        app.initialize().await;

        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| render(f, &mut app)).unwrap();

        app.open_new();
        terminal.draw(|f| render(f, &mut app)).unwrap();
        app.cancel_edit();

        app.request_delete();
        terminal.draw(|f| render(f, &mut app)).unwrap();
        app.cancel_delete();

        app.enter_describe_mode();
        terminal.draw(|f| render(f, &mut app)).unwrap();

        app.enter_notifications_mode();
        terminal.draw(|f| render(f, &mut app)).unwrap();

        app.enter_help_mode();
        terminal.draw(|f| render(f, &mut app)).unwrap();
    }
}
