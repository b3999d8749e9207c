//! Header Component
//!
//! Displays the store location and snapshot summary.

use crate::app::App;
use crate::VERSION;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            format!(" mdex v{} ", VERSION),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
        .title_alignment(Alignment::Center);

    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(inner);

    let store = Line::from(vec![
        Span::styled(" Store: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            &app.store_description,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        if app.readonly {
            Span::styled(
                "  [READ-ONLY]",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )
        } else {
            Span::raw("")
        },
    ]);
    f.render_widget(Paragraph::new(store), rows[0]);

    let editing = match app.controller.selection() {
        Some(ks) if ks.is_pending() => "new KeySwitch".to_string(),
        Some(ks) => ks.id.clone().unwrap_or_default(),
        None => "-".to_string(),
    };

    let summary = Line::from(vec![
        Span::styled(" Count: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            app.controller.snapshot().len().to_string(),
            Style::default().fg(Color::Green),
        ),
        Span::raw("  "),
        Span::styled("Selected: ", Style::default().fg(Color::DarkGray)),
        Span::styled(editing, Style::default().fg(Color::Cyan)),
    ]);
    f.render_widget(Paragraph::new(summary), rows[1]);
}
