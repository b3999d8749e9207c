//! Help Overlay
//!
//! Shows keyboard shortcuts.

use super::centered_rect;
use crate::app::App;
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Navigation",
        &[
            ("j/k, ↑/↓", "Move up/down"),
            ("g / G", "Go to top/bottom"),
            ("PgUp/PgDn", "Page up/down"),
            ("/", "Filter rows"),
        ],
    ),
    (
        "KeySwitches",
        &[
            ("n", "New KeySwitch"),
            ("Enter, e", "Edit selected"),
            ("d, Delete", "Delete selected"),
            ("R", "Refresh from store"),
            ("v", "Show selected as JSON"),
        ],
    ),
    (
        "Edit dialog",
        &[
            ("Tab/Shift+Tab", "Next/previous field"),
            ("Ctrl+g", "Generate sample data"),
            ("Ctrl+u", "Clear field"),
            ("Enter", "Save"),
            ("Esc", "Cancel"),
        ],
    ),
    (
        "General",
        &[
            ("N", "Message history"),
            ("Esc", "Dismiss message"),
            ("?", "This help"),
            ("q, Ctrl+c", "Quit"),
        ],
    ),
];

pub fn render(f: &mut Frame, _app: &App) {
    let popup_area = centered_rect(60, 80, f.area());
    f.render_widget(Clear, popup_area);

    let mut help_text = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    for (title, keys) in SECTIONS {
        help_text.push(Line::from(Span::styled(
            *title,
            Style::default().add_modifier(Modifier::BOLD),
        )));
        for (key, action) in keys.iter() {
            help_text.push(Line::from(vec![
                Span::styled(format!("  {:<14}", key), Style::default().fg(Color::Yellow)),
                Span::raw(*action),
            ]));
        }
        help_text.push(Line::from(""));
    }

    help_text.push(Line::from(Span::styled(
        "Press ? or Esc to close",
        Style::default().fg(Color::DarkGray),
    )));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Help ")
        .title_alignment(Alignment::Center);

    f.render_widget(Paragraph::new(help_text).block(block), popup_area);
}
