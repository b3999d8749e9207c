//! Dialog Components
//!
//! Manage KeySwitch form, delete confirmation and warning dialogs.

use super::centered_rect;
use crate::app::{App, Mode};
use crate::model::SwitchField;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, app: &App) {
    match app.mode {
        Mode::Edit => render_edit_dialog(f, app),
        Mode::Confirm => render_confirm_dialog(f, app),
        Mode::Warning => render_warning_dialog(f, app),
        _ => {},
    }
}

fn render_edit_dialog(f: &mut Frame, app: &App) {
    let Some(ks) = app.controller.selection() else {
        return;
    };

    let popup_area = centered_rect(60, 50, f.area());
    f.render_widget(Clear, popup_area);

    let title = match &ks.id {
        Some(id) => format!(" Edit KeySwitch {} ", id),
        None => " New KeySwitch ".to_string(),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Span::styled(
            title,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));

    let inner = block.inner(popup_area);
    f.render_widget(block, popup_area);

    let mut constraints: Vec<Constraint> = SwitchField::ALL
        .iter()
        .map(|_| Constraint::Length(1))
        .collect();
    constraints.push(Constraint::Min(1));
    constraints.push(Constraint::Length(1));

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (i, field) in SwitchField::ALL.iter().enumerate() {
        let focused = *field == app.focused_field;
        let label_style = if focused {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let value = if focused {
            format!("{}_", ks.field(*field))
        } else {
            ks.field(*field).to_string()
        };

        let line = Line::from(vec![
            Span::styled(format!(" {:<16}", field.label()), label_style),
            Span::styled(value, Style::default().fg(Color::White)),
        ]);
        f.render_widget(Paragraph::new(line), rows[i]);
    }

    let help = Line::from(vec![
        Span::styled("Tab", Style::default().fg(Color::Yellow)),
        Span::raw(": next  "),
        Span::styled("Ctrl+g", Style::default().fg(Color::Yellow)),
        Span::raw(": generate  "),
        Span::styled("Enter", Style::default().fg(Color::Yellow)),
        Span::raw(": save  "),
        Span::styled("Esc", Style::default().fg(Color::Yellow)),
        Span::raw(": cancel"),
    ]);
    f.render_widget(
        Paragraph::new(help).alignment(Alignment::Center),
        rows[SwitchField::ALL.len() + 1],
    );
}

fn render_confirm_dialog(f: &mut Frame, app: &App) {
    let Some(pending) = &app.pending_delete else {
        return;
    };

    let popup_area = centered_rect(50, 25, f.area());
    f.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(Span::styled(
            " Confirm Delete ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));

    let inner = block.inner(popup_area);
    f.render_widget(block, popup_area);

    let content_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(2),
        ])
        .split(inner);

    let message = Paragraph::new(Line::from(Span::styled(
        &pending.message,
        Style::default().fg(Color::White),
    )))
    .alignment(Alignment::Center);
    f.render_widget(message, content_chunks[0]);

    let selected = Style::default().fg(Color::Black).add_modifier(Modifier::BOLD);
    let idle = Style::default().fg(Color::DarkGray);
    let (yes_style, no_style) = if pending.selected_yes {
        (selected.bg(Color::Red), idle)
    } else {
        (idle, selected.bg(Color::White))
    };

    let buttons = Line::from(vec![
        Span::raw("  "),
        Span::styled(" Yes (y) ", yes_style),
        Span::raw("    "),
        Span::styled(" No (n) ", no_style),
        Span::raw("  "),
    ]);

    f.render_widget(
        Paragraph::new(buttons).alignment(Alignment::Center),
        content_chunks[2],
    );
}

fn render_warning_dialog(f: &mut Frame, app: &App) {
    let Some(message) = &app.warning_message else {
        return;
    };

    let popup_area = centered_rect(50, 20, f.area());
    f.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(Span::styled(
            " Warning ",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));

    let inner = block.inner(popup_area);
    f.render_widget(block, popup_area);

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            message.as_str(),
            Style::default().fg(Color::White),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press Enter or Esc to close",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    f.render_widget(Paragraph::new(content).alignment(Alignment::Center), inner);
}
