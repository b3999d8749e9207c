//! Notifications Panel UI
//!
//! Renders the message history overlay; the selected entry's detail (the
//! cause chain of a failed operation) is shown below the list.

use crate::app::App;
use crate::controller::Severity;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

pub fn render(f: &mut Frame, app: &App) {
    let area = f.area();

    // 80% width, 70% height
    let popup_width = (area.width as f32 * 0.8) as u16;
    let popup_height = (area.height as f32 * 0.7) as u16;
    let popup_x = (area.width - popup_width) / 2;
    let popup_y = (area.height - popup_height) / 2;
    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    f.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Span::styled(
            " Messages ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
        .title_alignment(Alignment::Center);

    let inner_area = block.inner(popup_area);
    f.render_widget(block, popup_area);

    let manager = &app.notification_manager;
    if manager.notifications.is_empty() {
        let msg = Paragraph::new("No messages yet")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        f.render_widget(msg, inner_area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(4),
            Constraint::Length(1),
        ])
        .split(inner_area);

    let header_cells = [" ", " TIME", " MESSAGE"].iter().map(|h| {
        Cell::from(*h).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    });
    let header = Row::new(header_cells).height(1);

    let rows = manager.notifications.iter().map(|notif| {
        let color = match notif.severity {
            Severity::Info => Color::Green,
            Severity::Error => Color::Red,
        };
        Row::new(vec![
            Cell::from(format!(" {}", notif.icon())).style(Style::default().fg(color)),
            Cell::from(format!(" {}", notif.time_display())),
            Cell::from(format!(" {}", notif.summary)),
        ])
    });

    let widths = [
        Constraint::Length(3),
        Constraint::Length(10),
        Constraint::Min(20),
    ];

    let table = Table::new(rows, widths).header(header).row_highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    let mut state = TableState::default();
    state.select(Some(app.notifications_selected));
    f.render_stateful_widget(table, chunks[0], &mut state);

    let detail = manager
        .notifications
        .get(app.notifications_selected)
        .and_then(|n| n.detail.clone())
        .unwrap_or_default();
    let detail_block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Detail ");
    f.render_widget(
        Paragraph::new(detail)
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: true })
            .block(detail_block),
        chunks[1],
    );

    let help = Line::from(vec![
        Span::styled("j/k", Style::default().fg(Color::Yellow)),
        Span::raw(": navigate  "),
        Span::styled("c", Style::default().fg(Color::Yellow)),
        Span::raw(": clear all  "),
        Span::styled("q/N/Esc", Style::default().fg(Color::Yellow)),
        Span::raw(": close"),
    ]);
    f.render_widget(Paragraph::new(help).alignment(Alignment::Center), chunks[2]);
}
