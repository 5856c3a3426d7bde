//! Layout components (form area, status bar)

use crate::app::App;
use crate::platform::SUBMIT_SHORTCUT;
use crate::state::Focus;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Split the screen into the form area and the status bar line
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1])
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![];

    // Submission indicator
    if app.is_submitting() {
        spans.push(Span::styled(" ● Enviando... ", Style::default().fg(Color::Yellow)));
    } else {
        spans.push(Span::styled(" ○ ", Style::default().fg(Color::Gray)));
    }

    spans.push(Span::styled(
        focus_hints(app.state.focus()),
        Style::default().fg(Color::Black),
    ));

    if let Some(msg) = &app.state.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg.as_str(), Style::default().fg(Color::Red)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);

    let quit_hint = " ^C:salir ";
    let quit_area = Rect {
        x: area.x + area.width.saturating_sub(quit_hint.chars().count() as u16),
        width: (quit_hint.chars().count() as u16).min(area.width),
        ..area
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Keyboard hints for the focused row
fn focus_hints(focus: Focus) -> String {
    match focus {
        Focus::Toggle(_) => format!("Tab/↑↓:mover  Espacio:marcar  {SUBMIT_SHORTCUT}:enviar"),
        Focus::Identity(_) | Focus::Detail(..) => {
            format!("Tab/↑↓:mover  escriba para editar  {SUBMIT_SHORTCUT}:enviar")
        }
        Focus::Submit => format!("Enter/{SUBMIT_SHORTCUT}:enviar  Shift+Tab:volver"),
    }
}
