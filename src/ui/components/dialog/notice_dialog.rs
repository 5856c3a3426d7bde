//! Notification dialog shown after a submission attempt or a refused submit

use super::base::{render_dialog, DialogConfig};
use crate::state::{Notice, NoticeKind};
use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
    Frame,
};

/// Render a notice overlay centered on the screen
pub fn render_notice_dialog(frame: &mut Frame, notice: &Notice) {
    let accent = match notice.kind {
        NoticeKind::Success => Color::Green,
        NoticeKind::Failure => Color::Red,
        NoticeKind::Warning => Color::Yellow,
    };
    let key = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let hint = vec![
        Span::raw("Pulse "),
        Span::styled("Enter", key),
        Span::raw(" o "),
        Span::styled("Esc", key),
        Span::raw(" para cerrar"),
    ];

    render_dialog(
        frame,
        DialogConfig {
            title: notice.title(),
            accent,
            message: &notice.message,
            hint,
            max_width: 64,
        },
    );
}
