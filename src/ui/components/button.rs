//! Button component for TUI

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Button height in rows (top border + content + bottom border)
pub const BUTTON_HEIGHT: u16 = 3;

/// Label while no submission is running
const SUBMIT_LABEL: &str = "Enviar";

/// Label while the records are being sent
const SUBMITTING_LABEL: &str = "Enviando...";

/// Render the submit button.
///
/// A disabled button keeps its focus border but dims its label.
pub fn render_submit_button(frame: &mut Frame, area: Rect, is_focused: bool, in_flight: bool) {
    let label = if in_flight {
        SUBMITTING_LABEL
    } else {
        SUBMIT_LABEL
    };

    let border_style = if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let text_style = match (in_flight, is_focused) {
        (true, _) => Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::ITALIC),
        (false, true) => Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
        (false, false) => Style::default(),
    };

    let button = Paragraph::new(format!(" {label} "))
        .alignment(Alignment::Center)
        .style(text_style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style),
        );

    frame.render_widget(button, centered_width(area, label.chars().count() as u16 + 6));
}

/// Horizontally center a box of `width` columns inside `area`
fn centered_width(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    }
}
