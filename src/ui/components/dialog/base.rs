//! Centered modal dialog

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// What a dialog shows and how it is colored
pub struct DialogConfig<'a> {
    pub title: &'a str,
    /// Title and border color
    pub accent: Color,
    /// Message content, `\n` separates lines
    pub message: &'a str,
    /// Key hint shown under the message
    pub hint: Vec<Span<'a>>,
    pub max_width: u16,
}

/// Render a dialog centered over the whole frame
pub fn render_dialog(frame: &mut Frame, config: DialogConfig) {
    let inner_max = config.max_width.saturating_sub(4).max(1);

    let message_width = config
        .message
        .lines()
        .map(|l| l.chars().count() as u16)
        .max()
        .unwrap_or(0);
    let hint_width: u16 = config
        .hint
        .iter()
        .map(|span| span.content.chars().count() as u16)
        .sum();
    let content_width = message_width
        .max(hint_width)
        .max(config.title.chars().count() as u16)
        .min(inner_max);
    let message_rows = wrapped_rows(config.message, content_width);

    // borders + title + blank + message + blank + hint
    let height = message_rows + 6;
    let area = centered(frame.area(), content_width + 4, height);

    let mut content = vec![
        Line::from(Span::styled(
            config.title,
            Style::default()
                .fg(config.accent)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    content.extend(config.message.lines().map(Line::from));
    content.push(Line::from(""));
    content.push(Line::from(config.hint));

    let dialog = Paragraph::new(content)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(config.accent)),
        )
        .style(Style::default().bg(Color::Black));

    frame.render_widget(Clear, area);
    frame.render_widget(dialog, area);
}

/// Rows needed to show `text` wrapped at `width` columns
fn wrapped_rows(text: &str, width: u16) -> u16 {
    let width = usize::from(width.max(1));
    text.lines()
        .map(|line| line.chars().count().div_ceil(width).max(1) as u16)
        .sum::<u16>()
        .max(1)
}

/// Rectangle of the given size centered in `area`, clamped to fit
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapped_rows() {
        assert_eq!(wrapped_rows("", 10), 1);
        assert_eq!(wrapped_rows("abc", 10), 1);
        assert_eq!(wrapped_rows("abcdefghijk", 10), 2);
        assert_eq!(wrapped_rows("uno\ndos\ntres", 10), 3);
    }

    #[test]
    fn test_wrapped_rows_counts_chars_not_bytes() {
        // 10 chars, 11 bytes
        assert_eq!(wrapped_rows("envíado ok", 10), 1);
    }

    #[test]
    fn test_centered_clamps() {
        let area = Rect::new(0, 0, 20, 10);
        assert_eq!(centered(area, 10, 4), Rect::new(5, 3, 10, 4));
        assert_eq!(centered(area, 40, 40), area);
    }
}
