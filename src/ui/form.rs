//! The survey form view

use super::components::{render_submit_button, BUTTON_HEIGHT};
use super::widgets::render_scrollable_list;
use crate::app::App;
use crate::state::{AppState, CommutingType, DetailField, Focus, FormState, IdentityField};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// A line of the form list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    Header(String),
    Item(Focus),
}

/// List rows for the current selection; the submit button is drawn apart
pub fn rows(form: &FormState) -> Vec<Row> {
    let mut rows = vec![
        Row::Header("Datos personales".to_string()),
        Row::Item(Focus::Identity(IdentityField::Name)),
        Row::Item(Focus::Identity(IdentityField::Company)),
        Row::Header("Tipo de commuting".to_string()),
    ];
    rows.extend(CommutingType::ALL.into_iter().map(|kind| Row::Item(Focus::Toggle(kind))));
    for kind in form.selected_types() {
        rows.push(Row::Header(format!("Detalles para {kind}")));
        rows.extend(
            DetailField::for_type(kind)
                .iter()
                .map(|field| Row::Item(Focus::Detail(kind, *field))),
        );
    }
    rows
}

/// Draw the survey form
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let state = &app.state;

    let block = Block::default()
        .title(" Encuesta de commuting ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(BUTTON_HEIGHT),
        ])
        .margin(1)
        .split(area);

    let rows = rows(&state.form);
    let selected = rows
        .iter()
        .position(|row| *row == Row::Item(state.focus()));
    let items: Vec<ListItem> = rows.iter().map(|row| row_item(state, row)).collect();
    render_scrollable_list(frame, chunks[0], List::new(items), selected);

    render_submit_button(
        frame,
        chunks[1],
        state.focus() == Focus::Submit,
        app.is_submitting(),
    );
}

fn row_item(state: &AppState, row: &Row) -> ListItem<'static> {
    match row {
        Row::Header(title) => ListItem::new(Line::from(Span::styled(
            title.clone(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ))),
        Row::Item(focus) => ListItem::new(item_line(state, *focus)),
    }
}

fn item_line(state: &AppState, focus: Focus) -> Line<'static> {
    let is_active = state.focus() == focus;
    let marker = if is_active { "› " } else { "  " };
    let label_style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    if let Focus::Toggle(kind) = focus {
        let check = if state.form.is_selected(kind) { "[x]" } else { "[ ]" };
        return Line::from(vec![
            Span::raw(marker),
            Span::styled(format!("{check} {kind}"), label_style),
        ]);
    }

    let (label, stored) = match focus {
        Focus::Identity(field) => {
            let identity = state.form.identity();
            let value = match field {
                IdentityField::Name => identity.name.clone(),
                IdentityField::Company => identity.company.clone(),
            };
            (field.label(), value)
        }
        Focus::Detail(kind, field) => (
            field.label(),
            state
                .form
                .detail(kind)
                .map(|d| d.display_value(field))
                .unwrap_or_default(),
        ),
        Focus::Toggle(_) | Focus::Submit => ("", String::new()),
    };

    let mut spans = vec![
        Span::raw(marker),
        Span::styled(format!("{label}: "), label_style),
    ];
    match state.editor().filter(|_| is_active) {
        Some(editor) => {
            spans.push(Span::styled(
                editor.as_text().to_string(),
                Style::default().fg(Color::Cyan),
            ));
            spans.push(Span::styled("▌", Style::default().fg(Color::Cyan)));
        }
        None if stored.is_empty() => {
            spans.push(Span::styled("(vacío)", Style::default().fg(Color::DarkGray)));
        }
        None => spans.push(Span::raw(stored)),
    }
    Line::from(spans)
}
