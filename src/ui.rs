use ratatui::{prelude::*, widgets::*};

use crate::messages::render::{FieldView, FormView};
use crate::navigation::AppTab;
use crate::workflow::ToastKind;

/// Renders a text input field
pub fn render_input<'a>(field: &'a FieldView, is_focused: bool, is_editing: bool) -> Paragraph<'a> {
    let style = if field.read_only {
        Style::default().fg(Color::DarkGray)
    } else if is_focused && is_editing {
        Style::default().fg(Color::Yellow)
    } else if is_focused {
        Style::default().fg(Color::Cyan)
    } else if field.error.is_some() {
        Style::default().fg(Color::Red)
    } else {
        Style::default()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(style)
        .title(format!(" {} ", field.label));

    Paragraph::new(field.value.as_str()).block(block)
}

/// Draws every field of a form, each followed by its inline error line
pub fn draw_form(f: &mut Frame, form: &FormView, area: Rect, is_editing: bool) {
    let mut constraints: Vec<Constraint> = form
        .fields
        .iter()
        .flat_map(|_| [Constraint::Length(3), Constraint::Length(1)])
        .collect();
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (i, field) in form.fields.iter().enumerate() {
        let input_area = chunks[i * 2];
        let error_area = chunks[i * 2 + 1];
        let is_focused = i == form.focused;

        f.render_widget(render_input(field, is_focused, is_editing), input_area);

        if let Some(error) = &field.error {
            let line = Paragraph::new(format!(" {}", error)).style(Style::default().fg(Color::Red));
            f.render_widget(line, error_area);
        }

        if is_focused && is_editing {
            let max_x = input_area.x + input_area.width.saturating_sub(2);
            let cursor_x = (input_area.x + field.cursor as u16 + 1).min(max_x);
            f.set_cursor_position(Position::new(cursor_x, input_area.y + 1));
        }
    }
}

/// Renders the tab bar; no tab is highlighted on screens outside the tabs
pub fn render_tabs(selected: Option<AppTab>) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, tab) in AppTab::ALL.iter().enumerate() {
        let style = if selected == Some(*tab) {
            Style::default().fg(Color::Black).bg(Color::Cyan).bold()
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {}:{} ", i + 1, tab.title()), style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

/// Toast banner color
pub fn toast_color(kind: ToastKind) -> Color {
    match kind {
        ToastKind::Success => Color::Green,
        ToastKind::Error => Color::Red,
    }
}

/// Muscle group chip style
pub fn group_style(is_highlighted: bool) -> Style {
    if is_highlighted {
        Style::default().fg(Color::Black).bg(Color::Green).bold()
    } else {
        Style::default().fg(Color::Gray)
    }
}
