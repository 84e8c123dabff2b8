use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::app::{App, InputField};

/// Render the add-task modal as an overlay
pub fn render_input_modal(frame: &mut Frame, area: Rect, app: &App) {
    // Calculate modal size and position (centered)
    let modal_width = 50.min(area.width.saturating_sub(4));
    let modal_height = 10.min(area.height.saturating_sub(4));
    let modal_x = (area.width.saturating_sub(modal_width)) / 2;
    let modal_y = (area.height.saturating_sub(modal_height)) / 2;

    let modal_area = Rect::new(modal_x, modal_y, modal_width, modal_height);

    // Clear the area behind the modal
    frame.render_widget(Clear, modal_area);

    let block = Block::default()
        .title(format!(" New Task for {} ", app.current_category()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(modal_area);
    frame.render_widget(block, modal_area);

    let chunks = Layout::vertical([
        Constraint::Length(3), // Title field
        Constraint::Length(3), // Points field
        Constraint::Length(2), // Controls
    ])
    .split(inner);

    render_field(
        frame,
        chunks[0],
        "Title",
        &app.input_title,
        app.input_field == InputField::Title,
    );
    render_field(
        frame,
        chunks[1],
        "Points (optional)",
        &app.input_points,
        app.input_field == InputField::Points,
    );

    let controls = Line::from(vec![
        Span::styled("[Enter]", Style::default().bold()),
        Span::raw(" Add   "),
        Span::styled("[Tab]", Style::default().bold()),
        Span::raw(" Next Field   "),
        Span::styled("[Esc]", Style::default().bold()),
        Span::raw(" Cancel"),
    ]);
    frame.render_widget(Paragraph::new(controls).centered().dark_gray(), chunks[2]);
}

/// A bordered single-line text field, highlighted with a cursor when focused
fn render_field(frame: &mut Frame, area: Rect, label: &str, value: &str, focused: bool) {
    let style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let block = Block::default()
        .title(label.to_string())
        .borders(Borders::ALL)
        .border_style(style);
    let text = if focused {
        format!("{}_", value)
    } else {
        value.to_string()
    };
    frame.render_widget(Paragraph::new(text).block(block), area);
}
