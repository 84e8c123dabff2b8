use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Tabs, Wrap},
};

use crate::app::{App, Focus};
use crate::models::TaskRow;

/// Render the weekly board: tabs, the current day's tasks and the quick note
pub fn render_board(frame: &mut Frame, area: Rect, app: &mut App) {
    let chunks = Layout::vertical([
        Constraint::Length(3), // Title and score
        Constraint::Length(2), // Day tabs
        Constraint::Min(1),    // Tasks and note
        Constraint::Length(2), // Controls
    ])
    .split(area);

    let title = Line::from(vec![
        Span::styled("Solo Level", Style::default().bold().blue()),
        Span::raw("   "),
        Span::styled(
            format!("Total Points: {}", app.board.total_score),
            Style::default().bold().fg(Color::Yellow),
        ),
    ])
    .centered();
    frame.render_widget(
        Paragraph::new(title).block(Block::default().borders(Borders::BOTTOM)),
        chunks[0],
    );

    let tabs = Tabs::new(app.board.category_names().map(str::to_string))
        .select(app.selected_day)
        .style(Style::default().dark_gray())
        .highlight_style(Style::default().bold().fg(Color::Cyan))
        .divider("|");
    frame.render_widget(tabs, chunks[1]);

    let body = Layout::horizontal([
        Constraint::Percentage(65), // Task list
        Constraint::Percentage(35), // Quick note
    ])
    .split(chunks[2]);

    render_task_list(frame, body[0], app);
    render_note(frame, body[1], app);

    let controls = match app.focus {
        Focus::Board => {
            "[h/l] Day  [j/k] Select  [Space] Done  [a] Add  [d] Delete  [J/K] Move  [Tab] Note  [q] Quit"
        }
        Focus::Note => "[Esc/Tab] Back to tasks  (saved every few seconds)",
    };
    frame.render_widget(
        Paragraph::new(controls)
            .centered()
            .dark_gray()
            .block(Block::default().borders(Borders::TOP)),
        chunks[3],
    );
}

fn render_task_list(frame: &mut Frame, area: Rect, app: &mut App) {
    let border_style = match app.focus {
        Focus::Board => Style::default().fg(Color::Cyan),
        Focus::Note => Style::default(),
    };
    let block = Block::default()
        .title(format!(" {} ", app.current_category()))
        .borders(Borders::ALL)
        .border_style(border_style);

    let rows = app.current_rows();
    if rows.is_empty() {
        frame.render_widget(
            Paragraph::new("No tasks yet. Press [a] to add one.")
                .centered()
                .dark_gray()
                .block(block),
            area,
        );
        return;
    }

    let items: Vec<ListItem> = rows.iter().map(task_item).collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .bg(Color::DarkGray),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut app.task_state);
}

fn task_item(row: &TaskRow) -> ListItem<'static> {
    let (checkbox, title_style) = if row.completed {
        (
            "[x] ",
            Style::default()
                .dark_gray()
                .add_modifier(Modifier::CROSSED_OUT),
        )
    } else {
        ("[ ] ", Style::default())
    };
    let points_color = if row.points < 0 {
        Color::Red
    } else {
        Color::Green
    };

    ListItem::new(Line::from(vec![
        Span::raw(checkbox),
        Span::styled(row.title.clone(), title_style),
        Span::raw("  "),
        Span::styled(
            format!("{:+} pts", row.points),
            Style::default().fg(points_color),
        ),
    ]))
}

fn render_note(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == Focus::Note;
    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let text = if focused {
        format!("{}_", app.board.note)
    } else {
        app.board.note.clone()
    };
    let title = format!(
        " Quick Notes (autosave in {}s) ",
        app.next_note_save().as_secs()
    );

    frame.render_widget(
        Paragraph::new(text).wrap(Wrap { trim: false }).block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(border_style),
        ),
        area,
    );
}
