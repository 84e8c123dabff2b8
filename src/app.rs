use std::time::{Duration, Instant};

use chrono::{Datelike, Local};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{DefaultTerminal, Frame, widgets::ListState};

use crate::config::{NOTE_SAVE_INTERVAL, TICK_RATE};
use crate::db::Database;
use crate::event::{AppEvent, poll_event};
use crate::models::{TaskRow, WEEKDAYS};
use crate::planner::Planner;
use crate::timer::IntervalTimer;
use crate::ui::{render_board, render_input_modal};
use crate::view::BoardState;

/// Which pane receives key presses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Board,
    Note,
}

/// Which input field is focused in the add-task modal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputField {
    #[default]
    Title,
    Points,
}

impl InputField {
    pub fn next(&self) -> Self {
        match self {
            InputField::Title => InputField::Points,
            InputField::Points => InputField::Title,
        }
    }
}

/// The current modal state - only one modal can be open at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    None,
    AddTask,
}

/// The main application state
pub struct App {
    pub running: bool,
    pub focus: Focus,
    pub modal: ModalState,

    /// Index into `WEEKDAYS` of the tab being shown
    pub selected_day: usize,
    pub task_state: ListState,
    pub board: BoardState,

    // Add-task modal state
    pub input_field: InputField,
    pub input_title: String,
    pub input_points: String,

    planner: Planner<Database>,
    note_autosave: IntervalTimer,
}

impl App {
    /// Open the user's database and load the board
    pub fn new() -> color_eyre::Result<Self> {
        Self::with_database(Database::open()?)
    }

    /// Build the application around an already opened database
    pub fn with_database(database: Database) -> color_eyre::Result<Self> {
        let planner = Planner::new(database);
        planner.initialize()?;

        let mut board = BoardState::new();
        planner.refresh_all(&mut board)?;
        planner.load_note(&mut board)?;

        let mut app = Self {
            running: false,
            focus: Focus::Board,
            modal: ModalState::None,
            selected_day: Local::now().weekday().num_days_from_monday() as usize,
            task_state: ListState::default(),
            board,
            input_field: InputField::Title,
            input_title: String::new(),
            input_points: String::new(),
            planner,
            note_autosave: IntervalTimer::new(NOTE_SAVE_INTERVAL, Instant::now()),
        };
        app.clamp_selection();
        Ok(app)
    }

    /// Run the application's main loop
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;

        while self.running {
            terminal.draw(|frame| self.render(frame))?;

            if let Some(event) = poll_event(TICK_RATE)? {
                match event {
                    AppEvent::Key(key) => self.handle_key_event(key)?,
                    AppEvent::Paste(text) => self.handle_paste(&text),
                    AppEvent::Tick => {}
                }
            }

            if self.running {
                self.handle_tick(Instant::now())?;
            }
        }

        Ok(())
    }

    /// Render the board and any open modal
    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        render_board(frame, area, self);

        match self.modal {
            ModalState::None => {}
            ModalState::AddTask => render_input_modal(frame, area, self),
        }
    }

    /// Name of the category shown in the current tab
    pub fn current_category(&self) -> &'static str {
        WEEKDAYS[self.selected_day]
    }

    /// Rows of the current tab
    pub fn current_rows(&self) -> &[TaskRow] {
        self.board.rows(self.current_category())
    }

    fn selected_row(&self) -> Option<&TaskRow> {
        self.task_state
            .selected()
            .and_then(|i| self.current_rows().get(i))
    }

    /// Keep the list selection inside the current tab's rows
    fn clamp_selection(&mut self) {
        let len = self.current_rows().len();
        let selected = match (len, self.task_state.selected()) {
            (0, _) => None,
            (_, Some(i)) => Some(i.min(len - 1)),
            (_, None) => Some(0),
        };
        self.task_state.select(selected);
    }

    /// Handle a key event
    fn handle_key_event(&mut self, key: KeyEvent) -> color_eyre::Result<()> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return self.quit();
        }

        if self.modal == ModalState::AddTask {
            return self.handle_input_modal_key(key);
        }

        match self.focus {
            Focus::Board => self.handle_board_key(key),
            Focus::Note => {
                self.handle_note_key(key);
                Ok(())
            }
        }
    }

    /// Handle keys while the task list has focus
    fn handle_board_key(&mut self, key: KeyEvent) -> color_eyre::Result<()> {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.quit()?,
            KeyCode::Tab => self.focus = Focus::Note,
            KeyCode::Left | KeyCode::Char('h') => {
                self.selected_day = (self.selected_day + WEEKDAYS.len() - 1) % WEEKDAYS.len();
                self.task_state.select(None);
                self.clamp_selection();
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.selected_day = (self.selected_day + 1) % WEEKDAYS.len();
                self.task_state.select(None);
                self.clamp_selection();
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let len = self.current_rows().len();
                if len > 0 {
                    let i = self.task_state.selected().map(|i| (i + 1) % len);
                    self.task_state.select(i.or(Some(0)));
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                let len = self.current_rows().len();
                if len > 0 {
                    let i = self
                        .task_state
                        .selected()
                        .map(|i| if i == 0 { len - 1 } else { i - 1 });
                    self.task_state.select(i.or(Some(0)));
                }
            }
            KeyCode::Char('J') => self.move_selected(1)?,
            KeyCode::Char('K') => self.move_selected(-1)?,
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle_selected()?,
            KeyCode::Char('d') => self.delete_selected()?,
            KeyCode::Char('a') | KeyCode::Char('n') => {
                self.modal = ModalState::AddTask;
                self.input_field = InputField::Title;
                self.input_title.clear();
                self.input_points.clear();
            }
            _ => {}
        }
        Ok(())
    }

    /// Handle keys while the quick note has focus
    fn handle_note_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Tab => self.focus = Focus::Board,
            KeyCode::Enter => self.board.note.push('\n'),
            KeyCode::Backspace => {
                self.board.note.pop();
            }
            KeyCode::Char(c) if is_plain_char(&key) => self.board.note.push(c),
            _ => {}
        }
    }

    /// Pasted text goes wherever typing would
    fn handle_paste(&mut self, text: &str) {
        match (self.modal, self.input_field, self.focus) {
            (ModalState::AddTask, InputField::Title, _) => {
                self.input_title.push_str(&text.replace(['\r', '\n'], " "));
            }
            (ModalState::AddTask, InputField::Points, _) => {
                self.input_points.push_str(text.trim());
            }
            (ModalState::None, _, Focus::Note) => {
                self.board
                    .note
                    .push_str(&text.replace("\r\n", "\n").replace('\r', "\n"));
            }
            (ModalState::None, _, Focus::Board) => {}
        }
    }

    /// Handle add-task modal keys
    fn handle_input_modal_key(&mut self, key: KeyEvent) -> color_eyre::Result<()> {
        match key.code {
            KeyCode::Esc => {
                self.modal = ModalState::None;
            }
            KeyCode::Tab => {
                self.input_field = self.input_field.next();
            }
            KeyCode::Enter => {
                let category = self.current_category();
                let added = self.planner.add_task(
                    &mut self.board,
                    category,
                    &self.input_title,
                    &self.input_points,
                )?;
                if added.is_some() {
                    self.modal = ModalState::None;
                    let last = self.current_rows().len().saturating_sub(1);
                    self.task_state.select(Some(last));
                }
            }
            KeyCode::Backspace => match self.input_field {
                InputField::Title => {
                    self.input_title.pop();
                }
                InputField::Points => {
                    self.input_points.pop();
                }
            },
            KeyCode::Char(c) if is_plain_char(&key) => match self.input_field {
                InputField::Title => self.input_title.push(c),
                InputField::Points => {
                    if c.is_ascii_digit() || c == '-' || c == '+' {
                        self.input_points.push(c);
                    }
                }
            },
            _ => {}
        }
        Ok(())
    }

    /// Flip the completed flag of the selected task
    fn toggle_selected(&mut self) -> color_eyre::Result<()> {
        let Some((id, completed)) = self.selected_row().map(|row| (row.id, !row.completed)) else {
            return Ok(());
        };

        if self
            .planner
            .toggle_completion(&mut self.board, id, completed)?
        {
            self.board.set_row_completed(id, completed);
        }
        Ok(())
    }

    /// Delete the selected task
    fn delete_selected(&mut self) -> color_eyre::Result<()> {
        let Some(id) = self.selected_row().map(|row| row.id) else {
            return Ok(());
        };

        self.planner.delete_task(&mut self.board, id)?;
        self.clamp_selection();
        Ok(())
    }

    /// Move the selected task one place up (`-1`) or down (`1`) and persist the order
    fn move_selected(&mut self, offset: isize) -> color_eyre::Result<()> {
        let Some(from) = self.task_state.selected() else {
            return Ok(());
        };
        let Some(to) = from.checked_add_signed(offset) else {
            return Ok(());
        };

        let category = self.current_category();
        if let Some(order) = self.board.move_row(category, from, to) {
            self.planner
                .reorder_category(&mut self.board, category, &order)?;
            self.task_state.select(Some(to));
        }
        Ok(())
    }

    /// Time until the quick note is next flushed
    pub fn next_note_save(&self) -> Duration {
        self.note_autosave.remaining(Instant::now())
    }

    /// Periodic work: flush the quick note when the autosave interval has passed
    fn handle_tick(&mut self, now: Instant) -> color_eyre::Result<()> {
        if self.note_autosave.fire_if_due(now) {
            self.planner.save_note(&self.board)?;
        }
        Ok(())
    }

    /// Save the note one last time and stop the main loop
    fn quit(&mut self) -> color_eyre::Result<()> {
        self.planner.save_note(&self.board)?;
        self.running = false;
        Ok(())
    }
}

/// Whether a character key is plain typing rather than a Ctrl/Alt chord
fn is_plain_char(key: &KeyEvent) -> bool {
    !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}
