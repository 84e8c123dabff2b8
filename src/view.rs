use crate::models::{TaskId, TaskRow};

/// Receiver of everything the planner wants displayed.
///
/// The note text is the one value that flows the other way: `save_note`
/// pulls it from the view.
pub trait TaskView {
    /// Replace the rows shown for a category
    fn show_category(&mut self, name: &str, rows: Vec<TaskRow>);

    /// Replace the total score
    fn show_score(&mut self, total: i64);

    /// Replace the note text with what was loaded from storage
    fn show_note(&mut self, content: &str);

    /// Current note text as edited by the user
    fn note_text(&self) -> String;
}

/// The ordered rows of one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryList {
    pub name: String,
    pub rows: Vec<TaskRow>,
}

/// In-memory projection of the board that the terminal UI renders
#[derive(Debug, Clone, Default)]
pub struct BoardState {
    pub lists: Vec<CategoryList>,
    pub total_score: i64,
    pub note: String,
}

impl BoardState {
    pub fn new() -> Self {
        Self::default()
    }

    fn list_index(&self, name: &str) -> Option<usize> {
        self.lists
            .iter()
            .position(|list| list.name.eq_ignore_ascii_case(name))
    }

    /// Rows of a category, empty if it has never been shown
    pub fn rows(&self, name: &str) -> &[TaskRow] {
        self.list_index(name)
            .map(|i| self.lists[i].rows.as_slice())
            .unwrap_or_default()
    }

    /// Names of the categories in display order
    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.lists.iter().map(|list| list.name.as_str())
    }

    /// Mark a row completed or not, without going through storage
    pub fn set_row_completed(&mut self, id: TaskId, completed: bool) {
        if let Some(row) = self
            .lists
            .iter_mut()
            .flat_map(|list| list.rows.iter_mut())
            .find(|row| row.id == id)
        {
            row.completed = completed;
        }
    }

    /// Move a row within its category, the way a drag-and-drop would.
    ///
    /// Returns the new top-to-bottom id order, or `None` if either position is
    /// out of range or the row would not move.
    pub fn move_row(&mut self, name: &str, from: usize, to: usize) -> Option<Vec<TaskId>> {
        let index = self.list_index(name)?;
        let rows = &mut self.lists[index].rows;
        if from == to || from >= rows.len() || to >= rows.len() {
            return None;
        }

        let row = rows.remove(from);
        rows.insert(to, row);
        Some(rows.iter().map(|row| row.id).collect())
    }
}

impl TaskView for BoardState {
    fn show_category(&mut self, name: &str, rows: Vec<TaskRow>) {
        match self.list_index(name) {
            Some(i) => self.lists[i].rows = rows,
            None => self.lists.push(CategoryList {
                name: name.to_string(),
                rows,
            }),
        }
    }

    fn show_score(&mut self, total: i64) {
        self.total_score = total;
    }

    fn show_note(&mut self, content: &str) {
        self.note = content.to_string();
    }

    fn note_text(&self) -> String {
        self.note.clone()
    }
}
