use super::CategoryId;

sql_id!(
    /// Row id of a task
    TaskId
);

/// A stored to-do item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub points: i64,
    pub completed: bool,
    /// Sort key within the category. Not unique, may have gaps.
    pub priority: i64,
    pub category_id: CategoryId,
}

impl Task {
    /// Project the task onto the fields the board displays
    pub fn to_row(&self) -> TaskRow {
        TaskRow {
            id: self.id,
            title: self.title.clone(),
            points: self.points,
            completed: self.completed,
        }
    }
}

/// A task that has not been inserted yet
#[derive(Debug, Clone)]
pub struct NewTask {
    pub title: String,
    pub points: i64,
    pub priority: i64,
    pub category_id: CategoryId,
}

/// One line of a category list as the view sees it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow {
    pub id: TaskId,
    pub title: String,
    pub points: i64,
    pub completed: bool,
}
