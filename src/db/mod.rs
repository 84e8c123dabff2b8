mod connection;
pub mod queries;
mod schema;

pub use connection::Database;

use crate::error::Result;
use crate::models::{Category, CategoryId, NewTask, QuickNote, Task, TaskId};

/// Persistent storage for categories, tasks and the quick note.
///
/// Every mutating call is durable once it returns; calls that touch several
/// rows (`seed_categories`, `set_priorities`) commit them as one unit.
pub trait TaskStore {
    /// Create any missing tables. Safe to call on every start.
    fn create_schema(&self) -> Result<()>;

    /// Insert the names not already present; returns how many were added
    fn seed_categories(&self, names: &[&str]) -> Result<usize>;
    #[cfg_attr(not(test), allow(dead_code))]
    fn insert_category(&self, name: &str) -> Result<CategoryId>;
    /// Delete a category together with all of its tasks
    #[cfg_attr(not(test), allow(dead_code))]
    fn delete_category(&self, id: CategoryId) -> Result<usize>;
    fn categories(&self) -> Result<Vec<Category>>;
    /// Case-insensitive name match; callers decide how many results are acceptable
    fn categories_named(&self, name: &str) -> Result<Vec<Category>>;
    fn category(&self, id: CategoryId) -> Result<Option<Category>>;

    fn count_tasks(&self, category_id: CategoryId) -> Result<i64>;
    fn insert_task(&self, task: &NewTask) -> Result<TaskId>;
    fn task(&self, id: TaskId) -> Result<Option<Task>>;
    /// Tasks of one category ordered by priority, ties broken by id
    fn tasks_in_category(&self, category_id: CategoryId) -> Result<Vec<Task>>;
    fn tasks_by_ids(&self, ids: &[TaskId]) -> Result<Vec<Task>>;
    fn delete_task(&self, id: TaskId) -> Result<usize>;
    fn set_completed(&self, id: TaskId, completed: bool) -> Result<usize>;
    fn set_priorities(&self, priorities: &[(TaskId, i64)]) -> Result<usize>;
    /// Sum of points over completed tasks, 0 when there are none
    fn completed_points(&self) -> Result<i64>;

    fn get_note(&self) -> Result<Option<QuickNote>>;
    /// Create or update the quick note; returns whether anything was written
    fn set_note(&self, content: &str) -> Result<bool>;
}
