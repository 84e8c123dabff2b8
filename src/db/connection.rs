use rusqlite::Connection;
use std::path::Path;

use crate::config::get_db_path;
use crate::error::Result;
use crate::models::{Category, CategoryId, NewTask, QuickNote, Task, TaskId};

use super::schema::init_schema;
use super::{TaskStore, queries};

/// Database connection wrapper
pub struct Database {
    pub conn: Connection,
}

impl Database {
    /// Open the database in the user's data directory, creating the file if necessary
    pub fn open() -> Result<Self> {
        let path = get_db_path()?;
        Self::open_at(&path)
    }

    /// Open a database file at an explicit location
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        log::info!("opened database at {}", path.display());
        Ok(Self { conn })
    }

    /// Open an in-memory database (for testing)
    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }
}

impl TaskStore for Database {
    fn create_schema(&self) -> Result<()> {
        init_schema(&self.conn).map_err(Into::into)
    }

    fn seed_categories(&self, names: &[&str]) -> Result<usize> {
        queries::seed_categories(&self.conn, names).map_err(Into::into)
    }

    fn insert_category(&self, name: &str) -> Result<CategoryId> {
        queries::insert_category(&self.conn, name).map_err(Into::into)
    }

    fn delete_category(&self, id: CategoryId) -> Result<usize> {
        queries::delete_category(&self.conn, id).map_err(Into::into)
    }

    fn categories(&self) -> Result<Vec<Category>> {
        queries::get_categories(&self.conn).map_err(Into::into)
    }

    fn categories_named(&self, name: &str) -> Result<Vec<Category>> {
        queries::get_categories_named(&self.conn, name).map_err(Into::into)
    }

    fn category(&self, id: CategoryId) -> Result<Option<Category>> {
        queries::get_category(&self.conn, id).map_err(Into::into)
    }

    fn count_tasks(&self, category_id: CategoryId) -> Result<i64> {
        queries::count_tasks(&self.conn, category_id).map_err(Into::into)
    }

    fn insert_task(&self, task: &NewTask) -> Result<TaskId> {
        queries::insert_task(&self.conn, task).map_err(Into::into)
    }

    fn task(&self, id: TaskId) -> Result<Option<Task>> {
        queries::get_task(&self.conn, id).map_err(Into::into)
    }

    fn tasks_in_category(&self, category_id: CategoryId) -> Result<Vec<Task>> {
        queries::get_tasks_in_category(&self.conn, category_id).map_err(Into::into)
    }

    fn tasks_by_ids(&self, ids: &[TaskId]) -> Result<Vec<Task>> {
        queries::get_tasks_by_ids(&self.conn, ids).map_err(Into::into)
    }

    fn delete_task(&self, id: TaskId) -> Result<usize> {
        queries::delete_task(&self.conn, id).map_err(Into::into)
    }

    fn set_completed(&self, id: TaskId, completed: bool) -> Result<usize> {
        queries::set_task_completed(&self.conn, id, completed).map_err(Into::into)
    }

    fn set_priorities(&self, priorities: &[(TaskId, i64)]) -> Result<usize> {
        queries::set_task_priorities(&self.conn, priorities).map_err(Into::into)
    }

    fn completed_points(&self) -> Result<i64> {
        queries::get_completed_points(&self.conn).map_err(Into::into)
    }

    fn get_note(&self) -> Result<Option<QuickNote>> {
        queries::get_note(&self.conn).map_err(Into::into)
    }

    fn set_note(&self, content: &str) -> Result<bool> {
        queries::set_note(&self.conn, content).map_err(Into::into)
    }
}
