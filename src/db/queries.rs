use rusqlite::{Connection, OptionalExtension, Row, params, params_from_iter};

use crate::models::{Category, CategoryId, NewTask, QuickNote, Task, TaskId};

const TASK_COLUMNS: &str = "id, title, points, completed, priority, category_id";

fn task_from_row(row: &Row<'_>) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        title: row.get(1)?,
        points: row.get(2)?,
        completed: row.get(3)?,
        priority: row.get(4)?,
        category_id: row.get(5)?,
    })
}

fn category_from_row(row: &Row<'_>) -> rusqlite::Result<Category> {
    Ok(Category {
        id: row.get(0)?,
        name: row.get(1)?,
    })
}

/// Insert every name that is not already present, in one transaction.
///
/// Returns how many categories were created.
pub fn seed_categories(conn: &Connection, names: &[&str]) -> rusqlite::Result<usize> {
    let tx = conn.unchecked_transaction()?;
    let mut inserted = 0;
    {
        let mut exists = tx.prepare("SELECT COUNT(*) FROM categories WHERE name = ?1")?;
        let mut insert = tx.prepare("INSERT INTO categories (name) VALUES (?1)")?;
        for name in names {
            let count: i64 = exists.query_row(params![name], |row| row.get(0))?;
            if count == 0 {
                insert.execute(params![name])?;
                inserted += 1;
            }
        }
    }
    tx.commit()?;
    Ok(inserted)
}

/// Create a new category
#[cfg_attr(not(test), allow(dead_code))]
pub fn insert_category(conn: &Connection, name: &str) -> rusqlite::Result<CategoryId> {
    conn.execute("INSERT INTO categories (name) VALUES (?1)", params![name])?;
    Ok(CategoryId::new(conn.last_insert_rowid()))
}

/// Delete a category by ID; its tasks go with it
#[cfg_attr(not(test), allow(dead_code))]
pub fn delete_category(conn: &Connection, id: CategoryId) -> rusqlite::Result<usize> {
    conn.execute("DELETE FROM categories WHERE id = ?1", params![id])
}

/// Get all categories in creation order
pub fn get_categories(conn: &Connection) -> rusqlite::Result<Vec<Category>> {
    let mut stmt = conn.prepare("SELECT id, name FROM categories ORDER BY id")?;
    let categories = stmt.query_map([], category_from_row)?;
    categories.collect()
}

/// Get every category whose name matches, ignoring case
pub fn get_categories_named(conn: &Connection, name: &str) -> rusqlite::Result<Vec<Category>> {
    let mut stmt = conn.prepare(
        "SELECT id, name FROM categories
         WHERE name = ?1 COLLATE NOCASE
         ORDER BY id",
    )?;
    let categories = stmt.query_map(params![name], category_from_row)?;
    categories.collect()
}

/// Get a category by ID
pub fn get_category(conn: &Connection, id: CategoryId) -> rusqlite::Result<Option<Category>> {
    conn.query_row(
        "SELECT id, name FROM categories WHERE id = ?1",
        params![id],
        category_from_row,
    )
    .optional()
}

/// Count the tasks filed under a category
pub fn count_tasks(conn: &Connection, category_id: CategoryId) -> rusqlite::Result<i64> {
    conn.query_row(
        "SELECT COUNT(*) FROM tasks WHERE category_id = ?1",
        params![category_id],
        |row| row.get(0),
    )
}

/// Save a new task
pub fn insert_task(conn: &Connection, task: &NewTask) -> rusqlite::Result<TaskId> {
    conn.execute(
        "INSERT INTO tasks (title, points, completed, priority, category_id)
         VALUES (?1, ?2, 0, ?3, ?4)",
        params![task.title, task.points, task.priority, task.category_id],
    )?;
    Ok(TaskId::new(conn.last_insert_rowid()))
}

/// Get a task by ID
pub fn get_task(conn: &Connection, id: TaskId) -> rusqlite::Result<Option<Task>> {
    conn.query_row(
        &format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1"),
        params![id],
        task_from_row,
    )
    .optional()
}

/// Get the tasks of a category in display order.
///
/// Priorities may tie or have gaps, so ties fall back to insertion order.
pub fn get_tasks_in_category(
    conn: &Connection,
    category_id: CategoryId,
) -> rusqlite::Result<Vec<Task>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {TASK_COLUMNS} FROM tasks
         WHERE category_id = ?1
         ORDER BY priority ASC, id ASC"
    ))?;
    let tasks = stmt.query_map(params![category_id], task_from_row)?;
    tasks.collect()
}

/// Get the tasks whose ID is in `ids`, ordered by ID
pub fn get_tasks_by_ids(conn: &Connection, ids: &[TaskId]) -> rusqlite::Result<Vec<Task>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let placeholders = vec!["?"; ids.len()].join(", ");
    let mut stmt = conn.prepare(&format!(
        "SELECT {TASK_COLUMNS} FROM tasks WHERE id IN ({placeholders}) ORDER BY id"
    ))?;
    let tasks = stmt.query_map(params_from_iter(ids.iter()), task_from_row)?;
    tasks.collect()
}

/// Delete a task by ID
pub fn delete_task(conn: &Connection, id: TaskId) -> rusqlite::Result<usize> {
    conn.execute("DELETE FROM tasks WHERE id = ?1", params![id])
}

/// Set a task's completed flag
pub fn set_task_completed(
    conn: &Connection,
    id: TaskId,
    completed: bool,
) -> rusqlite::Result<usize> {
    conn.execute(
        "UPDATE tasks SET completed = ?1 WHERE id = ?2",
        params![completed, id],
    )
}

/// Rewrite the priority of several tasks in one transaction
pub fn set_task_priorities(
    conn: &Connection,
    priorities: &[(TaskId, i64)],
) -> rusqlite::Result<usize> {
    let tx = conn.unchecked_transaction()?;
    let mut updated = 0;
    {
        let mut stmt = tx.prepare("UPDATE tasks SET priority = ?1 WHERE id = ?2")?;
        for (id, priority) in priorities {
            updated += stmt.execute(params![priority, id])?;
        }
    }
    tx.commit()?;
    Ok(updated)
}

/// Sum of points over completed tasks (0 when there are none).
///
/// Points can be any i64, so the sum is taken wide and clamped to the i64 range.
pub fn get_completed_points(conn: &Connection) -> rusqlite::Result<i64> {
    let mut stmt = conn.prepare("SELECT points FROM tasks WHERE completed = 1")?;
    let mut total: i128 = 0;
    for points in stmt.query_map([], |row| row.get::<_, i64>(0))? {
        total += i128::from(points?);
    }
    Ok(total.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64)
}

/// Get the quick note, if one has ever been saved
pub fn get_note(conn: &Connection) -> rusqlite::Result<Option<QuickNote>> {
    conn.query_row(
        "SELECT id, content FROM quick_notes ORDER BY id LIMIT 1",
        [],
        |row| {
            Ok(QuickNote {
                id: row.get(0)?,
                content: row.get(1)?,
            })
        },
    )
    .optional()
}

/// Store the quick note text.
///
/// Updates the existing note when the text changed, creates one when there is
/// none yet and the text is non-empty. Returns whether anything was written.
pub fn set_note(conn: &Connection, content: &str) -> rusqlite::Result<bool> {
    match get_note(conn)? {
        Some(note) if note.content == content => Ok(false),
        Some(note) => {
            conn.execute(
                "UPDATE quick_notes SET content = ?1 WHERE id = ?2",
                params![content, note.id],
            )?;
            Ok(true)
        }
        None if content.is_empty() => Ok(false),
        None => {
            conn.execute(
                "INSERT INTO quick_notes (content) VALUES (?1)",
                params![content],
            )?;
            Ok(true)
        }
    }
}
