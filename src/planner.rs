use std::collections::HashMap;

use crate::db::TaskStore;
use crate::error::{Result, SoloLevelError};
use crate::models::{Category, NewTask, TaskId, TaskRow, WEEKDAYS};
use crate::validation::{normalize_category_name, parse_points, validate_task_title};
use crate::view::TaskView;

/// The only writer of the task store.
///
/// Each user action becomes one committed store mutation, after which the
/// affected parts of the view are recomputed from storage.
pub struct Planner<S: TaskStore> {
    store: S,
}

impl<S: TaskStore> Planner<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Create the schema and make sure every weekday category exists
    pub fn initialize(&self) -> Result<()> {
        self.store.create_schema()?;
        let created = self.store.seed_categories(&WEEKDAYS)?;
        log::info!("store initialized, {} categories created", created);
        Ok(())
    }

    /// Resolve a category that must exist exactly once
    fn category_named(&self, name: &str) -> Result<Category> {
        let name = normalize_category_name(name);
        let mut matches = self.store.categories_named(&name)?;
        if matches.len() != 1 {
            return Err(SoloLevelError::CategoryLookup {
                name,
                found: matches.len(),
            });
        }
        Ok(matches.remove(0))
    }

    /// Append a task to the end of a category.
    ///
    /// Returns `None` without touching storage when the title is blank.
    /// `points_text` that is not an integer counts as 0 points.
    pub fn add_task(
        &self,
        view: &mut impl TaskView,
        category_name: &str,
        title: &str,
        points_text: &str,
    ) -> Result<Option<TaskId>> {
        if !validate_task_title(title) {
            log::debug!("ignoring task with empty title");
            return Ok(None);
        }

        let category = self.category_named(category_name)?;
        let task = NewTask {
            title: title.trim().to_string(),
            points: parse_points(points_text),
            priority: self.store.count_tasks(category.id)?,
            category_id: category.id,
        };
        let id = self.store.insert_task(&task)?;
        log::info!(
            "added task {} to {} at priority {} ({} points)",
            id,
            category.name,
            task.priority,
            task.points
        );

        self.refresh_category(view, &category.name)?;
        self.refresh_scoreboard(view)?;
        Ok(Some(id))
    }

    /// Delete a task. Priorities of the remaining tasks are left as they are.
    ///
    /// Returns `false` if the task no longer exists.
    pub fn delete_task(&self, view: &mut impl TaskView, id: TaskId) -> Result<bool> {
        let Some(task) = self.store.task(id)? else {
            log::debug!("delete of missing task {} skipped", id);
            return Ok(false);
        };
        let category = self.store.category(task.category_id)?;

        self.store.delete_task(id)?;
        log::info!("deleted task {}", id);

        if let Some(category) = category {
            self.refresh_category(view, &category.name)?;
        }
        self.refresh_scoreboard(view)?;
        Ok(true)
    }

    /// Set a task's completed flag.
    ///
    /// Returns `false` if the task is missing or already in that state. Only
    /// the scoreboard is recomputed; the row itself is the caller's to update.
    pub fn toggle_completion(
        &self,
        view: &mut impl TaskView,
        id: TaskId,
        completed: bool,
    ) -> Result<bool> {
        match self.store.task(id)? {
            Some(task) if task.completed != completed => {
                self.store.set_completed(id, completed)?;
                log::info!("task {} completed = {}", id, completed);
                self.refresh_scoreboard(view)?;
                Ok(true)
            }
            Some(_) => {
                log::debug!("task {} already completed = {}", id, completed);
                Ok(false)
            }
            None => {
                log::debug!("toggle of missing task {} skipped", id);
                Ok(false)
            }
        }
    }

    /// Persist a new top-to-bottom order for one category.
    ///
    /// Each task gets its index in `ordered_ids` as priority; only tasks whose
    /// priority actually changes are written, all in one commit. Ids that do
    /// not belong to the category are ignored. Returns whether anything changed.
    pub fn reorder_category(
        &self,
        view: &mut impl TaskView,
        category_name: &str,
        ordered_ids: &[TaskId],
    ) -> Result<bool> {
        let category = self.category_named(category_name)?;
        let current: HashMap<TaskId, i64> = self
            .store
            .tasks_by_ids(ordered_ids)?
            .into_iter()
            .filter(|task| task.category_id == category.id)
            .map(|task| (task.id, task.priority))
            .collect();

        let mut changes = Vec::new();
        for (index, id) in ordered_ids.iter().enumerate() {
            let priority = index as i64;
            match current.get(id) {
                Some(&old) if old != priority => changes.push((*id, priority)),
                Some(_) => {}
                None => log::warn!("task {} is not in {}, not reordered", id, category.name),
            }
        }

        if changes.is_empty() {
            return Ok(false);
        }

        self.store.set_priorities(&changes)?;
        log::info!("reordered {} tasks in {}", changes.len(), category.name);
        self.refresh_scoreboard(view)?;
        Ok(true)
    }

    /// Push the ordered rows of one category to the view
    pub fn refresh_category(&self, view: &mut impl TaskView, category_name: &str) -> Result<()> {
        let category = self.category_named(category_name)?;
        let rows: Vec<TaskRow> = self
            .store
            .tasks_in_category(category.id)?
            .iter()
            .map(|task| task.to_row())
            .collect();
        view.show_category(&category.name, rows);
        Ok(())
    }

    /// Push the total points of completed tasks to the view
    pub fn refresh_scoreboard(&self, view: &mut impl TaskView) -> Result<()> {
        view.show_score(self.store.completed_points()?);
        Ok(())
    }

    /// Push every category and the scoreboard
    pub fn refresh_all(&self, view: &mut impl TaskView) -> Result<()> {
        for category in self.store.categories()? {
            self.refresh_category(view, &category.name)?;
        }
        self.refresh_scoreboard(view)
    }

    /// Push the stored note, if there is one
    pub fn load_note(&self, view: &mut impl TaskView) -> Result<()> {
        if let Some(note) = self.store.get_note()? {
            view.show_note(&note.content);
        }
        Ok(())
    }

    /// Store the view's note text if it differs from what is saved.
    ///
    /// Returns whether anything was written.
    pub fn save_note(&self, view: &impl TaskView) -> Result<bool> {
        let saved = self.store.set_note(&view.note_text())?;
        if saved {
            log::info!("quick note saved");
        }
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::models::{CategoryId, QuickNote, Task};
    use crate::view::BoardState;
    use std::cell::Cell;

    /// Database wrapper that counts write calls
    struct CountingStore {
        db: Database,
        writes: Cell<usize>,
    }

    impl CountingStore {
        fn new() -> Self {
            Self {
                db: Database::open_in_memory().unwrap(),
                writes: Cell::new(0),
            }
        }

        fn bump(&self) {
            self.writes.set(self.writes.get() + 1);
        }
    }

    impl TaskStore for CountingStore {
        fn create_schema(&self) -> Result<()> {
            self.db.create_schema()
        }
        fn seed_categories(&self, names: &[&str]) -> Result<usize> {
            self.bump();
            self.db.seed_categories(names)
        }
        fn insert_category(&self, name: &str) -> Result<CategoryId> {
            self.bump();
            self.db.insert_category(name)
        }
        fn delete_category(&self, id: CategoryId) -> Result<usize> {
            self.bump();
            self.db.delete_category(id)
        }
        fn categories(&self) -> Result<Vec<Category>> {
            self.db.categories()
        }
        fn categories_named(&self, name: &str) -> Result<Vec<Category>> {
            self.db.categories_named(name)
        }
        fn category(&self, id: CategoryId) -> Result<Option<Category>> {
            self.db.category(id)
        }
        fn count_tasks(&self, category_id: CategoryId) -> Result<i64> {
            self.db.count_tasks(category_id)
        }
        fn insert_task(&self, task: &NewTask) -> Result<TaskId> {
            self.bump();
            self.db.insert_task(task)
        }
        fn task(&self, id: TaskId) -> Result<Option<Task>> {
            self.db.task(id)
        }
        fn tasks_in_category(&self, category_id: CategoryId) -> Result<Vec<Task>> {
            self.db.tasks_in_category(category_id)
        }
        fn tasks_by_ids(&self, ids: &[TaskId]) -> Result<Vec<Task>> {
            self.db.tasks_by_ids(ids)
        }
        fn delete_task(&self, id: TaskId) -> Result<usize> {
            self.bump();
            self.db.delete_task(id)
        }
        fn set_completed(&self, id: TaskId, completed: bool) -> Result<usize> {
            self.bump();
            self.db.set_completed(id, completed)
        }
        fn set_priorities(&self, priorities: &[(TaskId, i64)]) -> Result<usize> {
            self.bump();
            self.db.set_priorities(priorities)
        }
        fn completed_points(&self) -> Result<i64> {
            self.db.completed_points()
        }
        fn get_note(&self) -> Result<Option<QuickNote>> {
            self.db.get_note()
        }
        fn set_note(&self, content: &str) -> Result<bool> {
            self.bump();
            self.db.set_note(content)
        }
    }

    fn setup() -> (Planner<CountingStore>, BoardState) {
        let planner = Planner::new(CountingStore::new());
        planner.initialize().unwrap();
        let mut board = BoardState::new();
        planner.refresh_all(&mut board).unwrap();
        (planner, board)
    }

    fn writes(planner: &Planner<CountingStore>) -> usize {
        planner.store().writes.get()
    }

    fn stored_order(planner: &Planner<CountingStore>, name: &str) -> Vec<TaskId> {
        let category = planner.category_named(name).unwrap();
        planner
            .store()
            .tasks_in_category(category.id)
            .unwrap()
            .iter()
            .map(|t| t.id)
            .collect()
    }

    fn add(
        planner: &Planner<CountingStore>,
        board: &mut BoardState,
        title: &str,
        points: &str,
    ) -> TaskId {
        planner
            .add_task(board, "Monday", title, points)
            .unwrap()
            .unwrap()
    }

    #[test]
    fn test_initialize_seeds_weekdays() {
        let (planner, board) = setup();

        let names: Vec<String> = planner
            .store()
            .categories()
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, WEEKDAYS);

        assert_eq!(board.lists.len(), 7);
        assert!(board.lists.iter().all(|l| l.rows.is_empty()));
        assert_eq!(board.total_score, 0);
        assert!(planner.store().get_note().unwrap().is_none());
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let (planner, _) = setup();
        planner.initialize().unwrap();
        planner.initialize().unwrap();
        assert_eq!(planner.store().categories().unwrap().len(), 7);
    }

    #[test]
    fn test_add_task_appends_to_end() {
        let (planner, mut board) = setup();

        let first = add(&planner, &mut board, "Buy milk", "5");
        let second = add(&planner, &mut board, "Call mom", "");

        let first = planner.store().task(first).unwrap().unwrap();
        let second = planner.store().task(second).unwrap().unwrap();
        assert_eq!(first.priority, 0);
        assert_eq!(first.points, 5);
        assert_eq!(second.priority, 1);
        assert_eq!(second.points, 0);

        let titles: Vec<&str> = board
            .rows("Monday")
            .iter()
            .map(|r| r.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Buy milk", "Call mom"]);
    }

    #[test]
    fn test_add_task_priority_counts_after_delete() {
        let (planner, mut board) = setup();
        let a = add(&planner, &mut board, "a", "1");
        add(&planner, &mut board, "b", "1");
        planner.delete_task(&mut board, a).unwrap();

        // One task left, so the next one gets priority 1 and ties with "b"
        let c = add(&planner, &mut board, "c", "1");
        assert_eq!(planner.store().task(c).unwrap().unwrap().priority, 1);

        let titles: Vec<&str> = board
            .rows("Monday")
            .iter()
            .map(|r| r.title.as_str())
            .collect();
        assert_eq!(titles, vec!["b", "c"]);
    }

    #[test]
    fn test_add_task_rejects_blank_title() {
        let (planner, mut board) = setup();
        let before = writes(&planner);

        assert!(planner.add_task(&mut board, "Monday", "   ", "5").unwrap().is_none());
        assert!(planner.add_task(&mut board, "Monday", "", "5").unwrap().is_none());

        assert_eq!(writes(&planner), before);
        assert!(board.rows("Monday").is_empty());
    }

    #[test]
    fn test_add_task_trims_title_and_resolves_lowercase_category() {
        let (planner, mut board) = setup();
        let id = planner
            .add_task(&mut board, "friday", "  Gym  ", "x")
            .unwrap()
            .unwrap();

        let task = planner.store().task(id).unwrap().unwrap();
        assert_eq!(task.title, "Gym");
        assert_eq!(task.points, 0);
        assert_eq!(board.rows("Friday").len(), 1);
    }

    #[test]
    fn test_add_task_unknown_category_is_fatal() {
        let (planner, mut board) = setup();
        let err = planner
            .add_task(&mut board, "Funday", "Nap", "1")
            .unwrap_err();
        assert!(matches!(
            err,
            SoloLevelError::CategoryLookup { ref name, found: 0 } if name == "Funday"
        ));
    }

    #[test]
    fn test_delete_task_refreshes_list_and_score() {
        let (planner, mut board) = setup();
        let a = add(&planner, &mut board, "a", "4");
        let b = add(&planner, &mut board, "b", "6");
        planner.toggle_completion(&mut board, a, true).unwrap();
        planner.toggle_completion(&mut board, b, true).unwrap();
        assert_eq!(board.total_score, 10);

        assert!(planner.delete_task(&mut board, a).unwrap());

        assert_eq!(board.total_score, 6);
        assert_eq!(board.rows("Monday").len(), 1);
        assert_eq!(board.rows("Monday")[0].id, b);
        // Gaps are kept
        assert_eq!(planner.store().task(b).unwrap().unwrap().priority, 1);
    }

    #[test]
    fn test_delete_missing_task_is_noop() {
        let (planner, mut board) = setup();
        let before = writes(&planner);
        assert!(!planner.delete_task(&mut board, TaskId::new(404)).unwrap());
        assert_eq!(writes(&planner), before);
    }

    #[test]
    fn test_toggle_completion_updates_score() {
        let (planner, mut board) = setup();
        let a = add(&planner, &mut board, "a", "5");
        let b = add(&planner, &mut board, "b", "-2");

        assert!(planner.toggle_completion(&mut board, a, true).unwrap());
        assert_eq!(board.total_score, 5);

        assert!(planner.toggle_completion(&mut board, b, true).unwrap());
        assert_eq!(board.total_score, 3);

        assert!(planner.toggle_completion(&mut board, a, false).unwrap());
        assert_eq!(board.total_score, -2);
    }

    #[test]
    fn test_toggle_to_same_state_does_not_write() {
        let (planner, mut board) = setup();
        let task = add(&planner, &mut board, "Buy milk", "5");

        assert!(planner.toggle_completion(&mut board, task, true).unwrap());
        assert_eq!(board.total_score, 5);
        let before = writes(&planner);

        assert!(!planner.toggle_completion(&mut board, task, true).unwrap());
        assert_eq!(board.total_score, 5);
        assert_eq!(writes(&planner), before);

        assert!(!planner.toggle_completion(&mut board, TaskId::new(404), true).unwrap());
        assert_eq!(writes(&planner), before);
    }

    #[test]
    fn test_scoreboard_matches_completed_points() {
        let (planner, mut board) = setup();
        let ids: Vec<TaskId> = (1..=5)
            .map(|p| add(&planner, &mut board, &format!("t{p}"), &p.to_string()))
            .collect();

        for id in ids.iter().step_by(2) {
            planner.toggle_completion(&mut board, *id, true).unwrap();
        }
        // 1 + 3 + 5
        assert_eq!(board.total_score, 9);
        assert_eq!(board.total_score, planner.store().completed_points().unwrap());
    }

    #[test]
    fn test_huge_points_keep_scoreboard_working() {
        let (planner, mut board) = setup();
        let big = add(&planner, &mut board, "big", &i64::MAX.to_string());
        let one = add(&planner, &mut board, "one", "1");

        assert!(planner.toggle_completion(&mut board, big, true).unwrap());
        assert!(planner.toggle_completion(&mut board, one, true).unwrap());
        assert_eq!(board.total_score, i64::MAX);

        // A fresh load still works
        let mut fresh = BoardState::new();
        planner.refresh_all(&mut fresh).unwrap();
        assert_eq!(fresh.total_score, i64::MAX);
    }

    #[test]
    fn test_reorder_category() {
        let (planner, mut board) = setup();
        let id1 = add(&planner, &mut board, "one", "1");
        let id2 = add(&planner, &mut board, "two", "1");
        let id3 = add(&planner, &mut board, "three", "1");
        let before = writes(&planner);

        assert!(planner.reorder_category(&mut board, "Monday", &[id3, id1, id2]).unwrap());

        assert_eq!(stored_order(&planner, "Monday"), vec![id3, id1, id2]);
        // All priorities go into a single commit
        assert_eq!(writes(&planner), before + 1);

        planner.refresh_category(&mut board, "Monday").unwrap();
        let shown: Vec<TaskId> = board.rows("Monday").iter().map(|r| r.id).collect();
        assert_eq!(shown, vec![id3, id1, id2]);
    }

    #[test]
    fn test_reorder_writes_only_changed_priorities() {
        let (planner, mut board) = setup();
        let id1 = add(&planner, &mut board, "one", "1");
        let id2 = add(&planner, &mut board, "two", "1");
        let before = writes(&planner);

        // Unchanged order is a no-op
        assert!(!planner.reorder_category(&mut board, "Monday", &[id1, id2]).unwrap());
        assert_eq!(writes(&planner), before);
    }

    #[test]
    fn test_reorder_fills_gaps_left_by_delete() {
        let (planner, mut board) = setup();
        let id1 = add(&planner, &mut board, "one", "1");
        let id2 = add(&planner, &mut board, "two", "1");
        let id3 = add(&planner, &mut board, "three", "1");
        planner.delete_task(&mut board, id1).unwrap();

        assert!(planner.reorder_category(&mut board, "Monday", &[id2, id3]).unwrap());

        assert_eq!(planner.store().task(id2).unwrap().unwrap().priority, 0);
        assert_eq!(planner.store().task(id3).unwrap().unwrap().priority, 1);
    }

    #[test]
    fn test_reorder_ignores_foreign_tasks() {
        let (planner, mut board) = setup();
        let monday = add(&planner, &mut board, "mon", "1");
        let tuesday = planner
            .add_task(&mut board, "Tuesday", "tue", "1")
            .unwrap()
            .unwrap();

        planner
            .reorder_category(&mut board, "Monday", &[tuesday, monday])
            .unwrap();

        assert_eq!(planner.store().task(tuesday).unwrap().unwrap().priority, 0);
        assert_eq!(planner.store().task(monday).unwrap().unwrap().priority, 1);
    }

    #[test]
    fn test_note_round_trip() {
        let (planner, mut board) = setup();
        board.note = "remember the milk".to_string();
        assert!(planner.save_note(&board).unwrap());

        let mut fresh = BoardState::new();
        planner.load_note(&mut fresh).unwrap();
        assert_eq!(fresh.note, "remember the milk");
    }

    #[test]
    fn test_save_note_skips_unchanged_and_empty() {
        let (planner, mut board) = setup();
        let before = writes(&planner);

        // Nothing stored and nothing typed
        assert!(!planner.save_note(&board).unwrap());
        assert!(planner.store().get_note().unwrap().is_none());

        board.note = "draft".to_string();
        assert!(planner.save_note(&board).unwrap());
        assert!(!planner.save_note(&board).unwrap());

        assert_eq!(writes(&planner), before + 3);
        assert_eq!(planner.store().get_note().unwrap().unwrap().content, "draft");
    }

    #[test]
    fn test_load_note_without_note_keeps_view() {
        let (planner, mut board) = setup();
        board.note = "typed before load".to_string();
        planner.load_note(&mut board).unwrap();
        assert_eq!(board.note, "typed before load");
    }

    #[test]
    fn test_state_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sololevel.db");

        let task = {
            let planner = Planner::new(Database::open_at(&path).unwrap());
            planner.initialize().unwrap();
            let mut board = BoardState::new();
            let task = planner
                .add_task(&mut board, "Sunday", "Rest", "3")
                .unwrap()
                .unwrap();
            planner.toggle_completion(&mut board, task, true).unwrap();
            board.note = "see you next week".to_string();
            planner.save_note(&board).unwrap();
            task
        };

        let planner = Planner::new(Database::open_at(&path).unwrap());
        planner.initialize().unwrap();
        let mut board = BoardState::new();
        planner.refresh_all(&mut board).unwrap();
        planner.load_note(&mut board).unwrap();

        assert_eq!(planner.store().categories().unwrap().len(), 7);
        assert_eq!(board.rows("Sunday").len(), 1);
        assert_eq!(board.rows("Sunday")[0].id, task);
        assert!(board.rows("Sunday")[0].completed);
        assert_eq!(board.total_score, 3);
        assert_eq!(board.note, "see you next week");
    }
}
