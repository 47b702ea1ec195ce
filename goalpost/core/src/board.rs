use crate::deadline::Deadline;
use crate::goal::{Goal, GoalError, GoalList};
use crate::id::ItemId;
use crate::label::Locale;
use crate::storage::{GOALS, KeyValueStore, Slot, StorageError, TASKS};
use crate::task::{Task, TaskError, TaskList};
use crate::view::{GoalRow, TaskRow, render_goals, render_tasks};
use chrono::NaiveDateTime;
use thiserror::Error;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{error, info};

#[derive(Error, Debug)]
pub enum BoardError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Task(#[from] TaskError),
    #[error(transparent)]
    Goal(#[from] GoalError),
}

/// Application root owning both stores and their backing storage.
///
/// Every successful mutation writes the affected list back before
/// returning, so a front end only has to re-render afterwards. Rejected
/// input and failed lookups write nothing.
#[derive(Debug)]
pub struct Board<S> {
    store: S,
    tasks: TaskList,
    goals: GoalList,
}

impl<S: KeyValueStore> Board<S> {
    /// Loads tasks and goals from `store`.
    pub fn open(store: S) -> Result<Self, StorageError> {
        let tasks = TaskList::from_tasks(TASKS.load(&store)?);
        let goals = GoalList::from_goals(GOALS.load(&store)?);
        info!(tasks = tasks.len(), goals = goals.len(), "board loaded");
        Ok(Board {
            store,
            tasks,
            goals,
        })
    }

    /// Loads each slot on its own, starting only an unreadable slot empty.
    ///
    /// A slot that loaded keeps its contents, so its next save does not
    /// clobber the stored list.
    pub fn open_lenient(store: S) -> Self {
        let tasks = TaskList::from_tasks(load_or_empty(&TASKS, &store));
        let goals = GoalList::from_goals(load_or_empty(&GOALS, &store));
        info!(tasks = tasks.len(), goals = goals.len(), "board loaded");
        Board {
            store,
            tasks,
            goals,
        }
    }

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    pub fn goals(&self) -> &GoalList {
        &self.goals
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn add_task(
        &mut self,
        text: &str,
        deadline: Option<Deadline>,
    ) -> Result<Option<ItemId>, BoardError> {
        let Some(id) = self.tasks.add(text, deadline) else {
            return Ok(None);
        };
        self.save_tasks()?;
        info!(id, "task added");
        Ok(Some(id))
    }

    /// Flips a task's completion flag, returning the new value.
    pub fn toggle_task(&mut self, id: ItemId) -> Result<bool, BoardError> {
        let done = self.tasks.toggle(id)?;
        self.save_tasks()?;
        info!(id, done, "task toggled");
        Ok(done)
    }

    pub fn delete_task(&mut self, id: ItemId) -> Result<Task, BoardError> {
        let task = self.tasks.delete(id)?;
        self.save_tasks()?;
        info!(id, "task deleted");
        Ok(task)
    }

    /// Deletes by position in the current display order.
    pub fn delete_task_at(&mut self, index: usize) -> Result<Option<Task>, BoardError> {
        let Some(task) = self.tasks.delete_at(index) else {
            return Ok(None);
        };
        self.save_tasks()?;
        info!(id = task.id, index, "task deleted");
        Ok(Some(task))
    }

    pub fn add_goal(&mut self, text: &str) -> Result<Option<ItemId>, BoardError> {
        let Some(id) = self.goals.add(text) else {
            return Ok(None);
        };
        self.save_goals()?;
        info!(id, "goal added");
        Ok(Some(id))
    }

    /// First step of a goal delete; nothing is written until confirmation.
    pub fn request_goal_delete(&mut self, id: ItemId) -> Result<&Goal, BoardError> {
        Ok(self.goals.request_delete(id)?)
    }

    pub fn confirm_goal_delete(&mut self) -> Result<Option<Goal>, BoardError> {
        let Some(goal) = self.goals.confirm_delete() else {
            return Ok(None);
        };
        self.save_goals()?;
        info!(id = goal.id, "goal deleted");
        Ok(Some(goal))
    }

    pub fn cancel_goal_delete(&mut self) {
        self.goals.cancel_delete();
    }

    pub fn task_rows(&self, now: NaiveDateTime, locale: Locale) -> Vec<TaskRow> {
        render_tasks(&self.tasks, now, locale)
    }

    pub fn goal_rows(&self) -> Vec<GoalRow> {
        render_goals(&self.goals)
    }

    fn save_tasks(&mut self) -> Result<(), StorageError> {
        TASKS.save(&mut self.store, self.tasks.as_slice())
    }

    fn save_goals(&mut self) -> Result<(), StorageError> {
        GOALS.save(&mut self.store, self.goals.as_slice())
    }
}

fn load_or_empty<T, S>(slot: &Slot<T>, store: &S) -> Vec<T>
where
    T: Serialize + DeserializeOwned,
    S: KeyValueStore,
{
    slot.load(store).unwrap_or_else(|err| {
        error!(%err, key = slot.key(), "stored list could not be loaded, starting it empty");
        Vec::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{GOALS_KEY, MemoryStore, MockKeyValueStore, TASKS_KEY};

    fn board() -> Board<MemoryStore> {
        Board::open(MemoryStore::new()).unwrap()
    }

    #[test]
    fn opening_empty_store_gives_empty_board() {
        let board = board();

        assert!(board.tasks().is_empty());
        assert!(board.goals().is_empty());
    }

    #[test]
    fn added_task_is_persisted() {
        let mut board = board();

        let id = board.add_task("Call mom", None).unwrap().unwrap();

        let stored = TASKS.load(board.store()).unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, id);
    }

    #[test]
    fn blank_task_is_neither_added_nor_written() {
        let mut board = board();

        assert_eq!(board.add_task("  ", None).unwrap(), None);

        assert!(board.tasks().is_empty());
        assert_eq!(board.store().get(TASKS_KEY), None);
    }

    #[test]
    fn state_survives_reopen() {
        let mut board = board();
        let id = board
            .add_task("Dentist", Some("2025-11-02T15:30".parse().unwrap()))
            .unwrap()
            .unwrap();
        board.add_task("Groceries", None).unwrap();
        board.toggle_task(id).unwrap();
        board.add_goal("Learn piano").unwrap();

        let store = board.store().clone();
        let reopened = Board::open(store).unwrap();

        assert_eq!(reopened.tasks(), board.tasks());
        assert_eq!(reopened.goals().as_slice(), board.goals().as_slice());
    }

    #[test]
    fn toggle_and_delete_are_persisted() {
        let mut board = board();
        let keep = board.add_task("keep", None).unwrap().unwrap();
        let discard = board.add_task("drop", None).unwrap().unwrap();

        assert!(board.toggle_task(keep).unwrap());
        let removed = board.delete_task(discard).unwrap();

        assert_eq!(removed.text, "drop");
        let stored = TASKS.load(board.store()).unwrap();
        assert_eq!(stored.len(), 1);
        assert!(stored[0].done);
    }

    #[test]
    fn missing_task_is_reported() {
        let mut board = board();

        let err = board.toggle_task(99).unwrap_err();

        assert!(matches!(err, BoardError::Task(TaskError::NotFound(99))));
    }

    #[test]
    fn delete_at_uses_rendered_position() {
        let mut board = board();
        board.add_task("undated", None).unwrap();
        board
            .add_task("dated", Some("2025-01-01T00:00".parse().unwrap()))
            .unwrap();

        let removed = board.delete_task_at(0).unwrap().unwrap();

        assert_eq!(removed.text, "dated");
        assert_eq!(TASKS.load(board.store()).unwrap().len(), 1);
        assert_eq!(board.delete_task_at(5).unwrap(), None);
    }

    #[test]
    fn goal_delete_requires_confirmation() {
        let mut board = board();
        let id = board.add_goal("Run 10k").unwrap().unwrap();

        board.request_goal_delete(id).unwrap();
        assert_eq!(GOALS.load(board.store()).unwrap().len(), 1);

        let removed = board.confirm_goal_delete().unwrap().unwrap();

        assert_eq!(removed.id, id);
        assert_eq!(board.store().get(GOALS_KEY), Some("[]"));
    }

    #[test]
    fn cancelled_goal_delete_keeps_goal() {
        let mut board = board();
        let id = board.add_goal("Run 10k").unwrap().unwrap();

        board.request_goal_delete(id).unwrap();
        board.cancel_goal_delete();

        assert_eq!(board.confirm_goal_delete().unwrap(), None);
        assert_eq!(board.goals().len(), 1);
        assert!(board.goal_rows().iter().all(|row| !row.pending_delete));
    }

    #[test]
    fn write_failure_surfaces_and_keeps_memory_ahead() {
        let mut store = MockKeyValueStore::new();
        store.expect_read().returning(|_| Ok(None));
        store
            .expect_write()
            .returning(|_, _| Err(StorageError::Backend("quota exceeded".to_string())));
        let mut board = Board::open(store).unwrap();

        let err = board.add_task("unsaved", None).unwrap_err();

        assert!(matches!(err, BoardError::Storage(StorageError::Backend(_))));
        assert_eq!(board.tasks().len(), 1);
    }

    #[test]
    fn corrupt_slot_fails_open() {
        let mut store = MemoryStore::new();
        store.write(GOALS_KEY, "not json").unwrap();

        let result = Board::open(store);

        assert!(matches!(result, Err(StorageError::Corrupt { .. })));
    }

    #[test]
    fn lenient_open_keeps_tasks_when_goals_are_corrupt() {
        let mut store = MemoryStore::new();
        store
            .write(
                TASKS_KEY,
                r#"[{"text":"keep me","deadline":null,"done":false,"id":1}]"#,
            )
            .unwrap();
        store.write(GOALS_KEY, "garbage").unwrap();

        let mut board = Board::open_lenient(store);
        board.add_task("new", None).unwrap();

        let stored: Vec<String> = TASKS
            .load(board.store())
            .unwrap()
            .into_iter()
            .map(|task| task.text)
            .collect();
        assert_eq!(stored, vec!["keep me", "new"]);
        assert!(board.goals().is_empty());
        assert_eq!(board.store().get(GOALS_KEY), Some("garbage"));
    }

    #[test]
    fn lenient_open_keeps_goals_when_tasks_are_corrupt() {
        let mut store = MemoryStore::new();
        store.write(TASKS_KEY, "{oops").unwrap();
        store
            .write(GOALS_KEY, r#"[{"text":"Run 10k","done":false,"id":3}]"#)
            .unwrap();

        let board = Board::open_lenient(store);

        assert!(board.tasks().is_empty());
        assert_eq!(board.goals().len(), 1);
    }

    #[test]
    fn task_rows_render_board_tasks() {
        let mut board = board();
        board.add_task("only", None).unwrap();
        let now = chrono::NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();

        let rows = board.task_rows(now, Locale::En);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].text, "only");
    }
}
