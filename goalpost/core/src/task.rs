use crate::deadline::Deadline;
use crate::id::{ItemId, next_id, reassign_duplicates};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use thiserror::Error;
use tracing::warn;

/// A to-do item with an optional deadline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub text: String,
    #[serde(default)]
    pub deadline: Option<Deadline>,
    #[serde(default)]
    pub done: bool,
    pub id: ItemId,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    #[error("No task with id {0}")]
    NotFound(ItemId),
}

/// Display order: open tasks by ascending deadline with undated ones last,
/// then finished tasks. Everything else compares equal so a stable sort keeps
/// insertion order for ties.
fn display_order(a: &Task, b: &Task) -> Ordering {
    a.done.cmp(&b.done).then_with(|| {
        if a.done {
            return Ordering::Equal;
        }
        match (a.deadline, b.deadline) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    })
}

/// Ordered collection of tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps tasks in the order they were stored.
    ///
    /// Records sharing an id with an earlier one get a fresh id so each
    /// stays addressable.
    pub fn from_tasks(mut tasks: Vec<Task>) -> Self {
        let renumbered = reassign_duplicates(tasks.iter_mut().map(|task| &mut task.id));
        if renumbered > 0 {
            warn!(renumbered, "stored tasks had duplicate ids");
        }
        TaskList { tasks }
    }

    /// Appends a new open task.
    ///
    /// Returns `None` without touching the list when `text` is blank.
    pub fn add(&mut self, text: &str, deadline: Option<Deadline>) -> Option<ItemId> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let id = next_id(self.tasks.iter().map(|task| task.id));
        self.tasks.push(Task {
            text: text.to_string(),
            deadline,
            done: false,
            id,
        });
        Some(id)
    }

    /// Flips the completion flag of a task, returning the new value.
    pub fn toggle(&mut self, id: ItemId) -> Result<bool, TaskError> {
        let task = self
            .tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or(TaskError::NotFound(id))?;
        task.done = !task.done;
        Ok(task.done)
    }

    /// Removes the task with the given id.
    pub fn delete(&mut self, id: ItemId) -> Result<Task, TaskError> {
        let index = self
            .tasks
            .iter()
            .position(|task| task.id == id)
            .ok_or(TaskError::NotFound(id))?;
        Ok(self.tasks.remove(index))
    }

    /// Removes the task at `index` of the display order.
    pub fn delete_at(&mut self, index: usize) -> Option<Task> {
        self.sort();
        (index < self.tasks.len()).then(|| self.tasks.remove(index))
    }

    /// Reorders the list in place into display order.
    pub fn sort(&mut self) {
        self.tasks.sort_by(display_order);
    }

    /// Tasks in display order, recomputed on every call.
    pub fn sorted(&self) -> Vec<&Task> {
        let mut ordered: Vec<&Task> = self.tasks.iter().collect();
        ordered.sort_by(|a, b| display_order(a, b));
        ordered
    }

    pub fn get(&self, id: ItemId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    pub fn as_slice(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
