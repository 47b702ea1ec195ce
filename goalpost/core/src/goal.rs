use crate::id::{ItemId, next_id, reassign_duplicates};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// A long-running goal for the year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub text: String,
    /// Stored for compatibility; nothing toggles it.
    #[serde(default)]
    pub done: bool,
    pub id: ItemId,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GoalError {
    #[error("No goal with id {0}")]
    NotFound(ItemId),
}

/// Goals in insertion order, with a two-step delete.
///
/// A delete is first requested, which only remembers the target, and then
/// either confirmed or cancelled. The target is held by id so a re-render
/// between request and confirmation cannot redirect the delete.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoalList {
    goals: Vec<Goal>,
    pending_delete: Option<ItemId>,
}

impl GoalList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps stored goals, renumbering any id already used by an earlier goal.
    pub fn from_goals(mut goals: Vec<Goal>) -> Self {
        let renumbered = reassign_duplicates(goals.iter_mut().map(|goal| &mut goal.id));
        if renumbered > 0 {
            warn!(renumbered, "stored goals had duplicate ids");
        }
        GoalList {
            goals,
            pending_delete: None,
        }
    }

    /// Appends a goal; blank text is ignored and yields `None`.
    pub fn add(&mut self, text: &str) -> Option<ItemId> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let id = next_id(self.goals.iter().map(|goal| goal.id));
        self.goals.push(Goal {
            text: text.to_string(),
            done: false,
            id,
        });
        Some(id)
    }

    /// Marks a goal as the pending delete target, replacing any earlier one.
    pub fn request_delete(&mut self, id: ItemId) -> Result<&Goal, GoalError> {
        let goal = self
            .goals
            .iter()
            .find(|goal| goal.id == id)
            .ok_or(GoalError::NotFound(id))?;
        self.pending_delete = Some(id);
        Ok(goal)
    }

    /// Removes the pending goal and clears the request.
    ///
    /// Returns `None` if nothing was pending or the goal is already gone.
    pub fn confirm_delete(&mut self) -> Option<Goal> {
        let id = self.pending_delete.take()?;
        let index = self.goals.iter().position(|goal| goal.id == id)?;
        Some(self.goals.remove(index))
    }

    /// Drops the pending request without touching the goals.
    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// The goal awaiting confirmation, if any.
    pub fn pending_delete(&self) -> Option<&Goal> {
        let id = self.pending_delete?;
        self.goals.iter().find(|goal| goal.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Goal> {
        self.goals.iter()
    }

    pub fn as_slice(&self) -> &[Goal] {
        &self.goals
    }

    pub fn len(&self) -> usize {
        self.goals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }
}
