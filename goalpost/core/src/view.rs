//! Row view-models rebuilt from the stores after every change.

use crate::goal::GoalList;
use crate::id::ItemId;
use crate::label::{Locale, deadline_label};
use crate::task::{Task, TaskList};
use crate::urgency::Urgency;
use chrono::NaiveDateTime;

/// Visual emphasis of a task row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowStyle {
    Plain,
    Warning,
    Urgent,
    Done,
}

impl RowStyle {
    fn for_task(task: &Task, urgency: Urgency) -> Self {
        if task.done {
            return RowStyle::Done;
        }
        match urgency {
            Urgency::Urgent => RowStyle::Urgent,
            Urgency::Soon => RowStyle::Warning,
            Urgency::Normal | Urgency::None => RowStyle::Plain,
        }
    }

    /// CSS class for the row; empty for plain rows.
    pub fn class(self) -> &'static str {
        match self {
            RowStyle::Plain => "",
            RowStyle::Warning => "warning",
            RowStyle::Urgent => "urgent",
            RowStyle::Done => "done",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow {
    pub id: ItemId,
    pub text: String,
    pub done: bool,
    pub urgency: Urgency,
    pub style: RowStyle,
    pub deadline_label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalRow {
    pub id: ItemId,
    pub text: String,
    pub pending_delete: bool,
}

/// Re-sorts the tasks and builds one row per task in display order.
pub fn render_tasks(tasks: &TaskList, now: NaiveDateTime, locale: Locale) -> Vec<TaskRow> {
    tasks
        .sorted()
        .into_iter()
        .map(|task| {
            let urgency = Urgency::classify(task.deadline, now);
            TaskRow {
                id: task.id,
                text: task.text.clone(),
                done: task.done,
                urgency,
                style: RowStyle::for_task(task, urgency),
                deadline_label: task
                    .deadline
                    .map(|deadline| deadline_label(deadline, now, locale)),
            }
        })
        .collect()
}

pub fn render_goals(goals: &GoalList) -> Vec<GoalRow> {
    let pending = goals.pending_delete().map(|goal| goal.id);
    goals
        .iter()
        .map(|goal| GoalRow {
            id: goal.id,
            text: goal.text.clone(),
            pending_delete: pending == Some(goal.id),
        })
        .collect()
}
