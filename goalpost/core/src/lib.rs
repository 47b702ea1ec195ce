//! Core domain models for Goalpost: tasks with deadlines, annual goals,
//! their persistence contract and the dictation state machine.
pub mod board;
pub mod deadline;
pub mod dictation;
pub mod goal;
mod id;
pub mod label;
pub mod storage;
pub mod task;
pub mod urgency;
pub mod view;

pub use board::{Board, BoardError};
pub use deadline::{Deadline, DeadlineParseError};
pub use dictation::{
    Dictation, DictationError, DictationEvent, DictationOutput, DictationRequest, DictationState,
    RecognitionSettings, Recognizer,
};
pub use goal::{Goal, GoalError, GoalList};
pub use id::ItemId;
pub use label::{Locale, RelativeDay, UnknownLocale, deadline_label};
pub use storage::{KeyValueStore, MemoryStore, Slot, StorageError};
pub use task::{Task, TaskError, TaskList};
pub use urgency::Urgency;
pub use view::{GoalRow, RowStyle, TaskRow, render_goals, render_tasks};
