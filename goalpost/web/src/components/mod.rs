mod error_message;
mod goal_delete_modal;
mod goal_float_bar;
mod goal_panel;
mod task_form;
mod task_list;

pub use error_message::ErrorMessage;
pub use goal_delete_modal::GoalDeleteModal;
pub use goal_float_bar::GoalFloatBar;
pub use goal_panel::GoalPanel;
pub use task_form::TaskForm;
pub use task_list::TaskList;
