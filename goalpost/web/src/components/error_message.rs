use dioxus::prelude::*;

fn banner_text(message: &str) -> String {
    format!("Something went wrong: {message}")
}

/// Banner shown when a change to the lists failed
#[component]
pub fn ErrorMessage(message: String, on_dismiss: EventHandler<()>) -> Element {
    let text = banner_text(&message);

    rsx! {
        div { class: "error-banner", role: "alert",
            p { "{text}" }
            button {
                r#type: "button",
                class: "error-dismiss",
                onclick: move |_| on_dismiss.call(()),
                "✕"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use goalpost_core::{BoardError, StorageError, TaskError};

    #[test]
    fn missing_task_is_not_reported_as_a_save_failure() {
        let err = BoardError::from(TaskError::NotFound(4));

        assert_eq!(
            banner_text(&err.to_string()),
            "Something went wrong: No task with id 4"
        );
    }

    #[test]
    fn storage_failure_carries_backend_message() {
        let err = BoardError::from(StorageError::Backend("quota exceeded".to_string()));

        assert_eq!(
            banner_text(&err.to_string()),
            "Something went wrong: Storage backend failed: quota exceeded"
        );
    }
}
