use dioxus::prelude::*;
use goalpost_core::{ItemId, TaskRow};

#[component]
pub fn TaskList(
    rows: Vec<TaskRow>,
    on_toggle: EventHandler<ItemId>,
    on_delete: EventHandler<ItemId>,
) -> Element {
    if rows.is_empty() {
        return rsx! {
            p { class: "empty", "Nothing to do yet." }
        };
    }

    rsx! {
        ul { class: "todo-list",
            for row in rows.iter() {
                TaskItem {
                    key: "{row.id}",
                    row: row.clone(),
                    on_toggle,
                    on_delete,
                }
            }
        }
    }
}

#[component]
fn TaskItem(
    row: TaskRow,
    on_toggle: EventHandler<ItemId>,
    on_delete: EventHandler<ItemId>,
) -> Element {
    let TaskRow {
        id,
        text,
        done,
        style,
        deadline_label,
        ..
    } = row;
    let class = format!("todo-item {}", style.class());

    rsx! {
        li { class: "{class}",
            input {
                r#type: "checkbox",
                checked: done,
                onchange: move |_| on_toggle.call(id),
            }
            div { class: "todo-content",
                span { class: "todo-text", "{text}" }
                if let Some(label) = deadline_label {
                    span { class: "todo-deadline", "📅 {label}" }
                }
            }
            button {
                r#type: "button",
                class: "delete-btn",
                onclick: move |_| on_delete.call(id),
                "Delete"
            }
        }
    }
}
