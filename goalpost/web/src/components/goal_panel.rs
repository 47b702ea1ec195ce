use dioxus::prelude::*;
use goalpost_core::{GoalRow, ItemId};

/// Goal entry form plus the goal list.
///
/// Used both in the sidebar and inside the floating bar, each with its own
/// draft text.
#[component]
pub fn GoalPanel(
    rows: Vec<GoalRow>,
    on_add: EventHandler<String>,
    on_delete: EventHandler<ItemId>,
) -> Element {
    let mut draft = use_signal(String::new);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let text = draft();
        if text.trim().is_empty() {
            return;
        }
        on_add.call(text);
        draft.set(String::new());
    };

    rsx! {
        div { class: "goal-panel",
            form { class: "goal-form", onsubmit: handle_submit,
                input {
                    r#type: "text",
                    placeholder: "Add an annual goal",
                    value: "{draft}",
                    oninput: move |evt: FormEvent| draft.set(evt.value()),
                }
                button { r#type: "submit", "Add" }
            }
            ul { class: "goal-list",
                for row in rows.iter() {
                    GoalItem { key: "{row.id}", row: row.clone(), on_delete }
                }
            }
        }
    }
}

#[component]
fn GoalItem(row: GoalRow, on_delete: EventHandler<ItemId>) -> Element {
    let id = row.id;
    let class = if row.pending_delete {
        "goal-item pending"
    } else {
        "goal-item"
    };

    rsx! {
        li { class,
            span { class: "goal-text", "{row.text}" }
            button {
                r#type: "button",
                class: "goal-delete",
                title: "Delete",
                onclick: move |_| on_delete.call(id),
                "✕"
            }
        }
    }
}
