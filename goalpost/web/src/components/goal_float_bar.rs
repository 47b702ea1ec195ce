use crate::components::GoalPanel;
use dioxus::prelude::*;
use goalpost_core::{GoalRow, ItemId};

/// Collapsible goal drawer pinned to the bottom of narrow screens
#[component]
pub fn GoalFloatBar(
    rows: Vec<GoalRow>,
    on_add: EventHandler<String>,
    on_delete: EventHandler<ItemId>,
) -> Element {
    let mut expanded = use_signal(|| false);
    let count = rows.len();
    let class = if expanded() {
        "goal-float-bar expanded"
    } else {
        "goal-float-bar minimized"
    };

    rsx! {
        div { class,
            div { class: "goal-float-bar-header",
                span { "Annual goals ({count})" }
                if expanded() {
                    button {
                        r#type: "button",
                        title: "Collapse",
                        onclick: move |_| expanded.set(false),
                        "▼"
                    }
                } else {
                    button {
                        r#type: "button",
                        title: "Expand",
                        onclick: move |_| expanded.set(true),
                        "▲"
                    }
                }
            }
            if expanded() {
                div { class: "goal-float-bar-body",
                    GoalPanel { rows: rows.clone(), on_add, on_delete }
                }
            }
        }
    }
}
