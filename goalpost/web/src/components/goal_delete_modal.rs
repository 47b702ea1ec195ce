use dioxus::prelude::*;

/// Confirmation dialog for the goal awaiting deletion
#[component]
pub fn GoalDeleteModal(
    goal: Option<String>,
    on_confirm: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    let Some(text) = goal else {
        return rsx! { div {} };
    };

    rsx! {
        div {
            class: "modal-backdrop",
            onclick: move |_| on_cancel.call(()),

            div {
                class: "modal",
                onclick: move |evt| evt.stop_propagation(),

                h2 { "Delete this goal?" }
                p { class: "modal-goal", "{text}" }

                div { class: "modal-actions",
                    button {
                        r#type: "button",
                        class: "cancel-btn",
                        onclick: move |_| on_cancel.call(()),
                        "Cancel"
                    }
                    button {
                        r#type: "button",
                        class: "confirm-btn",
                        onclick: move |_| on_confirm.call(()),
                        "Delete"
                    }
                }
            }
        }
    }
}
