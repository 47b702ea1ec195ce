use dioxus::prelude::*;

/// Task entry form with an optional deadline and a dictation toggle.
///
/// The text field is controlled by the caller since dictation also writes
/// into it.
#[component]
pub fn TaskForm(
    text: String,
    deadline: String,
    placeholder: String,
    recording: bool,
    voice_label: &'static str,
    on_text: EventHandler<String>,
    on_deadline: EventHandler<String>,
    on_submit: EventHandler<()>,
    on_voice: EventHandler<()>,
) -> Element {
    let voice_class = if recording {
        "voice-btn recording"
    } else {
        "voice-btn"
    };

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        on_submit.call(());
    };

    rsx! {
        form { class: "todo-form", onsubmit: handle_submit,
            input {
                r#type: "text",
                class: "todo-input",
                placeholder: "{placeholder}",
                value: "{text}",
                oninput: move |evt: FormEvent| on_text.call(evt.value()),
            }
            input {
                r#type: "datetime-local",
                class: "deadline-input",
                value: "{deadline}",
                oninput: move |evt: FormEvent| on_deadline.call(evt.value()),
            }
            button {
                r#type: "button",
                class: voice_class,
                title: "Voice input",
                onclick: move |_| on_voice.call(()),
                "{voice_label}"
            }
            button { r#type: "submit", class: "add-btn", "Add" }
        }
    }
}
