use chrono::Local;
use dioxus::prelude::*;
use futures::channel::mpsc::UnboundedReceiver;
use futures::StreamExt;
use goalpost_core::{
    BoardError, Deadline, Dictation, DictationError, DictationEvent, DictationOutput, ItemId,
    Locale, RecognitionSettings, Recognizer,
};
use tracing::{error, warn, Level};

mod components;
mod speech;
mod storage;

use components::{ErrorMessage, GoalDeleteModal, GoalFloatBar, GoalPanel, TaskForm, TaskList};
use speech::SpeechRecognizer;
use storage::open_board;

const MAIN_CSS: Asset = asset!("/assets/main.css");

const LOCALE: Locale = Locale::En;
const TASK_PLACEHOLDER: &str = "Add a new task";
const UNSUPPORTED_MESSAGE: &str = "Your browser does not support voice input.";

fn main() {
    if let Err(err) = dioxus::logger::init(Level::INFO) {
        eprintln!("logger already initialised: {err}");
    }
    dioxus::launch(App);
}

/// Empty input means no deadline; anything unreadable is dropped with a warning.
fn parse_deadline(raw: &str) -> Option<Deadline> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse()
        .inspect_err(|err| warn!(%err, "ignoring deadline"))
        .ok()
}

/// Logs a failed board update and surfaces it in the error banner.
fn report<T>(mut banner: Signal<Option<String>>, result: Result<T, BoardError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            error!(%err, "could not update lists");
            banner.set(Some(err.to_string()));
            None
        }
    }
}

fn alert(message: &str) {
    let shown = web_sys::window().map(|window| window.alert_with_message(message));
    if !matches!(shown, Some(Ok(()))) {
        warn!(message, "could not show alert");
    }
}

#[component]
fn App() -> Element {
    let mut board = use_signal(open_board);
    let mut banner = use_signal(|| None::<String>);
    let mut dictation = use_signal(Dictation::new);
    let mut task_text = use_signal(String::new);
    let mut task_deadline = use_signal(String::new);
    let mut placeholder = use_signal(|| TASK_PLACEHOLDER.to_string());

    let transcripts = use_coroutine(
        move |mut rx: UnboundedReceiver<DictationEvent>| async move {
            while let Some(event) = rx.next().await {
                let output = dictation.write().handle(event);
                match output {
                    Some(DictationOutput::Commit(text)) => task_text.set(text),
                    Some(DictationOutput::Preview(text)) => placeholder.set(text),
                    None => {}
                }
                if !dictation.read().is_recording() && placeholder() != TASK_PLACEHOLDER {
                    placeholder.set(TASK_PLACEHOLDER.to_string());
                }
            }
        },
    );

    let mut recognizer = use_signal(move || {
        SpeechRecognizer::new(&RecognitionSettings::for_locale(LOCALE), transcripts.tx())
            .inspect_err(|err| warn!(%err, "dictation unavailable"))
            .ok()
    });

    let add_task = move |_: ()| {
        let deadline = parse_deadline(&task_deadline.read());
        let result = board.write().add_task(&task_text.read(), deadline);
        if let Some(Some(_)) = report(banner, result) {
            task_text.set(String::new());
            task_deadline.set(String::new());
            placeholder.set(TASK_PLACEHOLDER.to_string());
        }
    };

    let toggle_task = move |id: ItemId| {
        let result = board.write().toggle_task(id);
        report(banner, result);
    };

    let delete_task = move |id: ItemId| {
        let result = board.write().delete_task(id);
        report(banner, result);
    };

    let toggle_voice = move |_: ()| {
        let mut slot = recognizer.write();
        let active = Option::as_mut(&mut *slot).map(|r| r as &mut dyn Recognizer);
        match dictation.read().activate(active) {
            Ok(_) => {}
            Err(DictationError::Unsupported) => alert(UNSUPPORTED_MESSAGE),
            Err(err) => error!(%err, "could not toggle dictation"),
        }
    };

    let add_goal = move |text: String| {
        let result = board.write().add_goal(&text);
        report(banner, result);
    };

    let request_goal_delete = move |id: ItemId| {
        let result = board.write().request_goal_delete(id).map(|_| ());
        report(banner, result);
    };

    let confirm_goal_delete = move |_: ()| {
        let result = board.write().confirm_goal_delete();
        report(banner, result);
    };

    let cancel_goal_delete = move |_: ()| board.write().cancel_goal_delete();

    let now = Local::now().naive_local();
    let task_rows = board.read().task_rows(now, LOCALE);
    let goal_rows = board.read().goal_rows();
    let pending_goal = board
        .read()
        .goals()
        .pending_delete()
        .map(|goal| goal.text.clone());
    let recording = dictation.read().is_recording();
    let voice_label = dictation.read().button_label(LOCALE);

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        div { class: "app",
            main { class: "tasks",
                h1 { "Tasks" }
                if let Some(message) = banner() {
                    ErrorMessage { message, on_dismiss: move |_| banner.set(None) }
                }
                TaskForm {
                    text: task_text(),
                    deadline: task_deadline(),
                    placeholder: placeholder(),
                    recording,
                    voice_label,
                    on_text: move |value| task_text.set(value),
                    on_deadline: move |value| task_deadline.set(value),
                    on_submit: add_task,
                    on_voice: toggle_voice,
                }
                TaskList { rows: task_rows, on_toggle: toggle_task, on_delete: delete_task }
            }
            aside { class: "goals",
                h2 { "Annual goals" }
                GoalPanel {
                    rows: goal_rows.clone(),
                    on_add: add_goal,
                    on_delete: request_goal_delete,
                }
            }
            GoalFloatBar { rows: goal_rows, on_add: add_goal, on_delete: request_goal_delete }
            GoalDeleteModal {
                goal: pending_goal,
                on_confirm: confirm_goal_delete,
                on_cancel: cancel_goal_delete,
            }
        }
    }
}
