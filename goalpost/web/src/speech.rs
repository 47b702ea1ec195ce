//! Web Speech API recognizer.
//!
//! The constructor is looked up at runtime (`SpeechRecognition` or the
//! prefixed `webkitSpeechRecognition`) so browsers without it simply report
//! [`DictationError::Unsupported`]. Callbacks are forwarded as
//! [`DictationEvent`] messages over a channel.

use futures::channel::mpsc::UnboundedSender;
use goalpost_core::{DictationError, DictationEvent, RecognitionSettings, Recognizer};
use js_sys::{Array, Function, Reflect};
use tracing::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

const CONSTRUCTORS: [&str; 2] = ["SpeechRecognition", "webkitSpeechRecognition"];
const HANDLERS: [&str; 4] = ["onstart", "onresult", "onend", "onerror"];

type Handler = Closure<dyn FnMut(JsValue)>;

pub struct SpeechRecognizer {
    inner: JsValue,
    _handlers: Vec<Handler>,
}

fn js_error(err: JsValue) -> DictationError {
    DictationError::Recognition(format!("{err:?}"))
}

fn get(target: &JsValue, key: &str) -> JsValue {
    Reflect::get(target, &JsValue::from_str(key)).unwrap_or(JsValue::UNDEFINED)
}

fn set(target: &JsValue, key: &str, value: &JsValue) -> Result<(), DictationError> {
    Reflect::set(target, &JsValue::from_str(key), value)
        .map(|_| ())
        .map_err(js_error)
}

fn handler(
    target: &JsValue,
    name: &str,
    events: UnboundedSender<DictationEvent>,
    translate: fn(JsValue) -> Vec<DictationEvent>,
) -> Result<Handler, DictationError> {
    let closure = Closure::<dyn FnMut(JsValue)>::new(move |event: JsValue| {
        for message in translate(event) {
            if events.unbounded_send(message).is_err() {
                warn!("dictation listener is gone");
            }
        }
    });
    set(target, name, closure.as_ref())?;
    Ok(closure)
}

/// Splits a `SpeechRecognitionEvent` into final transcripts and one
/// combined interim preview.
fn result_events(event: JsValue) -> Vec<DictationEvent> {
    let first = get(&event, "resultIndex").as_f64().unwrap_or(0.0) as u32;
    let results = get(&event, "results");
    let count = get(&results, "length").as_f64().unwrap_or(0.0) as u32;

    let mut messages = Vec::new();
    let mut interim = String::new();
    for index in first..count {
        let result = Reflect::get_u32(&results, index).unwrap_or(JsValue::UNDEFINED);
        let transcript = Reflect::get_u32(&result, 0)
            .ok()
            .and_then(|alternative| get(&alternative, "transcript").as_string())
            .unwrap_or_default();
        if get(&result, "isFinal").is_truthy() {
            messages.push(DictationEvent::Final(transcript));
        } else {
            interim.push_str(&transcript);
        }
    }
    if !interim.is_empty() {
        messages.push(DictationEvent::Partial(interim));
    }
    messages
}

fn error_events(event: JsValue) -> Vec<DictationEvent> {
    let reason = get(&event, "error")
        .as_string()
        .unwrap_or_else(|| "unknown".to_string());
    vec![DictationEvent::Failed(reason)]
}

impl SpeechRecognizer {
    pub fn new(
        settings: &RecognitionSettings,
        events: UnboundedSender<DictationEvent>,
    ) -> Result<Self, DictationError> {
        let window = web_sys::window().ok_or(DictationError::Unsupported)?;
        let constructor = CONSTRUCTORS
            .iter()
            .map(|name| get(&window, name))
            .find_map(|value| value.dyn_into::<Function>().ok())
            .ok_or(DictationError::Unsupported)?;
        let inner = Reflect::construct(&constructor, &Array::new()).map_err(js_error)?;

        set(&inner, "lang", &JsValue::from_str(settings.language))?;
        set(
            &inner,
            "interimResults",
            &JsValue::from_bool(settings.interim_results),
        )?;
        set(&inner, "continuous", &JsValue::from_bool(settings.continuous))?;

        let handlers = vec![
            handler(&inner, "onstart", events.clone(), |_| {
                vec![DictationEvent::Started]
            })?,
            handler(&inner, "onresult", events.clone(), result_events)?,
            handler(&inner, "onend", events.clone(), |_| vec![DictationEvent::Ended])?,
            handler(&inner, "onerror", events, error_events)?,
        ];

        Ok(SpeechRecognizer {
            inner,
            _handlers: handlers,
        })
    }

    fn call(&self, method: &str) -> Result<(), DictationError> {
        let function: Function = get(&self.inner, method).dyn_into().map_err(js_error)?;
        function.call0(&self.inner).map(|_| ()).map_err(js_error)
    }
}

impl Recognizer for SpeechRecognizer {
    fn start(&mut self) -> Result<(), DictationError> {
        self.call("start")
    }

    fn stop(&mut self) {
        if let Err(err) = self.call("stop") {
            warn!(%err, "could not stop speech recognition");
        }
    }
}

impl Drop for SpeechRecognizer {
    fn drop(&mut self) {
        for name in HANDLERS {
            let _ = set(&self.inner, name, &JsValue::NULL);
        }
    }
}
