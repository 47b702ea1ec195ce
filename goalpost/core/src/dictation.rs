//! Voice dictation as a small state machine.
//!
//! The recognizer itself lives outside this crate (the browser's speech API
//! in the web front end). It is driven through [`Recognizer`] and reports
//! back with [`DictationEvent`] messages, which [`Dictation::handle`] turns
//! into updates for the text input.

use crate::label::Locale;
use thiserror::Error;
use tracing::{debug, error};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DictationError {
    #[error("Speech recognition is not supported in this environment")]
    Unsupported,
    #[error("Speech recognition failed: {0}")]
    Recognition(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DictationState {
    #[default]
    Idle,
    Listening,
}

/// Notifications coming from the recognizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DictationEvent {
    Started,
    /// Interim transcript, shown as a hint but not committed.
    Partial(String),
    /// Final transcript for the utterance.
    Final(String),
    Ended,
    Failed(String),
}

/// What the control asks the recognizer to do when activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DictationRequest {
    Start,
    Stop,
}

/// Effect of an event on the target text input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DictationOutput {
    /// Show as placeholder text.
    Preview(String),
    /// Replace the input's value.
    Commit(String),
}

/// How a recognition session is configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognitionSettings {
    pub language: &'static str,
    pub interim_results: bool,
    pub continuous: bool,
}

impl RecognitionSettings {
    /// Single-utterance session with interim results in the locale's language.
    pub fn for_locale(locale: Locale) -> Self {
        RecognitionSettings {
            language: locale.language_tag(),
            interim_results: true,
            continuous: false,
        }
    }
}

/// A speech recognizer capable of one session at a time.
#[cfg_attr(test, mockall::automock)]
pub trait Recognizer {
    fn start(&mut self) -> Result<(), DictationError>;
    fn stop(&mut self);
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictation {
    state: DictationState,
}

impl Dictation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DictationState {
        self.state
    }

    pub fn is_recording(&self) -> bool {
        self.state == DictationState::Listening
    }

    /// Text for the microphone button.
    pub fn button_label(&self, locale: Locale) -> &'static str {
        match (self.state, locale) {
            (DictationState::Idle, _) => "🎙️",
            (DictationState::Listening, Locale::En) => "🎙️ Recording...",
            (DictationState::Listening, Locale::Ja) => "🎙️ 録音中...",
        }
    }

    /// The request a press of the microphone button should make.
    pub fn toggle(&self) -> DictationRequest {
        match self.state {
            DictationState::Idle => DictationRequest::Start,
            DictationState::Listening => DictationRequest::Stop,
        }
    }

    /// Handles a press of the microphone button.
    ///
    /// The state only changes once the recognizer reports back, so this
    /// leaves it untouched.
    pub fn activate(
        &self,
        recognizer: Option<&mut dyn Recognizer>,
    ) -> Result<DictationRequest, DictationError> {
        let recognizer = recognizer.ok_or(DictationError::Unsupported)?;
        let request = self.toggle();
        match request {
            DictationRequest::Start => recognizer.start()?,
            DictationRequest::Stop => recognizer.stop(),
        }
        debug!(?request, "dictation activated");
        Ok(request)
    }

    /// Applies a recognizer notification.
    pub fn handle(&mut self, event: DictationEvent) -> Option<DictationOutput> {
        match event {
            DictationEvent::Started => {
                self.state = DictationState::Listening;
                None
            }
            DictationEvent::Partial(text) if text.is_empty() => None,
            DictationEvent::Partial(text) => Some(DictationOutput::Preview(text)),
            DictationEvent::Final(text) => Some(DictationOutput::Commit(text)),
            DictationEvent::Ended => {
                self.state = DictationState::Idle;
                None
            }
            DictationEvent::Failed(reason) => {
                error!(%reason, "speech recognition error");
                self.state = DictationState::Idle;
                None
            }
        }
    }
}
