//! Observable pipeline state and its transition functions.
//!
//! All invariants on transcripts, flags, and status live here, one
//! transition function per event type. The controller is the only caller;
//! it publishes a snapshot after every transition.

use crate::recognition::adapter::RecognitionEvent;

/// Severity of a status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

/// A user-visible status message. Owned by the controller; transient
/// statuses are cleared by its auto-clear timer.
#[derive(Debug, Clone, PartialEq)]
pub struct Status {
    pub kind: StatusKind,
    pub message: String,
}

impl Status {
    pub fn new(kind: StatusKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// The live transcript of one listening session.
///
/// `final_text` is append-only within a session; `interim_text` is the
/// recognizer's current unconfirmed guess for speech after `final_text`,
/// replaced wholesale on every event and cleared the instant a final
/// fragment arrives or listening stops.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranscriptState {
    pub final_text: String,
    pub interim_text: String,
}

impl TranscriptState {
    /// Applies one recognition event. Returns true when `final_text` grew.
    pub fn apply(&mut self, event: &RecognitionEvent) -> bool {
        if event.is_final && !event.final_fragment.is_empty() {
            if !self.final_text.is_empty() {
                self.final_text.push(' ');
            }
            self.final_text.push_str(&event.final_fragment);
            self.interim_text.clear();
            true
        } else {
            self.interim_text = event.interim_fragment.clone();
            false
        }
    }

    pub fn clear(&mut self) {
        self.final_text.clear();
        self.interim_text.clear();
    }
}

/// The combined observable state of the pipeline.
///
/// `listening`, `translating`, and `speaking` are independent flags, not an
/// exclusive enum: recognition and playback are independently controllable.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineState {
    pub source_language: String,
    pub target_language: String,
    pub listening: bool,
    pub translating: bool,
    pub speaking: bool,
    pub transcript: TranscriptState,
    pub translated_text: String,
    pub status: Option<Status>,
}

impl PipelineState {
    pub fn new(source_language: &str, target_language: &str) -> Self {
        Self {
            source_language: source_language.to_string(),
            target_language: target_language.to_string(),
            listening: false,
            translating: false,
            speaking: false,
            transcript: TranscriptState::default(),
            translated_text: String::new(),
            status: None,
        }
    }

    /// One recognizer callback. Returns true when `final_text` changed and
    /// the translator should be notified.
    pub fn apply_recognition(&mut self, event: &RecognitionEvent) -> bool {
        self.transcript.apply(event)
    }

    pub fn listening_started(&mut self) {
        self.listening = true;
    }

    /// A stop was requested: the interim guess is dropped immediately, but
    /// `listening` stays set until the terminal end event arrives.
    pub fn stop_requested(&mut self) {
        self.transcript.interim_text.clear();
    }

    /// The session's terminal end event.
    pub fn recognition_ended(&mut self) {
        self.listening = false;
        self.transcript.interim_text.clear();
    }

    pub fn translation_started(&mut self) {
        self.translating = true;
    }

    pub fn translation_applied(&mut self, text: String) {
        self.translating = false;
        self.translated_text = text;
    }

    /// A failed cycle keeps the previously displayed translation.
    pub fn translation_failed(&mut self) {
        self.translating = false;
    }

    pub fn speaking_started(&mut self) {
        self.speaking = true;
    }

    pub fn speaking_finished(&mut self) {
        self.speaking = false;
    }

    /// Resets transcripts, translation, status, and any active translation
    /// cycle. Listening and speaking are unaffected.
    pub fn clear(&mut self) {
        self.transcript.clear();
        self.translated_text.clear();
        self.translating = false;
        self.status = None;
    }

    /// Exchanges the language pair AND the two texts: the translation
    /// becomes the new original and vice versa, enabling back-and-forth
    /// conversation without re-typing.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.source_language, &mut self.target_language);
        std::mem::swap(&mut self.transcript.final_text, &mut self.translated_text);
        self.translating = false;
    }

    pub fn set_status(&mut self, kind: StatusKind, message: impl Into<String>) {
        self.status = Some(Status::new(kind, message));
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }
}
