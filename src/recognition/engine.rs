//! Speech engine boundary.
//!
//! The engine is an external collaborator: a continuous recognizer that
//! delivers ordered result segments tagged final or interim, a single
//! terminal end signal, and runtime errors. Implementations push
//! [`EngineSignal`]s into the channel handed to [`SpeechEngine::begin`].

use crate::error::{ConversoError, Result};
use std::sync::{Mutex, PoisonError};
use tokio::sync::mpsc;

/// One recognized span of speech within an engine callback.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineSegment {
    /// Recognized text for this span.
    pub text: String,
    /// Whether the engine has committed to this text (final) or may still
    /// revise it (interim).
    pub is_final: bool,
}

impl EngineSegment {
    /// Creates a final segment.
    pub fn final_text(text: &str) -> Self {
        Self {
            text: text.to_string(),
            is_final: true,
        }
    }

    /// Creates an interim segment.
    pub fn interim(text: &str) -> Self {
        Self {
            text: text.to_string(),
            is_final: false,
        }
    }
}

/// Signals delivered by a speech engine for one listening session.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineSignal {
    /// One recognizer callback worth of ordered result segments.
    Results(Vec<EngineSegment>),
    /// The session terminated. At most one per session; nothing follows it.
    Ended,
    /// A runtime failure (permission denied, network, no-speech timeout).
    /// Does not by itself imply the session ended.
    Error(String),
}

/// Continuous speech recognition engine.
///
/// This trait allows swapping implementations (a platform recognizer vs mock).
pub trait SpeechEngine: Send + Sync {
    /// Whether a recognizer exists on this platform.
    fn supported(&self) -> bool;

    /// Begins continuous capture for the given engine locale tag.
    ///
    /// Signals for the session are pushed into `signals` in the order the
    /// engine produces them.
    fn begin(&self, locale: &str, signals: mpsc::UnboundedSender<EngineSignal>) -> Result<()>;

    /// Requests graceful termination of the active session, if any.
    fn end(&self);
}

/// Mock speech engine for testing.
///
/// Captures the signal channel handed to [`SpeechEngine::begin`] so tests can
/// drive a session by emitting segments, errors, and the end signal.
#[derive(Debug, Default)]
pub struct MockSpeechEngine {
    unsupported: bool,
    begin_error: Option<String>,
    active: Mutex<Option<mpsc::UnboundedSender<EngineSignal>>>,
    begun_locales: Mutex<Vec<String>>,
}

impl MockSpeechEngine {
    /// Creates a supported mock engine with no active session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the mock to report no recognizer on this platform.
    pub fn unsupported(mut self) -> Self {
        self.unsupported = true;
        self
    }

    /// Configure the mock to fail `begin` with the given message.
    pub fn with_begin_error(mut self, message: &str) -> Self {
        self.begin_error = Some(message.to_string());
        self
    }

    /// Locales passed to `begin`, in call order.
    pub fn begun_locales(&self) -> Vec<String> {
        self.begun_locales
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Whether a session is currently active.
    pub fn is_active(&self) -> bool {
        self.active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Emits a raw signal into the active session. Returns false when no
    /// session is active.
    pub fn emit(&self, signal: EngineSignal) -> bool {
        let guard = self.active.lock().unwrap_or_else(PoisonError::into_inner);
        match guard.as_ref() {
            Some(tx) => tx.send(signal).is_ok(),
            None => false,
        }
    }

    /// Emits one callback worth of segments.
    pub fn emit_segments(&self, segments: Vec<EngineSegment>) -> bool {
        self.emit(EngineSignal::Results(segments))
    }

    /// Emits a single interim segment.
    pub fn emit_interim(&self, text: &str) -> bool {
        self.emit_segments(vec![EngineSegment::interim(text)])
    }

    /// Emits a single final segment.
    pub fn emit_final(&self, text: &str) -> bool {
        self.emit_segments(vec![EngineSegment::final_text(text)])
    }

    /// Emits a runtime error.
    pub fn emit_error(&self, message: &str) -> bool {
        self.emit(EngineSignal::Error(message.to_string()))
    }

    /// Drops the session channel without sending the end signal, simulating
    /// an engine that dies without a terminal callback.
    pub fn drop_session(&self) {
        self.active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }
}

impl SpeechEngine for MockSpeechEngine {
    fn supported(&self) -> bool {
        !self.unsupported
    }

    fn begin(&self, locale: &str, signals: mpsc::UnboundedSender<EngineSignal>) -> Result<()> {
        if let Some(message) = &self.begin_error {
            return Err(ConversoError::Recognition {
                message: message.clone(),
            });
        }
        self.begun_locales
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(locale.to_string());
        *self.active.lock().unwrap_or_else(PoisonError::into_inner) = Some(signals);
        Ok(())
    }

    fn end(&self) {
        // Graceful termination: the engine sends the terminal signal itself.
        let tx = self
            .active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(tx) = tx {
            tx.send(EngineSignal::Ended).ok();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_engine_is_supported_by_default() {
        let engine = MockSpeechEngine::new();
        assert!(engine.supported());
    }

    #[test]
    fn test_mock_engine_unsupported() {
        let engine = MockSpeechEngine::new().unsupported();
        assert!(!engine.supported());
    }

    #[tokio::test]
    async fn test_begin_captures_locale_and_session() {
        let engine = MockSpeechEngine::new();
        let (tx, _rx) = mpsc::unbounded_channel();

        engine.begin("es-ES", tx).expect("begin should succeed");
        assert!(engine.is_active());
        assert_eq!(engine.begun_locales(), vec!["es-ES".to_string()]);
    }

    #[tokio::test]
    async fn test_begin_error() {
        let engine = MockSpeechEngine::new().with_begin_error("microphone busy");
        let (tx, _rx) = mpsc::unbounded_channel();

        let result = engine.begin("en-US", tx);
        assert!(matches!(
            result,
            Err(ConversoError::Recognition { message }) if message == "microphone busy"
        ));
        assert!(!engine.is_active());
    }

    #[tokio::test]
    async fn test_emit_delivers_signals_in_order() {
        let engine = MockSpeechEngine::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        engine.begin("en-US", tx).expect("begin");

        assert!(engine.emit_interim("hel"));
        assert!(engine.emit_final("hello"));
        assert!(engine.emit_error("no-speech"));

        assert_eq!(
            rx.recv().await,
            Some(EngineSignal::Results(vec![EngineSegment::interim("hel")]))
        );
        assert_eq!(
            rx.recv().await,
            Some(EngineSignal::Results(vec![EngineSegment::final_text(
                "hello"
            )]))
        );
        assert_eq!(
            rx.recv().await,
            Some(EngineSignal::Error("no-speech".to_string()))
        );
    }

    #[tokio::test]
    async fn test_end_sends_terminal_signal_and_clears_session() {
        let engine = MockSpeechEngine::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        engine.begin("en-US", tx).expect("begin");

        engine.end();
        assert_eq!(rx.recv().await, Some(EngineSignal::Ended));
        assert!(!engine.is_active());

        // Emitting after end reaches nobody.
        assert!(!engine.emit_final("late"));
    }

    #[test]
    fn test_end_without_session_is_noop() {
        let engine = MockSpeechEngine::new();
        engine.end();
        assert!(!engine.is_active());
    }

    #[tokio::test]
    async fn test_drop_session_closes_channel_without_ended() {
        let engine = MockSpeechEngine::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        engine.begin("en-US", tx).expect("begin");

        engine.drop_session();
        assert_eq!(rx.recv().await, None);
    }

    #[test]
    fn test_segment_constructors() {
        let f = EngineSegment::final_text("done");
        assert!(f.is_final);
        assert_eq!(f.text, "done");

        let i = EngineSegment::interim("part");
        assert!(!i.is_final);
        assert_eq!(i.text, "part");
    }
}
