//! Recognition adapter: engine signals → ordered pipeline events.

use crate::error::{ConversoError, Result};
use crate::lang;
use crate::pipeline::event::PipelineEvent;
use crate::recognition::engine::{EngineSegment, EngineSignal, SpeechEngine};
use std::sync::Arc;
use tokio::sync::mpsc;

/// One recognizer callback adapted for the pipeline.
///
/// `final_fragment` holds the newly committed text of this callback (final
/// segments joined with a single space); `interim_fragment` holds the
/// engine's current unconfirmed guess (interim segments concatenated).
#[derive(Debug, Clone, PartialEq)]
pub struct RecognitionEvent {
    pub is_final: bool,
    pub final_fragment: String,
    pub interim_fragment: String,
}

impl RecognitionEvent {
    /// Builds an event from one callback worth of ordered segments.
    ///
    /// Segment order is preserved: finalized segments are joined with one
    /// space, interim segments are concatenated without added separators.
    pub fn from_segments(segments: &[EngineSegment]) -> Self {
        let mut final_fragment = String::new();
        let mut interim_fragment = String::new();

        for segment in segments {
            if segment.is_final {
                if !final_fragment.is_empty() {
                    final_fragment.push(' ');
                }
                final_fragment.push_str(segment.text.trim());
            } else {
                interim_fragment.push_str(&segment.text);
            }
        }

        let final_fragment = final_fragment.trim().to_string();
        let interim_fragment = interim_fragment.trim().to_string();

        Self {
            is_final: !final_fragment.is_empty(),
            final_fragment,
            interim_fragment,
        }
    }
}

/// Wraps a [`SpeechEngine`] and owns the start/stop lifecycle of one
/// listening session at a time.
///
/// Every session delivers its engine signals in order and terminates with
/// exactly one [`PipelineEvent::RecognitionEnded`], after which no further
/// recognition events are forwarded for that session.
pub struct RecognitionAdapter {
    engine: Arc<dyn SpeechEngine>,
    listening: bool,
}

impl RecognitionAdapter {
    /// Creates an adapter over the given engine.
    pub fn new(engine: Arc<dyn SpeechEngine>) -> Self {
        Self {
            engine,
            listening: false,
        }
    }

    /// Capability probe. A false result is structural: no recognizer exists
    /// on this platform.
    pub fn is_supported(&self) -> bool {
        self.engine.supported()
    }

    /// Whether a session is active (start accepted, terminal end not yet
    /// observed).
    pub fn is_listening(&self) -> bool {
        self.listening
    }

    /// Begins continuous capture for a logical language.
    ///
    /// The language is mapped to an engine locale tag through the static
    /// table, falling back to the default locale for unknown names.
    ///
    /// Calling while already listening is a no-op, not an error. Fails with
    /// `PlatformUnsupported` when no engine exists; engine start failures
    /// propagate as-is.
    pub fn start(
        &mut self,
        language: &str,
        events: &mpsc::UnboundedSender<PipelineEvent>,
    ) -> Result<()> {
        if !self.engine.supported() {
            return Err(ConversoError::PlatformUnsupported);
        }
        if self.listening {
            return Ok(());
        }

        let (signal_tx, signal_rx) = mpsc::unbounded_channel();
        self.engine.begin(lang::locale_tag(language), signal_tx)?;
        self.listening = true;

        tokio::spawn(forward_signals(signal_rx, events.clone()));
        Ok(())
    }

    /// Requests graceful termination. Safe to call when not listening.
    ///
    /// Termination is asynchronous: the engine delivers its terminal signal,
    /// which arrives as the session's single `RecognitionEnded` event.
    pub fn stop(&self) {
        if self.listening {
            self.engine.end();
        }
    }

    /// Marks the session terminated. Called by the controller when the
    /// terminal event is observed.
    pub fn on_ended(&mut self) {
        self.listening = false;
    }
}

/// Forwards engine signals for one session until the terminal signal.
///
/// Emits exactly one `RecognitionEnded`, also when the engine drops its
/// channel without signalling the end.
async fn forward_signals(
    mut signals: mpsc::UnboundedReceiver<EngineSignal>,
    events: mpsc::UnboundedSender<PipelineEvent>,
) {
    while let Some(signal) = signals.recv().await {
        let forwarded = match signal {
            EngineSignal::Results(segments) => events.send(PipelineEvent::Recognition(
                RecognitionEvent::from_segments(&segments),
            )),
            EngineSignal::Error(message) => {
                events.send(PipelineEvent::RecognitionError(message))
            }
            EngineSignal::Ended => break,
        };
        if forwarded.is_err() {
            return;
        }
    }
    events.send(PipelineEvent::RecognitionEnded).ok();
}
