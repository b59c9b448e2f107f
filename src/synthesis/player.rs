//! Single-slot synthesis playback.

use crate::error::{ConversoError, Result};
use crate::lang;
use crate::pipeline::event::{PipelineEvent, PlaybackUpdate};
use crate::synthesis::output::AudioOutput;
use crate::synthesis::synthesizer::Synthesizer;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Lifecycle of one playback session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackStatus {
    Idle,
    Loading,
    Playing,
    Done,
    Failed,
}

/// One speak invocation, alive from acceptance to completion or failure.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackSession {
    pub source_text: String,
    pub status: PlaybackStatus,
}

/// Converts text to audio on request and plays it through a single
/// concurrent playback slot.
///
/// A speak request while a session is Loading or Playing is rejected with
/// [`ConversoError::Busy`], never queued. The synthesized payload is moved
/// into the one playback task and dropped there when playback ends, so two
/// decoded buffers are never alive at once.
pub struct SynthesisPlayer {
    synthesizer: Arc<dyn Synthesizer>,
    output: Arc<dyn AudioOutput>,
    events: mpsc::UnboundedSender<PipelineEvent>,
    session: Option<PlaybackSession>,
}

impl SynthesisPlayer {
    pub fn new(
        synthesizer: Arc<dyn Synthesizer>,
        output: Arc<dyn AudioOutput>,
        events: mpsc::UnboundedSender<PipelineEvent>,
    ) -> Self {
        Self {
            synthesizer,
            output,
            events,
            session: None,
        }
    }

    /// Whether a session currently occupies the playback slot.
    pub fn is_active(&self) -> bool {
        matches!(
            self.session.as_ref().map(|s| s.status),
            Some(PlaybackStatus::Loading) | Some(PlaybackStatus::Playing)
        )
    }

    /// The active session, if any.
    pub fn session(&self) -> Option<&PlaybackSession> {
        self.session.as_ref()
    }

    /// Starts a new session for `text` spoken in the logical `language`.
    ///
    /// The language is resolved to a short synthesis code through the static
    /// table with a default fallback. Empty text and an occupied slot are
    /// rejected immediately, before any call is made. The caller is expected
    /// to have pre-validated the text length; the player never truncates.
    pub fn speak(&mut self, text: &str, language: &str) -> Result<()> {
        if text.trim().is_empty() {
            return Err(ConversoError::EmptySpeechText);
        }
        if self.is_active() {
            return Err(ConversoError::Busy);
        }

        self.session = Some(PlaybackSession {
            source_text: text.to_string(),
            status: PlaybackStatus::Loading,
        });

        let synthesizer = self.synthesizer.clone();
        let output = self.output.clone();
        let events = self.events.clone();
        let text = text.to_string();
        let code = lang::short_code(language).to_string();

        tokio::spawn(async move {
            match synthesizer.synthesize(&text, &code).await {
                Ok(audio) => {
                    events
                        .send(PipelineEvent::Playback(PlaybackUpdate::Started))
                        .ok();
                    // `audio` moves into play and is released when it returns.
                    let update = match output.play(audio).await {
                        Ok(()) => PlaybackUpdate::Finished,
                        Err(error) => PlaybackUpdate::Failed {
                            message: error.to_string(),
                        },
                    };
                    events.send(PipelineEvent::Playback(update)).ok();
                }
                Err(error) => {
                    events
                        .send(PipelineEvent::Playback(PlaybackUpdate::Failed {
                            message: error.to_string(),
                        }))
                        .ok();
                }
            }
        });

        Ok(())
    }

    /// Loading → Playing, on the playback-start event.
    pub fn on_playback_started(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.status = PlaybackStatus::Playing;
        }
    }

    /// Terminal transition to Done; releases the slot and returns the
    /// finished session.
    pub fn on_playback_finished(&mut self) -> Option<PlaybackSession> {
        self.finish(PlaybackStatus::Done)
    }

    /// Terminal transition to Failed; releases the slot and returns the
    /// failed session.
    pub fn on_playback_failed(&mut self) -> Option<PlaybackSession> {
        self.finish(PlaybackStatus::Failed)
    }

    fn finish(&mut self, status: PlaybackStatus) -> Option<PlaybackSession> {
        let mut session = self.session.take()?;
        session.status = status;
        Some(session)
    }
}
