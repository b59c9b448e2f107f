//! Pipeline controller: one task owning all state, fed by commands,
//! component events, and the status auto-clear timer.

use crate::config::Config;
use crate::defaults;
use crate::error::ConversoError;
use crate::pipeline::event::{PipelineEvent, PlaybackUpdate, TranslationUpdate};
use crate::pipeline::state::{PipelineState, StatusKind};
use crate::recognition::adapter::RecognitionAdapter;
use crate::recognition::engine::SpeechEngine;
use crate::synthesis::output::AudioOutput;
use crate::synthesis::player::SynthesisPlayer;
use crate::synthesis::synthesizer::Synthesizer;
use crate::translation::debounce::{DebouncedTranslator, TranslationJob};
use crate::translation::translator::Translator;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Configuration for the pipeline controller.
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerConfig {
    /// Initial source language (logical name).
    pub source_language: String,
    /// Initial target language (logical name).
    pub target_language: String,
    /// Trailing-edge debounce delay for translation submission.
    pub debounce: Duration,
    /// Lifetime of transient status messages.
    pub status_clear: Duration,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            source_language: defaults::DEFAULT_SOURCE_LANGUAGE.to_string(),
            target_language: defaults::DEFAULT_TARGET_LANGUAGE.to_string(),
            debounce: defaults::debounce_delay(),
            status_clear: defaults::status_clear_delay(),
        }
    }
}

impl From<&Config> for ControllerConfig {
    fn from(config: &Config) -> Self {
        Self {
            source_language: config.languages.source.clone(),
            target_language: config.languages.target.clone(),
            debounce: Duration::from_millis(config.timing.debounce_ms),
            status_clear: Duration::from_millis(config.timing.status_clear_ms),
        }
    }
}

enum Command {
    StartListening,
    StopListening,
    Clear,
    Swap,
    Speak(String),
    SetSourceLanguage(String),
    SetTargetLanguage(String),
    Shutdown,
}

/// Handle to a running pipeline controller.
///
/// Commands are fire-and-forget; observable state arrives through the watch
/// channel, one snapshot per transition.
pub struct ControllerHandle {
    commands: mpsc::UnboundedSender<Command>,
    state_rx: watch::Receiver<PipelineState>,
    task: JoinHandle<()>,
}

impl ControllerHandle {
    pub fn start_listening(&self) {
        self.commands.send(Command::StartListening).ok();
    }

    pub fn stop_listening(&self) {
        self.commands.send(Command::StopListening).ok();
    }

    pub fn clear(&self) {
        self.commands.send(Command::Clear).ok();
    }

    pub fn swap(&self) {
        self.commands.send(Command::Swap).ok();
    }

    pub fn speak(&self, text: impl Into<String>) {
        self.commands.send(Command::Speak(text.into())).ok();
    }

    pub fn set_source_language(&self, language: impl Into<String>) {
        self.commands
            .send(Command::SetSourceLanguage(language.into()))
            .ok();
    }

    pub fn set_target_language(&self, language: impl Into<String>) {
        self.commands
            .send(Command::SetTargetLanguage(language.into()))
            .ok();
    }

    /// The latest published snapshot.
    pub fn state(&self) -> PipelineState {
        self.state_rx.borrow().clone()
    }

    /// A receiver over published snapshots.
    pub fn watch_state(&self) -> watch::Receiver<PipelineState> {
        self.state_rx.clone()
    }

    /// Returns true while the controller task is alive.
    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Stops the controller and waits for its task to finish.
    pub async fn shutdown(self) {
        self.commands.send(Command::Shutdown).ok();
        self.task.await.ok();
    }
}

/// The orchestrating state machine over recognition, translation, and
/// synthesis playback.
pub struct PipelineController {
    state: PipelineState,
    adapter: RecognitionAdapter,
    debouncer: DebouncedTranslator,
    player: SynthesisPlayer,
    events_tx: mpsc::UnboundedSender<PipelineEvent>,
    watch_tx: watch::Sender<PipelineState>,
    status_clear: Duration,
    status_deadline: Option<Instant>,
}

impl PipelineController {
    /// Wires the components together and spawns the controller task.
    pub fn spawn(
        config: ControllerConfig,
        engine: Arc<dyn SpeechEngine>,
        translator: Arc<dyn Translator>,
        synthesizer: Arc<dyn Synthesizer>,
        output: Arc<dyn AudioOutput>,
    ) -> ControllerHandle {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let state = PipelineState::new(&config.source_language, &config.target_language);
        let (watch_tx, watch_rx) = watch::channel(state.clone());

        let controller = PipelineController {
            state,
            adapter: RecognitionAdapter::new(engine),
            debouncer: DebouncedTranslator::spawn(translator, config.debounce, event_tx.clone()),
            player: SynthesisPlayer::new(synthesizer, output, event_tx.clone()),
            events_tx: event_tx,
            watch_tx,
            status_clear: config.status_clear,
            status_deadline: None,
        };

        let task = tokio::spawn(controller.run(command_rx, event_rx));

        ControllerHandle {
            commands: command_tx,
            state_rx: watch_rx,
            task,
        }
    }

    async fn run(
        mut self,
        mut commands: mpsc::UnboundedReceiver<Command>,
        mut events: mpsc::UnboundedReceiver<PipelineEvent>,
    ) {
        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(Command::Shutdown) | None => break,
                    Some(command) => self.handle_command(command),
                },
                // Never yields None: the controller holds an event sender.
                Some(event) = events.recv() => self.handle_event(event),
                _ = tokio::time::sleep_until(self.status_deadline.unwrap_or_else(far_future)),
                    if self.status_deadline.is_some() =>
                {
                    self.status_deadline = None;
                    self.state.clear_status();
                    self.publish();
                }
            }
        }
        self.adapter.stop();
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::StartListening => self.start_listening(),
            Command::StopListening => self.stop_listening(),
            Command::Clear => self.clear(),
            Command::Swap => self.swap(),
            Command::Speak(text) => self.speak(text),
            Command::SetSourceLanguage(language) => self.set_source_language(language),
            Command::SetTargetLanguage(language) => self.set_target_language(language),
            Command::Shutdown => unreachable!("handled in run loop"),
        }
    }

    fn start_listening(&mut self) {
        if self.state.listening {
            return;
        }
        match self
            .adapter
            .start(&self.state.source_language, &self.events_tx)
        {
            Ok(()) => {
                self.state.listening_started();
                self.set_status_sticky(StatusKind::Info, "Listening... Speak now");
            }
            Err(error) => {
                self.set_status_sticky(StatusKind::Error, format!("Error: {error}"));
            }
        }
        self.publish();
    }

    fn stop_listening(&mut self) {
        if !self.state.listening {
            return;
        }
        self.adapter.stop();
        // The interim guess dies now; `listening` clears on the end event.
        self.state.stop_requested();
        self.publish();
    }

    fn clear(&mut self) {
        self.state.clear();
        self.debouncer.reset();
        self.set_status_transient(StatusKind::Info, "Transcripts cleared");
        self.publish();
    }

    fn swap(&mut self) {
        self.state.swap();
        // The swapped transcript is a fresh request cycle; anything in
        // flight for the old pair is invalidated.
        self.debouncer.reset();
        self.notify_translator();
        self.set_status_transient(StatusKind::Info, "Languages swapped");
        self.publish();
    }

    fn speak(&mut self, text: String) {
        if text.trim().is_empty() {
            return;
        }
        if text.chars().count() > defaults::MAX_SYNTHESIS_CHARS {
            let error = ConversoError::TextTooLong {
                limit: defaults::MAX_SYNTHESIS_CHARS,
            };
            self.set_status_sticky(StatusKind::Error, format!("Audio error: {error}"));
            self.publish();
            return;
        }
        match self.player.speak(&text, &self.state.target_language) {
            Ok(()) => {
                self.state.speaking_started();
                self.set_status_sticky(StatusKind::Info, "Generating audio...");
            }
            Err(ConversoError::Busy) => {
                // A rejection, not a fault: surfaced as information.
                self.set_status_transient(StatusKind::Info, "Audio playback already in progress");
            }
            Err(error) => {
                self.set_status_sticky(StatusKind::Error, format!("Audio error: {error}"));
            }
        }
        self.publish();
    }

    fn set_source_language(&mut self, language: String) {
        if self.state.source_language == language {
            return;
        }
        self.state.source_language = language;
        self.notify_translator();
        self.publish();
    }

    fn set_target_language(&mut self, language: String) {
        if self.state.target_language == language {
            return;
        }
        self.state.target_language = language;
        self.notify_translator();
        self.publish();
    }

    fn handle_event(&mut self, event: PipelineEvent) {
        match event {
            PipelineEvent::Recognition(event) => {
                if self.state.apply_recognition(&event) {
                    self.notify_translator();
                }
            }
            PipelineEvent::RecognitionEnded => {
                self.adapter.on_ended();
                self.state.recognition_ended();
                self.set_status_transient(StatusKind::Info, "Stopped listening");
            }
            PipelineEvent::RecognitionError(message) => {
                // Surfaced without force-stopping: the engine owns session
                // termination and delivers the end event if it gives up.
                self.set_status_sticky(StatusKind::Error, format!("Error: {message}"));
            }
            PipelineEvent::Translation(update) => match update {
                TranslationUpdate::Started => {
                    self.state.translation_started();
                    self.set_status_sticky(StatusKind::Info, "Translating...");
                }
                TranslationUpdate::Applied { text } => {
                    self.state.translation_applied(text);
                    self.set_status_transient(StatusKind::Success, "Translation complete");
                }
                TranslationUpdate::Failed { message } => {
                    self.state.translation_failed();
                    self.set_status_sticky(StatusKind::Error, format!("Translation error: {message}"));
                }
            },
            PipelineEvent::Playback(update) => match update {
                PlaybackUpdate::Started => {
                    self.player.on_playback_started();
                    self.set_status_sticky(StatusKind::Info, "Playing audio...");
                }
                PlaybackUpdate::Finished => {
                    self.player.on_playback_finished();
                    self.state.speaking_finished();
                    self.set_status_transient(StatusKind::Success, "Audio playback completed");
                }
                PlaybackUpdate::Failed { message } => {
                    self.player.on_playback_failed();
                    self.state.speaking_finished();
                    self.set_status_sticky(StatusKind::Error, format!("Audio error: {message}"));
                }
            },
        }
        self.publish();
    }

    fn notify_translator(&self) {
        let text = &self.state.transcript.final_text;
        if text.trim().is_empty() {
            return;
        }
        self.debouncer.text_changed(TranslationJob {
            text: text.clone(),
            source_lang: self.state.source_language.clone(),
            target_lang: self.state.target_language.clone(),
        });
    }

    fn set_status_sticky(&mut self, kind: StatusKind, message: impl Into<String>) {
        self.state.set_status(kind, message);
        self.status_deadline = None;
    }

    fn set_status_transient(&mut self, kind: StatusKind, message: impl Into<String>) {
        self.state.set_status(kind, message);
        self.status_deadline = Some(Instant::now() + self.status_clear);
    }

    fn publish(&self) {
        self.watch_tx.send_replace(self.state.clone());
    }
}

/// Timer deadline used while no timer is armed; the branch guard keeps it
/// from ever being polled.
fn far_future() -> Instant {
    Instant::now() + Duration::from_secs(86_400)
}
