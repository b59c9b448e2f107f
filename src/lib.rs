//! converso - Real-time speech translation for cross-language conversation
//!
//! Continuous speech is recognized incrementally, translated once the
//! speaker pauses, and optionally read aloud in the target language.

// Enforce error handling discipline in non-test code
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::let_underscore_must_use)]

pub mod config;
pub mod defaults;
pub mod error;
pub mod lang;
pub mod pipeline;
pub mod recognition;
pub mod synthesis;
pub mod translation;

// Core boundary traits (recognize → translate → speak)
pub use recognition::adapter::{RecognitionAdapter, RecognitionEvent};
pub use recognition::engine::{EngineSegment, EngineSignal, MockSpeechEngine, SpeechEngine};
pub use synthesis::output::{AudioOutput, MockAudioOutput};
pub use synthesis::player::{PlaybackSession, PlaybackStatus, SynthesisPlayer};
pub use synthesis::synthesizer::{MockSynthesizer, Synthesizer};
pub use translation::debounce::{DebouncedTranslator, TranslationJob};
pub use translation::translator::{MockTranslator, Translation, Translator};

// Pipeline
pub use pipeline::controller::{ControllerConfig, ControllerHandle, PipelineController};
pub use pipeline::event::{PipelineEvent, PlaybackUpdate, TranslationUpdate};
pub use pipeline::state::{PipelineState, Status, StatusKind, TranscriptState};

// Error handling
pub use error::{ConversoError, Result};

// Config
pub use config::Config;

// HTTP collaborators
#[cfg(feature = "http")]
pub use synthesis::http::HttpSynthesizer;
#[cfg(feature = "http")]
pub use translation::http::HttpTranslator;

// Audio device playback
#[cfg(feature = "playback")]
pub use synthesis::output::RodioOutput;

/// Build version string with optional git commit hash.
///
/// Returns `"0.1.0+abc1234"` when git hash is available, `"0.1.0"` otherwise.
pub fn version_string() -> String {
    let version = env!("CARGO_PKG_VERSION");
    match option_env!("GIT_HASH") {
        Some(hash) if !hash.is_empty() => format!("{}+{}", version, hash),
        _ => version.to_string(),
    }
}
