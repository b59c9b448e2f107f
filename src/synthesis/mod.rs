//! Speech synthesis and single-slot playback.
//!
//! The [`SynthesisPlayer`] converts a text snippet to audio through the
//! [`Synthesizer`] boundary and plays it through the [`AudioOutput`]
//! boundary. Exactly one playback session may be loading or playing at a
//! time; concurrent speak requests are rejected, never queued.

#[cfg(feature = "http")]
pub mod http;
pub mod output;
pub mod player;
pub mod synthesizer;

#[cfg(feature = "http")]
pub use http::HttpSynthesizer;
pub use output::{AudioOutput, MockAudioOutput};
#[cfg(feature = "playback")]
pub use output::RodioOutput;
pub use player::{PlaybackSession, PlaybackStatus, SynthesisPlayer};
pub use synthesizer::{MockSynthesizer, Synthesizer};
