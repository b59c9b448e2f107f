//! Continuous speech recognition.
//!
//! Wraps an incremental speech-recognition engine behind the [`SpeechEngine`]
//! boundary and adapts its raw result segments into ordered
//! [`RecognitionEvent`]s for the pipeline.

pub mod adapter;
pub mod engine;

pub use adapter::{RecognitionAdapter, RecognitionEvent};
pub use engine::{EngineSegment, EngineSignal, MockSpeechEngine, SpeechEngine};
