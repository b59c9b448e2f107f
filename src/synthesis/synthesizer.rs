//! Synthesis call boundary.

use crate::error::{ConversoError, Result};
use async_trait::async_trait;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// Trait for converting text to a compressed audio payload.
///
/// This trait allows swapping implementations (real HTTP backend vs mock).
#[async_trait]
pub trait Synthesizer: Send + Sync {
    /// Synthesize `text` spoken in the voice selected for `language_code`
    /// (a short code such as "en" or "es").
    ///
    /// Returns the binary payload of the backend's single supported codec.
    /// Callers enforce input limits before invocation.
    async fn synthesize(&self, text: &str, language_code: &str) -> Result<Vec<u8>>;
}

/// One recorded call against a [`MockSynthesizer`].
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisCall {
    pub text: String,
    pub language_code: String,
}

/// Mock synthesizer for testing.
#[derive(Debug)]
pub struct MockSynthesizer {
    audio: Vec<u8>,
    latency: Option<Duration>,
    should_fail: bool,
    calls: Mutex<Vec<SynthesisCall>>,
}

impl Default for MockSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSynthesizer {
    /// Creates a mock returning a small fixed payload.
    pub fn new() -> Self {
        Self {
            audio: b"mock audio payload".to_vec(),
            latency: None,
            should_fail: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Configure the payload returned on success.
    pub fn with_audio(mut self, audio: Vec<u8>) -> Self {
        self.audio = audio;
        self
    }

    /// Configure a latency before each call resolves.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Configure the mock to fail every call.
    pub fn with_failure(mut self) -> Self {
        self.should_fail = true;
        self
    }

    /// Calls made so far, in order.
    pub fn calls(&self) -> Vec<SynthesisCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl Synthesizer for MockSynthesizer {
    async fn synthesize(&self, text: &str, language_code: &str) -> Result<Vec<u8>> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(SynthesisCall {
                text: text.to_string(),
                language_code: language_code.to_string(),
            });

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        if self.should_fail {
            Err(ConversoError::SynthesisFailed {
                message: "mock synthesis failure".to_string(),
            })
        } else {
            Ok(self.audio.clone())
        }
    }
}
