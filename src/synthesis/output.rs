//! Audio output boundary: plays a compressed payload to completion.

use crate::error::{ConversoError, Result};
use async_trait::async_trait;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// Playable audio sink.
///
/// `play` owns the payload for the duration of playback and resolves at
/// natural end-of-audio; the buffer is released when the call returns.
/// Decode and playback-start failures are errors.
#[async_trait]
pub trait AudioOutput: Send + Sync {
    async fn play(&self, audio: Vec<u8>) -> Result<()>;
}

/// Mock audio output for testing.
#[derive(Debug, Default)]
pub struct MockAudioOutput {
    latency: Option<Duration>,
    should_fail: bool,
    played: Mutex<Vec<Vec<u8>>>,
}

impl MockAudioOutput {
    /// Creates a mock that "plays" instantly and successfully.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure a playback duration.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Configure the mock to fail playback.
    pub fn with_failure(mut self) -> Self {
        self.should_fail = true;
        self
    }

    /// Payloads played so far, in order.
    pub fn played(&self) -> Vec<Vec<u8>> {
        self.played
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl AudioOutput for MockAudioOutput {
    async fn play(&self, audio: Vec<u8>) -> Result<()> {
        if self.should_fail {
            return Err(ConversoError::PlaybackFailed {
                message: "mock playback failure".to_string(),
            });
        }
        self.played
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(audio);
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        Ok(())
    }
}

/// Audio output on the default device via rodio.
///
/// The payload is decoded and played inside one blocking task; stream, sink
/// and buffer are all dropped when playback ends.
#[cfg(feature = "playback")]
#[derive(Debug, Default)]
pub struct RodioOutput;

#[cfg(feature = "playback")]
impl RodioOutput {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(feature = "playback")]
#[async_trait]
impl AudioOutput for RodioOutput {
    async fn play(&self, audio: Vec<u8>) -> Result<()> {
        let playback = tokio::task::spawn_blocking(move || -> Result<()> {
            let stream = rodio::OutputStreamBuilder::open_default_stream().map_err(|e| {
                ConversoError::PlaybackFailed {
                    message: format!("failed to open output device: {e}"),
                }
            })?;
            let sink = rodio::Sink::connect_new(stream.mixer());
            let source = rodio::Decoder::new(std::io::Cursor::new(audio)).map_err(|e| {
                ConversoError::PlaybackFailed {
                    message: format!("failed to decode audio: {e}"),
                }
            })?;
            sink.append(source);
            sink.sleep_until_end();
            Ok(())
        });

        playback.await.map_err(|e| ConversoError::PlaybackFailed {
            message: format!("playback task failed: {e}"),
        })?
    }
}
