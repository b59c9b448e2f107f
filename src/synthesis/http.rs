//! Speech synthesis over an OpenAI-compatible `audio/speech` backend.

use crate::config::SynthesisConfig;
use crate::defaults;
use crate::error::{ConversoError, Result};
use crate::synthesis::synthesizer::Synthesizer;
use async_trait::async_trait;
use std::time::Duration;

/// Short language code → synthesis voice.
const VOICES: &[(&str, &str)] = &[
    ("en", "alloy"),
    ("es", "nova"),
    ("fr", "shimmer"),
    ("de", "echo"),
    ("zh", "fable"),
];

/// Voice used when a language code has no table entry.
const DEFAULT_VOICE: &str = "alloy";

/// Synthesizer backed by an OpenAI-compatible `audio/speech` endpoint.
///
/// Returns the backend's single supported codec (mp3) as raw bytes.
pub struct HttpSynthesizer {
    client: reqwest::Client,
    base_url: String,
    model: String,
    speed: f32,
    api_key: Option<String>,
}

impl HttpSynthesizer {
    /// Builds a synthesizer from config. The API key is shared with the
    /// translation client.
    pub fn new(config: &SynthesisConfig, api_key: Option<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(defaults::HTTP_TIMEOUT_SECS))
            .build()
            .map_err(|e| ConversoError::Other(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            speed: config.speed,
            api_key,
        })
    }
}

/// Select the voice for a short language code, falling back to the default.
fn voice_for(language_code: &str) -> &'static str {
    VOICES
        .iter()
        .find(|(code, _)| *code == language_code)
        .map(|(_, voice)| *voice)
        .unwrap_or(DEFAULT_VOICE)
}

#[async_trait]
impl Synthesizer for HttpSynthesizer {
    async fn synthesize(&self, text: &str, language_code: &str) -> Result<Vec<u8>> {
        let body = serde_json::json!({
            "model": self.model,
            "voice": voice_for(language_code),
            "input": text,
            "speed": self.speed,
        });

        let mut request = self
            .client
            .post(format!("{}/audio/speech", self.base_url))
            .json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| {
            ConversoError::SynthesisFailed {
                message: e.to_string(),
            }
        })?;

        if !response.status().is_success() {
            return Err(ConversoError::SynthesisFailed {
                message: format!("backend returned status {}", response.status()),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ConversoError::SynthesisFailed {
                message: format!("failed to read audio payload: {e}"),
            })?;

        Ok(bytes.to_vec())
    }
}
