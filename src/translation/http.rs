//! Translation over an OpenAI-compatible chat completions backend.
//!
//! Carries the medical-translator prompting used for patient-provider
//! conversation: translations preserve medical terminology, tone, and
//! urgency. Also exposes the backend's two sibling operations, language
//! detection and transcription enhancement.

use crate::config::TranslationConfig;
use crate::defaults;
use crate::error::{ConversoError, Result};
use crate::translation::translator::{Translation, Translator};
use async_trait::async_trait;
use std::time::Duration;

const SYSTEM_PROMPT: &str = "You are an expert medical translator specializing in \
patient-provider communication. Your translations are accurate, culturally sensitive, \
and preserve medical terminology.";

const ENHANCE_PROMPT: &str = "You are a medical transcription expert. Correct any obvious \
errors in the transcribed text, especially medical terms, while preserving the original \
meaning. If the text is already correct, return it unchanged.";

/// Translator backed by an OpenAI-compatible `chat/completions` endpoint.
pub struct HttpTranslator {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl HttpTranslator {
    /// Builds a translator from config. The API key is shared with the
    /// synthesis client and usually comes from `CONVERSO_API_KEY`.
    pub fn new(config: &TranslationConfig, api_key: Option<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(defaults::HTTP_TIMEOUT_SECS))
            .build()
            .map_err(|e| ConversoError::Other(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
        })
    }

    /// Detect the language of `text`, answering with a language name in
    /// English.
    pub async fn detect_language(&self, text: &str) -> Result<String> {
        let prompt = format!(
            "Detect the language of this text and respond with only the language name in English: \"{}\"",
            text
        );
        self.chat(None, prompt, 0.1, 50).await
    }

    /// Correct transcription errors, especially medical terms.
    ///
    /// Degrades gracefully: on any failure the original text is returned
    /// unchanged.
    pub async fn enhance_transcription(&self, text: &str) -> String {
        match self.chat(Some(ENHANCE_PROMPT), text.to_string(), 0.2, 1000).await {
            Ok(enhanced) => enhanced,
            Err(_) => text.to_string(),
        }
    }

    async fn chat(
        &self,
        system: Option<&str>,
        user: String,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String> {
        let mut messages = Vec::new();
        if let Some(system) = system {
            messages.push(serde_json::json!({ "role": "system", "content": system }));
        }
        messages.push(serde_json::json!({ "role": "user", "content": user }));

        let body = serde_json::json!({
            "model": self.model,
            "messages": messages,
            "temperature": temperature,
            "max_tokens": max_tokens,
        });

        let mut request = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| {
            ConversoError::TranslationFailed {
                message: e.to_string(),
            }
        })?;

        if !response.status().is_success() {
            return Err(ConversoError::TranslationFailed {
                message: format!("backend returned status {}", response.status()),
            });
        }

        let payload: serde_json::Value =
            response
                .json()
                .await
                .map_err(|e| ConversoError::TranslationFailed {
                    message: format!("failed to parse backend response: {e}"),
                })?;

        let content = payload
            .get("choices")
            .and_then(|choices| choices.get(0))
            .and_then(|choice| choice.get("message"))
            .and_then(|message| message.get("content"))
            .and_then(|content| content.as_str())
            .ok_or_else(|| ConversoError::TranslationFailed {
                message: "unexpected backend response format".to_string(),
            })?;

        Ok(content.trim().to_string())
    }
}

#[async_trait]
impl Translator for HttpTranslator {
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<Translation> {
        let prompt = translation_prompt(text, source_lang, target_lang);
        // Low temperature for consistent translations.
        let translated_text = self.chat(Some(SYSTEM_PROMPT), prompt, 0.3, 1000).await?;

        Ok(Translation {
            translated_text,
            source_lang: source_lang.to_string(),
            target_lang: target_lang.to_string(),
            original_text: text.to_string(),
        })
    }
}

fn translation_prompt(text: &str, source_lang: &str, target_lang: &str) -> String {
    format!(
        "You are a professional medical translator. Translate the following text from {source_lang} to {target_lang}.\n\
         Ensure medical terminology is accurate and culturally appropriate for healthcare contexts.\n\
         Maintain the tone and urgency of the original message.\n\n\
         Text to translate: \"{text}\"\n\n\
         Provide only the translation without any additional explanation."
    )
}
