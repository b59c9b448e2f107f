//! Translation call boundary.

use crate::error::{ConversoError, Result};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// A completed translation, echoing the request it answered.
#[derive(Debug, Clone, PartialEq)]
pub struct Translation {
    pub translated_text: String,
    pub source_lang: String,
    pub target_lang: String,
    pub original_text: String,
}

/// Trait for text translation between two logical languages.
///
/// This trait allows swapping implementations (real HTTP backend vs mock).
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` from `source_lang` to `target_lang`.
    ///
    /// Fails with a message-bearing error; callers enforce input limits
    /// before invocation.
    async fn translate(&self, text: &str, source_lang: &str, target_lang: &str)
    -> Result<Translation>;
}

/// One recorded call against a [`MockTranslator`].
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationCall {
    pub text: String,
    pub source_lang: String,
    pub target_lang: String,
}

/// Mock translator for testing.
///
/// Responses and errors are scripted per call with `with_response` /
/// `with_error`; the last entry repeats for further calls. Per-call
/// latencies simulate slow or out-of-order network completion.
#[derive(Debug, Default)]
pub struct MockTranslator {
    script: Vec<std::result::Result<String, String>>,
    latencies: Vec<Duration>,
    counter: AtomicUsize,
    calls: Mutex<Vec<TranslationCall>>,
}

impl MockTranslator {
    /// Creates a mock that answers every call with "mock translation".
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a successful response to the script.
    pub fn with_response(mut self, translated: &str) -> Self {
        self.script.push(Ok(translated.to_string()));
        self
    }

    /// Appends a failure to the script.
    pub fn with_error(mut self, message: &str) -> Self {
        self.script.push(Err(message.to_string()));
        self
    }

    /// Appends a per-call latency; the last entry repeats for further calls.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latencies.push(latency);
        self
    }

    /// Calls made so far, in order.
    pub fn calls(&self) -> Vec<TranslationCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn scripted(&self, index: usize) -> std::result::Result<String, String> {
        self.script
            .get(index)
            .or_else(|| self.script.last())
            .cloned()
            .unwrap_or_else(|| Ok("mock translation".to_string()))
    }

    fn latency(&self, index: usize) -> Option<Duration> {
        self.latencies
            .get(index)
            .or_else(|| self.latencies.last())
            .copied()
    }
}

#[async_trait]
impl Translator for MockTranslator {
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<Translation> {
        let index = self.counter.fetch_add(1, Ordering::SeqCst);
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(TranslationCall {
                text: text.to_string(),
                source_lang: source_lang.to_string(),
                target_lang: target_lang.to_string(),
            });

        if let Some(latency) = self.latency(index) {
            tokio::time::sleep(latency).await;
        }

        match self.scripted(index) {
            Ok(translated_text) => Ok(Translation {
                translated_text,
                source_lang: source_lang.to_string(),
                target_lang: target_lang.to_string(),
                original_text: text.to_string(),
            }),
            Err(message) => Err(ConversoError::TranslationFailed { message }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_translator_default_response() {
        let translator = MockTranslator::new();
        let result = translator
            .translate("hello", "English", "Spanish")
            .await
            .expect("translate");
        assert_eq!(result.translated_text, "mock translation");
        assert_eq!(result.original_text, "hello");
        assert_eq!(result.source_lang, "English");
        assert_eq!(result.target_lang, "Spanish");
    }

    #[tokio::test]
    async fn test_mock_translator_scripted_responses_in_order() {
        let translator = MockTranslator::new()
            .with_response("uno")
            .with_response("dos");

        let first = translator.translate("one", "English", "Spanish").await;
        let second = translator.translate("two", "English", "Spanish").await;
        let third = translator.translate("three", "English", "Spanish").await;

        assert_eq!(first.expect("first").translated_text, "uno");
        assert_eq!(second.expect("second").translated_text, "dos");
        // Last script entry repeats.
        assert_eq!(third.expect("third").translated_text, "dos");
    }

    #[tokio::test]
    async fn test_mock_translator_scripted_error() {
        let translator = MockTranslator::new().with_error("upstream down");
        let result = translator.translate("hello", "English", "Spanish").await;
        assert!(matches!(
            result,
            Err(ConversoError::TranslationFailed { message }) if message == "upstream down"
        ));
    }

    #[tokio::test]
    async fn test_mock_translator_error_then_success() {
        let translator = MockTranslator::new()
            .with_error("flaky")
            .with_response("recovered");

        assert!(translator.translate("a", "English", "Spanish").await.is_err());
        let second = translator
            .translate("a", "English", "Spanish")
            .await
            .expect("second call succeeds");
        assert_eq!(second.translated_text, "recovered");
    }

    #[tokio::test]
    async fn test_mock_translator_records_calls() {
        let translator = MockTranslator::new();
        translator
            .translate("first", "English", "French")
            .await
            .expect("translate");
        translator
            .translate("second", "French", "English")
            .await
            .expect("translate");

        let calls = translator.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].text, "first");
        assert_eq!(calls[0].target_lang, "French");
        assert_eq!(calls[1].source_lang, "French");
    }

    #[tokio::test(start_paused = true)]
    async fn test_mock_translator_latency_is_applied() {
        let translator = MockTranslator::new().with_latency(Duration::from_millis(500));

        let started = tokio::time::Instant::now();
        translator
            .translate("slow", "English", "Spanish")
            .await
            .expect("translate");
        assert!(started.elapsed() >= Duration::from_millis(500));
    }

    #[tokio::test]
    async fn test_translator_trait_is_object_safe() {
        let translator: Box<dyn Translator> = Box::new(MockTranslator::new().with_response("ok"));
        let result = translator
            .translate("text", "English", "German")
            .await
            .expect("translate");
        assert_eq!(result.translated_text, "ok");
    }
}
