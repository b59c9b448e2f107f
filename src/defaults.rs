//! Default configuration constants for converso.
//!
//! This module provides shared constants used across different configuration
//! types to ensure consistency and eliminate duplication.

use std::time::Duration;

/// Default trailing-edge debounce delay before a translation is submitted.
///
/// 1000ms lets a burst of recognized fragments settle into one request while
/// keeping latency low once the speaker pauses.
pub const DEBOUNCE_MS: u64 = 1000;

/// Default lifetime of a transient status message before it clears itself.
pub const STATUS_CLEAR_MS: u64 = 2000;

/// Maximum input length accepted by the translation call boundary.
///
/// Enforced by the caller before invocation; longer transcripts surface a
/// length error instead of a request.
pub const MAX_TRANSLATION_CHARS: usize = 5000;

/// Maximum input length accepted by the synthesis call boundary.
///
/// Enforced at the controller boundary; the player never truncates.
pub const MAX_SYNTHESIS_CHARS: usize = 4096;

/// Default source language when none is configured.
pub const DEFAULT_SOURCE_LANGUAGE: &str = "English";

/// Default target language when none is configured.
pub const DEFAULT_TARGET_LANGUAGE: &str = "Spanish";

/// Default base URL for the OpenAI-compatible API backing translation
/// and synthesis.
pub const DEFAULT_BASE_URL: &str = "https://api.perplexity.ai";

/// Default chat model used for translation, detection and enhancement.
pub const DEFAULT_TRANSLATION_MODEL: &str = "sonar-pro";

/// Default model used for speech synthesis.
pub const DEFAULT_SYNTHESIS_MODEL: &str = "tts-1";

/// Default synthesis speed. Slightly slower than natural for clarity.
pub const DEFAULT_SYNTHESIS_SPEED: f32 = 0.9;

/// Request timeout applied to translation and synthesis calls.
///
/// The transport timeout is the only timeout: an expired call is an
/// ordinary failure to the caller.
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// Debounce delay as a [`Duration`].
pub fn debounce_delay() -> Duration {
    Duration::from_millis(DEBOUNCE_MS)
}

/// Transient status lifetime as a [`Duration`].
pub fn status_clear_delay() -> Duration {
    Duration::from_millis(STATUS_CLEAR_MS)
}
