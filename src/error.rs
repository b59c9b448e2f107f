//! Error types for converso.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConversoError {
    // Recognition errors
    #[error("Speech recognition is not supported on this platform")]
    PlatformUnsupported,

    #[error("Speech recognition error: {message}")]
    Recognition { message: String },

    // Translation errors
    #[error("Translation failed: {message}")]
    TranslationFailed { message: String },

    // Synthesis and playback errors
    #[error("Speech synthesis failed: {message}")]
    SynthesisFailed { message: String },

    #[error("Audio playback failed: {message}")]
    PlaybackFailed { message: String },

    /// A speak request was rejected because a playback session is already
    /// Loading or Playing. A precondition violation, not a fault.
    #[error("Audio playback already in progress")]
    Busy,

    #[error("Cannot speak empty text")]
    EmptySpeechText,

    #[error("Text exceeds maximum length of {limit} characters")]
    TextTooLong { limit: usize },

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    // General I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Generic error for cases not covered above
    #[error("{0}")]
    Other(String),
}

// Type alias for convenience
pub type Result<T> = std::result::Result<T, ConversoError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_platform_unsupported_display() {
        let error = ConversoError::PlatformUnsupported;
        assert_eq!(
            error.to_string(),
            "Speech recognition is not supported on this platform"
        );
    }

    #[test]
    fn test_recognition_display() {
        let error = ConversoError::Recognition {
            message: "no-speech".to_string(),
        };
        assert_eq!(error.to_string(), "Speech recognition error: no-speech");
    }

    #[test]
    fn test_translation_failed_display() {
        let error = ConversoError::TranslationFailed {
            message: "upstream timeout".to_string(),
        };
        assert_eq!(error.to_string(), "Translation failed: upstream timeout");
    }

    #[test]
    fn test_synthesis_failed_display() {
        let error = ConversoError::SynthesisFailed {
            message: "voice not available".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Speech synthesis failed: voice not available"
        );
    }

    #[test]
    fn test_playback_failed_display() {
        let error = ConversoError::PlaybackFailed {
            message: "decode error".to_string(),
        };
        assert_eq!(error.to_string(), "Audio playback failed: decode error");
    }

    #[test]
    fn test_busy_display() {
        assert_eq!(
            ConversoError::Busy.to_string(),
            "Audio playback already in progress"
        );
    }

    #[test]
    fn test_empty_speech_text_display() {
        assert_eq!(
            ConversoError::EmptySpeechText.to_string(),
            "Cannot speak empty text"
        );
    }

    #[test]
    fn test_text_too_long_display() {
        let error = ConversoError::TextTooLong { limit: 4096 };
        assert_eq!(
            error.to_string(),
            "Text exceeds maximum length of 4096 characters"
        );
    }

    #[test]
    fn test_other_display() {
        let error = ConversoError::Other("unexpected error".to_string());
        assert_eq!(error.to_string(), "unexpected error");
    }

    #[test]
    fn test_from_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let error: ConversoError = io_error.into();
        assert!(error.to_string().contains("file not found"));
    }

    #[test]
    fn test_from_toml_error() {
        let toml_str = "invalid = toml = syntax";
        let toml_error = toml::from_str::<toml::Value>(toml_str).unwrap_err();
        let error: ConversoError = toml_error.into();
        assert!(error.to_string().contains("Configuration error"));
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_result() -> Result<i32> {
            Ok(42)
        }
        assert_eq!(returns_result().unwrap(), 42);

        fn returns_error() -> Result<i32> {
            Err(ConversoError::Busy)
        }
        assert!(returns_error().is_err());
    }

    #[test]
    fn test_error_source_chain_io() {
        let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let error: ConversoError = io_error.into();

        let error_trait: &dyn std::error::Error = &error;
        assert!(error_trait.source().is_some());
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<ConversoError>();
        assert_sync::<ConversoError>();
    }

    #[test]
    fn test_error_debug_format() {
        let error = ConversoError::TextTooLong { limit: 5000 };
        let debug_str = format!("{:?}", error);
        assert!(debug_str.contains("TextTooLong"));
        assert!(debug_str.contains("5000"));
    }
}
