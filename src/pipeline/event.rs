//! Events delivered to the controller by the pipeline components.

use crate::recognition::adapter::RecognitionEvent;

/// Progress of one translation cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum TranslationUpdate {
    /// A request was submitted; a result or failure will follow unless it
    /// is superseded.
    Started,
    /// The latest submitted request completed; `text` replaces the visible
    /// translation.
    Applied { text: String },
    /// The latest submitted request failed; the previous translation is
    /// retained.
    Failed { message: String },
}

/// Progress of one playback session.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackUpdate {
    /// Synthesis completed and playback began.
    Started,
    /// Playback reached natural end-of-audio.
    Finished,
    /// Synthesis, decode, or playback failed.
    Failed { message: String },
}

/// Everything the controller reacts to besides commands and timers.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineEvent {
    /// One recognizer callback.
    Recognition(RecognitionEvent),
    /// The listening session terminated. Exactly one per session.
    RecognitionEnded,
    /// Engine runtime failure; the session may or may not continue.
    RecognitionError(String),
    Translation(TranslationUpdate),
    Playback(PlaybackUpdate),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_compare_by_value() {
        assert_eq!(
            PipelineEvent::Translation(TranslationUpdate::Started),
            PipelineEvent::Translation(TranslationUpdate::Started)
        );
        assert_ne!(
            PipelineEvent::Playback(PlaybackUpdate::Finished),
            PipelineEvent::Playback(PlaybackUpdate::Started)
        );
    }

    #[test]
    fn test_failed_updates_carry_messages() {
        let update = TranslationUpdate::Failed {
            message: "backend returned status 500".to_string(),
        };
        match update {
            TranslationUpdate::Failed { message } => {
                assert!(message.contains("500"));
            }
            _ => unreachable!(),
        }
    }
}
