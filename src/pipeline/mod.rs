//! Pipeline orchestration.
//!
//! The controller task owns all mutable pipeline state and consumes every
//! component's events from a single channel, so each transition is one
//! atomic step with no partial state observable in between. Snapshots are
//! published through a watch channel after every transition.

pub mod controller;
pub mod event;
pub mod state;

pub use controller::{ControllerConfig, ControllerHandle, PipelineController};
pub use event::{PipelineEvent, PlaybackUpdate, TranslationUpdate};
pub use state::{PipelineState, Status, StatusKind, TranscriptState};
