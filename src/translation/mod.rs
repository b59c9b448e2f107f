//! Debounced translation of the accumulating transcript.
//!
//! The [`DebouncedTranslator`] coalesces bursts of transcript changes into
//! single requests against the [`Translator`] boundary and applies results
//! under a monotonic sequence-supersession rule: only the response for the
//! most recently submitted request ever reaches the pipeline.

pub mod debounce;
#[cfg(feature = "http")]
pub mod http;
pub mod translator;

pub use debounce::{DebouncedTranslator, TranslationJob};
#[cfg(feature = "http")]
pub use http::HttpTranslator;
pub use translator::{MockTranslator, Translation, TranslationCall, Translator};
