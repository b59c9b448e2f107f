//! Trailing-edge debounce and sequence supersession for translation requests.

use crate::defaults;
use crate::error::{ConversoError, Result};
use crate::pipeline::event::{PipelineEvent, TranslationUpdate};
use crate::translation::translator::{Translation, Translator};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;

/// A snapshot of the transcript and language pair at change time.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationJob {
    pub text: String,
    pub source_lang: String,
    pub target_lang: String,
}

enum Input {
    Changed(TranslationJob),
    Reset,
}

struct Outcome {
    sequence: u64,
    result: Result<Translation>,
}

/// Debounced front of the [`Translator`] boundary.
///
/// Every transcript or language change re-arms a single trailing-edge timer;
/// when it fires, the latest snapshot is submitted with a strictly
/// increasing sequence number. A completed call is forwarded only when its
/// sequence is still the latest submitted one, so overlapping calls may
/// finish in any order without a stale result ever reaching the pipeline.
///
/// There is no request cancellation: superseded calls run to completion and
/// their outcomes are dropped silently. `reset` invalidates every in-flight
/// request and disarms the pending timer, used on clear/swap.
#[derive(Debug)]
pub struct DebouncedTranslator {
    input: mpsc::UnboundedSender<Input>,
}

impl DebouncedTranslator {
    /// Spawns the debounce task. Dropping the returned handle shuts it down.
    pub fn spawn(
        translator: Arc<dyn Translator>,
        delay: Duration,
        events: mpsc::UnboundedSender<PipelineEvent>,
    ) -> Self {
        let (input_tx, input_rx) = mpsc::unbounded_channel();
        tokio::spawn(run(input_rx, translator, delay, events));
        Self { input: input_tx }
    }

    /// Notifies the debouncer of a transcript or language change.
    pub fn text_changed(&self, job: TranslationJob) {
        self.input.send(Input::Changed(job)).ok();
    }

    /// Disarms the pending timer and invalidates all in-flight requests.
    pub fn reset(&self) {
        self.input.send(Input::Reset).ok();
    }
}

/// Timer deadline used while no timer is armed; the branch guard keeps it
/// from ever being polled.
fn far_future() -> Instant {
    Instant::now() + Duration::from_secs(86_400)
}

async fn run(
    mut input: mpsc::UnboundedReceiver<Input>,
    translator: Arc<dyn Translator>,
    delay: Duration,
    events: mpsc::UnboundedSender<PipelineEvent>,
) {
    let mut pending: Option<TranslationJob> = None;
    let mut deadline: Option<Instant> = None;
    let mut counter: u64 = 0;
    // Sequence of the request whose outcome may still be applied.
    let mut active: Option<u64> = None;

    // Held open for the lifetime of the loop so recv never yields None.
    let (outcome_tx, mut outcome_rx) = mpsc::unbounded_channel::<Outcome>();

    loop {
        tokio::select! {
            message = input.recv() => match message {
                Some(Input::Changed(job)) => {
                    pending = Some(job);
                    deadline = Some(Instant::now() + delay);
                }
                Some(Input::Reset) => {
                    pending = None;
                    deadline = None;
                    active = None;
                }
                None => break,
            },
            Some(outcome) = outcome_rx.recv() => {
                if active != Some(outcome.sequence) {
                    // Superseded or reset: dropped silently, success or not.
                    continue;
                }
                let update = match outcome.result {
                    Ok(translation) => TranslationUpdate::Applied {
                        text: translation.translated_text,
                    },
                    Err(error) => TranslationUpdate::Failed {
                        message: error.to_string(),
                    },
                };
                events.send(PipelineEvent::Translation(update)).ok();
            },
            _ = tokio::time::sleep_until(deadline.unwrap_or_else(far_future)),
                if deadline.is_some() =>
            {
                deadline = None;
                let Some(job) = pending.take() else { continue };
                if job.text.trim().is_empty() {
                    continue;
                }
                if job.text.chars().count() > defaults::MAX_TRANSLATION_CHARS {
                    let error = ConversoError::TextTooLong {
                        limit: defaults::MAX_TRANSLATION_CHARS,
                    };
                    events
                        .send(PipelineEvent::Translation(TranslationUpdate::Failed {
                            message: error.to_string(),
                        }))
                        .ok();
                    continue;
                }

                counter += 1;
                let sequence = counter;
                active = Some(sequence);
                events
                    .send(PipelineEvent::Translation(TranslationUpdate::Started))
                    .ok();

                let translator = translator.clone();
                let outcome_tx = outcome_tx.clone();
                tokio::spawn(async move {
                    let result = translator
                        .translate(&job.text, &job.source_lang, &job.target_lang)
                        .await;
                    outcome_tx.send(Outcome { sequence, result }).ok();
                });
            }
        }
    }
}
