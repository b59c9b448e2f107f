//! End-to-end session tests over mock boundaries: recognize → debounce →
//! translate → speak, driven through the controller handle exactly as an
//! embedding frontend would.

use converso::{
    ControllerConfig, MockAudioOutput, MockSpeechEngine, MockSynthesizer, MockTranslator,
    PipelineController, PipelineState, StatusKind,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

async fn wait_for(
    rx: &mut watch::Receiver<PipelineState>,
    predicate: impl Fn(&PipelineState) -> bool,
) -> PipelineState {
    loop {
        let state = rx.borrow_and_update().clone();
        if predicate(&state) {
            return state;
        }
        rx.changed()
            .await
            .expect("controller terminated before condition was met");
    }
}

#[tokio::test(start_paused = true)]
async fn english_to_spanish_conversation_end_to_end() {
    let engine = Arc::new(MockSpeechEngine::new());
    let translator = Arc::new(MockTranslator::new().with_response("Hola"));
    let synthesizer = Arc::new(MockSynthesizer::new().with_audio(vec![0xff, 0xfb, 0x90]));
    let output = Arc::new(MockAudioOutput::new().with_latency(Duration::from_secs(2)));

    let handle = PipelineController::spawn(
        ControllerConfig::default(),
        engine.clone(),
        translator.clone(),
        synthesizer.clone(),
        output.clone(),
    );
    let mut rx = handle.watch_state();

    // Start listening in English → Spanish.
    handle.start_listening();
    let state = wait_for(&mut rx, |s| s.listening).await;
    assert_eq!(state.source_language, "English");
    assert_eq!(state.target_language, "Spanish");
    assert_eq!(engine.begun_locales(), vec!["en-US".to_string()]);

    // The recognizer guesses, then commits.
    engine.emit_interim("Hel");
    let state = wait_for(&mut rx, |s| s.transcript.interim_text == "Hel").await;
    assert_eq!(state.transcript.final_text, "");

    engine.emit_final("Hello there ");
    let state = wait_for(&mut rx, |s| !s.transcript.final_text.is_empty()).await;
    assert_eq!(state.transcript.final_text, "Hello there");
    assert_eq!(state.transcript.interim_text, "");

    // After the debounce delay a single request goes out and lands.
    let state = wait_for(&mut rx, |s| s.translated_text == "Hola").await;
    let status = state.status.expect("success status");
    assert_eq!(status.kind, StatusKind::Success);
    assert_eq!(status.message, "Translation complete");

    let calls = translator.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].text, "Hello there");
    assert_eq!(calls[0].source_lang, "English");
    assert_eq!(calls[0].target_lang, "Spanish");

    // The success status auto-clears.
    let state = wait_for(&mut rx, |s| s.status.is_none()).await;
    assert_eq!(state.translated_text, "Hola");

    // Read the translation aloud.
    handle.speak("Hola");
    wait_for(&mut rx, |s| s.speaking).await;
    let state = wait_for(&mut rx, |s| !s.speaking).await;
    assert_eq!(
        state.status.as_ref().map(|s| s.message.as_str()),
        Some("Audio playback completed")
    );
    assert_eq!(synthesizer.calls().len(), 1);
    assert_eq!(synthesizer.calls()[0].language_code, "es");
    assert_eq!(output.played(), vec![vec![0xff, 0xfb, 0x90]]);

    // Listening was never interrupted by playback.
    assert!(state.listening);

    handle.stop_listening();
    let state = wait_for(&mut rx, |s| !s.listening).await;
    assert_eq!(state.transcript.final_text, "Hello there");

    handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn double_swap_restores_the_conversation_exactly() {
    let engine = Arc::new(MockSpeechEngine::new());
    // Re-translations after each swap are scripted but never observed by the
    // final assertions: the second swap lands within the debounce window.
    let translator = Arc::new(MockTranslator::new().with_response("Hola"));
    let handle = PipelineController::spawn(
        ControllerConfig::default(),
        engine.clone(),
        translator.clone(),
        Arc::new(MockSynthesizer::new()),
        Arc::new(MockAudioOutput::new()),
    );
    let mut rx = handle.watch_state();

    handle.start_listening();
    wait_for(&mut rx, |s| s.listening).await;
    engine.emit_final("Hello there");
    wait_for(&mut rx, |s| s.translated_text == "Hola").await;

    handle.swap();
    let state = wait_for(&mut rx, |s| s.source_language == "Spanish").await;
    assert_eq!(state.transcript.final_text, "Hola");
    assert_eq!(state.translated_text, "Hello there");

    handle.swap();
    let state = wait_for(&mut rx, |s| s.source_language == "English").await;
    assert_eq!(state.target_language, "Spanish");
    assert_eq!(state.transcript.final_text, "Hello there");
    assert_eq!(state.translated_text, "Hola");

    handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn translation_failure_keeps_previous_text_and_recovers() {
    let engine = Arc::new(MockSpeechEngine::new());
    let translator = Arc::new(
        MockTranslator::new()
            .with_response("Hola")
            .with_error("backend returned status 502")
            .with_response("Hola amigo"),
    );
    let handle = PipelineController::spawn(
        ControllerConfig::default(),
        engine.clone(),
        translator.clone(),
        Arc::new(MockSynthesizer::new()),
        Arc::new(MockAudioOutput::new()),
    );
    let mut rx = handle.watch_state();

    handle.start_listening();
    wait_for(&mut rx, |s| s.listening).await;

    engine.emit_final("Hello");
    wait_for(&mut rx, |s| s.translated_text == "Hola").await;

    // The next fragment triggers a cycle that fails: the old translation
    // stays visible and the failure is surfaced.
    engine.emit_final("friend");
    let state = wait_for(&mut rx, |s| {
        s.status
            .as_ref()
            .is_some_and(|status| status.kind == StatusKind::Error)
    })
    .await;
    assert_eq!(state.translated_text, "Hola");
    assert!(
        state
            .status
            .as_ref()
            .is_some_and(|status| status.message.contains("backend returned status 502"))
    );

    // No automatic retry; the next change re-triggers naturally.
    engine.emit_final("of mine");
    let state = wait_for(&mut rx, |s| s.translated_text == "Hola amigo").await;
    assert_eq!(state.transcript.final_text, "Hello friend of mine");
    assert_eq!(translator.calls().len(), 3);

    handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn clear_resets_the_conversation_mid_session() {
    let engine = Arc::new(MockSpeechEngine::new());
    let handle = PipelineController::spawn(
        ControllerConfig::default(),
        engine.clone(),
        Arc::new(MockTranslator::new().with_response("Hola")),
        Arc::new(MockSynthesizer::new()),
        Arc::new(MockAudioOutput::new()),
    );
    let mut rx = handle.watch_state();

    handle.start_listening();
    wait_for(&mut rx, |s| s.listening).await;
    engine.emit_final("Hello");
    wait_for(&mut rx, |s| s.translated_text == "Hola").await;

    handle.clear();
    let state = wait_for(&mut rx, |s| s.transcript.final_text.is_empty()).await;
    assert_eq!(state.translated_text, "");
    assert!(state.listening, "clear is independent of listening state");

    // The session continues accumulating from scratch.
    engine.emit_final("Fresh start");
    let state = wait_for(&mut rx, |s| !s.transcript.final_text.is_empty()).await;
    assert_eq!(state.transcript.final_text, "Fresh start");

    handle.shutdown().await;
}
