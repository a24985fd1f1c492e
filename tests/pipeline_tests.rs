// Integration tests for the relay pipeline.
//
// These verify the exactly-one-outcome contract per audio event, strict
// stage ordering, and that invalid payloads never reach a provider.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::Result;
use base64::Engine;
use voice_relay::{
    OpenAiTranscriber, OpenAiTranslator, Pipeline, PipelineError, Transcriber,
    TranscriptionConfig, TranslationConfig, Translator,
};

/// Build a 2-second 16kHz mono WAV and return it base64-encoded.
fn sample_wav_base64() -> String {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 16000,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = std::io::Cursor::new(Vec::new());
    let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
    for i in 0..32000 {
        let sample = ((i as f32 * 0.05).sin() * 8000.0) as i16;
        writer.write_sample(sample).unwrap();
    }
    writer.finalize().unwrap();

    base64::engine::general_purpose::STANDARD.encode(cursor.into_inner())
}

struct FakeTranscriber {
    calls: AtomicUsize,
    response: Result<String, String>,
}

impl FakeTranscriber {
    fn new(response: Result<&str, &str>) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            response: response.map(str::to_string).map_err(str::to_string),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl Transcriber for FakeTranscriber {
    async fn transcribe(&self, _wav: &[u8]) -> Result<String, PipelineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.response.clone().map_err(PipelineError::Transcription)
    }
}

struct FakeTranslator {
    calls: AtomicUsize,
    response: Result<String, String>,
}

impl FakeTranslator {
    fn new(response: Result<&str, &str>) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            response: response.map(str::to_string).map_err(str::to_string),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl Translator for FakeTranslator {
    async fn translate(
        &self,
        _text: &str,
        _target_language: &str,
    ) -> Result<String, PipelineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.response.clone().map_err(PipelineError::Translation)
    }
}

#[tokio::test]
async fn test_completed_event_yields_translation() -> Result<()> {
    let transcriber = FakeTranscriber::new(Ok("Hello"));
    let translator = FakeTranslator::new(Ok("Hola"));
    let pipeline = Pipeline::new(transcriber.clone(), translator.clone());

    let result = pipeline.process(&sample_wav_base64(), "es").await?;

    assert_eq!(result.original, "Hello");
    assert_eq!(result.translated, "Hola");
    assert_eq!(result.language, "es");
    assert_eq!(transcriber.calls(), 1, "Transcriber should be called once");
    assert_eq!(translator.calls(), 1, "Translator should be called once");

    Ok(())
}

#[tokio::test]
async fn test_transcription_failure_short_circuits() -> Result<()> {
    let transcriber = FakeTranscriber::new(Err("request timed out"));
    let translator = FakeTranslator::new(Ok("Hola"));
    let pipeline = Pipeline::new(transcriber.clone(), translator.clone());

    let err = pipeline
        .process(&sample_wav_base64(), "es")
        .await
        .expect_err("pipeline should fail when transcription fails");

    assert!(
        matches!(err, PipelineError::Transcription(_)),
        "Expected a transcription error, got: {:?}",
        err
    );
    assert!(
        err.to_string().contains("transcription failed"),
        "Error message should indicate transcription failure: {}",
        err
    );
    assert_eq!(
        translator.calls(),
        0,
        "Translator must never run after a transcription failure"
    );

    Ok(())
}

#[tokio::test]
async fn test_translation_failure_after_transcription() -> Result<()> {
    let transcriber = FakeTranscriber::new(Ok("Hello"));
    let translator = FakeTranslator::new(Err("provider returned 500"));
    let pipeline = Pipeline::new(transcriber.clone(), translator.clone());

    let err = pipeline
        .process(&sample_wav_base64(), "fr")
        .await
        .expect_err("pipeline should fail when translation fails");

    assert!(matches!(err, PipelineError::Translation(_)));
    assert_eq!(transcriber.calls(), 1, "Transcription ran before the failure");
    assert_eq!(translator.calls(), 1);

    Ok(())
}

#[tokio::test]
async fn test_undecodable_payload_never_reaches_providers() -> Result<()> {
    let transcriber = FakeTranscriber::new(Ok("Hello"));
    let translator = FakeTranslator::new(Ok("Hola"));
    let pipeline = Pipeline::new(transcriber.clone(), translator.clone());

    let not_wav = base64::engine::general_purpose::STANDARD.encode(b"definitely not audio");
    for payload in ["", "   ", "%%%not-base64%%%", not_wav.as_str()] {
        let err = pipeline
            .process(payload, "es")
            .await
            .expect_err("invalid payload should fail");
        assert!(
            matches!(err, PipelineError::Decoding(_)),
            "Expected a decoding error for {:?}, got: {:?}",
            payload,
            err
        );
    }

    assert_eq!(transcriber.calls(), 0, "No provider call for invalid payloads");
    assert_eq!(translator.calls(), 0, "No provider call for invalid payloads");

    Ok(())
}

#[tokio::test]
async fn test_language_code_echoed_verbatim() -> Result<()> {
    let transcriber = FakeTranscriber::new(Ok("Hello"));
    let translator = FakeTranslator::new(Ok("qaplá"));
    let pipeline = Pipeline::new(transcriber.clone(), translator.clone());

    let result = pipeline.process(&sample_wav_base64(), "xx-klingon").await?;

    assert_eq!(
        result.language, "xx-klingon",
        "Unknown codes pass through untouched"
    );

    Ok(())
}

#[tokio::test]
async fn test_repeated_submission_runs_independent_calls() -> Result<()> {
    let transcriber = FakeTranscriber::new(Ok("Hello"));
    let translator = FakeTranslator::new(Ok("Hola"));
    let pipeline = Pipeline::new(transcriber.clone(), translator.clone());

    let audio = sample_wav_base64();
    let first = pipeline.process(&audio, "es").await?;
    let second = pipeline.process(&audio, "es").await?;

    // Providers are non-deterministic in production, so the contract is
    // two well-formed outcomes and two independent call pairs, not equal
    // results.
    assert_eq!(first.language, "es");
    assert_eq!(second.language, "es");
    assert_eq!(transcriber.calls(), 2);
    assert_eq!(translator.calls(), 2);

    Ok(())
}

#[test]
fn test_missing_credential_fails_at_construction() {
    // Defaults carry no api_key; both clients must refuse to build before
    // any request could be issued.
    let err = OpenAiTranscriber::new(&TranscriptionConfig::default())
        .err()
        .expect("transcriber must not build without a credential");
    assert!(
        err.to_string().contains("transcription API key"),
        "Error should name the missing credential: {}",
        err
    );

    let err = OpenAiTranslator::new(&TranslationConfig::default())
        .err()
        .expect("translator must not build without a credential");
    assert!(
        err.to_string().contains("translation API key"),
        "Error should name the missing credential: {}",
        err
    );

    // An empty string counts as absent.
    let config = TranscriptionConfig {
        api_key: Some(String::new()),
        ..Default::default()
    };
    assert!(OpenAiTranscriber::new(&config).is_err());
}

#[tokio::test]
async fn test_concurrent_events_complete_independently() -> Result<()> {
    let transcriber = FakeTranscriber::new(Ok("Hello"));
    let translator = FakeTranslator::new(Ok("Hola"));
    let pipeline = Pipeline::new(transcriber.clone(), translator.clone());

    let audio = sample_wav_base64();
    let (first, second) = tokio::join!(
        pipeline.process(&audio, "es"),
        pipeline.process(&audio, "fr")
    );

    let first = first?;
    let second = second?;
    assert_eq!(first.language, "es");
    assert_eq!(second.language, "fr");
    assert_eq!(transcriber.calls(), 2);
    assert_eq!(translator.calls(), 2);

    Ok(())
}
