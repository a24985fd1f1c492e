use std::sync::Arc;

use tracing::info;

use crate::error::PipelineError;
use crate::protocol::decode_audio_payload;
use crate::providers::{Transcriber, Translator};

/// The outcome of one fully processed audio event. Immutable once emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    /// Transcript of the recording
    pub original: String,

    /// Translated text, provider output verbatim
    pub translated: String,

    /// The triggering event's target language code, echoed byte-for-byte
    pub language: String,
}

/// Per-event orchestrator: decode, transcribe, translate, in strict
/// sequence with no retries.
///
/// Concurrent events share nothing beyond the `Arc`'d clients, so any
/// number of them may run at once with no mutual ordering. Each caller
/// turns the single `Ok`/`Err` outcome into exactly one wire message.
pub struct Pipeline {
    transcriber: Arc<dyn Transcriber>,
    translator: Arc<dyn Translator>,
}

impl Pipeline {
    pub fn new(transcriber: Arc<dyn Transcriber>, translator: Arc<dyn Translator>) -> Self {
        Self {
            transcriber,
            translator,
        }
    }

    /// Process one audio event end-to-end. The first failing stage
    /// short-circuits the rest; an undecodable payload never reaches a
    /// provider.
    pub async fn process(
        &self,
        audio: &str,
        target_language: &str,
    ) -> Result<Translation, PipelineError> {
        let wav = decode_audio_payload(audio)?;

        let original = self.transcriber.transcribe(&wav).await?;
        info!(
            "Transcribed {} bytes of audio into {} chars",
            wav.len(),
            original.len()
        );

        let translated = self.translator.translate(&original, target_language).await?;
        info!("Translation into '{}' completed", target_language);

        Ok(Translation {
            original,
            translated,
            language: target_language.to_string(),
        })
    }
}
