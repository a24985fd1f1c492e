//! Outbound provider adapters.
//!
//! Each adapter issues one request per call to an opaque remote service:
//! speech-to-text behind [`Transcriber`], language-model translation behind
//! [`Translator`]. The traits are the substitution seam for tests.

mod transcription;
mod translation;

pub use transcription::OpenAiTranscriber;
pub use translation::{language_name, OpenAiTranslator};

use crate::error::PipelineError;

/// Speech-to-text provider boundary.
#[async_trait::async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe one WAV-encoded recording into plain text.
    async fn transcribe(&self, wav: &[u8]) -> Result<String, PipelineError>;
}

/// Text translation provider boundary.
#[async_trait::async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` into the language named by `target_language`.
    async fn translate(&self, text: &str, target_language: &str)
        -> Result<String, PipelineError>;
}

/// Pull the provider-supplied message out of an OpenAI-style error body,
/// when there is one.
pub(crate) fn provider_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("error")?
        .get("message")?
        .as_str()
        .map(str::to_string)
}
