use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use tracing::{info, warn};

use super::{provider_error_message, Transcriber};
use crate::config::TranscriptionConfig;
use crate::error::PipelineError;

/// Client for an OpenAI-compatible `audio/transcriptions` endpoint.
///
/// One multipart POST per call: the WAV bytes as the `file` part plus the
/// configured model identifier. The response envelope's `text` field is the
/// transcript.
pub struct OpenAiTranscriber {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiTranscriber {
    /// Build the client from configuration. Fails immediately when no
    /// credential is configured, before any network call can happen.
    pub fn new(config: &TranscriptionConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.is_empty())
            .context("transcription API key is not configured")?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build transcription HTTP client")?;

        Ok(Self {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }
}

#[async_trait::async_trait]
impl Transcriber for OpenAiTranscriber {
    async fn transcribe(&self, wav: &[u8]) -> Result<String, PipelineError> {
        if wav.is_empty() {
            return Err(PipelineError::Transcription(
                "empty audio payload".to_string(),
            ));
        }

        let file = Part::bytes(wav.to_vec())
            .file_name("audio.wav")
            .mime_str("audio/wav")
            .map_err(|e| PipelineError::Transcription(e.to_string()))?;
        let form = Form::new().part("file", file).text("model", self.model.clone());

        let url = format!("{}/audio/transcriptions", self.base_url);
        info!("Sending {} bytes of audio for transcription", wav.len());

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    PipelineError::Transcription("request timed out".to_string())
                } else {
                    PipelineError::Transcription(format!("request failed: {}", e))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PipelineError::Transcription(format!("unreadable response: {}", e)))?;

        if !status.is_success() {
            let message = provider_error_message(&body)
                .unwrap_or_else(|| format!("provider returned {}", status));
            warn!("Transcription provider error: {}", message);
            return Err(PipelineError::Transcription(message));
        }

        let envelope: Value = serde_json::from_str(&body)
            .map_err(|e| PipelineError::Transcription(format!("malformed response: {}", e)))?;

        envelope
            .get("text")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| {
                PipelineError::Transcription("provider response had no text field".to_string())
            })
    }
}
