use std::time::Duration;

use anyhow::{Context, Result};
use serde_json::{json, Value};
use tracing::{info, warn};

use super::{provider_error_message, Translator};
use crate::config::TranslationConfig;
use crate::error::PipelineError;

const SYSTEM_PROMPT: &str =
    "You are a translation engine. Translate the user's text and respond with \
     only the translated text, nothing else.";

/// Map a short language code to a human-readable name for the prompt.
/// Unknown codes pass through verbatim.
pub fn language_name(code: &str) -> &str {
    match code.to_ascii_lowercase().as_str() {
        "en" => "English",
        "es" => "Spanish",
        "fr" => "French",
        "de" => "German",
        "it" => "Italian",
        "pt" => "Portuguese",
        "nl" => "Dutch",
        "pl" => "Polish",
        "ru" => "Russian",
        "ja" => "Japanese",
        "ko" => "Korean",
        "zh" => "Chinese",
        "ar" => "Arabic",
        "hi" => "Hindi",
        "tr" => "Turkish",
        "vi" => "Vietnamese",
        _ => code,
    }
}

/// Client for an OpenAI-compatible `chat/completions` endpoint.
///
/// One JSON POST per call with a fixed system instruction and the source
/// text embedded in the user message. Sampling leans deterministic and the
/// completion is bounded; the first choice's content is returned verbatim.
/// Provider framing text, when a model adds any, is not stripped.
pub struct OpenAiTranslator {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiTranslator {
    /// Build the client from configuration. Fails immediately when no
    /// credential is configured, before any network call can happen.
    pub fn new(config: &TranslationConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.is_empty())
            .context("translation API key is not configured")?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build translation HTTP client")?;

        Ok(Self {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }
}

#[async_trait::async_trait]
impl Translator for OpenAiTranslator {
    async fn translate(
        &self,
        text: &str,
        target_language: &str,
    ) -> Result<String, PipelineError> {
        if text.is_empty() {
            return Err(PipelineError::Translation(
                "empty source text".to_string(),
            ));
        }

        let language = language_name(target_language);
        let request = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                {
                    "role": "user",
                    "content": format!("Translate the following text into {}:\n\n{}", language, text),
                },
            ],
            "temperature": 0.2,
            "max_tokens": 1000,
        });

        let url = format!("{}/chat/completions", self.base_url);
        info!("Requesting translation into {} ({} chars)", language, text.len());

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    PipelineError::Translation("request timed out".to_string())
                } else {
                    PipelineError::Translation(format!("request failed: {}", e))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PipelineError::Translation(format!("unreadable response: {}", e)))?;

        if !status.is_success() {
            let message = provider_error_message(&body)
                .unwrap_or_else(|| format!("provider returned {}", status));
            warn!("Translation provider error: {}", message);
            return Err(PipelineError::Translation(message));
        }

        let envelope: Value = serde_json::from_str(&body)
            .map_err(|e| PipelineError::Translation(format!("malformed response: {}", e)))?;

        envelope
            .get("choices")
            .and_then(|choices| choices.get(0))
            .and_then(|choice| choice.get("message"))
            .and_then(|message| message.get("content"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| {
                PipelineError::Translation("provider response had no completion".to_string())
            })
    }
}
