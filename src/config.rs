use anyhow::Result;
use serde::Deserialize;

/// Service configuration, built once at startup and injected into the
/// provider clients. Credentials come from the process environment
/// (`VOICE_RELAY_TRANSCRIPTION__API_KEY`, `VOICE_RELAY_TRANSLATION__API_KEY`),
/// with an optional config file for everything else.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub service: ServiceConfig,
    pub transcription: TranscriptionConfig,
    pub translation: TranslationConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Bind address for the HTTP/WebSocket server
    pub bind: String,

    /// Listen port
    pub port: u16,
}

/// Settings for the speech-to-text provider (OpenAI-compatible).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TranscriptionConfig {
    /// Bearer credential; required before any transcription call
    pub api_key: Option<String>,

    /// API base URL (the `/audio/transcriptions` path is appended)
    pub base_url: String,

    /// Model identifier sent with every request
    pub model: String,

    /// Upper bound on one transcription request
    pub timeout_secs: u64,
}

/// Settings for the translation provider (OpenAI-compatible chat completions).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TranslationConfig {
    /// Bearer credential; required before any translation call
    pub api_key: Option<String>,

    /// API base URL (the `/chat/completions` path is appended)
    pub base_url: String,

    /// Model identifier sent with every request
    pub model: String,

    /// Upper bound on one translation request
    pub timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.openai.com/v1".to_string(),
            model: "whisper-1".to_string(),
            timeout_secs: 60,
        }
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service: ServiceConfig::default(),
            transcription: TranscriptionConfig::default(),
            translation: TranslationConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from an optional file plus environment overrides.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let mut builder = config::Config::builder();

        builder = match path {
            Some(path) => builder.add_source(config::File::with_name(path)),
            None => {
                builder.add_source(config::File::with_name("config/voice-relay").required(false))
            }
        };

        // VOICE_RELAY_TRANSLATION__MODEL etc. override file values
        builder =
            builder.add_source(config::Environment::with_prefix("VOICE_RELAY").separator("__"));

        let settings = builder.build()?;
        Ok(settings.try_deserialize()?)
    }
}
