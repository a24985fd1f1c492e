use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

/// Messages a client sends over the session channel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// One finished recording, submitted for transcription + translation.
    Audio {
        /// Base64-encoded WAV bytes, raw or as a `data:` URL
        audio: String,

        /// Short language code ("es", "fr", ...); unknown codes pass
        /// through verbatim
        #[serde(rename = "targetLanguage")]
        target_language: String,
    },
}

/// Messages the server pushes back on the session channel. Exactly one of
/// these is emitted per inbound audio event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    Translation {
        original: String,
        translated: String,
        /// Echoes the triggering event's target language, byte-for-byte
        language: String,
    },
    Error {
        message: String,
    },
}

/// Decode an `audio` payload into WAV bytes.
///
/// Accepts raw base64 or a `data:` URL. The decoded bytes must parse as a
/// WAV stream; a payload this rejects never reaches a provider.
pub fn decode_audio_payload(audio: &str) -> Result<Vec<u8>, PipelineError> {
    let trimmed = audio.trim();
    if trimmed.is_empty() {
        return Err(PipelineError::Decoding("empty audio payload".to_string()));
    }

    // data:audio/wav;base64,<payload>
    let encoded = if trimmed.starts_with("data:") {
        trimmed
            .split_once(',')
            .map(|(_, payload)| payload)
            .ok_or_else(|| PipelineError::Decoding("malformed data URL".to_string()))?
    } else {
        trimmed
    };

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(encoded)
        .map_err(|e| PipelineError::Decoding(format!("invalid base64: {}", e)))?;

    // Validate the container before spending a provider call on it
    hound::WavReader::new(std::io::Cursor::new(&bytes))
        .map_err(|e| PipelineError::Decoding(format!("not a valid WAV stream: {}", e)))?;

    Ok(bytes)
}
