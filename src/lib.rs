pub mod capture;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod pipeline;
pub mod protocol;
pub mod providers;

pub use capture::AudioCapture;
pub use client::{
    ChannelEvent, ConnectionStatus, HistoryEntry, ReconnectPolicy, SessionChannel, UiState,
};
pub use config::{Config, ServiceConfig, TranscriptionConfig, TranslationConfig};
pub use error::{CaptureError, ChannelError, PipelineError};
pub use http::{create_router, AppState};
pub use pipeline::{Pipeline, Translation};
pub use protocol::{decode_audio_payload, ClientMessage, ServerMessage};
pub use providers::{language_name, OpenAiTranscriber, OpenAiTranslator, Transcriber, Translator};
