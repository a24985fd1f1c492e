use thiserror::Error;

/// Failure taxonomy for the server-side relay pipeline.
///
/// Every failed audio event maps to exactly one of these; the display
/// string becomes the `error` event's `message` on the wire, so it must
/// stay user-presentable (provider message text at most, never internals).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PipelineError {
    /// The audio payload could not be decoded into a WAV stream.
    #[error("audio decoding failed: {0}")]
    Decoding(String),

    /// The speech-to-text provider call failed.
    #[error("transcription failed: {0}")]
    Transcription(String),

    /// The translation provider call failed.
    #[error("translation failed: {0}")]
    Translation(String),
}

/// Client-side session channel failures. These surface locally to the UI
/// and never cross the wire.
#[derive(Debug, Error)]
pub enum ChannelError {
    /// A send was attempted while disconnected. Nothing is queued for
    /// later delivery; the caller retries after reconnecting.
    #[error("channel is not connected")]
    NotConnected,

    #[error("websocket transport error: {0}")]
    Transport(String),
}

/// Local capture failures (input-device side, never sent over the channel).
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("a capture is already in progress")]
    AlreadyRecording,

    #[error("no capture in progress")]
    NotRecording,

    /// Microphone access was denied by the device or platform.
    #[error("audio device access denied: {0}")]
    DeviceAccess(String),

    #[error("failed to encode WAV: {0}")]
    Encoding(String),
}
