use chrono::{DateTime, Utc};

use super::channel::ChannelEvent;
use crate::protocol::ServerMessage;

/// Connection status as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Connected,
    Reconnecting,
    Disconnected,
}

/// One completed translation as kept in the display history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub original: String,
    pub translated: String,
    pub language: String,
    pub received_at: DateTime<Utc>,
}

/// Reduces channel events into display state. Pure state, no I/O.
///
/// An error outcome always clears the processing flag so the user can
/// immediately retry by recording again.
#[derive(Debug, Clone)]
pub struct UiState {
    pub connection: ConnectionStatus,
    pub history: Vec<HistoryEntry>,
    pub processing: bool,
    pub last_error: Option<String>,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            connection: ConnectionStatus::Disconnected,
            history: Vec::new(),
            processing: false,
            last_error: None,
        }
    }

    /// Fold one channel event into the display state.
    pub fn apply(&mut self, event: &ChannelEvent) {
        match event {
            ChannelEvent::Connected => {
                self.connection = ConnectionStatus::Connected;
            }
            ChannelEvent::Disconnected => {
                self.connection = ConnectionStatus::Reconnecting;
            }
            ChannelEvent::Exhausted { .. } => {
                self.connection = ConnectionStatus::Disconnected;
                self.processing = false;
            }
            ChannelEvent::Message(ServerMessage::Translation {
                original,
                translated,
                language,
            }) => {
                self.history.push(HistoryEntry {
                    original: original.clone(),
                    translated: translated.clone(),
                    language: language.clone(),
                    received_at: Utc::now(),
                });
                self.processing = false;
                self.last_error = None;
            }
            ChannelEvent::Message(ServerMessage::Error { message }) => {
                self.last_error = Some(message.clone());
                self.processing = false;
            }
        }
    }

    /// Mark an audio event as submitted and awaiting its outcome.
    pub fn mark_processing(&mut self) {
        self.processing = true;
        self.last_error = None;
    }

    /// Surface a client-local failure (capture denied, send while
    /// disconnected) exactly like a wire error.
    pub fn record_local_error(&mut self, message: impl Into<String>) {
        self.last_error = Some(message.into());
        self.processing = false;
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}
