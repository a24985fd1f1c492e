//! Native client side of the session channel: the reconnecting WebSocket
//! wrapper and the UI state reducer it feeds. Browser frontends implement
//! the same contract; these types back native clients and the integration
//! tests.

mod channel;
mod state;

pub use channel::{ChannelEvent, ReconnectPolicy, SessionChannel};
pub use state::{ConnectionStatus, HistoryEntry, UiState};
