//! HTTP/WebSocket server surface
//!
//! Routes:
//! - GET / - liveness text (mirrors the original landing response)
//! - GET /health - health check
//! - GET /ws - WebSocket upgrade for the per-tab session channel

mod handlers;
mod routes;
mod state;
mod ws;

pub use routes::create_router;
pub use state::AppState;
