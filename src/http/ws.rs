use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use super::state::AppState;
use crate::protocol::{ClientMessage, ServerMessage};

/// GET /ws
/// Upgrade to the per-tab session channel
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_session(socket, state))
}

/// One session per connection, one spawned task per audio event.
///
/// Outcomes funnel through an mpsc sender into a single writer task so
/// concurrent events never interleave partial writes on the socket. Events
/// are independent; a later-submitted one may complete first.
async fn handle_session(socket: WebSocket, state: AppState) {
    let session_id = uuid::Uuid::new_v4();
    info!("Session connected: {}", session_id);

    let (mut ws_tx, mut ws_rx) = socket.split();
    let (out_tx, mut out_rx) = mpsc::channel::<ServerMessage>(32);

    // Writer task owns the sink half for the life of the session
    let writer = tokio::spawn(async move {
        while let Some(message) = out_rx.recv().await {
            let payload = match serde_json::to_string(&message) {
                Ok(payload) => payload,
                Err(e) => {
                    error!("Failed to encode server message: {}", e);
                    continue;
                }
            };

            // Peer gone: drop remaining outcomes silently
            if ws_tx.send(Message::Text(payload)).await.is_err() {
                break;
            }
        }
    });

    while let Some(frame) = ws_rx.next().await {
        let frame = match frame {
            Ok(frame) => frame,
            Err(e) => {
                warn!("Session {} transport error: {}", session_id, e);
                break;
            }
        };

        match frame {
            Message::Text(text) => match serde_json::from_str::<ClientMessage>(&text) {
                Ok(ClientMessage::Audio {
                    audio,
                    target_language,
                }) => {
                    let pipeline = Arc::clone(&state.pipeline);
                    let out_tx = out_tx.clone();

                    tokio::spawn(async move {
                        let outcome = match pipeline.process(&audio, &target_language).await {
                            Ok(result) => ServerMessage::Translation {
                                original: result.original,
                                translated: result.translated,
                                language: result.language,
                            },
                            Err(e) => ServerMessage::Error {
                                message: e.to_string(),
                            },
                        };

                        // A send failure means the session closed mid-flight;
                        // the outcome is dropped without escalation.
                        let _ = out_tx.send(outcome).await;
                    });
                }
                Err(e) => {
                    warn!("Session {} sent an unparseable frame: {}", session_id, e);
                    let _ = out_tx
                        .send(ServerMessage::Error {
                            message: format!("unrecognized message: {}", e),
                        })
                        .await;
                }
            },
            Message::Close(_) => break,
            // Ping/pong/binary frames are not part of the protocol
            _ => {}
        }
    }

    drop(out_tx);
    if let Err(e) = writer.await {
        error!("Session {} writer task panicked: {}", session_id, e);
    }

    info!("Session disconnected: {}", session_id);
}
