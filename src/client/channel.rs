use std::time::Duration;

use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{info, warn};

use crate::error::ChannelError;
use crate::protocol::{ClientMessage, ServerMessage};

/// Client-owned reconnection policy: capped attempt count with increasing,
/// capped delay between attempts.
#[derive(Debug, Clone)]
pub struct ReconnectPolicy {
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(5),
        }
    }
}

impl ReconnectPolicy {
    /// Delay before reconnect attempt `attempt` (1-based): doubles from the
    /// initial delay and caps at the maximum.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.initial_delay.saturating_mul(factor).min(self.max_delay)
    }
}

/// Events observable on the client side of the session channel.
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelEvent {
    /// Transport (re)established
    Connected,

    /// Transport lost; automatic reconnection will run next
    Disconnected,

    /// Reconnect budget spent; the channel stays down until `reconnect`
    /// is called from outside
    Exhausted { attempts: u32 },

    /// A server message arrived
    Message(ServerMessage),
}

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

enum Transport {
    Connected(Box<WsStream>),
    PendingReconnect,
    Down,
}

/// One browser tab's worth of session channel: a single WebSocket with
/// bounded automatic reconnection and no queuing across disconnects.
pub struct SessionChannel {
    url: String,
    policy: ReconnectPolicy,
    transport: Transport,
}

impl SessionChannel {
    /// Connect with the default reconnection policy.
    pub async fn connect(url: impl Into<String>) -> Result<Self, ChannelError> {
        Self::connect_with_policy(url, ReconnectPolicy::default()).await
    }

    pub async fn connect_with_policy(
        url: impl Into<String>,
        policy: ReconnectPolicy,
    ) -> Result<Self, ChannelError> {
        let url = url.into();
        let (stream, _) = connect_async(url.as_str())
            .await
            .map_err(|e| ChannelError::Transport(e.to_string()))?;

        info!("Session channel connected to {}", url);

        Ok(Self {
            url,
            policy,
            transport: Transport::Connected(Box::new(stream)),
        })
    }

    pub fn is_connected(&self) -> bool {
        matches!(self.transport, Transport::Connected(_))
    }

    /// Submit one audio event. Sending while disconnected fails locally and
    /// nothing is buffered for later delivery.
    pub async fn send_audio(
        &mut self,
        audio: String,
        target_language: String,
    ) -> Result<(), ChannelError> {
        let Transport::Connected(stream) = &mut self.transport else {
            return Err(ChannelError::NotConnected);
        };

        let message = ClientMessage::Audio {
            audio,
            target_language,
        };
        let payload =
            serde_json::to_string(&message).map_err(|e| ChannelError::Transport(e.to_string()))?;

        if let Err(e) = stream.send(WsMessage::Text(payload)).await {
            self.transport = Transport::PendingReconnect;
            return Err(ChannelError::Transport(e.to_string()));
        }

        Ok(())
    }

    /// Wait for the next channel event.
    ///
    /// Transport loss yields `Disconnected`, then the next call runs the
    /// bounded reconnect loop. Returns `None` once the channel is down for
    /// good; only an explicit `reconnect` revives it after that.
    pub async fn next_event(&mut self) -> Option<ChannelEvent> {
        loop {
            let frame = match &mut self.transport {
                Transport::Connected(stream) => stream.next().await,
                Transport::PendingReconnect => return Some(self.run_reconnect().await),
                Transport::Down => return None,
            };

            match frame {
                Some(Ok(WsMessage::Text(text))) => {
                    match serde_json::from_str::<ServerMessage>(&text) {
                        Ok(message) => return Some(ChannelEvent::Message(message)),
                        Err(e) => warn!("Dropping unparseable server frame: {}", e),
                    }
                }
                Some(Ok(WsMessage::Close(_))) | None => {
                    self.transport = Transport::PendingReconnect;
                    return Some(ChannelEvent::Disconnected);
                }
                // Ping/pong/binary frames are not part of the protocol
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    warn!("Session channel transport error: {}", e);
                    self.transport = Transport::PendingReconnect;
                    return Some(ChannelEvent::Disconnected);
                }
            }
        }
    }

    /// Re-establish the connection explicitly (the user-action path once
    /// the automatic budget is spent).
    pub async fn reconnect(&mut self) -> Result<(), ChannelError> {
        let (stream, _) = connect_async(self.url.as_str())
            .await
            .map_err(|e| ChannelError::Transport(e.to_string()))?;

        info!("Session channel reconnected to {}", self.url);
        self.transport = Transport::Connected(Box::new(stream));
        Ok(())
    }

    async fn run_reconnect(&mut self) -> ChannelEvent {
        for attempt in 1..=self.policy.max_attempts {
            tokio::time::sleep(self.policy.delay_for(attempt)).await;

            match connect_async(self.url.as_str()).await {
                Ok((stream, _)) => {
                    info!("Session channel reconnected after {} attempt(s)", attempt);
                    self.transport = Transport::Connected(Box::new(stream));
                    return ChannelEvent::Connected;
                }
                Err(e) => warn!(
                    "Reconnect attempt {}/{} failed: {}",
                    attempt, self.policy.max_attempts, e
                ),
            }
        }

        warn!(
            "Reconnect budget exhausted after {} attempts",
            self.policy.max_attempts
        );
        self.transport = Transport::Down;
        ChannelEvent::Exhausted {
            attempts: self.policy.max_attempts,
        }
    }
}
