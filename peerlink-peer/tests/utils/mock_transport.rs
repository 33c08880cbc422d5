use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use peerlink_core::{ConnectError, SignalMessage, codec};
use peerlink_peer::transport::{
    CloseInfo, SignalingConnection, SignalingTransport, TransportEvent, TransportSide,
};
use std::time::Duration;
use tokio::sync::mpsc;

use super::signal_helpers::SIGNAL_TIMEOUT_MS;

/// Transport whose connections are driven by the test through [`MockRemote`].
pub struct MockTransport {
    sides: mpsc::UnboundedSender<(String, TransportSide)>,
}

impl MockTransport {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<(String, TransportSide)>) {
        let (sides, rx) = mpsc::unbounded_channel();
        (Self { sides }, rx)
    }
}

#[async_trait]
impl SignalingTransport for MockTransport {
    async fn open(&self, address: &str) -> Result<SignalingConnection, ConnectError> {
        tracing::debug!("[MockTransport] open {}", address);
        let (connection, side) = SignalingConnection::pair();
        self.sides
            .send((address.to_string(), side))
            .map_err(|_| ConnectError::new(address, "mock transport dropped"))?;
        Ok(connection)
    }
}

/// Transport that refuses every connection.
pub struct FailingTransport;

#[async_trait]
impl SignalingTransport for FailingTransport {
    async fn open(&self, address: &str) -> Result<SignalingConnection, ConnectError> {
        Err(ConnectError::new(address, "connection refused"))
    }
}

/// The relay end of a mocked signaling connection.
pub struct MockRemote {
    pub address: String,
    side: TransportSide,
}

impl MockRemote {
    pub fn new(address: String, side: TransportSide) -> Self {
        Self { address, side }
    }

    /// Delivers `message` to the session as if the relay forwarded it.
    pub fn deliver(&self, message: &SignalMessage) -> Result<()> {
        let text = codec::encode(message)?;
        self.deliver_raw(text)
    }

    pub fn deliver_raw(&self, text: impl Into<String>) -> Result<()> {
        self.side
            .inbound
            .send(TransportEvent::Message(text.into()))
            .map_err(|_| anyhow!("session stopped listening"))
    }

    /// Simulates the relay closing the connection.
    pub fn close_with(&self, code: u16, reason: &str) -> Result<()> {
        self.side
            .inbound
            .send(TransportEvent::Closed(Some(CloseInfo {
                code,
                reason: reason.to_string(),
            })))
            .map_err(|_| anyhow!("session stopped listening"))
    }

    /// Next message the session sent, decoded.
    pub async fn next_signal(&mut self) -> Result<SignalMessage> {
        let text = tokio::time::timeout(
            Duration::from_millis(SIGNAL_TIMEOUT_MS),
            self.side.outbound.recv(),
        )
        .await
        .context("Timed out waiting for a signaling message")?
        .context("Session closed its signaling connection")?;
        Ok(codec::decode(&text)?)
    }

    /// Every message the session has sent so far, without waiting.
    pub fn drain_signals(&mut self) -> Vec<SignalMessage> {
        let mut out = Vec::new();
        while let Ok(text) = self.side.outbound.try_recv() {
            if let Ok(message) = codec::decode(&text) {
                out.push(message);
            }
        }
        out
    }

    /// True once the session has released its end of the connection.
    pub fn is_session_closed(&self) -> bool {
        self.side.inbound.is_closed()
    }
}
