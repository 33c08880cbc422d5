use super::transport_event::TransportEvent;
use peerlink_core::SendError;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Session-side handle of an open signaling connection.
pub struct SignalingConnection {
    outbound: Option<mpsc::UnboundedSender<String>>,
    inbound: mpsc::UnboundedReceiver<TransportEvent>,
}

/// Transport-side ends of a [`SignalingConnection`]: drain `outbound`, feed `inbound`.
pub struct TransportSide {
    pub outbound: mpsc::UnboundedReceiver<String>,
    pub inbound: mpsc::UnboundedSender<TransportEvent>,
}

impl SignalingConnection {
    pub fn pair() -> (Self, TransportSide) {
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        let (inbound_tx, inbound_rx) = mpsc::unbounded_channel();

        (
            Self {
                outbound: Some(outbound_tx),
                inbound: inbound_rx,
            },
            TransportSide {
                outbound: outbound_rx,
                inbound: inbound_tx,
            },
        )
    }

    pub fn is_open(&self) -> bool {
        self.outbound.as_ref().is_some_and(|tx| !tx.is_closed())
    }

    /// Queues `message` for the relay. Failures are logged and returned, never retried.
    pub fn send(&self, message: String) -> Result<(), SendError> {
        if message.is_empty() {
            warn!("Refusing to send empty signaling message");
            return Err(SendError::EmptyMessage);
        }

        let Some(outbound) = &self.outbound else {
            warn!("Signaling connection is closed, dropping message");
            return Err(SendError::Closed);
        };

        outbound.send(message).map_err(|_| {
            warn!("Signaling transport went away, dropping message");
            SendError::Closed
        })
    }

    /// Next inbound event, or `None` once the connection is closed and drained.
    pub async fn recv(&mut self) -> Option<TransportEvent> {
        self.inbound.recv().await
    }

    /// Idempotent.
    pub fn close(&mut self) {
        if self.outbound.take().is_some() {
            debug!("Closing signaling connection");
        }
        self.inbound.close();
    }
}

impl Drop for SignalingConnection {
    fn drop(&mut self) {
        self.close();
    }
}
