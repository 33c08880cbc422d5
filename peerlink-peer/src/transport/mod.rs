mod connection;
mod transport_event;
mod websocket;

pub use connection::{SignalingConnection, TransportSide};
pub use transport_event::{CloseInfo, TransportEvent};
pub use websocket::WebSocketTransport;

use async_trait::async_trait;
use peerlink_core::ConnectError;

/// Opens ordered, reliable text connections to a rendezvous relay.
///
/// Implementations own no protocol semantics: they move strings in both directions and report
/// when the connection ends. There is no reconnection.
#[async_trait]
pub trait SignalingTransport: Send + Sync {
    async fn open(&self, address: &str) -> Result<SignalingConnection, ConnectError>;
}
