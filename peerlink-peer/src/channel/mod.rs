mod data_channel;
mod incoming;

pub use data_channel::{ChannelSender, DataChannel};
pub use incoming::{IncomingMessage, IncomingMessages};

use async_trait::async_trait;
use peerlink_core::SendError;

/// Outbound half of an established peer-to-peer channel, provided by the negotiation engine.
#[async_trait]
pub trait ChannelSink: Send + Sync {
    async fn send_text(&self, text: String) -> Result<(), SendError>;

    fn label(&self) -> String;
}
