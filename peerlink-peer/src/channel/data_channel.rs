use super::ChannelSink;
use super::incoming::{IncomingMessage, IncomingMessages};
use peerlink_core::{ChannelText, SendError};
use std::fmt;
use std::sync::Arc;
use tracing::error;

/// Cloneable send handle of an established channel.
#[derive(Clone)]
pub struct ChannelSender {
    sink: Arc<dyn ChannelSink>,
}

impl ChannelSender {
    /// Sends strings verbatim and structured values as JSON text.
    pub async fn send<M: ChannelText + ?Sized>(&self, message: &M) -> Result<(), SendError> {
        let text = message.to_channel_text();
        self.sink.send_text(text).await.inspect_err(|e| {
            error!("Failed to send on channel '{}': {}", self.sink.label(), e);
        })
    }

    pub fn label(&self) -> String {
        self.sink.label()
    }
}

/// The established peer-to-peer channel handed to the application once connected.
pub struct DataChannel {
    sender: ChannelSender,
    incoming: IncomingMessages,
}

impl DataChannel {
    pub fn new(sink: Arc<dyn ChannelSink>, incoming: IncomingMessages) -> Self {
        Self {
            sender: ChannelSender { sink },
            incoming,
        }
    }

    pub async fn send<M: ChannelText + ?Sized>(&self, message: &M) -> Result<(), SendError> {
        self.sender.send(message).await
    }

    pub async fn recv(&mut self) -> Option<IncomingMessage> {
        self.incoming.recv().await
    }

    pub fn sender(&self) -> ChannelSender {
        self.sender.clone()
    }

    pub fn label(&self) -> String {
        self.sender.label()
    }

    pub fn split(self) -> (ChannelSender, IncomingMessages) {
        (self.sender, self.incoming)
    }
}

impl fmt::Debug for DataChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataChannel")
            .field("label", &self.label())
            .finish()
    }
}
