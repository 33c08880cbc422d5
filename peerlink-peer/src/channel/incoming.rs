use bytes::Bytes;
use futures::Stream;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::mpsc;

/// One message received from the remote peer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IncomingMessage {
    Text(String),
    Binary(Bytes),
}

impl IncomingMessage {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            IncomingMessage::Text(text) => Some(text),
            IncomingMessage::Binary(_) => None,
        }
    }

    pub fn into_bytes(self) -> Bytes {
        match self {
            IncomingMessage::Text(text) => Bytes::from(text),
            IncomingMessage::Binary(data) => data,
        }
    }
}

/// Every inbound message of a channel, in delivery order. Ends when the channel closes.
pub struct IncomingMessages {
    rx: mpsc::UnboundedReceiver<IncomingMessage>,
}

impl IncomingMessages {
    /// Feed side and stream side of a fresh inbound queue.
    pub fn channel() -> (mpsc::UnboundedSender<IncomingMessage>, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        (tx, Self { rx })
    }

    pub async fn recv(&mut self) -> Option<IncomingMessage> {
        self.rx.recv().await
    }
}

impl Stream for IncomingMessages {
    type Item = IncomingMessage;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}
