use super::connection::{SignalingConnection, TransportSide};
use super::transport_event::{CloseInfo, TransportEvent};
use super::SignalingTransport;
use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use peerlink_core::ConnectError;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, info, warn};

/// WebSocket client transport.
#[derive(Debug, Default, Clone, Copy)]
pub struct WebSocketTransport;

#[async_trait]
impl SignalingTransport for WebSocketTransport {
    async fn open(&self, address: &str) -> Result<SignalingConnection, ConnectError> {
        let (ws_stream, _) = connect_async(address)
            .await
            .map_err(|e| ConnectError::new(address, e))?;
        info!("Signaling WebSocket open: {}", address);

        let (mut write, mut read) = ws_stream.split();
        let (connection, side) = SignalingConnection::pair();
        let TransportSide {
            mut outbound,
            inbound,
        } = side;

        tokio::spawn(async move {
            while let Some(text) = outbound.recv().await {
                if let Err(e) = write.send(Message::Text(text.into())).await {
                    warn!("Failed to send WS message: {}", e);
                    break;
                }
            }
            let _ = write.close().await;
            debug!("Signaling writer finished");
        });

        tokio::spawn(async move {
            let mut close_info = None;
            while let Some(frame) = read.next().await {
                match frame {
                    Ok(Message::Text(text)) => {
                        if inbound.send(TransportEvent::Message(text.to_string())).is_err() {
                            break;
                        }
                    }
                    Ok(Message::Close(frame)) => {
                        close_info = frame.map(|f| CloseInfo {
                            code: u16::from(f.code),
                            reason: f.reason.as_str().to_owned(),
                        });
                        break;
                    }
                    Ok(_) => {}
                    Err(e) => {
                        warn!("Signaling WebSocket error: {}", e);
                        break;
                    }
                }
            }
            let _ = inbound.send(TransportEvent::Closed(close_info));
            debug!("Signaling reader finished");
        });

        Ok(connection)
    }
}
