use super::relay_service::RelayService;
use crate::room::ConnId;
use axum::extract::{Path, State};
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tracing::{info, warn};

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(service): State<RelayService>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, service, None))
}

/// Same as [`ws_handler`], but the connection joins `room_id` as soon as it is upgraded.
pub async fn ws_room_handler(
    ws: WebSocketUpgrade,
    Path(room_id): Path<String>,
    State(service): State<RelayService>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, service, Some(room_id)))
}

async fn handle_socket(socket: WebSocket, service: RelayService, room_id: Option<String>) {
    let conn = ConnId::new();
    info!("New WebSocket connection: {} (room {:?})", conn, room_id);

    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();

    if let Some(room_id) = &room_id {
        service.join(conn, room_id, &tx);
    }

    let mut send_task = tokio::spawn(async move {
        while let Some(text) = rx.recv().await {
            if sender.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    let mut recv_task = tokio::spawn({
        let service = service.clone();

        async move {
            while let Some(frame) = receiver.next().await {
                match frame {
                    Ok(Message::Text(text)) => {
                        service.relay(conn, &tx, text.as_str());
                    }
                    Ok(Message::Close(_)) => break,
                    Ok(_) => {}
                    Err(e) => {
                        warn!("WebSocket error on {}: {}", conn, e);
                        break;
                    }
                }
            }
        }
    });

    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    };

    service.disconnect(conn);
    info!("WebSocket disconnected: {}", conn);
}
