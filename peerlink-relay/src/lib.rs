//! Room-scoped rendezvous relay for peerlink signaling.
//!
//! Peers connect to `/ws` and every signaling message is forwarded to the other connections of
//! the room named in the message. The relay never interprets offers, answers or candidates.
//!
//! A connection on `/ws` joins a room with its first message that names one, and receives
//! nothing before that: an OFFER sent to a room whose callee has not spoken yet reaches nobody.
//! Connecting to `/ws/{room_id}` joins the room at upgrade time instead.

pub mod config;
pub mod room;
pub mod signaling;

pub use config::{DEFAULT_RELAY_ADDR, RELAY_ADDR_ENV, RelayConfig};
pub use room::{ConnId, RoomRegistry};
pub use signaling::{RelayOutcome, RelayService, ws_handler, ws_room_handler};

use axum::Router;
use axum::routing::get;
use tokio::net::TcpListener;
use tracing::info;

pub fn router(service: RelayService) -> Router {
    Router::new()
        .route("/ws", get(ws_handler))
        .route("/ws/{room_id}", get(ws_room_handler))
        .with_state(service)
}

/// Serves the relay on an already bound listener until the server stops.
pub async fn serve(listener: TcpListener, service: RelayService) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!("Signaling relay listening on ws://{}/ws", addr);
    }
    axum::serve(listener, router(service)).await
}
