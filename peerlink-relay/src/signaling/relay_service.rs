use crate::room::{ConnId, ConnSender, RoomRegistry};
use dashmap::DashMap;
use peerlink_core::codec;
use std::sync::Arc;
use tracing::{debug, warn};

/// What the relay did with one inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayOutcome {
    /// Forwarded to this many other connections of the room.
    Forwarded(usize),
    /// Not forwarded; logged.
    Dropped,
}

struct RelayInner {
    rooms: RoomRegistry,
    /// Room each joined connection belongs to.
    joined: DashMap<ConnId, String>,
}

/// Shared state of the rendezvous relay. Cheap to clone.
#[derive(Clone)]
pub struct RelayService {
    inner: Arc<RelayInner>,
}

impl Default for RelayService {
    fn default() -> Self {
        Self::new()
    }
}

impl RelayService {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RelayInner {
                rooms: RoomRegistry::new(),
                joined: DashMap::new(),
            }),
        }
    }

    /// Handles one text frame from `conn`.
    ///
    /// The first message with a room id places the connection in that room; after that only
    /// messages for the same room are forwarded.
    pub fn relay(&self, conn: ConnId, tx: &ConnSender, text: &str) -> RelayOutcome {
        let message = match codec::decode(text) {
            Ok(message) => message,
            Err(e) => {
                warn!("Dropping undecodable message from {}: {}", conn, e);
                return RelayOutcome::Dropped;
            }
        };

        if message.room_id.is_empty() {
            warn!("Dropping {} from {} without a room id", message.kind, conn);
            return RelayOutcome::Dropped;
        }

        let joined = self.inner.joined.get(&conn).map(|room| room.value().clone());
        match joined {
            Some(room_id) if room_id != message.room_id => {
                warn!(
                    "Dropping {} from {}: room '{}' but joined '{}'",
                    message.kind, conn, message.room_id, room_id
                );
                return RelayOutcome::Dropped;
            }
            Some(_) => {}
            None => self.join(conn, &message.room_id, tx),
        }

        let delivered = self.inner.rooms.forward(&message.room_id, conn, text);
        debug!(
            "{} from {} forwarded to {} peers in '{}'",
            message.kind, conn, delivered, message.room_id
        );
        RelayOutcome::Forwarded(delivered)
    }

    /// Places `conn` in `room_id` before it has sent anything, so it receives messages from
    /// the start. A connection that already joined a room stays there.
    pub fn join(&self, conn: ConnId, room_id: &str, tx: &ConnSender) {
        if self.inner.joined.contains_key(&conn) {
            warn!("{} already joined a room; ignoring join of '{}'", conn, room_id);
            return;
        }
        self.inner.rooms.join(room_id, conn, tx.clone());
        self.inner.joined.insert(conn, room_id.to_string());
        debug!("{} joined '{}'", conn, room_id);
    }

    /// Idempotent.
    pub fn disconnect(&self, conn: ConnId) {
        if let Some((_, room_id)) = self.inner.joined.remove(&conn) {
            self.inner.rooms.leave(&room_id, conn);
        }
    }

    pub fn room_of(&self, conn: ConnId) -> Option<String> {
        self.inner.joined.get(&conn).map(|room| room.value().clone())
    }

    pub fn room_count(&self) -> usize {
        self.inner.rooms.room_count()
    }

    pub fn member_count(&self, room_id: &str) -> usize {
        self.inner.rooms.member_count(room_id)
    }
}
