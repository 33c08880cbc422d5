use super::conn_id::ConnId;
use dashmap::DashMap;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Outbound queue of one connection.
pub type ConnSender = mpsc::UnboundedSender<String>;

/// Room id -> connections currently in it.
#[derive(Default)]
pub struct RoomRegistry {
    rooms: DashMap<String, HashMap<ConnId, ConnSender>>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn join(&self, room_id: &str, conn: ConnId, tx: ConnSender) {
        let mut members = self.rooms.entry(room_id.to_string()).or_default();
        members.insert(conn, tx);
        info!(
            "Connection {} joined room '{}' ({} members)",
            conn,
            room_id,
            members.len()
        );
    }

    /// Removes `conn` from `room_id`, dropping the room once it is empty.
    pub fn leave(&self, room_id: &str, conn: ConnId) {
        let now_empty = match self.rooms.get_mut(room_id) {
            Some(mut members) => {
                members.remove(&conn);
                members.is_empty()
            }
            None => return,
        };
        info!("Connection {} left room '{}'", conn, room_id);

        if now_empty {
            self.rooms.remove_if(room_id, |_, members| members.is_empty());
            debug!("Room '{}' removed", room_id);
        }
    }

    /// Sends `text` to every member of `room_id` except `from`. Returns how many got it.
    pub fn forward(&self, room_id: &str, from: ConnId, text: &str) -> usize {
        let Some(members) = self.rooms.get(room_id) else {
            warn!("Dropping message for unknown room '{}'", room_id);
            return 0;
        };

        let mut delivered = 0;
        for (conn, tx) in members.iter() {
            if *conn == from {
                continue;
            }
            match tx.send(text.to_string()) {
                Ok(()) => delivered += 1,
                Err(_) => warn!("Connection {} is gone, skipping", conn),
            }
        }
        delivered
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn member_count(&self, room_id: &str) -> usize {
        self.rooms.get(room_id).map_or(0, |members| members.len())
    }
}
