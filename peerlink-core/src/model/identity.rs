use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Source of local and remote peer ids when the caller does not supply them.
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Default generator: random version-4 UUIDs.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Who this session is, who it talks to, and which room scopes the traffic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeerIdentity {
    pub local_id: String,
    pub peer_id: String,
    pub room_id: String,
}

impl PeerIdentity {
    /// Builds an identity, filling missing ids from `ids`.
    pub fn new(
        room_id: impl Into<String>,
        local_id: Option<String>,
        peer_id: Option<String>,
        ids: &dyn IdGenerator,
    ) -> Self {
        Self {
            local_id: local_id.unwrap_or_else(|| ids.generate()),
            peer_id: peer_id.unwrap_or_else(|| ids.generate()),
            room_id: room_id.into(),
        }
    }
}

impl fmt::Display for PeerIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.local_id, self.room_id)
    }
}
