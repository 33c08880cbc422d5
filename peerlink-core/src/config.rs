use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_STUN_SERVER: &str = "stun:stun.l.google.com:19302";

/// How often a session pings the relay while it is open.
pub const DEFAULT_KEEP_ALIVE_INTERVAL: Duration = Duration::from_secs(30);

pub const DEFAULT_MAX_PACKET_LIFE_TIME_MS: u16 = 10_000;

pub const DATA_CHANNEL_LABEL: &str = "Message DataChannel";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IceServerConfig {
    pub urls: Vec<String>,
    pub username: Option<String>,
    pub credential: Option<String>,
}

impl IceServerConfig {
    pub fn stun(url: impl Into<String>) -> Self {
        Self {
            urls: vec![url.into()],
            username: None,
            credential: None,
        }
    }
}

/// Negotiation engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RtcConfig {
    pub ice_servers: Vec<IceServerConfig>,
}

impl RtcConfig {
    /// No ICE servers: host candidates only. Enough for loopback and LAN peers.
    pub fn host_only() -> Self {
        Self {
            ice_servers: Vec::new(),
        }
    }
}

impl Default for RtcConfig {
    fn default() -> Self {
        Self {
            ice_servers: vec![IceServerConfig::stun(DEFAULT_STUN_SERVER)],
        }
    }
}

/// Offer constraints passed to `create_offer`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaConstraints {
    pub voice_activity_detection: bool,
    pub ice_restart: bool,
}

/// Data channel reliability settings. The default trades reliability for latency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataChannelConfig {
    pub label: String,
    pub ordered: bool,
    pub max_packet_life_time_ms: Option<u16>,
}

impl Default for DataChannelConfig {
    fn default() -> Self {
        Self {
            label: DATA_CHANNEL_LABEL.to_owned(),
            ordered: false,
            max_packet_life_time_ms: Some(DEFAULT_MAX_PACKET_LIFE_TIME_MS),
        }
    }
}
