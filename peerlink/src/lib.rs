pub use peerlink_core::{PeerIdentity, SignalKind, SignalMessage};

pub mod model {
    pub use peerlink_core::*;
}

#[cfg(feature = "peer")]
pub mod peer {
    pub use peerlink_peer::*;
}

#[cfg(feature = "relay")]
pub mod relay {
    pub use peerlink_relay::*;
}
