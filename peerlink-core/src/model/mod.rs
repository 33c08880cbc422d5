mod candidate;
mod channel;
mod description;
mod identity;
mod signaling;

pub use candidate::{IceCandidate, normalize_candidate_fields};
pub use channel::{ChannelText, DataChannelMessage};
pub use description::{SdpType, SessionDescription, normalize_description_fields};
pub use identity::{IdGenerator, PeerIdentity, UuidGenerator};
pub use signaling::{SignalKind, SignalMessage};
