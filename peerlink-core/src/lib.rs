pub mod codec;
pub mod config;
pub mod error;
pub mod model;

pub use codec::{decode, encode};
pub use config::{
    DATA_CHANNEL_LABEL, DEFAULT_KEEP_ALIVE_INTERVAL, DEFAULT_MAX_PACKET_LIFE_TIME_MS,
    DEFAULT_STUN_SERVER, DataChannelConfig, IceServerConfig, MediaConstraints, RtcConfig,
};
pub use error::{CodecError, ConnectError, NegotiationError, SendError, SessionError};
pub use model::{
    ChannelText, DataChannelMessage, IceCandidate, IdGenerator, PeerIdentity, SdpType,
    SessionDescription, SignalKind, SignalMessage, UuidGenerator,
};
