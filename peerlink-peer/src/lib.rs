pub mod channel;
pub mod negotiation;
pub mod session;
pub mod transport;

pub use channel::{ChannelSender, ChannelSink, DataChannel, IncomingMessage, IncomingMessages};
pub use negotiation::{EngineEvent, EngineFactory, NegotiationEngine, RtcEngine, RtcEngineFactory};
pub use session::{
    ChannelReadyCallback, PeerSession, Role, SessionConfig, SessionState, SignalCloseCallback,
};
pub use transport::{
    CloseInfo, SignalingConnection, SignalingTransport, TransportEvent, WebSocketTransport,
};
