use crate::channel::DataChannel;
use peerlink_core::IceCandidate;

/// Events the negotiation engine raises for the session loop.
#[derive(Debug)]
pub enum EngineEvent {
    /// A local candidate was gathered and must be trickled to the peer.
    LocalCandidate(IceCandidate),

    /// The data channel is open and ready to carry application messages.
    ChannelOpen(DataChannel),
}
