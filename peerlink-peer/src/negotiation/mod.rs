mod engine_event;
mod rtc_engine;

pub use engine_event::EngineEvent;
pub use rtc_engine::{RtcEngine, RtcEngineFactory};

use async_trait::async_trait;
use peerlink_core::{
    DataChannelConfig, IceCandidate, MediaConstraints, NegotiationError, RtcConfig,
    SessionDescription,
};
use tokio::sync::mpsc;

/// Offer/answer and candidate handling of one peer connection.
///
/// Local candidate discovery and channel readiness are reported asynchronously through the
/// event sender handed to [`EngineFactory::create`].
#[async_trait]
pub trait NegotiationEngine: Send + Sync {
    async fn create_offer(
        &self,
        constraints: &MediaConstraints,
    ) -> Result<SessionDescription, NegotiationError>;

    async fn create_answer(&self) -> Result<SessionDescription, NegotiationError>;

    async fn set_local_description(
        &self,
        description: SessionDescription,
    ) -> Result<(), NegotiationError>;

    async fn set_remote_description(
        &self,
        description: SessionDescription,
    ) -> Result<(), NegotiationError>;

    async fn add_ice_candidate(&self, candidate: IceCandidate) -> Result<(), NegotiationError>;

    async fn close(&self);
}

/// Builds one engine per session.
#[async_trait]
pub trait EngineFactory: Send + Sync {
    async fn create(
        &self,
        rtc: &RtcConfig,
        channel: &DataChannelConfig,
        events: mpsc::Sender<EngineEvent>,
    ) -> Result<Box<dyn NegotiationEngine>, NegotiationError>;
}
