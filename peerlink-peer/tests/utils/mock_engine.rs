use async_trait::async_trait;
use peerlink_core::{
    DataChannelConfig, IceCandidate, MediaConstraints, NegotiationError, RtcConfig,
    SessionDescription,
};
use peerlink_peer::{DataChannel, EngineEvent, EngineFactory, NegotiationEngine};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::{Mutex, mpsc};

use super::memory_channel::memory_channel_pair;

pub const MOCK_OFFER_SDP: &str = "v=0\r\no=- 1 1 IN IP4 127.0.0.1\r\ns=mock-offer\r\n";
pub const MOCK_ANSWER_SDP: &str = "v=0\r\no=- 2 2 IN IP4 127.0.0.1\r\ns=mock-answer\r\n";

/// One call made by the session into the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCall {
    CreateOffer(MediaConstraints),
    CreateAnswer,
    SetLocal(SessionDescription),
    SetRemote(SessionDescription),
    AddCandidate(IceCandidate),
    Close,
}

/// State shared between a [`MockEngineFactory`], the engine it built and the test.
pub struct MockEngineState {
    calls: Mutex<Vec<EngineCall>>,
    events: Mutex<Option<mpsc::Sender<EngineEvent>>>,
    /// This side's end of a linked in-memory channel, opened on the first remote candidate.
    channel: std::sync::Mutex<Option<DataChannel>>,
    /// Emit one local candidate whenever a local description is set.
    auto_candidate: bool,
    reject_remote: AtomicBool,
    fail_create: AtomicBool,
    fail_offer: AtomicBool,
    fail_answer: AtomicBool,
    fail_local: AtomicBool,
    /// Candidate strings `add_ice_candidate` refuses.
    rejected_candidates: std::sync::Mutex<Vec<String>>,
}

impl MockEngineState {
    fn new(channel: Option<DataChannel>, auto_candidate: bool) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            events: Mutex::new(None),
            channel: std::sync::Mutex::new(channel),
            auto_candidate,
            reject_remote: AtomicBool::new(false),
            fail_create: AtomicBool::new(false),
            fail_offer: AtomicBool::new(false),
            fail_answer: AtomicBool::new(false),
            fail_local: AtomicBool::new(false),
            rejected_candidates: std::sync::Mutex::new(Vec::new()),
        })
    }

    pub async fn calls(&self) -> Vec<EngineCall> {
        self.calls.lock().await.clone()
    }

    /// Makes every following `set_remote_description` fail.
    pub fn reject_remote_descriptions(&self) {
        self.reject_remote.store(true, Ordering::SeqCst);
    }

    pub fn fail_creation(&self) {
        self.fail_create.store(true, Ordering::SeqCst);
    }

    pub fn fail_offers(&self) {
        self.fail_offer.store(true, Ordering::SeqCst);
    }

    pub fn fail_answers(&self) {
        self.fail_answer.store(true, Ordering::SeqCst);
    }

    /// Makes every following `set_local_description` fail.
    pub fn fail_local_descriptions(&self) {
        self.fail_local.store(true, Ordering::SeqCst);
    }

    pub fn reject_candidate(&self, candidate: &str) {
        if let Ok(mut rejected) = self.rejected_candidates.lock() {
            rejected.push(candidate.to_string());
        }
    }

    fn is_rejected(&self, candidate: &IceCandidate) -> bool {
        self.rejected_candidates
            .lock()
            .map(|rejected| rejected.contains(&candidate.candidate))
            .unwrap_or(false)
    }

    /// Pushes an engine event into the session as if the engine raised it.
    pub async fn emit(&self, event: EngineEvent) -> bool {
        let tx = self.events.lock().await.clone();
        match tx {
            Some(tx) => tx.send(event).await.is_ok(),
            None => false,
        }
    }

    async fn record(&self, call: EngineCall) {
        tracing::debug!("[MockEngine] {:?}", call);
        self.calls.lock().await.push(call);
    }

    fn take_channel(&self) -> Option<DataChannel> {
        self.channel.lock().ok().and_then(|mut slot| slot.take())
    }
}

/// Builds [`MockEngine`]s that share one [`MockEngineState`].
#[derive(Clone)]
pub struct MockEngineFactory {
    state: Arc<MockEngineState>,
    label: &'static str,
}

impl MockEngineFactory {
    pub fn new() -> Self {
        Self {
            state: MockEngineState::new(None, false),
            label: "mock",
        }
    }

    /// Two factories whose engines open an in-memory channel to each other once candidates flow.
    pub fn linked() -> (Self, Self) {
        let (a, b) = memory_channel_pair("Message DataChannel");
        (
            Self {
                state: MockEngineState::new(Some(a), true),
                label: "caller",
            },
            Self {
                state: MockEngineState::new(Some(b), true),
                label: "callee",
            },
        )
    }

    pub fn state(&self) -> Arc<MockEngineState> {
        Arc::clone(&self.state)
    }
}

#[async_trait]
impl EngineFactory for MockEngineFactory {
    async fn create(
        &self,
        _rtc: &RtcConfig,
        _channel: &DataChannelConfig,
        events: mpsc::Sender<EngineEvent>,
    ) -> Result<Box<dyn NegotiationEngine>, NegotiationError> {
        if self.state.fail_create.load(Ordering::SeqCst) {
            return Err(NegotiationError::rejected("mock engine creation failed"));
        }
        *self.state.events.lock().await = Some(events);
        Ok(Box::new(MockEngine {
            state: Arc::clone(&self.state),
            label: self.label,
        }))
    }
}

pub struct MockEngine {
    state: Arc<MockEngineState>,
    label: &'static str,
}

impl MockEngine {
    fn local_candidate(&self) -> IceCandidate {
        IceCandidate {
            sdp_mid: Some("0".to_string()),
            sdp_m_line_index: Some(0),
            ..IceCandidate::new(format!(
                "candidate:{} 1 udp 2130706431 127.0.0.1 9 typ host",
                self.label
            ))
        }
    }
}

#[async_trait]
impl NegotiationEngine for MockEngine {
    async fn create_offer(
        &self,
        constraints: &MediaConstraints,
    ) -> Result<SessionDescription, NegotiationError> {
        self.state
            .record(EngineCall::CreateOffer(*constraints))
            .await;
        if self.state.fail_offer.load(Ordering::SeqCst) {
            return Err(NegotiationError::rejected("mock engine failed to create offer"));
        }
        Ok(SessionDescription::offer(MOCK_OFFER_SDP))
    }

    async fn create_answer(&self) -> Result<SessionDescription, NegotiationError> {
        self.state.record(EngineCall::CreateAnswer).await;
        if self.state.fail_answer.load(Ordering::SeqCst) {
            return Err(NegotiationError::rejected("mock engine failed to create answer"));
        }
        Ok(SessionDescription::answer(MOCK_ANSWER_SDP))
    }

    async fn set_local_description(
        &self,
        description: SessionDescription,
    ) -> Result<(), NegotiationError> {
        self.state.record(EngineCall::SetLocal(description)).await;
        if self.state.fail_local.load(Ordering::SeqCst) {
            return Err(NegotiationError::rejected("mock engine rejected local description"));
        }
        if self.state.auto_candidate {
            self.state
                .emit(EngineEvent::LocalCandidate(self.local_candidate()))
                .await;
        }
        Ok(())
    }

    async fn set_remote_description(
        &self,
        description: SessionDescription,
    ) -> Result<(), NegotiationError> {
        self.state.record(EngineCall::SetRemote(description)).await;
        if self.state.reject_remote.load(Ordering::SeqCst) {
            return Err(NegotiationError::rejected("mock engine rejected description"));
        }
        Ok(())
    }

    async fn add_ice_candidate(&self, candidate: IceCandidate) -> Result<(), NegotiationError> {
        let rejected = self.state.is_rejected(&candidate);
        self.state.record(EngineCall::AddCandidate(candidate)).await;
        if rejected {
            return Err(NegotiationError::rejected("mock engine rejected candidate"));
        }
        if let Some(channel) = self.state.take_channel() {
            self.state.emit(EngineEvent::ChannelOpen(channel)).await;
        }
        Ok(())
    }

    async fn close(&self) {
        self.state.record(EngineCall::Close).await;
    }
}
