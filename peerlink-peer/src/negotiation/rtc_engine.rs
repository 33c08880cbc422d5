use super::{EngineEvent, EngineFactory, NegotiationEngine};
use crate::channel::{ChannelSink, DataChannel, IncomingMessage, IncomingMessages};
use anyhow::Result;
use async_trait::async_trait;
use peerlink_core::{
    DataChannelConfig, IceCandidate, MediaConstraints, NegotiationError, RtcConfig, SdpType,
    SendError, SessionDescription,
};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};
use webrtc::api::APIBuilder;
use webrtc::api::interceptor_registry::register_default_interceptors;
use webrtc::api::media_engine::MediaEngine;
use webrtc::data_channel::RTCDataChannel;
use webrtc::data_channel::data_channel_init::RTCDataChannelInit;
use webrtc::data_channel::data_channel_message::DataChannelMessage;
use webrtc::ice_transport::ice_candidate::{RTCIceCandidate, RTCIceCandidateInit};
use webrtc::ice_transport::ice_server::RTCIceServer;
use webrtc::interceptor::registry::Registry;
use webrtc::peer_connection::RTCPeerConnection;
use webrtc::peer_connection::configuration::RTCConfiguration;
use webrtc::peer_connection::offer_answer_options::RTCOfferOptions;
use webrtc::peer_connection::peer_connection_state::RTCPeerConnectionState;
use webrtc::peer_connection::sdp::session_description::RTCSessionDescription;

/// [`NegotiationEngine`] backed by a webrtc-rs peer connection.
///
/// The offering side creates the data channel right before its first offer; the answering side
/// adopts the channel announced by the remote peer.
pub struct RtcEngine {
    peer_connection: Arc<RTCPeerConnection>,
    channel_config: DataChannelConfig,
    data_channel: tokio::sync::Mutex<Option<Arc<RTCDataChannel>>>,
    event_tx: mpsc::Sender<EngineEvent>,
}

impl RtcEngine {
    pub async fn new(
        rtc: &RtcConfig,
        channel_config: DataChannelConfig,
        event_tx: mpsc::Sender<EngineEvent>,
    ) -> Result<Self> {
        // 1. Codecs and interceptors, required by the API even for data-only connections
        let mut m = MediaEngine::default();
        m.register_default_codecs()?;
        let registry = register_default_interceptors(Registry::new(), &mut m)?;

        let api = APIBuilder::new()
            .with_media_engine(m)
            .with_interceptor_registry(registry)
            .build();

        // 2. STUN/TURN servers
        let rtc_config = RTCConfiguration {
            ice_servers: rtc
                .ice_servers
                .iter()
                .map(|server| RTCIceServer {
                    urls: server.urls.clone(),
                    username: server.username.clone().unwrap_or_default(),
                    credential: server.credential.clone().unwrap_or_default(),
                })
                .collect(),
            ..Default::default()
        };

        let peer_connection = Arc::new(api.new_peer_connection(rtc_config).await?);

        peer_connection.on_peer_connection_state_change(Box::new(
            move |s: RTCPeerConnectionState| {
                Box::pin(async move {
                    info!("Peer connection state changed: {:?}", s);
                })
            },
        ));

        // 3. Trickle ICE: every local candidate goes to the session loop
        let ice_tx = event_tx.clone();
        peer_connection.on_ice_candidate(Box::new(move |c: Option<RTCIceCandidate>| {
            let tx = ice_tx.clone();

            Box::pin(async move {
                let Some(candidate) = c else { return };
                let init = match candidate.to_json() {
                    Ok(init) => init,
                    Err(e) => {
                        warn!("Failed to serialize local ICE candidate: {}", e);
                        return;
                    }
                };
                let candidate = IceCandidate {
                    candidate: init.candidate,
                    sdp_mid: init.sdp_mid,
                    sdp_m_line_index: init.sdp_mline_index,
                    username_fragment: init.username_fragment,
                };
                let _ = tx.send(EngineEvent::LocalCandidate(candidate)).await;
            })
        }));

        // 4. Answering side: adopt the channel the offerer created
        let dc_tx = event_tx.clone();
        peer_connection.on_data_channel(Box::new(move |dc: Arc<RTCDataChannel>| {
            let tx = dc_tx.clone();

            Box::pin(async move {
                debug!("Remote DataChannel '{}' announced", dc.label());
                wire_channel(&dc, tx);
            })
        }));

        Ok(Self {
            peer_connection,
            channel_config,
            data_channel: tokio::sync::Mutex::new(None),
            event_tx,
        })
    }

    async fn ensure_local_channel(&self) -> Result<()> {
        let mut slot = self.data_channel.lock().await;
        if slot.is_some() {
            return Ok(());
        }

        let init = RTCDataChannelInit {
            ordered: Some(self.channel_config.ordered),
            max_packet_life_time: self.channel_config.max_packet_life_time_ms,
            ..Default::default()
        };
        let dc = self
            .peer_connection
            .create_data_channel(&self.channel_config.label, Some(init))
            .await?;

        wire_channel(&dc, self.event_tx.clone());
        *slot = Some(dc);
        Ok(())
    }
}

/// Routes a channel's messages into a fresh inbound queue and reports it once open.
fn wire_channel(dc: &Arc<RTCDataChannel>, event_tx: mpsc::Sender<EngineEvent>) {
    let (incoming_tx, incoming) = IncomingMessages::channel();
    let sink = Arc::new(RtcChannelSink { dc: Arc::clone(dc) });
    let pending = Arc::new(Mutex::new(Some(DataChannel::new(sink, incoming))));

    let label = dc.label().to_owned();
    dc.on_open(Box::new(move || {
        let tx = event_tx.clone();
        let label = label.clone();
        let channel = pending.lock().ok().and_then(|mut slot| slot.take());

        Box::pin(async move {
            let Some(channel) = channel else { return };
            info!("DataChannel '{}' open", label);
            let _ = tx.send(EngineEvent::ChannelOpen(channel)).await;
        })
    }));

    dc.on_message(Box::new(move |msg: DataChannelMessage| {
        let message = if msg.is_string {
            IncomingMessage::Text(String::from_utf8_lossy(&msg.data).into_owned())
        } else {
            IncomingMessage::Binary(msg.data)
        };
        let _ = incoming_tx.send(message);
        Box::pin(async {})
    }));
}

fn to_rtc_description(description: SessionDescription) -> Result<RTCSessionDescription> {
    let desc = match description.sdp_type {
        SdpType::Offer => RTCSessionDescription::offer(description.sdp)?,
        SdpType::Answer => RTCSessionDescription::answer(description.sdp)?,
    };
    Ok(desc)
}

#[async_trait]
impl NegotiationEngine for RtcEngine {
    async fn create_offer(
        &self,
        constraints: &MediaConstraints,
    ) -> Result<SessionDescription, NegotiationError> {
        self.ensure_local_channel()
            .await
            .map_err(NegotiationError::rejected)?;

        let options = RTCOfferOptions {
            voice_activity_detection: constraints.voice_activity_detection,
            ice_restart: constraints.ice_restart,
        };
        let offer = self
            .peer_connection
            .create_offer(Some(options))
            .await
            .map_err(NegotiationError::rejected)?;

        Ok(SessionDescription::offer(offer.sdp))
    }

    async fn create_answer(&self) -> Result<SessionDescription, NegotiationError> {
        let answer = self
            .peer_connection
            .create_answer(None)
            .await
            .map_err(NegotiationError::rejected)?;

        Ok(SessionDescription::answer(answer.sdp))
    }

    async fn set_local_description(
        &self,
        description: SessionDescription,
    ) -> Result<(), NegotiationError> {
        let desc = to_rtc_description(description).map_err(NegotiationError::rejected)?;
        self.peer_connection
            .set_local_description(desc)
            .await
            .map_err(NegotiationError::rejected)
    }

    async fn set_remote_description(
        &self,
        description: SessionDescription,
    ) -> Result<(), NegotiationError> {
        let desc = to_rtc_description(description).map_err(NegotiationError::rejected)?;
        self.peer_connection
            .set_remote_description(desc)
            .await
            .map_err(NegotiationError::rejected)
    }

    async fn add_ice_candidate(&self, candidate: IceCandidate) -> Result<(), NegotiationError> {
        let init = RTCIceCandidateInit {
            candidate: candidate.candidate,
            sdp_mid: candidate.sdp_mid,
            sdp_mline_index: candidate.sdp_m_line_index,
            username_fragment: candidate.username_fragment,
        };
        self.peer_connection
            .add_ice_candidate(init)
            .await
            .map_err(NegotiationError::rejected)
    }

    async fn close(&self) {
        if let Err(e) = self.peer_connection.close().await {
            error!("Failed to close peer connection: {}", e);
        }
    }
}

struct RtcChannelSink {
    dc: Arc<RTCDataChannel>,
}

#[async_trait]
impl ChannelSink for RtcChannelSink {
    async fn send_text(&self, text: String) -> Result<(), SendError> {
        self.dc
            .send_text(text)
            .await
            .map(|_| ())
            .map_err(|e| SendError::Channel(e.to_string()))
    }

    fn label(&self) -> String {
        self.dc.label().to_owned()
    }
}

/// Default [`EngineFactory`]: one webrtc-rs peer connection per session.
#[derive(Debug, Default, Clone, Copy)]
pub struct RtcEngineFactory;

#[async_trait]
impl EngineFactory for RtcEngineFactory {
    async fn create(
        &self,
        rtc: &RtcConfig,
        channel: &DataChannelConfig,
        events: mpsc::Sender<EngineEvent>,
    ) -> Result<Box<dyn NegotiationEngine>, NegotiationError> {
        let engine = RtcEngine::new(rtc, channel.clone(), events)
            .await
            .map_err(NegotiationError::rejected)?;
        Ok(Box::new(engine))
    }
}
