mod config;
mod handle_engine_event_impl;
mod handle_signal_impl;
mod keep_alive;
mod negotiate_impl;
mod session_loop;
mod state;

pub use config::{ChannelReadyCallback, SessionConfig, SignalCloseCallback};
pub use state::{Role, SessionState};

use crate::negotiation::{EngineFactory, RtcEngineFactory};
use crate::transport::{SignalingTransport, WebSocketTransport};
use keep_alive::KeepAlive;
use peerlink_core::{PeerIdentity, SessionError};
use session_loop::{SessionCommand, SessionLoop};
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{error, info};

const ENGINE_EVENT_CAPACITY: usize = 256;
const COMMAND_CAPACITY: usize = 32;

/// Handle to one peer-to-peer negotiation.
///
/// The session itself runs as a single task that owns the negotiation engine, the signaling
/// connection and the keep-alive timer; this handle only sends it commands. Dropping the last
/// handle shuts the task down and closes the engine, so keep it alive for as long as the data
/// channel is in use.
pub struct PeerSession {
    identity: PeerIdentity,
    role: Role,
    command_tx: mpsc::Sender<SessionCommand>,
    state_rx: watch::Receiver<SessionState>,
}

impl PeerSession {
    /// Opens a WebSocket to the relay and prepares a webrtc-rs engine.
    pub async fn connect(config: SessionConfig) -> Result<Self, SessionError> {
        Self::connect_with(config, &WebSocketTransport, &RtcEngineFactory).await
    }

    pub async fn connect_with(
        config: SessionConfig,
        transport: &dyn SignalingTransport,
        engines: &dyn EngineFactory,
    ) -> Result<Self, SessionError> {
        let SessionConfig {
            room_id,
            ws_address,
            chan_ready_callback,
            on_close_signal_message,
            id,
            caller,
            callee_id,
            rtc,
            media,
            data_channel,
            keep_alive_interval,
            id_generator,
        } = config;

        let identity = PeerIdentity::new(room_id, id, callee_id, id_generator.as_ref());
        let role = if caller { Role::Caller } else { Role::Callee };
        let (state_tx, state_rx) = watch::channel(SessionState::Idle);

        let (engine_tx, engine_rx) = mpsc::channel(ENGINE_EVENT_CAPACITY);
        let engine = engines.create(&rtc, &data_channel, engine_tx).await?;

        state_tx.send_replace(SessionState::SignalingConnecting);
        info!("Session {} ({}) connecting to {}", identity, role, ws_address);

        let connection = match transport.open(&ws_address).await {
            Ok(connection) => connection,
            Err(e) => {
                error!("Session {} failed to open signaling: {}", identity, e);
                engine.close().await;
                return Err(e.into());
            }
        };

        let (command_tx, command_rx) = mpsc::channel(COMMAND_CAPACITY);
        let mut session_loop = SessionLoop {
            identity: identity.clone(),
            role,
            media,
            engine,
            connection,
            signaling_open: true,
            keep_alive: KeepAlive::new(keep_alive_interval),
            state_tx,
            command_rx,
            engine_rx,
            engine_events_open: true,
            engine_closed: false,
            chan_ready: Some(chan_ready_callback),
            on_close_signal: on_close_signal_message,
            remote_id: None,
            remote_description_set: false,
            pending_candidates: Default::default(),
        };
        session_loop.enter_signaling_ready();
        tokio::spawn(session_loop.run());

        Ok(Self {
            identity,
            role,
            command_tx,
            state_rx,
        })
    }

    pub fn identity(&self) -> &PeerIdentity {
        &self.identity
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn state(&self) -> SessionState {
        *self.state_rx.borrow()
    }

    pub fn watch_state(&self) -> watch::Receiver<SessionState> {
        self.state_rx.clone()
    }

    /// Waits until the session reaches `wanted` or closes, and returns the state it stopped at.
    pub async fn wait_for_state(&self, wanted: SessionState) -> SessionState {
        let mut rx = self.state_rx.clone();
        match rx
            .wait_for(|s| *s == wanted || *s == SessionState::Closed)
            .await
        {
            Ok(state) => *state,
            Err(_) => SessionState::Closed,
        }
    }

    /// State after the session has handled every signaling message already delivered to it.
    pub async fn settled_state(&self) -> SessionState {
        self.request(SessionCommand::Settle)
            .await
            .unwrap_or(SessionState::Closed)
    }

    /// Caller only: creates an offer and sends it to the peer.
    pub async fn call(&self) -> Result<(), SessionError> {
        self.request(SessionCommand::Call)
            .await
            .unwrap_or(Err(SessionError::Closed))
    }

    /// Callee only: announces readiness with GET_OFFER.
    pub async fn wait_for_call(&self) -> Result<(), SessionError> {
        self.request(SessionCommand::WaitForCall)
            .await
            .unwrap_or(Err(SessionError::Closed))
    }

    /// Closes the relay connection and stops the keep-alive. An open data channel keeps working.
    pub async fn close_signal_server(&self) {
        let _ = self.request(SessionCommand::CloseSignalServer).await;
    }

    /// Closes signaling and the negotiation engine, ending any data channel.
    pub async fn close(&self) {
        let _ = self.request(SessionCommand::Close).await;
    }

    async fn request<T>(
        &self,
        command: impl FnOnce(oneshot::Sender<T>) -> SessionCommand,
    ) -> Option<T> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.command_tx.send(command(reply_tx)).await.ok()?;
        reply_rx.await.ok()
    }
}
