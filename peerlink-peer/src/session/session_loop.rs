use super::keep_alive::KeepAlive;
use super::state::{Role, SessionState};
use super::{ChannelReadyCallback, SignalCloseCallback};
use crate::negotiation::{EngineEvent, NegotiationEngine};
use crate::transport::{CloseInfo, SignalingConnection, TransportEvent};
use peerlink_core::{
    IceCandidate, MediaConstraints, PeerIdentity, SendError, SessionError, SignalMessage, codec,
};
use std::collections::VecDeque;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, error, info, warn};

/// Commands sent from [`super::PeerSession`] handles to the session task.
pub(super) enum SessionCommand {
    Call(oneshot::Sender<Result<(), SessionError>>),
    WaitForCall(oneshot::Sender<Result<(), SessionError>>),
    CloseSignalServer(oneshot::Sender<()>),
    Close(oneshot::Sender<()>),
    Settle(oneshot::Sender<SessionState>),
}

/// The session task. Owns every piece of mutable session state; handlers run one at a time.
pub(super) struct SessionLoop {
    pub(super) identity: PeerIdentity,
    pub(super) role: Role,
    pub(super) media: MediaConstraints,
    pub(super) engine: Box<dyn NegotiationEngine>,
    pub(super) connection: SignalingConnection,
    pub(super) signaling_open: bool,
    pub(super) keep_alive: KeepAlive,
    pub(super) state_tx: watch::Sender<SessionState>,
    pub(super) command_rx: mpsc::Receiver<SessionCommand>,
    pub(super) engine_rx: mpsc::Receiver<EngineEvent>,
    pub(super) engine_events_open: bool,
    pub(super) engine_closed: bool,
    pub(super) chan_ready: Option<ChannelReadyCallback>,
    pub(super) on_close_signal: Option<SignalCloseCallback>,
    /// Sender of the last applied OFFER/ANSWER.
    pub(super) remote_id: Option<String>,
    pub(super) remote_description_set: bool,
    /// Remote candidates that arrived before any remote description, in arrival order.
    pub(super) pending_candidates: VecDeque<IceCandidate>,
}

impl SessionLoop {
    pub(super) async fn run(mut self) {
        info!("Session {} loop started", self.identity);

        // Engine events and signaling go first so that a command observes every message
        // delivered before it.
        loop {
            tokio::select! {
                biased;

                evt = self.engine_rx.recv(), if self.engine_events_open => {
                    match evt {
                        Some(e) => self.handle_engine_event(e).await,
                        None => {
                            debug!("Engine event channel closed");
                            self.engine_events_open = false;
                        }
                    }
                }

                evt = self.connection.recv(), if self.signaling_open => {
                    match evt {
                        Some(TransportEvent::Message(text)) => self.handle_signal(&text).await,
                        Some(TransportEvent::Closed(info)) => self.on_signaling_lost(info),
                        None => self.on_signaling_lost(None),
                    }
                }

                cmd = self.command_rx.recv() => {
                    match cmd {
                        Some(c) => self.handle_command(c).await,
                        None => {
                            info!("Session {} handle dropped. Shutting down.", self.identity);
                            break;
                        }
                    }
                }

                _ = self.keep_alive.tick() => {
                    let _ = self.send_signal(SignalMessage::ping(&self.identity));
                }
            }

            if self.engine_closed {
                break;
            }
        }

        self.close_signaling();
        if !self.engine_closed {
            self.engine.close().await;
            self.engine_closed = true;
        }
        info!("Session {} loop finished", self.identity);
    }

    async fn handle_command(&mut self, cmd: SessionCommand) {
        match cmd {
            SessionCommand::Call(reply) => {
                let result = match self.check_role(Role::Caller, "call") {
                    Ok(()) => self.call().await,
                    Err(e) => Err(e),
                };
                let _ = reply.send(result);
            }

            SessionCommand::WaitForCall(reply) => {
                let result = match self.check_role(Role::Callee, "wait_for_call") {
                    Ok(()) => self.wait_for_call(),
                    Err(e) => Err(e),
                };
                let _ = reply.send(result);
            }

            SessionCommand::CloseSignalServer(reply) => {
                self.close_signaling();
                let _ = reply.send(());
            }

            SessionCommand::Close(reply) => {
                self.close_signaling();
                self.engine.close().await;
                self.engine_closed = true;
                let _ = reply.send(());
            }

            SessionCommand::Settle(reply) => {
                let _ = reply.send(self.state());
            }
        }
    }

    fn check_role(&self, required: Role, operation: &'static str) -> Result<(), SessionError> {
        if self.is_closed() {
            return Err(SessionError::Closed);
        }
        if self.role != required {
            warn!(
                "Session {}: {} ignored for the {} role",
                self.identity, operation, self.role
            );
            return Err(SessionError::WrongRole {
                operation,
                role: self.role.as_str(),
            });
        }
        Ok(())
    }

    pub(super) fn state(&self) -> SessionState {
        *self.state_tx.borrow()
    }

    pub(super) fn is_closed(&self) -> bool {
        self.state() == SessionState::Closed
    }

    /// Moves to `next`. `Closed` is terminal and `Connected` never regresses to `Negotiating`.
    pub(super) fn set_state(&self, next: SessionState) {
        let current = self.state();
        if current == next || current == SessionState::Closed {
            return;
        }
        if current == SessionState::Connected && next == SessionState::Negotiating {
            return;
        }
        info!("Session {} state: {} -> {}", self.identity, current, next);
        self.state_tx.send_replace(next);
    }

    pub(super) fn enter_signaling_ready(&mut self) {
        self.set_state(SessionState::SignalingReady);
        self.keep_alive.start();
    }

    /// Single stop point for signaling: releases the connection and the keep-alive timer.
    pub(super) fn close_signaling(&mut self) {
        self.keep_alive.stop();
        self.connection.close();
        self.signaling_open = false;
        if !self.pending_candidates.is_empty() {
            debug!(
                "Dropping {} queued remote candidates",
                self.pending_candidates.len()
            );
            self.pending_candidates.clear();
        }
        self.set_state(SessionState::Closed);
    }

    fn on_signaling_lost(&mut self, info: Option<CloseInfo>) {
        warn!("Session {} lost its signaling connection", self.identity);
        self.close_signaling();
        match self.on_close_signal.take() {
            Some(callback) => callback(info),
            None => match info {
                Some(CloseInfo { code, reason }) => {
                    info!("Signaling closed with code {} ({})", code, reason)
                }
                None => info!("Signaling closed without a close frame"),
            },
        }
    }

    /// Peer id to address outbound messages to.
    pub(super) fn remote_recipient(&self) -> &str {
        self.remote_id.as_deref().unwrap_or(&self.identity.peer_id)
    }

    pub(super) fn send_signal(&self, message: SignalMessage) -> Result<(), SendError> {
        let text = codec::encode(&message).map_err(|e| {
            error!("Failed to encode {} message: {}", message.kind, e);
            SendError::Encode(e.to_string())
        })?;
        debug!("-> {} to {}", message.kind, message.recipient);
        self.connection.send(text)
    }
}
