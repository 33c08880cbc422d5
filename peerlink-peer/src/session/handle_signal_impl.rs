use super::session_loop::SessionLoop;
use super::state::SessionState;
use peerlink_core::{
    IceCandidate, NegotiationError, SessionDescription, SignalKind, SignalMessage, codec,
};
use tracing::{debug, info, warn};

impl SessionLoop {
    /// Handles one inbound signaling frame. Nothing here escapes: every failure is logged and
    /// leaves the session state as it was.
    pub(super) async fn handle_signal(&mut self, text: &str) {
        if self.is_closed() {
            debug!("Ignoring signal after close");
            return;
        }

        let message = match codec::decode(text) {
            Ok(message) => message,
            Err(e) => {
                warn!("Dropping undecodable signaling message: {}", e);
                return;
            }
        };

        if message.room_id != self.identity.room_id {
            warn!(
                "Dropping {} from {}: room {:?} is not {:?}",
                message.kind, message.sender, message.room_id, self.identity.room_id
            );
            return;
        }

        if message.sender == self.identity.local_id {
            debug!("Dropping echo of own {}", message.kind);
            return;
        }

        debug!("<- {} from {}", message.kind, message.sender);

        match message.kind.clone() {
            SignalKind::Offer => self.handle_remote_offer(message).await,
            SignalKind::Answer => self.handle_remote_answer(message).await,
            SignalKind::Ice => self.handle_remote_candidate(message).await,
            SignalKind::Ping => {}
            SignalKind::GetOffer => {
                info!(
                    "Session {} received GET_OFFER from {}; waiting for call()",
                    self.identity, message.sender
                );
            }
            SignalKind::Unknown(tag) => {
                warn!("Ignoring signaling message of unknown type {:?}", tag);
            }
        }
    }

    async fn handle_remote_offer(&mut self, message: SignalMessage) {
        let offer = match SessionDescription::from_payload(&message.payload) {
            Ok(offer) => offer,
            Err(e) => {
                warn!("Dropping OFFER from {}: {}", message.sender, e);
                return;
            }
        };

        if let Err(e) = self.apply_remote_description(offer, &message.sender).await {
            warn!("Failed to apply OFFER from {}: {}", message.sender, e);
            return;
        }

        let answer = match self.engine.create_answer().await {
            Ok(answer) => answer,
            Err(e) => {
                warn!("Failed to create answer: {}", e);
                return;
            }
        };
        if let Err(e) = self.engine.set_local_description(answer.clone()).await {
            warn!("Failed to set local answer: {}", e);
            return;
        }

        self.set_state(SessionState::Negotiating);
        let reply = SignalMessage::description(&self.identity, &message.sender, &answer);
        if let Err(e) = self.send_signal(reply) {
            warn!("Failed to send ANSWER to {}: {}", message.sender, e);
        }
    }

    async fn handle_remote_answer(&mut self, message: SignalMessage) {
        let answer = match SessionDescription::from_payload(&message.payload) {
            Ok(answer) => answer,
            Err(e) => {
                warn!("Dropping ANSWER from {}: {}", message.sender, e);
                return;
            }
        };

        if let Err(e) = self.apply_remote_description(answer, &message.sender).await {
            warn!("Failed to apply ANSWER from {}: {}", message.sender, e);
        }
    }

    async fn handle_remote_candidate(&mut self, message: SignalMessage) {
        let candidate = match IceCandidate::from_payload(&message.payload) {
            Ok(candidate) => candidate,
            Err(e) => {
                warn!("Dropping ICE from {}: {}", message.sender, e);
                return;
            }
        };

        if !self.remote_description_set {
            debug!(
                "Queueing remote candidate until a remote description is set ({} queued)",
                self.pending_candidates.len() + 1
            );
            self.pending_candidates.push_back(candidate);
            return;
        }

        if let Err(e) = self.engine.add_ice_candidate(candidate).await {
            warn!("Failed to add remote candidate: {}", e);
        }
    }

    /// Applies a remote description, learns the remote peer id and drains queued candidates.
    async fn apply_remote_description(
        &mut self,
        description: SessionDescription,
        sender: &str,
    ) -> Result<(), NegotiationError> {
        self.engine.set_remote_description(description).await?;
        self.remote_description_set = true;
        if !sender.is_empty() {
            self.remote_id = Some(sender.to_string());
        }

        while let Some(candidate) = self.pending_candidates.pop_front() {
            if let Err(e) = self.engine.add_ice_candidate(candidate).await {
                warn!("Failed to add queued remote candidate: {}", e);
            }
        }
        Ok(())
    }
}
