use super::session_loop::SessionLoop;
use super::state::SessionState;
use peerlink_core::{SessionError, SignalMessage};
use tracing::{info, warn};

impl SessionLoop {
    /// 1. Create the offer with the configured constraints
    /// 2. Set it as the local description
    /// 3. Send it to the remote peer
    pub(super) async fn call(&mut self) -> Result<(), SessionError> {
        let offer = self.engine.create_offer(&self.media).await?;
        self.engine.set_local_description(offer.clone()).await?;

        if self.is_closed() {
            return Err(SessionError::Closed);
        }
        self.set_state(SessionState::Negotiating);

        let recipient = self.remote_recipient().to_string();
        info!("Session {} sending OFFER to {}", self.identity, recipient);
        self.send_signal(SignalMessage::description(&self.identity, &recipient, &offer))
            .map_err(|e| {
                warn!("Failed to send OFFER: {}", e);
                SessionError::Send(e)
            })
    }

    pub(super) fn wait_for_call(&mut self) -> Result<(), SessionError> {
        info!("Session {} waiting for a call", self.identity);
        self.send_signal(SignalMessage::get_offer(&self.identity))
            .map_err(|e| {
                warn!("Failed to send GET_OFFER: {}", e);
                SessionError::Send(e)
            })
    }
}
