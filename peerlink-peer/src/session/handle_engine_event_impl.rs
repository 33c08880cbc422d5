use super::session_loop::SessionLoop;
use super::state::SessionState;
use crate::negotiation::EngineEvent;
use peerlink_core::SignalMessage;
use tracing::{debug, info, warn};

impl SessionLoop {
    pub(super) async fn handle_engine_event(&mut self, event: EngineEvent) {
        if self.is_closed() {
            debug!("Ignoring engine event after close: {:?}", event);
            return;
        }

        match event {
            EngineEvent::LocalCandidate(candidate) => {
                let recipient = self.remote_recipient().to_string();
                let message = SignalMessage::ice(&self.identity, &recipient, &candidate);
                if let Err(e) = self.send_signal(message) {
                    warn!("Failed to send local candidate: {}", e);
                }
            }

            EngineEvent::ChannelOpen(channel) => {
                self.set_state(SessionState::Connected);
                match self.chan_ready.take() {
                    Some(callback) => {
                        info!(
                            "Session {} data channel '{}' ready",
                            self.identity,
                            channel.label()
                        );
                        callback(channel);
                    }
                    None => warn!("Data channel opened again; ready callback already fired"),
                }
            }
        }
    }
}
