/// Close frame details reported by the relay, when it sent any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseInfo {
    pub code: u16,
    pub reason: String,
}

/// What a transport delivers to the session, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    /// One raw text message from the relay.
    Message(String),

    /// The connection ended. Terminal: no events follow.
    Closed(Option<CloseInfo>),
}
