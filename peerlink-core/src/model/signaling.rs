use crate::model::candidate::IceCandidate;
use crate::model::description::SessionDescription;
use crate::model::identity::PeerIdentity;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// Kind of a signaling message.
///
/// The wire set is closed, but receivers must survive anything a relay forwards, so every
/// unrecognized tag is kept verbatim in [`SignalKind::Unknown`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SignalKind {
    Offer,
    Answer,
    Ice,
    Ping,
    GetOffer,
    Unknown(String),
}

impl SignalKind {
    pub fn as_str(&self) -> &str {
        match self {
            SignalKind::Offer => "OFFER",
            SignalKind::Answer => "ANSWER",
            SignalKind::Ice => "ICE",
            SignalKind::Ping => "PING",
            SignalKind::GetOffer => "GET_OFFER",
            SignalKind::Unknown(tag) => tag,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, SignalKind::Unknown(_))
    }
}

impl From<&str> for SignalKind {
    fn from(tag: &str) -> Self {
        match tag {
            "OFFER" => SignalKind::Offer,
            "ANSWER" => SignalKind::Answer,
            "ICE" => SignalKind::Ice,
            "PING" => SignalKind::Ping,
            "GET_OFFER" => SignalKind::GetOffer,
            other => SignalKind::Unknown(other.to_string()),
        }
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SignalKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SignalKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(SignalKind::from(tag.as_str()))
    }
}

fn empty_payload() -> Value {
    Value::String(String::new())
}

/// One message on the signaling channel.
///
/// `payload` travels under the `sdp` key: a session description for OFFER/ANSWER, a candidate
/// for ICE, and the empty string otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalMessage {
    #[serde(rename = "type")]
    pub kind: SignalKind,
    #[serde(default)]
    pub sender: String,
    #[serde(default)]
    pub recipient: String,
    #[serde(rename = "roomId", default)]
    pub room_id: String,
    #[serde(rename = "sdp", default = "empty_payload")]
    pub payload: Value,
}

impl SignalMessage {
    pub fn new(
        kind: SignalKind,
        sender: impl Into<String>,
        recipient: impl Into<String>,
        room_id: impl Into<String>,
        payload: Value,
    ) -> Self {
        Self {
            kind,
            sender: sender.into(),
            recipient: recipient.into(),
            room_id: room_id.into(),
            payload,
        }
    }

    pub fn ping(identity: &PeerIdentity) -> Self {
        Self::new(
            SignalKind::Ping,
            &identity.local_id,
            &identity.peer_id,
            &identity.room_id,
            empty_payload(),
        )
    }

    pub fn get_offer(identity: &PeerIdentity) -> Self {
        Self::new(
            SignalKind::GetOffer,
            &identity.local_id,
            &identity.peer_id,
            &identity.room_id,
            empty_payload(),
        )
    }

    /// OFFER or ANSWER carrying `description`, picked by its type.
    pub fn description(
        identity: &PeerIdentity,
        recipient: &str,
        description: &SessionDescription,
    ) -> Self {
        let kind = match description.sdp_type {
            crate::model::SdpType::Offer => SignalKind::Offer,
            crate::model::SdpType::Answer => SignalKind::Answer,
        };
        Self::new(
            kind,
            &identity.local_id,
            recipient,
            &identity.room_id,
            description.to_payload(),
        )
    }

    pub fn ice(identity: &PeerIdentity, recipient: &str, candidate: &IceCandidate) -> Self {
        Self::new(
            SignalKind::Ice,
            &identity.local_id,
            recipient,
            &identity.room_id,
            candidate.to_payload(),
        )
    }

    pub fn has_payload(&self) -> bool {
        match &self.payload {
            Value::Null => false,
            Value::String(s) => !s.is_empty(),
            _ => true,
        }
    }
}
