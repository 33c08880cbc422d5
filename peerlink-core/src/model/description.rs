use crate::error::NegotiationError;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SdpType {
    Offer,
    Answer,
}

impl fmt::Display for SdpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SdpType::Offer => f.write_str("offer"),
            SdpType::Answer => f.write_str("answer"),
        }
    }
}

/// SDP offer or answer as exchanged over signaling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionDescription {
    #[serde(rename = "type")]
    pub sdp_type: SdpType,
    pub sdp: String,
}

impl SessionDescription {
    pub fn offer(sdp: impl Into<String>) -> Self {
        Self {
            sdp_type: SdpType::Offer,
            sdp: sdp.into(),
        }
    }

    pub fn answer(sdp: impl Into<String>) -> Self {
        Self {
            sdp_type: SdpType::Answer,
            sdp: sdp.into(),
        }
    }

    /// Parses a signaling payload after normalizing its field names and type case.
    pub fn from_payload(payload: &Value) -> Result<Self, NegotiationError> {
        if !payload.is_object() {
            return Err(NegotiationError::MalformedDescription(format!(
                "expected an object, got {payload}"
            )));
        }
        serde_json::from_value(normalize_description_fields(payload))
            .map_err(|e| NegotiationError::MalformedDescription(e.to_string()))
    }

    pub fn to_payload(&self) -> Value {
        json!({
            "type": self.sdp_type.to_string(),
            "sdp": self.sdp,
        })
    }
}

/// Lower-cases `type` and moves a `description` body to `sdp` when `sdp` is absent.
///
/// Some clients send `"OFFER"` or `"Answer"`, and some put the body under `description`.
/// Non-object payloads are returned unchanged.
pub fn normalize_description_fields(payload: &Value) -> Value {
    let mut normalized = payload.clone();
    let Value::Object(map) = &mut normalized else {
        return normalized;
    };

    if let Some(Value::String(sdp_type)) = map.get_mut("type") {
        *sdp_type = sdp_type.to_lowercase();
    }

    let has_alternate_body = map.get("description").is_some_and(|body| !body.is_null());
    if has_alternate_body && !map.contains_key("sdp") {
        if let Some(body) = map.remove("description") {
            map.insert("sdp".to_string(), body);
        }
    }

    normalized
}
