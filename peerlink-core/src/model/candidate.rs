use crate::error::NegotiationError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Trickle ICE candidate in the browser's `RTCIceCandidateInit` shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IceCandidate {
    pub candidate: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sdp_mid: Option<String>,
    #[serde(rename = "sdpMLineIndex", default, skip_serializing_if = "Option::is_none")]
    pub sdp_m_line_index: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username_fragment: Option<String>,
}

impl IceCandidate {
    pub fn new(candidate: impl Into<String>) -> Self {
        Self {
            candidate: candidate.into(),
            sdp_mid: None,
            sdp_m_line_index: None,
            username_fragment: None,
        }
    }

    pub fn from_payload(payload: &Value) -> Result<Self, NegotiationError> {
        if !payload.is_object() {
            return Err(NegotiationError::MalformedCandidate(format!(
                "expected an object, got {payload}"
            )));
        }
        serde_json::from_value(normalize_candidate_fields(payload))
            .map_err(|e| NegotiationError::MalformedCandidate(e.to_string()))
    }

    pub fn to_payload(&self) -> Value {
        let mut map = Map::new();
        map.insert("candidate".into(), Value::from(self.candidate.clone()));
        if let Some(mid) = &self.sdp_mid {
            map.insert("sdpMid".into(), Value::from(mid.clone()));
        }
        if let Some(index) = self.sdp_m_line_index {
            map.insert("sdpMLineIndex".into(), Value::from(index));
        }
        if let Some(fragment) = &self.username_fragment {
            map.insert("usernameFragment".into(), Value::from(fragment.clone()));
        }
        Value::Object(map)
    }
}

/// Moves the candidate line from `sdp` to `candidate` when `candidate` is absent.
pub fn normalize_candidate_fields(payload: &Value) -> Value {
    let mut normalized = payload.clone();
    let Value::Object(map) = &mut normalized else {
        return normalized;
    };

    let has_alternate_line = map.get("sdp").is_some_and(|line| !line.is_null());
    if has_alternate_line && !map.contains_key("candidate") {
        if let Some(line) = map.remove("sdp") {
            map.insert("candidate".to_string(), line);
        }
    }

    normalized
}
