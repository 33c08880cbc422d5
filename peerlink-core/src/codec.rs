//! JSON codec for [`SignalMessage`].
//!
//! Decoding is lenient about the `type` tag: anything that is not one of the known tags,
//! including non-string tags, decodes to [`SignalKind::Unknown`] so the session can log and
//! skip it. The `sender`, `recipient` and `roomId` keys are just as lenient: `null` reads as
//! the empty string and other non-string values read as their JSON text. Only input that is not
//! a JSON object is an error.

use crate::error::CodecError;
use crate::model::{SignalKind, SignalMessage};
use serde_json::{Map, Value};

const STRING_KEYS: [&str; 3] = ["sender", "recipient", "roomId"];

pub fn encode(message: &SignalMessage) -> Result<String, CodecError> {
    Ok(serde_json::to_string(message)?)
}

pub fn decode(text: &str) -> Result<SignalMessage, CodecError> {
    let mut value: Value = serde_json::from_str(text)?;

    let Value::Object(map) = &mut value else {
        return Err(CodecError::NotAnObject(value.to_string()));
    };

    match map.get("type") {
        Some(Value::String(_)) => {}
        Some(other) => {
            let tag = other.to_string();
            map.insert("type".to_string(), Value::String(tag));
        }
        None => {
            map.insert("type".to_string(), Value::String(String::new()));
        }
    }
    for key in STRING_KEYS {
        coerce_string(map, key);
    }

    Ok(serde_json::from_value(value)?)
}

fn coerce_string(map: &mut Map<String, Value>, key: &str) {
    let text = match map.get(key) {
        None | Some(Value::String(_)) => return,
        Some(Value::Null) => String::new(),
        Some(other) => other.to_string(),
    };
    map.insert(key.to_string(), Value::String(text));
}

/// Shorthand for building a message and encoding it in one step.
pub fn encode_parts(
    kind: SignalKind,
    sender: &str,
    recipient: &str,
    room_id: &str,
    payload: Value,
) -> Result<String, CodecError> {
    encode(&SignalMessage::new(kind, sender, recipient, room_id, payload))
}
