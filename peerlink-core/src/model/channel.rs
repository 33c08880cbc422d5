use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Application envelope for the data channel. The signaling core never looks inside.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataChannelMessage {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub payload: Value,
}

impl DataChannelMessage {
    pub fn new(kind: impl Into<String>, payload: Value) -> Self {
        Self {
            kind: kind.into(),
            payload,
        }
    }

    pub fn to_json(&self) -> Value {
        json!({ "type": self.kind, "payload": self.payload })
    }
}

/// Canonical text form of something sent over the data channel.
///
/// Strings go out as-is; structured values are serialized to JSON.
pub trait ChannelText {
    fn to_channel_text(&self) -> String;
}

impl ChannelText for str {
    fn to_channel_text(&self) -> String {
        self.to_owned()
    }
}

impl ChannelText for String {
    fn to_channel_text(&self) -> String {
        self.clone()
    }
}

impl ChannelText for Value {
    fn to_channel_text(&self) -> String {
        match self {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        }
    }
}

impl ChannelText for DataChannelMessage {
    fn to_channel_text(&self) -> String {
        self.to_json().to_string()
    }
}

impl<T: ChannelText + ?Sized> ChannelText for &T {
    fn to_channel_text(&self) -> String {
        (**self).to_channel_text()
    }
}
