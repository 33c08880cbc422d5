//! Error taxonomy for signaling and session establishment.

use thiserror::Error;

/// The signaling transport could not be opened.
#[derive(Debug, Error)]
#[error("failed to open signaling transport to {address}: {reason}")]
pub struct ConnectError {
    pub address: String,
    pub reason: String,
}

impl ConnectError {
    pub fn new(address: impl Into<String>, reason: impl ToString) -> Self {
        Self {
            address: address.into(),
            reason: reason.to_string(),
        }
    }
}

/// A wire message could not be decoded.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Not valid JSON at all.
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),

    /// Valid JSON, but not an object.
    #[error("expected a json object, got {0}")]
    NotAnObject(String),
}

/// The negotiation engine rejected a description or candidate, or one could not be parsed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NegotiationError {
    #[error("malformed session description: {0}")]
    MalformedDescription(String),

    #[error("malformed ice candidate: {0}")]
    MalformedCandidate(String),

    #[error("negotiation engine rejected the operation: {0}")]
    Rejected(String),
}

impl NegotiationError {
    pub fn rejected(err: impl ToString) -> Self {
        Self::Rejected(err.to_string())
    }
}

/// A message was dropped instead of sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SendError {
    #[error("connection is closed")]
    Closed,

    #[error("refusing to send an empty message")]
    EmptyMessage,

    #[error("failed to encode message: {0}")]
    Encode(String),

    #[error("channel send failed: {0}")]
    Channel(String),
}

/// Errors returned by peer session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Connect(#[from] ConnectError),

    #[error(transparent)]
    Negotiation(#[from] NegotiationError),

    #[error(transparent)]
    Send(#[from] SendError),

    #[error("{operation} is not available to the {role} role")]
    WrongRole {
        operation: &'static str,
        role: &'static str,
    },

    #[error("session is closed")]
    Closed,
}
