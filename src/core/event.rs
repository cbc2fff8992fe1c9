//! Inbound events and the identities they are routed by.
//!
//! Events are produced by the inbound delivery layer after transport,
//! signature checks and payload decoding. The engine only reads them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// External identity a session is bound to (one user on one channel).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SessionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for SessionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Opaque token used by the outbound collaborator to address a reply.
///
/// The engine passes it through untouched.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyToken(String);

impl ReplyToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Kind of inbound event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Free text typed by the user
    Message,
    /// Structured action data from a button press
    Postback,
}

/// Content carried by an event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Payload {
    Text { text: String },
    Postback { data: String },
}

/// A single inbound stimulus.
///
/// The kind is derived from the payload so the two can never disagree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub payload: Payload,
    pub reply_token: ReplyToken,
}

impl Event {
    /// Text message event.
    pub fn message(text: impl Into<String>, reply_token: ReplyToken) -> Self {
        Self {
            payload: Payload::Text { text: text.into() },
            reply_token,
        }
    }

    /// Postback (button action) event.
    pub fn postback(data: impl Into<String>, reply_token: ReplyToken) -> Self {
        Self {
            payload: Payload::Postback { data: data.into() },
            reply_token,
        }
    }

    pub fn kind(&self) -> EventKind {
        match self.payload {
            Payload::Text { .. } => EventKind::Message,
            Payload::Postback { .. } => EventKind::Postback,
        }
    }

    /// Message text, if this is a message event.
    pub fn text(&self) -> Option<&str> {
        match &self.payload {
            Payload::Text { text } => Some(text),
            Payload::Postback { .. } => None,
        }
    }

    /// Postback data, if this is a postback event.
    pub fn postback_data(&self) -> Option<&str> {
        match &self.payload {
            Payload::Postback { data } => Some(data),
            Payload::Text { .. } => None,
        }
    }
}
