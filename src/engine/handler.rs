//! Handlers and the effects they produce.
//!
//! A handler runs after a transition commits and composes the reply for the
//! event that caused it. Delivery of that reply belongs to the caller.

use crate::core::{Event, ReplyToken, SessionId, State};
use crate::engine::transition::Trigger;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// Failure reported by a handler.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum HandlerError {
    #[error("Handler failed: {0}")]
    Failed(String),

    #[error("Handler panicked")]
    Panicked,
}

pub type HandlerResult = Result<Option<Reply>, HandlerError>;

/// Type alias for handler functions.
///
/// Returning `Ok(None)` means "stay silent".
pub type Handler<S> = Arc<dyn Fn(&HandlerContext<'_, S>) -> HandlerResult + Send + Sync>;

/// Everything a handler may look at. All of it is read-only.
#[derive(Debug)]
pub struct HandlerContext<'a, S: State> {
    pub session_id: &'a SessionId,
    pub from: &'a S,
    pub to: &'a S,
    pub trigger: &'a Trigger,
    pub event: &'a Event,
}

/// Button on a buttons template; pressing it sends `data` back as a postback.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostbackAction {
    pub label: String,
    pub data: String,
}

impl PostbackAction {
    pub fn new(label: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            data: data.into(),
        }
    }
}

/// One outbound message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundMessage {
    Text {
        text: String,
    },
    Image {
        original_url: String,
        preview_url: String,
    },
    Buttons {
        title: String,
        text: String,
        actions: Vec<PostbackAction>,
    },
}

/// Content of a reply: one or more messages, sent in order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    messages: Vec<OutboundMessage>,
}

impl Reply {
    pub fn new(message: OutboundMessage) -> Self {
        Self {
            messages: vec![message],
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::new(OutboundMessage::Text { text: text.into() })
    }

    /// Image reply using the same URL for the preview.
    pub fn image(url: impl Into<String>) -> Self {
        let url = url.into();
        Self::new(OutboundMessage::Image {
            original_url: url.clone(),
            preview_url: url,
        })
    }

    pub fn buttons(
        title: impl Into<String>,
        text: impl Into<String>,
        actions: Vec<PostbackAction>,
    ) -> Self {
        Self::new(OutboundMessage::Buttons {
            title: title.into(),
            text: text.into(),
            actions,
        })
    }

    /// Append another message after the existing ones.
    pub fn then(mut self, message: OutboundMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn messages(&self) -> &[OutboundMessage] {
        &self.messages
    }
}

/// Reply addressed to the event it answers, ready for delivery.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Effect {
    /// Correlation key for the delivery layer
    pub id: Uuid,
    pub reply_token: ReplyToken,
    pub reply: Reply,
}

impl Effect {
    pub fn new(reply_token: ReplyToken, reply: Reply) -> Self {
        Self {
            id: Uuid::new_v4(),
            reply_token,
            reply,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reply_keeps_message_order() {
        let reply = Reply::text("first").then(OutboundMessage::Text {
            text: "second".to_string(),
        });

        assert_eq!(
            reply.messages(),
            &[
                OutboundMessage::Text {
                    text: "first".to_string()
                },
                OutboundMessage::Text {
                    text: "second".to_string()
                },
            ]
        );
    }

    #[test]
    fn image_reply_reuses_url_for_preview() {
        let reply = Reply::image("https://example.com/meme.jpg");

        match &reply.messages()[0] {
            OutboundMessage::Image {
                original_url,
                preview_url,
            } => assert_eq!(original_url, preview_url),
            other => panic!("Expected image, got {other:?}"),
        }
    }

    #[test]
    fn effects_get_distinct_ids() {
        let token = ReplyToken::new("t");
        let a = Effect::new(token.clone(), Reply::text("a"));
        let b = Effect::new(token, Reply::text("a"));

        assert_ne!(a.id, b.id);
    }

    #[test]
    fn buttons_serialize_with_type_tag() {
        let reply = Reply::buttons("Menu", "Pick one", vec![PostbackAction::new("Help", "help")]);
        let json = serde_json::to_value(&reply).unwrap();

        assert_eq!(json["messages"][0]["type"], "buttons");
        assert_eq!(json["messages"][0]["actions"][0]["data"], "help");
    }
}
