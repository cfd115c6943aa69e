use serde::{Deserialize, Serialize};

use crate::api::ChatMessage;
use crate::utils::ids::generate_id;
use crate::utils::time::now_millis;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::System => "system",
        }
    }
}

/// Delivery state of a message.
///
/// Only assistant placeholders start as `Sending`; they move to `Complete` or
/// `Error` exactly once. Messages stored without a status are complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    Sending,
    #[default]
    Complete,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub role: Role,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_id: Option<String>,
    #[serde(rename = "timestamp")]
    pub created_at: i64,
    #[serde(default)]
    pub status: MessageStatus,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: generate_id("user"),
            role: Role::User,
            content: content.into(),
            model_id: None,
            created_at: now_millis(),
            status: MessageStatus::Complete,
        }
    }

    /// Provisional assistant message shown while a completion is in flight.
    pub fn placeholder(model_id: &str) -> Self {
        Self {
            id: generate_id("ai"),
            role: Role::Assistant,
            content: String::new(),
            model_id: Some(model_id.to_string()),
            created_at: now_millis(),
            status: MessageStatus::Sending,
        }
    }

    pub fn assistant(id: impl Into<String>, content: impl Into<String>, model_id: &str) -> Self {
        Self {
            id: id.into(),
            role: Role::Assistant,
            content: content.into(),
            model_id: Some(model_id.to_string()),
            created_at: now_millis(),
            status: MessageStatus::Complete,
        }
    }

    /// Synthesized assistant message standing in for a failed completion.
    pub fn error(content: impl Into<String>, model_id: &str) -> Self {
        Self {
            id: generate_id("error"),
            role: Role::Assistant,
            content: content.into(),
            model_id: Some(model_id.to_string()),
            created_at: now_millis(),
            status: MessageStatus::Error,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == MessageStatus::Sending
    }

    pub fn is_error(&self) -> bool {
        self.status == MessageStatus::Error
    }

    pub fn to_api(&self) -> ChatMessage {
        ChatMessage {
            role: self.role.as_str().to_string(),
            content: self.content.clone(),
        }
    }
}

/// Replace the message whose id is `id`, keeping its position.
///
/// Returns false when no message carries that id.
pub fn replace_message(messages: &mut [Message], id: &str, replacement: Message) -> bool {
    match messages.iter_mut().find(|message| message.id == id) {
        Some(slot) => {
            *slot = replacement;
            true
        }
        None => false,
    }
}
