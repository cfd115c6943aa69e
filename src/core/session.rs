use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

use crate::core::message::Message;
use crate::utils::ids::generate_id;
use crate::utils::time::now_millis;

pub const NEW_SESSION_TITLE: &str = "New Conversation";
pub const TITLE_MAX_GRAPHEMES: usize = 30;

/// One persisted conversation thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSession {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub messages: Vec<Message>,
    /// Last model used in this session.
    pub model_id: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl ChatSession {
    pub fn new(model_id: impl Into<String>) -> Self {
        let now = now_millis();
        Self {
            id: generate_id("session"),
            title: NEW_SESSION_TITLE.to_string(),
            messages: Vec::new(),
            model_id: model_id.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Title derived from the first user message: at most
    /// [`TITLE_MAX_GRAPHEMES`] graphemes, with "..." appended when cut.
    pub fn title_from(content: &str) -> String {
        let mut graphemes = content.graphemes(true);
        let head: String = graphemes.by_ref().take(TITLE_MAX_GRAPHEMES).collect();
        if graphemes.next().is_some() {
            format!("{head}...")
        } else {
            head
        }
    }

    /// Append a user message, naming the session after it if it is the first.
    pub fn record_user_message(&mut self, message: Message) {
        if self.messages.is_empty() {
            self.title = Self::title_from(&message.content);
        }
        self.messages.push(message);
        self.touch();
    }

    pub fn contains_message(&self, id: &str) -> bool {
        self.messages.iter().any(|message| message.id == id)
    }

    pub fn touch(&mut self) {
        self.updated_at = now_millis().max(self.updated_at);
    }
}
