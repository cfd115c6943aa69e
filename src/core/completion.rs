use std::sync::Arc;

use tracing::{debug, warn};

use crate::api::ChatRequest;
use crate::core::backend::ChatBackend;
use crate::core::credentials::CredentialStore;
use crate::core::message::Message;
use crate::core::notify::Notifier;
use crate::utils::ids::generate_id;

pub const COMPLETION_ERROR_TEXT: &str = "I'm sorry, I encountered an error while processing your request. Please try again or select a different AI model.";
pub const MISSING_CREDENTIAL_TEXT: &str =
    "No API key found. Please add your API key or server URL in the settings.";
pub const COMPLETION_FAILURE_NOTICE: &str = "Failed to get AI response. Please try again.";

/// Turns one chat-completion call into exactly one assistant message.
///
/// Failures never escape: they come back as a message with
/// [`MessageStatus::Error`](crate::core::message::MessageStatus::Error) so the
/// transcript stays consistent.
pub struct CompletionClient {
    backend: Arc<dyn ChatBackend>,
    credentials: CredentialStore,
    notifier: Arc<dyn Notifier>,
}

impl CompletionClient {
    pub fn new(
        backend: Arc<dyn ChatBackend>,
        credentials: CredentialStore,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            backend,
            credentials,
            notifier,
        }
    }

    pub async fn complete(&self, model_id: &str, history: &[Message]) -> Message {
        let Some(access) = self.credentials.get() else {
            return Message::error(MISSING_CREDENTIAL_TEXT, model_id);
        };

        // Error replies are part of the transcript and are sent like any other turn.
        let messages = history
            .iter()
            .filter(|message| !message.is_pending())
            .map(Message::to_api)
            .collect();
        let request = ChatRequest {
            model: model_id.to_string(),
            messages,
            stream: false,
        };

        match self.backend.complete(&access, request).await {
            Ok(reply) => {
                debug!(model = model_id, chars = reply.content.len(), "completion received");
                let id = reply.id.unwrap_or_else(|| generate_id("msg"));
                Message::assistant(id, reply.content, model_id)
            }
            Err(err) => {
                warn!("Error sending message to AI: {err}");
                self.notifier.error(COMPLETION_FAILURE_NOTICE);
                Message::error(COMPLETION_ERROR_TEXT, model_id)
            }
        }
    }
}
