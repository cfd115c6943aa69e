//! Conversation state: current session, message list, and model selection.
//!
//! The controller keeps an in-memory copy of the current session and re-saves
//! it to the [`SessionStore`] after every mutation; the store stays the source
//! of truth. All methods run on the task that owns the controller, and only
//! [`ConversationController::send_message`] and
//! [`ConversationController::refresh_models`] suspend.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::core::catalog::{ModelCatalog, ModelDescriptor};
use crate::core::completion::CompletionClient;
use crate::core::credentials::CredentialStore;
use crate::core::message::{replace_message, Message};
use crate::core::notify::Notifier;
use crate::core::preferences::Preferences;
use crate::core::session::ChatSession;
use crate::core::session_store::SessionStore;
use crate::utils::ids::generate_id;


pub const DEFAULT_MODEL_ID: &str = "openai/gpt-3.5-turbo";
pub const DEFAULT_PREFERRED_PROVIDER: &str = "openai";

pub const MISSING_ACCESS_NOTICE: &str = "Please set your API key or server URL first";
pub const SESSION_NOT_FOUND_NOTICE: &str = "Chat session not found";
pub const DELETE_FAILED_NOTICE: &str = "Failed to delete chat session";
pub const SAVE_FAILED_NOTICE: &str = "Failed to save chat session";
pub const CREDENTIAL_SAVED_NOTICE: &str = "API key saved successfully";
pub const CREDENTIAL_REMOVED_NOTICE: &str = "API key removed";

/// Everything the controller talks to, passed in explicitly.
pub struct ControllerParts {
    pub catalog: ModelCatalog,
    pub session_store: SessionStore,
    pub completion: CompletionClient,
    pub credentials: CredentialStore,
    pub preferences: Preferences,
    pub notifier: Arc<dyn Notifier>,
}

#[derive(Debug, Clone)]
pub struct ControllerSettings {
    /// Used when no preferred model has been stored yet.
    pub default_model: Option<String>,
    /// Provider whose first model is picked when the selection disappears.
    pub preferred_provider: String,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            default_model: None,
            preferred_provider: DEFAULT_PREFERRED_PROVIDER.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionDeletion {
    Removed,
    /// The deleted session was the current one; the controller is idle now.
    ClosedCurrent,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendError {
    MissingCredential,
}

impl fmt::Display for SendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SendError::MissingCredential => write!(f, "{MISSING_ACCESS_NOTICE}"),
        }
    }
}

impl std::error::Error for SendError {}

/// Pick a replacement when `current` is not among `models`: the stored
/// preference if listed, then the first model of `preferred_provider`, then
/// the first model.
pub fn choose_fallback_model<'a>(
    models: &'a [ModelDescriptor],
    preferred: Option<&str>,
    preferred_provider: &str,
) -> Option<&'a ModelDescriptor> {
    preferred
        .and_then(|preferred| models.iter().find(|model| model.id == preferred))
        .or_else(|| {
            models
                .iter()
                .find(|model| model.provider == preferred_provider)
        })
        .or_else(|| models.first())
}

/// Marks a send in flight; the flag drops back to false when the guard goes,
/// including when the send future is dropped mid-await.
struct ProcessingGuard(Arc<AtomicBool>);

impl ProcessingGuard {
    fn begin(flag: &Arc<AtomicBool>) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(flag.clone())
    }
}

impl Drop for ProcessingGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

pub struct ConversationController {
    catalog: ModelCatalog,
    session_store: SessionStore,
    completion: CompletionClient,
    credentials: CredentialStore,
    preferences: Preferences,
    notifier: Arc<dyn Notifier>,
    settings: ControllerSettings,

    available_models: Vec<ModelDescriptor>,
    selected_model_id: String,
    is_loading_models: bool,

    current_session: Option<ChatSession>,
    sessions: Vec<ChatSession>,
    messages: Vec<Message>,
    is_processing: Arc<AtomicBool>,
}

impl ConversationController {
    pub fn new(parts: ControllerParts, settings: ControllerSettings) -> Self {
        let ControllerParts {
            catalog,
            session_store,
            completion,
            credentials,
            preferences,
            notifier,
        } = parts;

        let selected_model_id = preferences
            .preferred_model()
            .or_else(|| settings.default_model.clone())
            .unwrap_or_else(|| DEFAULT_MODEL_ID.to_string());

        Self {
            catalog,
            session_store,
            completion,
            credentials,
            preferences,
            notifier,
            settings,
            available_models: Vec::new(),
            selected_model_id,
            is_loading_models: false,
            current_session: None,
            sessions: Vec::new(),
            messages: Vec::new(),
            is_processing: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn has_credential(&self) -> bool {
        self.credentials.is_configured()
    }

    pub fn available_models(&self) -> &[ModelDescriptor] {
        &self.available_models
    }

    pub fn selected_model_id(&self) -> &str {
        &self.selected_model_id
    }

    pub fn selected_model(&self) -> Option<&ModelDescriptor> {
        self.available_models
            .iter()
            .find(|model| model.id == self.selected_model_id)
    }

    pub fn is_loading_models(&self) -> bool {
        self.is_loading_models
    }

    pub fn current_session(&self) -> Option<&ChatSession> {
        self.current_session.as_ref()
    }

    pub fn sessions(&self) -> &[ChatSession] {
        &self.sessions
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_processing(&self) -> bool {
        self.is_processing.load(Ordering::SeqCst)
    }

    /// Re-read the session list from storage.
    pub fn reload_sessions(&mut self) {
        self.sessions = self.session_store.list_all();
    }

    pub async fn set_credential(&mut self, value: &str) {
        self.credentials.set(value);
        self.notifier.success(CREDENTIAL_SAVED_NOTICE);
        self.refresh_models().await;
    }

    pub fn remove_credential(&mut self) {
        self.credentials.remove();
        self.available_models.clear();
        self.notifier.info(CREDENTIAL_REMOVED_NOTICE);
    }

    /// Replace the catalog with a fresh listing.
    ///
    /// An empty listing (including a failed one) keeps the previous catalog.
    pub async fn refresh_models(&mut self) {
        if !self.credentials.is_configured() {
            self.is_loading_models = false;
            return;
        }

        self.is_loading_models = true;
        let models = self.catalog.fetch().await;

        if !models.is_empty() {
            if !models.iter().any(|model| model.id == self.selected_model_id) {
                let preferred = self.preferences.preferred_model();
                if let Some(fallback) = choose_fallback_model(
                    &models,
                    preferred.as_deref(),
                    &self.settings.preferred_provider,
                ) {
                    info!(
                        from = %self.selected_model_id,
                        to = %fallback.id,
                        "selected model unavailable, falling back"
                    );
                    self.selected_model_id = fallback.id.clone();
                }
            }
            self.available_models = models;
        }

        self.is_loading_models = false;
    }

    pub fn select_model(&mut self, model_id: &str) {
        self.selected_model_id = model_id.to_string();
        self.preferences.set_preferred_model(model_id);

        if let Some(mut session) = self.current_session.take() {
            session.model_id = model_id.to_string();
            session.touch();
            self.persist(&session);
            self.current_session = Some(session);
            self.reload_sessions();
        }
    }

    /// Start an empty session with the selected model and make it current.
    pub fn create_new_session(&mut self) -> String {
        let session = self.start_session();
        let id = session.id.clone();
        self.current_session = Some(session);
        self.messages.clear();
        self.reload_sessions();
        id
    }

    pub fn load_session(&mut self, id: &str) -> bool {
        match self.session_store.get_by_id(id) {
            Some(session) => {
                debug!(session_id = id, messages = session.messages.len(), "loaded session");
                self.messages = session.messages.clone();
                self.selected_model_id = session.model_id.clone();
                self.current_session = Some(session);
                true
            }
            None => {
                self.notifier.error(SESSION_NOT_FOUND_NOTICE);
                false
            }
        }
    }

    pub fn delete_session(&mut self, id: &str) -> SessionDeletion {
        let deleted = self.session_store.delete_by_id(id);

        let outcome = if !deleted {
            self.notifier.error(DELETE_FAILED_NOTICE);
            SessionDeletion::Failed
        } else if self
            .current_session
            .as_ref()
            .is_some_and(|session| session.id == id)
        {
            self.current_session = None;
            self.messages.clear();
            SessionDeletion::ClosedCurrent
        } else {
            SessionDeletion::Removed
        };

        self.reload_sessions();
        outcome
    }

    /// Send `content` to the selected model and record the exchange.
    ///
    /// Without a configured credential nothing changes. Otherwise the user
    /// message and a placeholder are appended at once, and the placeholder is
    /// later replaced by the reply (or a synthesized error message), so every
    /// call that gets past the credential check adds exactly one resolved
    /// assistant message.
    pub async fn send_message(&mut self, content: &str) -> Result<Message, SendError> {
        if !self.credentials.is_configured() {
            self.notifier.error(MISSING_ACCESS_NOTICE);
            return Err(SendError::MissingCredential);
        }

        let model_id = self.selected_model_id.clone();
        let user_message = Message::user(content);
        let placeholder = Message::placeholder(&model_id);
        let placeholder_id = placeholder.id.clone();

        let mut history = self.messages.clone();
        history.push(user_message.clone());

        self.messages.push(user_message.clone());
        self.messages.push(placeholder);
        let _processing = ProcessingGuard::begin(&self.is_processing);

        let mut session = match self.current_session.take() {
            Some(session) => session,
            None => self.start_session(),
        };
        session.record_user_message(user_message);
        self.persist(&session);
        self.current_session = Some(session);

        let mut reply = self.completion.complete(&model_id, &history).await;
        if self
            .messages
            .iter()
            .any(|message| message.id == reply.id && message.id != placeholder_id)
        {
            warn!(reply_id = %reply.id, "reply id collides with an existing message, reassigning");
            reply.id = generate_id("msg");
        }

        if !replace_message(&mut self.messages, &placeholder_id, reply.clone()) {
            self.messages.push(reply.clone());
        }

        if let Some(mut session) = self.current_session.take() {
            session.messages = self.messages.clone();
            session.touch();
            self.persist(&session);
            self.current_session = Some(session);
        }
        self.reload_sessions();

        Ok(reply)
    }

    /// New empty session with the selected model, already persisted.
    fn start_session(&mut self) -> ChatSession {
        let session = ChatSession::new(self.selected_model_id.clone());
        self.persist(&session);
        session
    }

    fn persist(&self, session: &ChatSession) {
        if let Err(err) = self.session_store.save(session) {
            warn!(session_id = %session.id, "Error storing chat session: {err}");
            self.notifier.error(SAVE_FAILED_NOTICE);
        }
    }
}
