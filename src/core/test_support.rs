use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::api::{ChatRequest, ModelInfo};
use crate::core::backend::{ApiError, BackendKind, ChatBackend, CompletionReply};
use crate::core::credentials::CredentialStore;
use crate::core::notify::RecordingNotifier;
use crate::core::storage::MemoryStore;

pub enum ScriptedReply {
    Reply { id: Option<String>, content: String },
    Fail { status: u16, message: String },
    /// Never resolves.
    Hang,
}

impl ScriptedReply {
    pub fn text(content: &str) -> Self {
        ScriptedReply::Reply {
            id: None,
            content: content.to_string(),
        }
    }

    pub fn with_id(id: &str, content: &str) -> Self {
        ScriptedReply::Reply {
            id: Some(id.to_string()),
            content: content.to_string(),
        }
    }

    pub fn failure(status: u16) -> Self {
        ScriptedReply::Fail {
            status,
            message: "upstream unavailable".to_string(),
        }
    }
}

/// Backend double that replays queued replies and records every request.
pub struct ScriptedBackend {
    kind: BackendKind,
    models: Mutex<Option<Vec<ModelInfo>>>,
    replies: Mutex<VecDeque<ScriptedReply>>,
    pub requests: Mutex<Vec<(String, ChatRequest)>>,
    pub list_calls: AtomicUsize,
}

impl ScriptedBackend {
    pub fn new(kind: BackendKind) -> Self {
        Self {
            kind,
            models: Mutex::new(Some(Vec::new())),
            replies: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            list_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_model_ids(self, ids: &[&str]) -> Self {
        self.set_model_ids(ids);
        self
    }

    pub fn set_model_ids(&self, ids: &[&str]) {
        let models = ids
            .iter()
            .map(|id| ModelInfo {
                id: id.to_string(),
                ..Default::default()
            })
            .collect();
        *self.models.lock().unwrap() = Some(models);
    }

    /// Make the next model listings fail.
    pub fn fail_listing(&self) {
        *self.models.lock().unwrap() = None;
    }

    pub fn push_reply(&self, reply: ScriptedReply) {
        self.replies.lock().unwrap().push_back(reply);
    }

    pub fn last_request(&self) -> Option<(String, ChatRequest)> {
        self.requests.lock().unwrap().last().cloned()
    }

    pub fn list_call_count(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatBackend for ScriptedBackend {
    fn kind(&self) -> BackendKind {
        self.kind
    }

    async fn list_models(&self, _access: &str) -> Result<Vec<ModelInfo>, ApiError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.models
            .lock()
            .unwrap()
            .clone()
            .ok_or(ApiError::Status {
                status: 500,
                message: "listing failed".to_string(),
            })
    }

    async fn complete(
        &self,
        access: &str,
        request: ChatRequest,
    ) -> Result<CompletionReply, ApiError> {
        self.requests
            .lock()
            .unwrap()
            .push((access.to_string(), request));
        let next = self.replies.lock().unwrap().pop_front();
        match next {
            Some(ScriptedReply::Reply { id, content }) => Ok(CompletionReply { id, content }),
            Some(ScriptedReply::Fail { status, message }) => {
                Err(ApiError::Status { status, message })
            }
            Some(ScriptedReply::Hang) => std::future::pending().await,
            None => Err(ApiError::EmptyReply),
        }
    }
}

pub struct Harness {
    pub store: Arc<MemoryStore>,
    pub credentials: CredentialStore,
    pub backend: Arc<ScriptedBackend>,
    pub notifier: Arc<RecordingNotifier>,
}

impl Harness {
    pub fn new(backend: ScriptedBackend) -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            credentials: CredentialStore::new(store.clone()),
            store,
            backend: Arc::new(backend),
            notifier: Arc::new(RecordingNotifier::new()),
        }
    }
}
