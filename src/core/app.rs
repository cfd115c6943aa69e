//! Builds the collaborators from a [`Config`] and hands them out to the
//! controller and the one-shot CLI commands.

use std::error::Error;
use std::sync::Arc;

use tracing::debug;

use crate::core::backend::{BackendKind, ChatBackend, OpenAiCompatibleBackend};
use crate::core::catalog::ModelCatalog;
use crate::core::completion::CompletionClient;
use crate::core::config::{Config, CredentialStorage};
use crate::core::controller::{ControllerParts, ControllerSettings, ConversationController};
use crate::core::credentials::CredentialStore;
use crate::core::keyring::KeyringStore;
use crate::core::notify::Notifier;
use crate::core::preferences::Preferences;
use crate::core::session_store::SessionStore;
use crate::core::storage::{FileStore, KeyValueStore};
use crate::utils::url::normalize_base_url;


pub struct Services {
    kind: BackendKind,
    store: Arc<dyn KeyValueStore>,
    credentials: CredentialStore,
    backend: Arc<dyn ChatBackend>,
    notifier: Arc<dyn Notifier>,
}

impl Services {
    pub fn from_config(config: &Config, notifier: Arc<dyn Notifier>) -> Result<Self, Box<dyn Error>> {
        let data_dir = config.data_dir();
        debug!(data_dir = %data_dir.display(), "opening key-value store");
        let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(data_dir));

        let credential_store: Arc<dyn KeyValueStore> = match config.credential_storage() {
            CredentialStorage::File => store.clone(),
            CredentialStorage::Keyring => Arc::new(KeyringStore::new()),
        };

        let client = reqwest::Client::builder()
            .user_agent(concat!("chathub/", env!("CARGO_PKG_VERSION")))
            .build()?;
        let backend = Arc::new(OpenAiCompatibleBackend::new(
            client,
            config.backend_settings(),
        ));

        Ok(Self::with_parts(store, credential_store, backend, notifier))
    }

    /// Assemble from explicit parts; `credential_store` may be the same as
    /// `store`.
    pub fn with_parts(
        store: Arc<dyn KeyValueStore>,
        credential_store: Arc<dyn KeyValueStore>,
        backend: Arc<dyn ChatBackend>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            kind: backend.kind(),
            store,
            credentials: CredentialStore::new(credential_store),
            backend,
            notifier,
        }
    }

    pub fn backend_kind(&self) -> BackendKind {
        self.kind
    }

    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    pub fn notifier(&self) -> Arc<dyn Notifier> {
        self.notifier.clone()
    }

    pub fn catalog(&self) -> ModelCatalog {
        ModelCatalog::new(
            self.backend.clone(),
            self.credentials.clone(),
            self.notifier.clone(),
        )
    }

    pub fn completion(&self) -> CompletionClient {
        CompletionClient::new(
            self.backend.clone(),
            self.credentials.clone(),
            self.notifier.clone(),
        )
    }

    pub fn session_store(&self) -> SessionStore {
        SessionStore::new(self.store.clone())
    }

    pub fn preferences(&self) -> Preferences {
        Preferences::new(self.store.clone())
    }

    pub fn controller(&self, settings: ControllerSettings) -> ConversationController {
        let parts = ControllerParts {
            catalog: self.catalog(),
            session_store: self.session_store(),
            completion: self.completion(),
            credentials: self.credentials.clone(),
            preferences: self.preferences(),
            notifier: self.notifier.clone(),
        };
        ConversationController::new(parts, settings)
    }
}

/// Human-readable target of the configured backend, for status lines.
pub fn describe_endpoint(config: &Config, credentials: &CredentialStore) -> String {
    match config.backend_kind() {
        BackendKind::Hosted => config.hosted_base_url(),
        BackendKind::Local => credentials
            .get()
            .map(|url| normalize_base_url(&url))
            .unwrap_or_else(|| "(no server URL)".to_string()),
    }
}
