//! Credential/endpoint storage.
//!
//! The stored "access value" is an API key for the hosted backend or a server
//! URL for a local one. Reads and writes never fail outward: an unavailable
//! store behaves like an empty one and is only logged.

use std::fmt;
use std::sync::Arc;

use tracing::warn;

use crate::core::backend::BackendKind;
use crate::core::storage::KeyValueStore;

pub const CREDENTIAL_KEY: &str = "openrouter_api_key";
const MIN_API_KEY_LEN: usize = 8;
const API_KEY_PREFIX: &str = "sk-";

#[derive(Clone)]
pub struct CredentialStore {
    store: Arc<dyn KeyValueStore>,
}

impl CredentialStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn get(&self) -> Option<String> {
        match self.store.get(CREDENTIAL_KEY) {
            Ok(value) => value.filter(|value| !value.trim().is_empty()),
            Err(err) => {
                warn!("Could not read stored credential: {err}");
                None
            }
        }
    }

    pub fn set(&self, value: &str) {
        if let Err(err) = self.store.set(CREDENTIAL_KEY, value) {
            warn!("Could not store credential: {err}");
        }
    }

    pub fn remove(&self) {
        if let Err(err) = self.store.remove(CREDENTIAL_KEY) {
            warn!("Could not remove stored credential: {err}");
        }
    }

    pub fn is_configured(&self) -> bool {
        self.get().is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty,
    TooShort,
    MissingKeyPrefix,
    InvalidUrl(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Empty => write!(f, "Value cannot be empty"),
            ValidationError::TooShort => write!(f, "API key is too short"),
            ValidationError::MissingKeyPrefix => {
                write!(f, "OpenRouter API keys typically start with '{API_KEY_PREFIX}'")
            }
            ValidationError::InvalidUrl(reason) => write!(f, "Invalid server URL: {reason}"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Trim and check a user-entered access value before it is stored.
pub fn validate_access_value(kind: BackendKind, raw: &str) -> Result<String, ValidationError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(ValidationError::Empty);
    }

    match kind {
        BackendKind::Hosted => {
            if value.chars().count() < MIN_API_KEY_LEN {
                return Err(ValidationError::TooShort);
            }
            if !value.starts_with(API_KEY_PREFIX) {
                return Err(ValidationError::MissingKeyPrefix);
            }
        }
        BackendKind::Local => {
            let url = reqwest::Url::parse(value)
                .map_err(|err| ValidationError::InvalidUrl(err.to_string()))?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(ValidationError::InvalidUrl(format!(
                    "unsupported scheme '{}'",
                    url.scheme()
                )));
            }
        }
    }

    Ok(value.to_string())
}
