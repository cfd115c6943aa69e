use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::backend::{BackendKind, BackendSettings, DEFAULT_HOSTED_BASE_URL};
use crate::core::controller::{ControllerSettings, DEFAULT_PREFERRED_PROVIDER};
use crate::utils::url::normalize_base_url;

pub const DEFAULT_MODEL_REFRESH_SECS: u64 = 300;
pub const DEFAULT_APP_TITLE: &str = "chathub";
pub const DEFAULT_APP_REFERER: &str = "https://github.com/chathub/chathub";

/// Where the credential or server URL is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CredentialStorage {
    #[default]
    File,
    Keyring,
}

impl CredentialStorage {
    pub fn as_str(self) -> &'static str {
        match self {
            CredentialStorage::File => "file",
            CredentialStorage::Keyring => "keyring",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "file" => Some(CredentialStorage::File),
            "keyring" => Some(CredentialStorage::Keyring),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct Config {
    /// Which kind of backend the stored credential talks to
    pub backend: Option<BackendKind>,
    /// Base URL of the hosted gateway
    pub base_url: Option<String>,
    /// Model used until one is picked interactively
    pub default_model: Option<String>,
    /// Provider whose models are preferred when the selection disappears
    pub preferred_provider: Option<String>,
    pub model_refresh_secs: Option<u64>,
    pub credential_storage: Option<CredentialStorage>,
    pub app_title: Option<String>,
    pub app_referer: Option<String>,
    /// Overrides the platform data directory
    pub data_dir: Option<PathBuf>,
}

/// Get a user-friendly display string for a path
/// Converts absolute paths to use ~ notation on Unix-like systems when possible
pub fn path_display<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();

    #[cfg(unix)]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let home_path = PathBuf::from(home);
            if let Ok(relative) = path.strip_prefix(&home_path) {
                return format!("~/{}", relative.display());
            }
        }
    }

    path.display().to_string()
}

impl Config {
    pub fn backend_kind(&self) -> BackendKind {
        self.backend.unwrap_or_default()
    }

    pub fn hosted_base_url(&self) -> String {
        self.base_url
            .as_deref()
            .map(normalize_base_url)
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_HOSTED_BASE_URL.to_string())
    }

    pub fn preferred_provider(&self) -> &str {
        self.preferred_provider
            .as_deref()
            .unwrap_or(DEFAULT_PREFERRED_PROVIDER)
    }

    /// Never zero, so it can drive a `tokio::time::interval`.
    pub fn model_refresh_interval(&self) -> Duration {
        let secs = self
            .model_refresh_secs
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_MODEL_REFRESH_SECS);
        Duration::from_secs(secs)
    }

    pub fn credential_storage(&self) -> CredentialStorage {
        self.credential_storage.unwrap_or_default()
    }

    pub fn backend_settings(&self) -> BackendSettings {
        BackendSettings {
            kind: self.backend_kind(),
            hosted_base_url: self.hosted_base_url(),
            app_title: self
                .app_title
                .clone()
                .unwrap_or_else(|| DEFAULT_APP_TITLE.to_string()),
            app_referer: self
                .app_referer
                .clone()
                .unwrap_or_else(|| DEFAULT_APP_REFERER.to_string()),
        }
    }

    pub fn controller_settings(&self) -> ControllerSettings {
        ControllerSettings {
            default_model: self.default_model.clone(),
            preferred_provider: self.preferred_provider().to_string(),
        }
    }
}
