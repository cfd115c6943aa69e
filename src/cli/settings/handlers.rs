//! Handlers for each `chathub set`/`unset` key.

use crate::cli::settings::error::SettingError;
use crate::cli::settings::SettingHandler;
use crate::core::backend::BackendKind;
use crate::core::config::{Config, CredentialStorage};
use crate::utils::url::normalize_base_url;

/// Data-driven handler: `apply` validates and stores the joined arguments and
/// returns the value to echo back, `clear` resets the field.
pub struct FieldHandler {
    key: &'static str,
    hint: &'static str,
    example: &'static str,
    apply: fn(&mut Config, &str) -> Result<String, SettingError>,
    clear: fn(&mut Config),
}

impl SettingHandler for FieldHandler {
    fn key(&self) -> &'static str {
        self.key
    }

    fn set(&self, args: &[String], config: &mut Config) -> Result<String, SettingError> {
        let input = args.join(" ");
        let input = input.trim();
        if input.is_empty() {
            return Err(SettingError::MissingArgs {
                hint: self.hint,
                example: self.example,
            });
        }

        let display = (self.apply)(config, input)?;
        Ok(format!("✅ Set {} to: {display}", self.key))
    }

    fn unset(&self, config: &mut Config) -> String {
        (self.clear)(config);
        format!("✅ Unset {}", self.key)
    }
}

pub fn backend_handler() -> FieldHandler {
    FieldHandler {
        key: "backend",
        hint: "To choose a backend, specify hosted or local:",
        example: "chathub set backend local",
        apply: |config, input| {
            let kind = BackendKind::parse(input).ok_or_else(|| SettingError::InvalidValue {
                key: "backend",
                input: input.to_string(),
                expected: "'hosted' or 'local'",
            })?;
            config.backend = Some(kind);
            Ok(kind.to_string())
        },
        clear: |config| config.backend = None,
    }
}

pub fn base_url_handler() -> FieldHandler {
    FieldHandler {
        key: "base-url",
        hint: "To point at another gateway, specify its API base URL:",
        example: "chathub set base-url https://openrouter.ai/api/v1",
        apply: |config, input| {
            let valid = reqwest::Url::parse(input)
                .map(|url| matches!(url.scheme(), "http" | "https"))
                .unwrap_or(false);
            if !valid {
                return Err(SettingError::InvalidValue {
                    key: "base-url",
                    input: input.to_string(),
                    expected: "an http(s) URL",
                });
            }
            let url = normalize_base_url(input);
            config.base_url = Some(url.clone());
            Ok(url)
        },
        clear: |config| config.base_url = None,
    }
}

pub fn default_model_handler() -> FieldHandler {
    FieldHandler {
        key: "default-model",
        hint: "To set a default model, specify its id:",
        example: "chathub set default-model openai/gpt-4o",
        apply: |config, input| {
            config.default_model = Some(input.to_string());
            Ok(input.to_string())
        },
        clear: |config| config.default_model = None,
    }
}

pub fn preferred_provider_handler() -> FieldHandler {
    FieldHandler {
        key: "preferred-provider",
        hint: "To prefer a provider's models, specify the provider id:",
        example: "chathub set preferred-provider anthropic",
        apply: |config, input| {
            let provider = input.to_ascii_lowercase();
            config.preferred_provider = Some(provider.clone());
            Ok(provider)
        },
        clear: |config| config.preferred_provider = None,
    }
}

pub fn refresh_secs_handler() -> FieldHandler {
    FieldHandler {
        key: "refresh-secs",
        hint: "To change how often models are refreshed, specify seconds:",
        example: "chathub set refresh-secs 600",
        apply: |config, input| {
            let secs = input
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| SettingError::InvalidValue {
                    key: "refresh-secs",
                    input: input.to_string(),
                    expected: "a positive number of seconds",
                })?;
            config.model_refresh_secs = Some(secs);
            Ok(secs.to_string())
        },
        clear: |config| config.model_refresh_secs = None,
    }
}

pub fn credential_storage_handler() -> FieldHandler {
    FieldHandler {
        key: "credential-storage",
        hint: "To choose where the credential is kept, specify file or keyring:",
        example: "chathub set credential-storage keyring",
        apply: |config, input| {
            let storage =
                CredentialStorage::parse(input).ok_or_else(|| SettingError::InvalidValue {
                    key: "credential-storage",
                    input: input.to_string(),
                    expected: "'file' or 'keyring'",
                })?;
            config.credential_storage = Some(storage);
            Ok(storage.as_str().to_string())
        },
        clear: |config| config.credential_storage = None,
    }
}
