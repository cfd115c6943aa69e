//! Model discovery and normalization.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::api::{ModelInfo, PriceValue};
use crate::core::backend::ChatBackend;
use crate::core::credentials::CredentialStore;
use crate::core::notify::Notifier;

pub const CATALOG_FAILURE_NOTICE: &str = "Failed to fetch AI models. Please check your API key.";

const PROVIDER_NAMES: &[(&str, &str)] = &[
    ("openai", "OpenAI"),
    ("anthropic", "Anthropic"),
    ("meta", "Meta AI"),
    ("google", "Google"),
    ("mistral", "Mistral AI"),
    ("cohere", "Cohere"),
    ("perplexity", "Perplexity"),
    ("groq", "Groq"),
    ("ollama", "Ollama"),
    ("openrouter", "OpenRouter"),
];

const PROVIDER_ICONS: &[(&str, &str)] = &[
    (
        "openai",
        "https://upload.wikimedia.org/wikipedia/commons/0/04/ChatGPT_logo.svg",
    ),
    (
        "anthropic",
        "https://upload.wikimedia.org/wikipedia/commons/7/7f/Anthropic_logo.svg",
    ),
    (
        "google",
        "https://upload.wikimedia.org/wikipedia/commons/c/c1/Google_%22G%22_logo.svg",
    ),
    (
        "meta",
        "https://upload.wikimedia.org/wikipedia/commons/7/7b/Meta_Platforms_Inc._logo.svg",
    ),
    ("mistral", "https://mistral.ai/images/logo-white.svg"),
];

/// Normalized metadata for one selectable model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    pub id: String,
    pub display_name: String,
    pub provider: String,
    pub provider_display_name: String,
    pub icon_url: Option<String>,
    pub context_length: Option<u64>,
    pub prompt_cost_label: Option<String>,
    pub completion_cost_label: Option<String>,
    pub description: Option<String>,
}

pub fn provider_display_name(provider: &str) -> String {
    PROVIDER_NAMES
        .iter()
        .find(|(id, _)| *id == provider)
        .map(|(_, name)| (*name).to_string())
        .unwrap_or_else(|| provider.to_string())
}

/// Known logo, or a generated placeholder for unknown providers.
pub fn provider_icon_url(provider: &str) -> String {
    PROVIDER_ICONS
        .iter()
        .find(|(id, _)| *id == provider)
        .map(|(_, url)| (*url).to_string())
        .unwrap_or_else(|| format!("https://avatar.vercel.sh/{provider}.svg"))
}

fn display_name_for(raw_name: &str) -> String {
    let without_namespace = raw_name.rsplit('/').next().unwrap_or(raw_name);
    without_namespace.replace(['-', '_'], " ")
}

/// Raw prices are per token; labels quote them per thousand tokens.
fn cost_label(price: Option<&PriceValue>) -> String {
    let per_thousand = price.map(PriceValue::as_f64).unwrap_or(0.0) * 1000.0;
    format!("${per_thousand:.6}/1K tokens")
}

pub fn describe_model(info: &ModelInfo, fallback_provider: &str) -> ModelDescriptor {
    let provider = match info.id.split_once('/') {
        Some((namespace, _)) if !namespace.is_empty() => namespace.to_string(),
        _ => fallback_provider.to_string(),
    };
    let raw_name = info
        .name
        .as_deref()
        .filter(|name| !name.trim().is_empty())
        .unwrap_or(&info.id);

    ModelDescriptor {
        id: info.id.clone(),
        display_name: display_name_for(raw_name),
        provider_display_name: provider_display_name(&provider),
        icon_url: Some(provider_icon_url(&provider)),
        context_length: info.context_length,
        prompt_cost_label: info
            .pricing
            .as_ref()
            .map(|pricing| cost_label(pricing.prompt.as_ref())),
        completion_cost_label: info
            .pricing
            .as_ref()
            .map(|pricing| cost_label(pricing.completion.as_ref())),
        description: info.description.clone(),
        provider,
    }
}

/// Models whose display name contains `query`, ignoring case.
pub fn filter_models<'a>(models: &'a [ModelDescriptor], query: &str) -> Vec<&'a ModelDescriptor> {
    let needle = query.trim().to_lowercase();
    models
        .iter()
        .filter(|model| needle.is_empty() || model.display_name.to_lowercase().contains(&needle))
        .collect()
}

/// Fetches the model list of the configured backend.
pub struct ModelCatalog {
    backend: Arc<dyn ChatBackend>,
    credentials: CredentialStore,
    notifier: Arc<dyn Notifier>,
}

impl ModelCatalog {
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

    /// The backend's models in listing order; empty on any failure.
    pub async fn fetch(&self) -> Vec<ModelDescriptor> {
        let Some(access) = self.credentials.get() else {
            warn!(
                "No {} configured, skipping model listing",
                self.backend.kind().access_label()
            );
            return Vec::new();
        };

        match self.backend.list_models(&access).await {
            Ok(raw) => {
                let fallback_provider = self.backend.kind().default_provider();
                let models: Vec<_> = raw
                    .iter()
                    .map(|info| describe_model(info, fallback_provider))
                    .collect();
                debug!(count = models.len(), "fetched model catalog");
                models
            }
            Err(err) => {
                warn!("Error fetching models: {err}");
                self.notifier.error(CATALOG_FAILURE_NOTICE);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ModelPricing;

    fn info(id: &str, name: Option<&str>) -> ModelInfo {
        ModelInfo {
            id: id.to_string(),
            name: name.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn namespaced_ids_yield_provider_and_clean_name() {
        let mut raw = info("meta/llama-3-70b-instruct", None);
        raw.context_length = Some(8192);
        let model = describe_model(&raw, "openrouter");

        assert_eq!(model.provider, "meta");
        assert_eq!(model.provider_display_name, "Meta AI");
        assert_eq!(model.display_name, "llama 3 70b instruct");
        assert_eq!(model.context_length, Some(8192));
        assert_eq!(
            model.icon_url.as_deref(),
            Some("https://upload.wikimedia.org/wikipedia/commons/7/7b/Meta_Platforms_Inc._logo.svg")
        );
        assert_eq!(model.prompt_cost_label, None);
    }

    #[test]
    fn unknown_provider_passes_through_with_placeholder_icon() {
        let model = describe_model(&info("nousresearch/hermes_3", Some("Hermes-3")), "openrouter");
        assert_eq!(model.provider, "nousresearch");
        assert_eq!(model.provider_display_name, "nousresearch");
        assert_eq!(model.display_name, "Hermes 3");
        assert_eq!(
            model.icon_url.as_deref(),
            Some("https://avatar.vercel.sh/nousresearch.svg")
        );
    }

    #[test]
    fn unnamespaced_ids_use_backend_provider() {
        let model = describe_model(&info("llama3:8b", None), "ollama");
        assert_eq!(model.provider, "ollama");
        assert_eq!(model.provider_display_name, "Ollama");
        assert_eq!(model.display_name, "llama3:8b");
    }

    #[test]
    fn pricing_becomes_per_thousand_labels() {
        let mut raw = info("openai/gpt-4o", Some("OpenAI: GPT-4o"));
        raw.pricing = Some(ModelPricing {
            prompt: Some(PriceValue::Text("0.0000025".into())),
            completion: None,
        });
        let model = describe_model(&raw, "openrouter");

        assert_eq!(model.prompt_cost_label.as_deref(), Some("$0.002500/1K tokens"));
        assert_eq!(model.completion_cost_label.as_deref(), Some("$0.000000/1K tokens"));
    }

    #[test]
    fn filter_matches_display_name_case_insensitively() {
        let models: Vec<_> = ["openai/gpt-4o", "anthropic/claude-3-haiku", "openai/gpt-4o-mini"]
            .iter()
            .map(|id| describe_model(&info(id, None), "openrouter"))
            .collect();

        let hits: Vec<_> = filter_models(&models, "GPT").iter().map(|m| m.id.as_str()).collect();
        assert_eq!(hits, vec!["openai/gpt-4o", "openai/gpt-4o-mini"]);
        assert_eq!(filter_models(&models, "  ").len(), 3);
        assert!(filter_models(&models, "gemini").is_empty());
    }
}
