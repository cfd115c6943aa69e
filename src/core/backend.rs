//! Transport to the model backend.
//!
//! Both supported backends speak the OpenAI-compatible HTTP API; they differ
//! only in what the stored access value means. For [`BackendKind::Hosted`] it
//! is an API key sent as a bearer token to the configured gateway, for
//! [`BackendKind::Local`] it is the address of the model server itself.

use std::error::Error as StdError;
use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::{ChatCompletionResponse, ChatRequest, ModelInfo, ModelsResponse};
use crate::utils::url::{construct_api_url, local_api_base};

pub const DEFAULT_HOSTED_BASE_URL: &str = "https://openrouter.ai/api/v1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[default]
    Hosted,
    Local,
}

impl BackendKind {
    pub fn as_str(self) -> &'static str {
        match self {
            BackendKind::Hosted => "hosted",
            BackendKind::Local => "local",
        }
    }

    /// Provider assigned to model ids that carry no `provider/` namespace.
    pub fn default_provider(self) -> &'static str {
        match self {
            BackendKind::Hosted => "openrouter",
            BackendKind::Local => "ollama",
        }
    }

    /// What the user is asked for when configuring this backend.
    pub fn access_label(self) -> &'static str {
        match self {
            BackendKind::Hosted => "API key",
            BackendKind::Local => "server URL",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "hosted" | "openrouter" => Some(BackendKind::Hosted),
            "local" | "ollama" => Some(BackendKind::Local),
            _ => None,
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug)]
pub enum ApiError {
    Transport(reqwest::Error),
    Status { status: u16, message: String },
    Decode(serde_json::Error),
    EmptyReply,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport(err) => write!(f, "request failed: {err}"),
            ApiError::Status { status, message } => {
                write!(f, "API request failed with status {status}: {message}")
            }
            ApiError::Decode(err) => write!(f, "malformed API response: {err}"),
            ApiError::EmptyReply => write!(f, "API response contained no message"),
        }
    }
}

impl StdError for ApiError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            ApiError::Transport(err) => Some(err),
            ApiError::Decode(err) => Some(err),
            ApiError::Status { .. } | ApiError::EmptyReply => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(err)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionReply {
    pub id: Option<String>,
    pub content: String,
}

/// The two opaque calls the rest of the crate needs from a backend.
///
/// `access` is the stored credential or endpoint; implementations decide how
/// to apply it.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    fn kind(&self) -> BackendKind;

    async fn list_models(&self, access: &str) -> Result<Vec<ModelInfo>, ApiError>;

    async fn complete(&self, access: &str, request: ChatRequest)
        -> Result<CompletionReply, ApiError>;
}

#[derive(Debug, Clone)]
pub struct BackendSettings {
    pub kind: BackendKind,
    pub hosted_base_url: String,
    pub app_title: String,
    pub app_referer: String,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            kind: BackendKind::Hosted,
            hosted_base_url: DEFAULT_HOSTED_BASE_URL.to_string(),
            app_title: "chathub".to_string(),
            app_referer: "https://github.com/chathub/chathub".to_string(),
        }
    }
}

pub struct OpenAiCompatibleBackend {
    client: reqwest::Client,
    settings: BackendSettings,
}

impl OpenAiCompatibleBackend {
    pub fn new(client: reqwest::Client, settings: BackendSettings) -> Self {
        Self { client, settings }
    }

    fn api_base(&self, access: &str) -> String {
        match self.settings.kind {
            BackendKind::Hosted => self.settings.hosted_base_url.clone(),
            BackendKind::Local => local_api_base(access),
        }
    }

    fn authorize(&self, request: reqwest::RequestBuilder, access: &str) -> reqwest::RequestBuilder {
        match self.settings.kind {
            BackendKind::Hosted => request
                .header("Authorization", format!("Bearer {access}"))
                .header("HTTP-Referer", &self.settings.app_referer)
                .header("X-Title", &self.settings.app_title),
            BackendKind::Local => request,
        }
    }

    async fn read_body(response: reqwest::Response) -> Result<String, ApiError> {
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            let message = extract_error_summary(&body).unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string()
            });
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }
        Ok(body)
    }
}

#[async_trait]
impl ChatBackend for OpenAiCompatibleBackend {
    fn kind(&self) -> BackendKind {
        self.settings.kind
    }

    async fn list_models(&self, access: &str) -> Result<Vec<ModelInfo>, ApiError> {
        let url = construct_api_url(&self.api_base(access), "models");
        debug!(%url, "listing models");

        let request = self
            .client
            .get(url)
            .header("Content-Type", "application/json");
        let response = self.authorize(request, access).send().await?;
        let body = Self::read_body(response).await?;

        let parsed: ModelsResponse = serde_json::from_str(&body).map_err(ApiError::Decode)?;
        Ok(parsed.data)
    }

    async fn complete(
        &self,
        access: &str,
        request: ChatRequest,
    ) -> Result<CompletionReply, ApiError> {
        let url = construct_api_url(&self.api_base(access), "chat/completions");
        debug!(%url, model = %request.model, messages = request.messages.len(), "requesting completion");

        let http_request = self
            .client
            .post(url)
            .header("Content-Type", "application/json")
            .json(&request);
        let response = self.authorize(http_request, access).send().await?;
        let body = Self::read_body(response).await?;

        let parsed: ChatCompletionResponse =
            serde_json::from_str(&body).map_err(ApiError::Decode)?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(ApiError::EmptyReply)?;

        Ok(CompletionReply {
            id: parsed.id.filter(|id| !id.is_empty()),
            content,
        })
    }
}

/// Pull a one-line human-readable message out of an error body.
pub fn extract_error_summary(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body.trim()).ok()?;
    let summary = value
        .pointer("/error/message")
        .and_then(|v| v.as_str())
        .map(str::to_owned)
        .or_else(|| {
            value
                .get("error")
                .and_then(|v| v.as_str().map(str::to_owned))
        })
        .or_else(|| {
            value
                .get("message")
                .and_then(|v| v.as_str().map(str::to_owned))
        })?;

    let collapsed = summary.split_whitespace().collect::<Vec<_>>().join(" ");
    (!collapsed.is_empty()).then_some(collapsed)
}
