//! Helpers for building endpoint URLs from user- or config-supplied bases.

/// Strip trailing slashes so endpoints can be appended without doubling them.
///
/// ```
/// use chathub::utils::url::normalize_base_url;
///
/// assert_eq!(normalize_base_url("https://openrouter.ai/api/v1/"), "https://openrouter.ai/api/v1");
/// assert_eq!(normalize_base_url("http://localhost:11434"), "http://localhost:11434");
/// ```
pub fn normalize_base_url(base_url: &str) -> String {
    base_url.trim().trim_end_matches('/').to_string()
}

/// Join a base URL and an endpoint path with exactly one slash between them.
///
/// ```
/// use chathub::utils::url::construct_api_url;
///
/// assert_eq!(
///     construct_api_url("https://openrouter.ai/api/v1/", "/chat/completions"),
///     "https://openrouter.ai/api/v1/chat/completions"
/// );
/// ```
pub fn construct_api_url(base_url: &str, endpoint: &str) -> String {
    let normalized_base = normalize_base_url(base_url);
    let endpoint = endpoint.trim_start_matches('/');
    format!("{normalized_base}/{endpoint}")
}

/// Resolve the OpenAI-compatible API root of a local model server.
///
/// Users usually paste the bare server address (`http://localhost:11434`);
/// addresses that already end in `/v1` are kept as they are.
pub fn local_api_base(server_url: &str) -> String {
    let normalized = normalize_base_url(server_url);
    if normalized.ends_with("/v1") {
        normalized
    } else {
        format!("{normalized}/v1")
    }
}
