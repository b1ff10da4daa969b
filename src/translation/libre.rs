//! Upstream machine translation through a LibreTranslate-compatible API.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use super::{Language, TranslationError, Translator};

/// Default LibreTranslate endpoint.
pub const DEFAULT_LIBRETRANSLATE_URL: &str = "https://libretranslate.com";

#[derive(Debug, Serialize)]
struct LibreRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LibreResponse {
    translated_text: String,
}

#[derive(Debug, Deserialize)]
struct LibreError {
    error: String,
}

/// Translator backed by a LibreTranslate server.
#[derive(Debug, Clone)]
pub struct LibreTranslateClient {
    base_url: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl LibreTranslateClient {
    /// Creates a client for `base_url`, with an optional API key.
    #[instrument(skip(base_url, api_key), fields(base_url = %base_url.as_ref(), has_key = api_key.is_some()))]
    pub fn new(base_url: impl AsRef<str>, api_key: Option<String>) -> Self {
        let base_url = base_url.as_ref().trim_end_matches('/').to_string();
        info!(%base_url, "Creating LibreTranslateClient");
        Self {
            base_url,
            api_key,
            client: reqwest::Client::new(),
        }
    }

    /// Builds a client from `LIBRETRANSLATE_URL` and `LIBRETRANSLATE_API_KEY`.
    #[instrument]
    pub fn from_env() -> Self {
        let base_url = std::env::var("LIBRETRANSLATE_URL")
            .unwrap_or_else(|_| DEFAULT_LIBRETRANSLATE_URL.to_string());
        let api_key = std::env::var("LIBRETRANSLATE_API_KEY").ok().filter(|k| !k.is_empty());
        Self::new(base_url, api_key)
    }
}

#[async_trait]
impl Translator for LibreTranslateClient {
    #[instrument(skip(self, text), fields(chars = text.len()))]
    async fn translate(&self, text: &str, target_language: &str) -> Result<String, TranslationError> {
        let request = LibreRequest {
            q: text,
            source: Language::SOURCE.code(),
            target: target_language,
            format: "text",
            api_key: self.api_key.as_deref(),
        };

        let response = self
            .client
            .post(format!("{}/translate", self.base_url))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .json::<LibreError>()
                .await
                .map(|e| e.error)
                .unwrap_or_else(|_| status.to_string());
            warn!(%status, %detail, "Upstream translation failed");
            return Err(TranslationError::new(format!("upstream returned {}: {}", status, detail)));
        }

        let body: LibreResponse = response.json().await?;
        debug!(chars = body.translated_text.len(), "Upstream translation received");
        Ok(body.translated_text)
    }
}
