//! Translator seam, the HTTP client for the translation service, and the
//! tagged request/response pair the round uses for async translation.

use async_trait::async_trait;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use super::Language;
use crate::game::SessionId;

/// Shown in place of a description that could not be translated.
pub const TRANSLATION_FALLBACK: &str = "Translation not available.";

/// Default address of the translation service.
pub const DEFAULT_TRANSLATION_URL: &str = "http://127.0.0.1:5000";

/// Something that turns source-language text into another language.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translates `text` into the language with ISO code `target_language`.
    async fn translate(&self, text: &str, target_language: &str) -> Result<String, TranslationError>;
}

/// Translation failed (`TranslationUnavailable`).
#[derive(Debug, Clone, Display, Error)]
#[display("Translation unavailable: {} at {}:{}", message, file, line)]
pub struct TranslationError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl TranslationError {
    /// Creates a new translation error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<reqwest::Error> for TranslationError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        Self::new(format!("HTTP error: {}", err))
    }
}

/// Body of `POST /translate` on the translation service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TranslateBody {
    /// Source text.
    #[serde(default)]
    pub text: Option<String>,
    /// ISO code of the language to translate into.
    #[serde(default)]
    pub target_language: Option<String>,
}

/// Successful reply of the translation service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateReply {
    /// Translated text.
    pub translation: String,
}

/// Error reply of the translation service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorReply {
    /// What went wrong.
    pub error: String,
}

/// Client for the translation service's `POST /translate` endpoint.
#[derive(Debug, Clone)]
pub struct HttpTranslator {
    base_url: String,
    client: reqwest::Client,
}

impl HttpTranslator {
    /// Creates a client for the service at `base_url`.
    #[instrument(skip(base_url), fields(base_url = %base_url.as_ref()))]
    pub fn new(base_url: impl AsRef<str>) -> Self {
        let base_url = base_url.as_ref().trim_end_matches('/').to_string();
        info!(%base_url, "Creating HttpTranslator");
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Translator for HttpTranslator {
    #[instrument(skip(self, text), fields(chars = text.len()))]
    async fn translate(&self, text: &str, target_language: &str) -> Result<String, TranslationError> {
        let body = TranslateBody {
            text: Some(text.to_string()),
            target_language: Some(target_language.to_string()),
        };
        let response = self
            .client
            .post(format!("{}/translate", self.base_url))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .json::<ErrorReply>()
                .await
                .map(|reply| reply.error)
                .unwrap_or_else(|_| status.to_string());
            warn!(%status, %detail, "Translation service refused request");
            return Err(TranslationError::new(detail));
        }

        let reply: TranslateReply = response.json().await?;
        debug!(chars = reply.translation.len(), "Translation received");
        Ok(reply.translation)
    }
}

/// A pending translation, tagged with the session that asked for it.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct TranslationRequest {
    session_id: SessionId,
    language: Language,
    text: String,
}

impl TranslationRequest {
    /// Creates a request for `text` in `language` on behalf of `session_id`.
    pub fn new(session_id: SessionId, language: Language, text: String) -> Self {
        Self {
            session_id,
            language,
            text,
        }
    }

    /// Runs the request, substituting [`TRANSLATION_FALLBACK`] on failure.
    ///
    /// Never fails: the error is logged and the response still carries the
    /// session tag so the caller can match it.
    #[instrument(skip(self, translator), fields(session_id = %self.session_id, language = %self.language))]
    pub async fn fulfil(self, translator: &dyn Translator) -> TranslationResponse {
        let text = if self.language.needs_translation() {
            match translator.translate(&self.text, self.language.code()).await {
                Ok(translated) => translated,
                Err(e) => {
                    warn!(error = %e, "Translation failed, using fallback text");
                    TRANSLATION_FALLBACK.to_string()
                }
            }
        } else {
            self.text
        };
        TranslationResponse {
            session_id: self.session_id,
            language: self.language,
            text,
        }
    }
}

/// Completed translation, carrying the tag of the request it answers.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct TranslationResponse {
    session_id: SessionId,
    language: Language,
    text: String,
}

impl TranslationResponse {
    /// Builds a response directly, e.g. from a cached value.
    pub fn new(session_id: SessionId, language: Language, text: String) -> Self {
        Self {
            session_id,
            language,
            text,
        }
    }
}
