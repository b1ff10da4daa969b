//! Caching translation service.
//!
//! Exposes `POST /translate` taking `{"text", "target_language"}` and
//! answering `{"translation"}`. Each `(target_language, text)` pair is sent
//! upstream once and then served from a bounded cache; when the cache is
//! full the oldest entry is evicted.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use super::{ErrorReply, TranslateBody, TranslateReply, TranslationError, Translator};

/// Reply body when a request lacks text or target language.
pub const MISSING_FIELDS: &str = "Missing required fields: text and target_language";

/// Translations kept before the oldest is evicted.
pub const DEFAULT_CACHE_CAPACITY: usize = 4096;

type CacheKey = (String, String);

/// Insertion-ordered map with a fixed capacity.
#[derive(Debug)]
struct TranslationCache {
    entries: HashMap<CacheKey, String>,
    order: VecDeque<CacheKey>,
    capacity: usize,
}

impl TranslationCache {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    fn get(&self, key: &CacheKey) -> Option<&String> {
        self.entries.get(key)
    }

    fn insert(&mut self, key: CacheKey, translation: String) {
        if self.entries.insert(key.clone(), translation).is_some() {
            return;
        }
        self.order.push_back(key);
        while self.order.len() > self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
                debug!(language = %oldest.0, "Evicted cached translation");
            }
        }
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Upstream translator fronted by an in-memory cache of at most
/// `capacity` translations.
pub struct TranslationService {
    upstream: Arc<dyn Translator>,
    cache: RwLock<TranslationCache>,
}

impl std::fmt::Debug for TranslationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslationService").finish_non_exhaustive()
    }
}

impl TranslationService {
    /// Creates a service that forwards cache misses to `upstream`, caching
    /// up to [`DEFAULT_CACHE_CAPACITY`] translations.
    pub fn new(upstream: Arc<dyn Translator>) -> Self {
        Self::with_capacity(upstream, DEFAULT_CACHE_CAPACITY)
    }

    /// Creates a service caching at most `capacity` translations (at least 1).
    #[instrument(skip(upstream))]
    pub fn with_capacity(upstream: Arc<dyn Translator>, capacity: usize) -> Self {
        info!("Creating TranslationService");
        Self {
            upstream,
            cache: RwLock::new(TranslationCache::with_capacity(capacity)),
        }
    }

    /// Translates through the cache.
    ///
    /// Returns the translation and whether it came from the cache.
    #[instrument(skip(self, text), fields(chars = text.len()))]
    pub async fn translate(&self, text: &str, target_language: &str) -> Result<(String, bool), TranslationError> {
        let key = (target_language.to_string(), text.to_string());
        if let Some(hit) = self.cache.read().await.get(&key) {
            debug!("Cache hit");
            return Ok((hit.clone(), true));
        }

        let translated = self.upstream.translate(text, target_language).await?;
        self.cache.write().await.insert(key, translated.clone());
        info!("Cached new translation");
        Ok((translated, false))
    }

    /// Number of cached translations.
    pub async fn cached(&self) -> usize {
        self.cache.read().await.len()
    }
}

/// Builds the service router.
pub fn router(service: Arc<TranslationService>) -> Router {
    Router::new()
        .route("/translate", post(translate_handler))
        .route("/health", get(|| async { "ok" }))
        .with_state(service)
}

/// Binds `host:port` and serves until the process is stopped.
#[instrument(skip(service))]
pub async fn serve(host: &str, port: u16, service: Arc<TranslationService>) -> anyhow::Result<()> {
    let listener = TcpListener::bind((host, port)).await?;
    info!("Translation service ready at http://{}:{}/", host, port);
    axum::serve(listener, router(service)).await?;
    Ok(())
}

fn error_reply(status: StatusCode, error: impl Into<String>) -> Response {
    (status, Json(ErrorReply { error: error.into() })).into_response()
}

#[instrument(skip(service, body))]
async fn translate_handler(
    State(service): State<Arc<TranslationService>>,
    body: Result<Json<TranslateBody>, JsonRejection>,
) -> Response {
    let body = match body {
        Ok(Json(body)) => body,
        Err(rejection) => {
            debug!(error = %rejection, "Unreadable translate body");
            TranslateBody::default()
        }
    };

    let (Some(text), Some(target_language)) = (
        body.text.filter(|t| !t.is_empty()),
        body.target_language.filter(|l| !l.is_empty()),
    ) else {
        warn!("Translate request missing fields");
        return error_reply(StatusCode::BAD_REQUEST, MISSING_FIELDS);
    };

    match service.translate(&text, &target_language).await {
        Ok((translation, cached)) => {
            debug!(cached, %target_language, "Translate request served");
            Json(TranslateReply { translation }).into_response()
        }
        Err(e) => {
            warn!(error = %e, "Upstream translation failed");
            error_reply(StatusCode::BAD_GATEWAY, e.message)
        }
    }
}
