//! Translation: display languages, the translator seam and its clients, and
//! the caching translation service.

mod client;
mod language;
mod libre;
pub mod server;

pub use client::{
    DEFAULT_TRANSLATION_URL, ErrorReply, HttpTranslator, TRANSLATION_FALLBACK, TranslateBody,
    TranslateReply, TranslationError, TranslationRequest, TranslationResponse, Translator,
};
pub use language::Language;
pub use libre::{DEFAULT_LIBRETRANSLATE_URL, LibreTranslateClient};
pub use server::TranslationService;
