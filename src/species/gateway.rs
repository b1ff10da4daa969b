//! Species data gateway trait and its error type.

use async_trait::async_trait;
use derive_more::{Display, Error};
use tracing::instrument;

use super::{Generation, RosterEntry, SpeciesDescriptor};

/// Source of species rosters and descriptors.
#[async_trait]
pub trait SpeciesGateway: Send + Sync {
    /// Lists every species introduced in `generation`.
    async fn generation_roster(&self, generation: Generation) -> Result<Vec<RosterEntry>, GatewayError>;

    /// Fetches the descriptor for the species named `species`.
    async fn species_descriptor(&self, species: &str) -> Result<SpeciesDescriptor, GatewayError>;
}

/// Species data could not be fetched (`GatewayUnavailable`).
#[derive(Debug, Clone, Display, Error)]
#[display("Species gateway unavailable: {} at {}:{}", message, file, line)]
pub struct GatewayError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl GatewayError {
    /// Creates a new gateway error with caller location tracking.
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

impl From<reqwest::Error> for GatewayError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        Self::new(format!("HTTP error: {}", err))
    }
}
