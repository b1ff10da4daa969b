//! Building the pool of valid guesses from generation rosters.

use tracing::{info, instrument};

use super::{Generation, GatewayError, RosterEntry, SpeciesGateway};
use crate::game::ValidNameSet;

/// Fetches each generation's roster and folds the names into one set.
///
/// Gender variants collapse to one canonical name. Rosters are fetched in
/// order; the first transport failure is returned and nothing is retried.
#[instrument(skip(gateway))]
pub async fn build_valid_names(
    gateway: &dyn SpeciesGateway,
    generations: &[Generation],
) -> Result<ValidNameSet, GatewayError> {
    let mut rosters = Vec::with_capacity(generations.len());
    for generation in generations {
        rosters.push(gateway.generation_roster(*generation).await?);
    }
    let names: ValidNameSet = rosters
        .iter()
        .flatten()
        .map(RosterEntry::name)
        .collect();
    info!(count = names.len(), "Valid name set built");
    Ok(names)
}
