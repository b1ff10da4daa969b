//! Species catalog access: domain types, the gateway seam and its PokeAPI
//! implementation, and the description selection policy.

mod gateway;
mod pokeapi;
mod roster;
mod selection;
mod types;

pub use gateway::{GatewayError, SpeciesGateway};
pub use pokeapi::{DEFAULT_SPECIES_API_URL, PokeApiGateway};
pub use roster::build_valid_names;
pub use selection::{collapse_whitespace, select_source_text};
pub use types::{DescriptionEntry, Generation, RosterEntry, SpeciesDescriptor};
