//! PokeAPI-backed species gateway.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use super::{DescriptionEntry, Generation, GatewayError, RosterEntry, SpeciesDescriptor, SpeciesGateway};

/// Public PokeAPI root.
pub const DEFAULT_SPECIES_API_URL: &str = "https://pokeapi.co/api/v2";

#[derive(Debug, Deserialize)]
struct NamedResource {
    name: String,
    url: String,
}

#[derive(Debug, Deserialize)]
struct GenerationResponse {
    pokemon_species: Vec<NamedResource>,
}

#[derive(Debug, Deserialize)]
struct FlavorTextEntry {
    flavor_text: String,
    language: NamedResource,
}

#[derive(Debug, Deserialize)]
struct SpeciesResponse {
    id: u32,
    name: String,
    flavor_text_entries: Vec<FlavorTextEntry>,
}

#[derive(Debug, Deserialize)]
struct Sprites {
    front_default: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PokemonResponse {
    sprites: Sprites,
}

/// Species gateway talking to a PokeAPI-compatible REST service.
#[derive(Debug, Clone)]
pub struct PokeApiGateway {
    base_url: String,
    client: reqwest::Client,
}

impl PokeApiGateway {
    /// Creates a gateway rooted at `base_url` (no trailing slash needed).
    #[instrument(skip(base_url), fields(base_url = %base_url.as_ref()))]
    pub fn new(base_url: impl AsRef<str>) -> Self {
        let base_url = base_url.as_ref().trim_end_matches('/').to_string();
        info!(%base_url, "Creating PokeApiGateway");
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, GatewayError> {
        debug!(%url, "GET");
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(%url, %status, "Species API returned error status");
            return Err(GatewayError::new(format!("GET {} returned {}", url, status)));
        }
        Ok(response.json().await?)
    }

    /// The sprite is optional decoration; a failure here never fails the round.
    async fn sprite_url(&self, id: u32) -> Option<String> {
        let url = format!("{}/pokemon/{}", self.base_url, id);
        match self.get_json::<PokemonResponse>(&url).await {
            Ok(pokemon) => pokemon.sprites.front_default,
            Err(e) => {
                warn!(error = %e, id, "Sprite lookup failed");
                None
            }
        }
    }
}

impl Default for PokeApiGateway {
    fn default() -> Self {
        Self::new(DEFAULT_SPECIES_API_URL)
    }
}

#[async_trait]
impl SpeciesGateway for PokeApiGateway {
    #[instrument(skip(self), fields(generation = %generation))]
    async fn generation_roster(&self, generation: Generation) -> Result<Vec<RosterEntry>, GatewayError> {
        let url = format!("{}/generation/{}", self.base_url, generation.id());
        let body: GenerationResponse = self.get_json(&url).await?;

        let roster: Vec<RosterEntry> = body
            .pokemon_species
            .into_iter()
            .map(|species| RosterEntry::new(species.name, species.url))
            .collect();

        info!(count = roster.len(), "Roster loaded");
        Ok(roster)
    }

    #[instrument(skip(self))]
    async fn species_descriptor(&self, species: &str) -> Result<SpeciesDescriptor, GatewayError> {
        let url = format!("{}/pokemon-species/{}", self.base_url, species);
        let body: SpeciesResponse = self.get_json(&url).await?;

        let entries = body
            .flavor_text_entries
            .into_iter()
            .map(|entry| DescriptionEntry::new(entry.language.name, entry.flavor_text))
            .collect::<Vec<_>>();
        let sprite_url = self.sprite_url(body.id).await;

        info!(name = %body.name, entries = entries.len(), has_sprite = sprite_url.is_some(), "Descriptor loaded");
        Ok(SpeciesDescriptor::new(body.name, sprite_url, entries))
    }
}
