//! Response DTOs for the PokeAPI endpoints
//!
//! Only the fields the REPL reads are modelled; everything else in the
//! payloads is ignored on decode.

use serde::Deserialize;

/// A `{ name, url }` reference to another resource.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}

/// One page of `GET /location-area`.
#[derive(Debug, Clone, Deserialize)]
pub struct LocationAreasResponse {
    /// Total number of location areas
    pub count: u32,
    /// URL of the next page, absent on the last page
    pub next: Option<String>,
    /// URL of the previous page, absent on the first page
    pub previous: Option<String>,
    pub results: Vec<NamedResource>,
}

/// `GET /location-area/{name}`.
#[derive(Debug, Clone, Deserialize)]
pub struct LocationAreaResponse {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub pokemon_encounters: Vec<PokemonEncounter>,
}

impl LocationAreaResponse {
    /// Names of every Pokemon that can be met in the area.
    pub fn pokemon_names(&self) -> impl Iterator<Item = &str> {
        self.pokemon_encounters
            .iter()
            .map(|encounter| encounter.pokemon.name.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PokemonEncounter {
    pub pokemon: NamedResource,
}

/// `GET /pokemon/{name}`.
#[derive(Debug, Clone, Deserialize)]
pub struct Pokemon {
    pub id: u32,
    pub name: String,
    /// Experience granted for defeating it; drives catch difficulty.
    /// The API reports `null` for some forms.
    #[serde(default)]
    pub base_experience: Option<u32>,
    pub height: u32,
    pub weight: u32,
    #[serde(default)]
    pub stats: Vec<PokemonStat>,
    #[serde(default)]
    pub types: Vec<PokemonType>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PokemonStat {
    pub base_stat: u32,
    pub stat: NamedResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PokemonType {
    pub slot: u32,
    #[serde(rename = "type")]
    pub kind: NamedResource,
}
