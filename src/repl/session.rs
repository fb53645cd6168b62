//! REPL session state
//!
//! Pagination cursor over location areas plus the user's caught Pokemon.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::Pokemon;
use crate::pokeapi::PokeApiClient;

/// Base experience that gives an even catch chance.
const CATCH_DIFFICULTY: f64 = 50.0;

/// A Pokemon the user has caught.
#[derive(Debug, Clone)]
pub struct CaughtPokemon {
    pub pokemon: Pokemon,
    pub caught_at: DateTime<Utc>,
}

/// Mutable state carried between commands.
pub struct Session {
    pub client: PokeApiClient,
    /// Next page of location areas, `None` before the first `map`
    pub next_url: Option<String>,
    /// Previous page of location areas, `None` on the first page
    pub previous_url: Option<String>,
    /// Caught Pokemon by name, listed alphabetically
    pub pokedex: BTreeMap<String, CaughtPokemon>,
    rng: StdRng,
}

impl Session {
    pub fn new(client: PokeApiClient) -> Self {
        Self::with_rng(client, StdRng::from_entropy())
    }

    /// Creates a session with a caller-supplied RNG, for reproducible catches.
    pub fn with_rng(client: PokeApiClient, rng: StdRng) -> Self {
        Self {
            client,
            next_url: None,
            previous_url: None,
            pokedex: BTreeMap::new(),
            rng,
        }
    }

    /// Throws a ball at `pokemon`, recording it on success.
    pub fn attempt_catch(&mut self, pokemon: Pokemon) -> bool {
        let caught = roll_catch(&mut self.rng, pokemon.base_experience.unwrap_or(0));
        if caught {
            self.pokedex.insert(
                pokemon.name.clone(),
                CaughtPokemon {
                    pokemon,
                    caught_at: Utc::now(),
                },
            );
        }
        caught
    }
}

/// Probability of catching a Pokemon with the given base experience.
pub fn catch_chance(base_experience: u32) -> f64 {
    CATCH_DIFFICULTY / (CATCH_DIFFICULTY + f64::from(base_experience))
}

/// Rolls a single catch attempt.
pub fn roll_catch<R: Rng>(rng: &mut R, base_experience: u32) -> bool {
    rng.gen_bool(catch_chance(base_experience))
}
