//! Pokedex - an interactive PokeAPI client
//!
//! Pages through location areas, explores encounters, and catches Pokemon,
//! memoizing every response in a self-expiring in-memory cache.

pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod pokeapi;
pub mod repl;
pub mod tasks;

pub use cache::TimedCache;
pub use config::Config;
pub use error::{PokedexError, Result};
pub use pokeapi::PokeApiClient;
pub use repl::Session;
