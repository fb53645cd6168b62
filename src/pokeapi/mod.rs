//! PokeAPI Module
//!
//! HTTP access to the REST catalog, memoized through the response cache.

mod client;

pub use client::PokeApiClient;
