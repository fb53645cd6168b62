//! Error types for the Pokedex client
//!
//! Provides unified error handling using thiserror. The cache itself is
//! infallible; these cover the network, decoding, and terminal layers.

use reqwest::StatusCode;
use thiserror::Error;

// == Pokedex Error Enum ==
/// Unified error type for the Pokedex client.
#[derive(Error, Debug)]
pub enum PokedexError {
    /// Transport-level HTTP failure
    #[error("error making request: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-200 status
    #[error("bad status code {status} for {url}")]
    Status { url: String, status: StatusCode },

    /// Response body was not the expected JSON
    #[error("error decoding JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Terminal read or write failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

// == Result Type Alias ==
/// Convenience Result type for the Pokedex client.
pub type Result<T> = std::result::Result<T, PokedexError>;
