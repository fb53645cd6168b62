//! PokeAPI HTTP client
//!
//! Issues GET requests against the catalog and keeps raw response bodies in a
//! shared [`TimedCache`] keyed by request URL (cache-aside).

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::cache::TimedCache;
use crate::config::Config;
use crate::error::{PokedexError, Result};
use crate::models::{LocationAreaResponse, LocationAreasResponse, Pokemon};

/// Catalog client that consults the cache before touching the network.
#[derive(Debug, Clone)]
pub struct PokeApiClient {
    http: Client,
    base_url: String,
    cache: Arc<TimedCache>,
}

impl PokeApiClient {
    /// Creates a client rooted at `base_url`.
    pub fn new(
        base_url: impl Into<String>,
        cache: Arc<TimedCache>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("pokedex/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self {
            http,
            base_url,
            cache,
        })
    }

    /// Creates a client from configuration.
    pub fn from_config(config: &Config, cache: Arc<TimedCache>) -> Result<Self> {
        Self::new(&config.api_base_url, cache, config.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn cache(&self) -> &Arc<TimedCache> {
        &self.cache
    }

    // == Cache-aside fetch ==
    /// Returns the body at `url`, from the cache when present.
    ///
    /// On a miss the body is fetched and stored under `url`. Failed requests
    /// and non-200 responses are never cached.
    pub async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        if let Some(body) = self.cache.get(url).await {
            debug!("Cache hit for {}", url);
            return Ok(body);
        }

        debug!("Cache miss for {}, fetching", url);
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(PokedexError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.bytes().await?.to_vec();
        self.cache.add(url, body.clone()).await;

        Ok(body)
    }

    /// Fetches `url` and decodes the body as JSON.
    pub async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let body = self.fetch(url).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    // == Endpoints ==

    /// URL of the first page of location areas.
    pub fn location_areas_url(&self) -> String {
        format!("{}/location-area", self.base_url)
    }

    /// Fetches a page of location areas; `page_url` defaults to the first page.
    pub async fn location_areas(&self, page_url: Option<&str>) -> Result<LocationAreasResponse> {
        match page_url {
            Some(url) => self.fetch_json(url).await,
            None => self.fetch_json(&self.location_areas_url()).await,
        }
    }

    /// Fetches a single location area by name.
    pub async fn location_area(&self, name: &str) -> Result<LocationAreaResponse> {
        let url = format!("{}/location-area/{}", self.base_url, name);
        self.fetch_json(&url).await
    }

    /// Fetches a Pokemon by name.
    pub async fn pokemon(&self, name: &str) -> Result<Pokemon> {
        let url = format!("{}/pokemon/{}", self.base_url, name);
        self.fetch_json(&url).await
    }
}
