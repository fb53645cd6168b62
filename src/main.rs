//! Pokedex - an interactive PokeAPI client
//!
//! Pages through location areas, explores encounters, and catches Pokemon,
//! memoizing every response in a self-expiring in-memory cache.

use std::io;
use std::sync::Arc;

use tokio::io::BufReader;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pokedex::{repl, Config, PokeApiClient, Session, TimedCache};

/// Main entry point for the Pokedex REPL.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging (stderr)
/// 2. Load configuration from environment variables
/// 3. Create the response cache, which starts its reaper
/// 4. Build the PokeAPI client on top of the cache
/// 5. Run the REPL on stdin/stdout until `exit`, end of input, or Ctrl+C
/// 6. Stop the cache reaper
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "warn" so logs stay out of the way of the prompt,
    // can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pokedex=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = Config::from_env();
    info!(
        "Configuration loaded: cache_interval={}s, api_base_url={}, request_timeout={}s",
        config.cache_interval, config.api_base_url, config.request_timeout
    );

    let cache = Arc::new(TimedCache::new(config.cache_interval()));
    let client = PokeApiClient::from_config(&config, cache.clone())?;
    let mut session = Session::new(client);

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = io::stdout();

    tokio::select! {
        result = repl::run(&mut session, stdin, &mut stdout) => result?,
        _ = signal::ctrl_c() => {
            println!();
            info!("Received Ctrl+C, shutting down");
        }
    }

    cache.stop();
    Ok(())
}
