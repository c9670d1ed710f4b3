use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

use kvb_server::cache::{ListingCache, ListingCacheConfig};
use kvb_server::kvb::{KvbClient, KvbConfig};
use kvb_server::stations::StationDirectory;
use kvb_server::web::{AppState, create_router};

/// Default station directory file, relative to the working directory.
const DEFAULT_STATIONS_FILE: &str = "data/stations.json";

/// Default listen address.
const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:5000";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load the station directory; a missing or malformed table is an
    // unrecoverable startup error.
    let stations_file = std::env::var("KVB_STATIONS_FILE")
        .unwrap_or_else(|_| DEFAULT_STATIONS_FILE.to_string());
    let directory = match StationDirectory::load(&stations_file) {
        Ok(directory) => directory,
        Err(e) => {
            eprintln!("Failed to load station directory from {stations_file}: {e}");
            std::process::exit(1);
        }
    };
    tracing::info!(stations = directory.len(), file = %stations_file, "loaded station directory");

    let kvb = KvbClient::new(KvbConfig::default()).expect("Failed to create KVB client");
    let listing_cache = ListingCache::new(&ListingCacheConfig::default());

    let state = AppState::new(directory, kvb, listing_cache);
    let app = create_router(state);

    let addr: SocketAddr = std::env::var("KVB_LISTEN_ADDR")
        .unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_string())
        .parse()
        .expect("KVB_LISTEN_ADDR is not a valid socket address");

    println!("KVB departures server listening on http://{addr}");
    println!();
    println!("API Endpoints:");
    println!("  GET  /                               - Local time and methods");
    println!("  GET  /station/                       - Station directory");
    println!("  GET  /station/{{station}}/departures/  - Live departures");
    println!("  POST /station                        - Live departures (JSON body)");
    println!("  POST /slack/kvb/departures           - Slack slash command");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
