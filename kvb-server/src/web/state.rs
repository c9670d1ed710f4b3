//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::ListingCache;
use crate::kvb::KvbClient;
use crate::stations::StationDirectory;

/// Shared application state.
///
/// The directory is read-only after startup; the listing cache is the
/// only TTL-bounded state. Both are injected into handlers here rather
/// than living in module-level globals.
#[derive(Clone)]
pub struct AppState {
    /// Station name ↔ id directory, loaded once at startup
    pub directory: Arc<StationDirectory>,

    /// KVB website client
    pub kvb: Arc<KvbClient>,

    /// TTL cache for the station listing response
    pub listing_cache: Arc<ListingCache>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(directory: StationDirectory, kvb: KvbClient, listing_cache: ListingCache) -> Self {
        Self {
            directory: Arc::new(directory),
            kvb: Arc::new(kvb),
            listing_cache: Arc::new(listing_cache),
        }
    }
}
