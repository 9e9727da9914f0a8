//! Refresh and expiry settings for the vehicle cache.

use serde::Deserialize;

use crate::application::storage::DEFAULT_UPDATE_DELAY_MS;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Minimum age of the last refresh before the feed is queried again.
    pub update_delay_ms: u64,
    /// Drop vehicles not updated for this long. 0 keeps them forever.
    pub ttl_ms: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            update_delay_ms: DEFAULT_UPDATE_DELAY_MS,
            ttl_ms: 0,
        }
    }
}
