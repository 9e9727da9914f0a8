//! Infrastructure bootstrap helpers for runtime wiring.

use std::sync::Arc;

use tracing::info;

use crate::adapter::outbound::trapeze::TrapezeClient;
use crate::application::storage::VehicleStorage;
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::settings::Config;
use crate::port::outbound::VehicleFeed;

/// Build the feed adapter described by `[feed]`.
#[allow(clippy::result_large_err)]
pub fn build_feed(config: &Config) -> Result<Arc<dyn VehicleFeed>> {
    let client = TrapezeClient::from_config(&config.feed).map_err(|err| {
        ConfigError::InvalidValue {
            field: "base_url",
            reason: err.to_string(),
        }
    })?;
    info!(endpoint = %client.url(), "Vehicle feed configured");
    Ok(Arc::new(client))
}

/// Wire a [`VehicleStorage`] in front of `feed` using `[cache]` and `[feed]`.
#[must_use]
pub fn build_storage(config: &Config, feed: Arc<dyn VehicleFeed>) -> VehicleStorage {
    info!(
        update_delay_ms = config.cache.update_delay_ms,
        ttl_ms = config.cache.ttl_ms,
        mode = %config.feed.position_mode,
        "Vehicle storage configured"
    );
    VehicleStorage::new(feed)
        .with_update_delay(config.cache.update_delay_ms)
        .with_ttl(config.cache.ttl_ms)
        .with_position_mode(config.feed.position_mode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::outbound::PositionMode;

    #[test]
    fn storage_follows_config() {
        let config = Config::parse_toml(
            r#"
[feed]
base_url = "https://transit.example.org"
position_mode = "corrected"

[cache]
update_delay_ms = 2500
ttl_ms = 90000
"#,
        )
        .unwrap();

        let feed = build_feed(&config).unwrap();
        let storage = build_storage(&config, feed);
        assert_eq!(storage.update_delay_ms(), 2500);
        assert_eq!(storage.position_mode(), PositionMode::Corrected);
        assert_eq!(storage.store().ttl_ms(), 90_000);
        assert!(storage.current_status().is_none());
    }
}
