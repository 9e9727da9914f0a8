//! Vehicle feed connection settings.

use serde::Deserialize;

use crate::port::outbound::PositionMode;

/// Where and how to reach the vehicle feed.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Base URL of the Trapeze installation (scheme and host).
    pub base_url: String,
    /// Raw or network-corrected positions.
    pub position_mode: PositionMode,
    /// Whole-request timeout.
    pub request_timeout_ms: u64,
    /// TCP/TLS connect timeout.
    pub connect_timeout_ms: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            position_mode: PositionMode::Raw,
            request_timeout_ms: 5_000,
            connect_timeout_ms: 2_000,
        }
    }
}
