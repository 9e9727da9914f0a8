//! Trapeze geoservice HTTP client.
//!
//! Fetches vehicle positions from
//! `{base}/internetservice/geoserviceDispatcher/services/vehicleinfo/vehicles`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use tracing::{debug, warn};
use url::Url;

use super::dto::VehicleLocationListDto;
use crate::error::TransportError;
use crate::infrastructure::config::feed::FeedConfig;
use crate::port::outbound::{PositionMode, RawBatch, VehicleFeed};

const VEHICLES_PATH: &str = "internetservice/geoserviceDispatcher/services/vehicleinfo/vehicles";

/// HTTP implementation of [`VehicleFeed`] for Trapeze installations.
pub struct TrapezeClient {
    http: HttpClient,
    endpoint: Url,
}

impl TrapezeClient {
    /// Create a client for the installation at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Url`] if `base_url` is not a valid base URL.
    pub fn new(base_url: &str) -> Result<Self, TransportError> {
        Ok(Self {
            http: HttpClient::new(),
            endpoint: Self::endpoint(base_url)?,
        })
    }

    /// Create a client with the timeouts from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Url`] if the configured base URL is invalid.
    pub fn from_config(config: &FeedConfig) -> Result<Self, TransportError> {
        let http = HttpClient::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });

        Ok(Self {
            http,
            endpoint: Self::endpoint(&config.base_url)?,
        })
    }

    /// Full URL of the vehicles endpoint.
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.endpoint
    }

    fn endpoint(base_url: &str) -> Result<Url, TransportError> {
        let mut base = Url::parse(base_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(base.join(VEHICLES_PATH)?)
    }
}

#[async_trait]
impl VehicleFeed for TrapezeClient {
    async fn fetch_batch(&self, mode: PositionMode, since: i64) -> Result<RawBatch, TransportError> {
        let response = self
            .http
            .get(self.endpoint.clone())
            .query(&[
                ("positionType", mode.as_param().to_string()),
                ("colorType", "ROUTE_BASED".to_string()),
                ("lastUpdate", since.to_string()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: VehicleLocationListDto = response.json().await?;
        let batch = RawBatch::from(body);
        debug!(
            last_update = batch.last_update,
            vehicles = batch.len(),
            "Fetched vehicle batch"
        );
        Ok(batch)
    }

    fn name(&self) -> &'static str {
        "trapeze"
    }
}
