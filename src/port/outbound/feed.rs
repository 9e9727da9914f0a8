//! Vehicle feed port.
//!
//! The transport that actually talks to the remote feed lives in an adapter;
//! the orchestrator only sees this trait and the raw batch it returns.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::{TripId, VehicleId};
use crate::error::TransportError;

/// Which position source the feed should report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionMode {
    /// Positions as reported by the vehicles.
    #[default]
    Raw,
    /// Positions snapped to the network by the operator.
    Corrected,
}

impl PositionMode {
    /// Query parameter value understood by the feed.
    #[must_use]
    pub const fn as_param(&self) -> &'static str {
        match self {
            Self::Raw => "RAW",
            Self::Corrected => "CORRECTED",
        }
    }
}

impl fmt::Display for PositionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param())
    }
}

impl FromStr for PositionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "raw" => Ok(Self::Raw),
            "corrected" => Ok(Self::Corrected),
            other => Err(format!("unknown position mode '{other}'")),
        }
    }
}

/// One unvalidated entry of a feed batch.
///
/// Every field may be missing; normalization decides what survives.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawEntry {
    pub id: Option<VehicleId>,
    pub trip_id: Option<TripId>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub is_deleted: Option<bool>,
    pub name: Option<String>,
    pub heading: Option<i32>,
    pub category: Option<String>,
}

impl RawEntry {
    /// An entry with an id and both coordinates.
    pub fn located(id: impl Into<VehicleId>, latitude: f64, longitude: f64) -> Self {
        Self {
            id: Some(id.into()),
            latitude: Some(latitude),
            longitude: Some(longitude),
            ..Self::default()
        }
    }

    /// An explicit deletion for `id`.
    pub fn deleted(id: impl Into<VehicleId>) -> Self {
        Self {
            id: Some(id.into()),
            is_deleted: Some(true),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_trip(mut self, trip_id: impl Into<TripId>) -> Self {
        self.trip_id = Some(trip_id.into());
        self
    }
}

/// A batch of updates as returned by the feed.
///
/// `vehicles` is `None` when the feed omitted the list entirely; individual
/// slots are `None` for null entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawBatch {
    /// Feed watermark (epoch millis) for every entry in the batch.
    pub last_update: i64,
    pub vehicles: Option<Vec<Option<RawEntry>>>,
}

impl RawBatch {
    pub fn new(last_update: i64, vehicles: Vec<RawEntry>) -> Self {
        Self {
            last_update,
            vehicles: Some(vehicles.into_iter().map(Some).collect()),
        }
    }

    /// Number of slots in the batch, nulls included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vehicles.as_ref().map_or(0, Vec::len)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Source of vehicle position batches.
#[async_trait]
pub trait VehicleFeed: Send + Sync {
    /// Fetch every change after the `since` watermark (0 for a full snapshot).
    async fn fetch_batch(&self, mode: PositionMode, since: i64) -> Result<RawBatch, TransportError>;

    /// Human-readable name for logging.
    fn name(&self) -> &'static str {
        "feed"
    }
}
