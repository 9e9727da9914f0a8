//! Vehicle position records as held by the store.

use serde::{Deserialize, Serialize};

use super::id::{TripId, VehicleId};

/// A vehicle's last known position, stamped with the feed watermark it
/// arrived under.
///
/// A record with `is_deleted` set is a tombstone: it only ever travels from
/// the feed into a merge and is never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehiclePosition {
    pub id: VehicleId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trip_id: Option<TripId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    /// Feed watermark (epoch millis) of the batch that carried this record.
    pub last_update: i64,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_deleted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl VehiclePosition {
    /// A live record at the given coordinates.
    pub fn new(id: impl Into<VehicleId>, latitude: f64, longitude: f64, last_update: i64) -> Self {
        Self {
            id: id.into(),
            trip_id: None,
            latitude: Some(latitude),
            longitude: Some(longitude),
            last_update,
            is_deleted: false,
            name: None,
            heading: None,
            category: None,
        }
    }

    /// A deletion marker for `id`.
    pub fn tombstone(id: impl Into<VehicleId>, last_update: i64) -> Self {
        Self {
            id: id.into(),
            trip_id: None,
            latitude: None,
            longitude: None,
            last_update,
            is_deleted: true,
            name: None,
            heading: None,
            category: None,
        }
    }

    #[must_use]
    pub fn with_trip(mut self, trip_id: impl Into<TripId>) -> Self {
        self.trip_id = Some(trip_id.into());
        self
    }

    /// Both coordinates, when present.
    #[must_use]
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.longitude, self.latitude) {
            (Some(lon), Some(lat)) => Some((lon, lat)),
            _ => None,
        }
    }
}

/// Query result shape shared by area and full-snapshot queries.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleList {
    /// Watermark of the refresh that produced the snapshot.
    pub last_update: i64,
    pub vehicles: Vec<VehiclePosition>,
}
