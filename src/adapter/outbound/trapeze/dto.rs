//! Wire types for the Trapeze vehicle-info endpoint.

use serde::Deserialize;

use crate::domain::{TripId, VehicleId};
use crate::port::outbound::{RawBatch, RawEntry};

/// An identifier that may arrive as a JSON string or number.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum WireId {
    Text(String),
    Number(i64),
}

impl WireId {
    fn into_string(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::Number(n) => n.to_string(),
        }
    }
}

/// One vehicle as sent by the feed.
///
/// A JSON `null` decodes the same as a missing key.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleLocationDto {
    #[serde(default)]
    pub id: Option<WireId>,
    #[serde(default)]
    pub trip_id: Option<WireId>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub is_deleted: Option<bool>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub heading: Option<i32>,
    #[serde(default)]
    pub category: Option<String>,
}

/// Response body of the vehicle-info endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleLocationListDto {
    #[serde(default)]
    pub last_update: i64,
    #[serde(default, alias = "entities")]
    pub vehicles: Option<Vec<Option<VehicleLocationDto>>>,
}

impl From<VehicleLocationDto> for RawEntry {
    fn from(dto: VehicleLocationDto) -> Self {
        Self {
            id: dto.id.map(|id| VehicleId::new(id.into_string())),
            trip_id: dto.trip_id.map(|id| TripId::new(id.into_string())),
            latitude: dto.latitude,
            longitude: dto.longitude,
            is_deleted: dto.is_deleted,
            name: dto.name,
            heading: dto.heading,
            category: dto.category,
        }
    }
}

impl From<VehicleLocationListDto> for RawBatch {
    fn from(dto: VehicleLocationListDto) -> Self {
        Self {
            last_update: dto.last_update,
            vehicles: dto
                .vehicles
                .map(|list| list.into_iter().map(|v| v.map(RawEntry::from)).collect()),
        }
    }
}
