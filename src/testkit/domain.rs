//! Builders for feed batches used across tests.

use crate::port::outbound::{RawBatch, RawEntry};

/// A located entry.
pub fn vehicle(id: &str, latitude: f64, longitude: f64) -> RawEntry {
    RawEntry::located(id, latitude, longitude)
}

/// A located entry on a trip.
pub fn vehicle_on_trip(id: &str, trip: &str, latitude: f64, longitude: f64) -> RawEntry {
    RawEntry::located(id, latitude, longitude).with_trip(trip)
}

/// An explicit deletion.
pub fn deleted(id: &str) -> RawEntry {
    RawEntry::deleted(id)
}

/// A batch stamped with `last_update`.
pub fn batch(last_update: i64, entries: Vec<RawEntry>) -> RawBatch {
    RawBatch::new(last_update, entries)
}
