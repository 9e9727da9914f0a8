//! Last-write-wins vehicle store.
//!
//! Holds at most one record per vehicle. Batches from the feed are merged by
//! comparing per-record watermarks; records older than the TTL are dropped on
//! every merge. There is no background sweep.

use std::collections::HashMap;

use crate::domain::error::BoundsError;
use crate::domain::{BoundingBox, TripId, VehicleId, VehiclePosition};
use crate::port::outbound::RawBatch;

/// Counts of what a merge did, for logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeSummary {
    /// Records inserted or replaced.
    pub upserted: usize,
    /// Records removed by a newer tombstone.
    pub deleted: usize,
    /// Entries that lost to an existing record or deleted an unknown id.
    pub ignored: usize,
    /// Records dropped by the TTL pass.
    pub evicted: usize,
}

/// In-memory vehicle snapshot.
#[derive(Debug, Clone, Default)]
pub struct VehicleStore {
    vehicles: HashMap<VehicleId, VehiclePosition>,
    /// Max record age in millis; 0 keeps records forever.
    ttl_ms: u64,
    /// Highest `last_update` among stored records, 0 when empty.
    watermark: i64,
}

impl VehicleStore {
    #[must_use]
    pub fn new(ttl_ms: u64) -> Self {
        Self {
            vehicles: HashMap::new(),
            ttl_ms,
            watermark: 0,
        }
    }

    #[must_use]
    pub const fn ttl_ms(&self) -> u64 {
        self.ttl_ms
    }

    #[must_use]
    pub const fn watermark(&self) -> i64 {
        self.watermark
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    /// Turn a feed batch into stamped records.
    ///
    /// Null entries and entries without an id are dropped. An entry with only
    /// one of latitude/longitude is malformed and becomes a tombstone for its
    /// id. Everything else carries the batch watermark.
    #[must_use]
    pub fn normalize(batch: Option<&RawBatch>) -> Vec<VehiclePosition> {
        let Some(batch) = batch else {
            return Vec::new();
        };
        let Some(entries) = batch.vehicles.as_ref() else {
            return Vec::new();
        };

        entries
            .iter()
            .flatten()
            .filter_map(|entry| {
                let id = entry.id.as_ref().filter(|id| !id.as_str().is_empty())?;
                if entry.latitude.is_some() != entry.longitude.is_some() {
                    return Some(VehiclePosition::tombstone(id.clone(), batch.last_update));
                }
                Some(VehiclePosition {
                    id: id.clone(),
                    trip_id: entry.trip_id.clone(),
                    latitude: entry.latitude,
                    longitude: entry.longitude,
                    last_update: batch.last_update,
                    is_deleted: entry.is_deleted.unwrap_or(false),
                    name: entry.name.clone(),
                    heading: entry.heading,
                    category: entry.category.clone(),
                })
            })
            .collect()
    }

    /// Merge stamped records, then evict expired ones relative to `now`.
    ///
    /// An incoming record wins only with a strictly newer `last_update`; ties
    /// keep what is stored.
    pub fn merge<I>(&mut self, entries: I, now: i64) -> MergeSummary
    where
        I: IntoIterator<Item = VehiclePosition>,
    {
        let mut summary = MergeSummary::default();

        for incoming in entries {
            match self.vehicles.get(&incoming.id) {
                Some(existing) if existing.last_update >= incoming.last_update => {
                    summary.ignored += 1;
                }
                Some(_) if incoming.is_deleted => {
                    self.vehicles.remove(&incoming.id);
                    summary.deleted += 1;
                }
                None if incoming.is_deleted => {
                    summary.ignored += 1;
                }
                _ => {
                    self.vehicles.insert(incoming.id.clone(), incoming);
                    summary.upserted += 1;
                }
            }
        }

        summary.evicted = self.evict_expired(now);
        self.watermark = self
            .vehicles
            .values()
            .map(|v| v.last_update)
            .max()
            .unwrap_or(0);

        summary
    }

    /// Normalize and merge a feed batch.
    pub fn add_response(&mut self, batch: Option<&RawBatch>, now: i64) -> MergeSummary {
        self.merge(Self::normalize(batch), now)
    }

    fn evict_expired(&mut self, now: i64) -> usize {
        if self.ttl_ms == 0 {
            return 0;
        }
        let ttl = i64::try_from(self.ttl_ms).unwrap_or(i64::MAX);
        let before = self.vehicles.len();
        self.vehicles
            .retain(|_, v| v.last_update.saturating_add(ttl) >= now);
        before - self.vehicles.len()
    }

    /// Record for a vehicle id.
    #[must_use]
    pub fn by_id(&self, id: &VehicleId) -> Option<&VehiclePosition> {
        self.vehicles.get(id)
    }

    /// Record currently serving a trip.
    ///
    /// Linear scan. When several vehicles report the same trip the most
    /// recently updated one wins, then the lowest id.
    #[must_use]
    pub fn by_trip_id(&self, trip_id: &TripId) -> Option<&VehiclePosition> {
        self.vehicles
            .values()
            .filter(|v| v.trip_id.as_ref() == Some(trip_id))
            .max_by(|a, b| {
                a.last_update
                    .cmp(&b.last_update)
                    .then_with(|| b.id.cmp(&a.id))
            })
    }

    /// Every record updated at or after `since`, ordered by id.
    #[must_use]
    pub fn since(&self, since: i64) -> Vec<VehiclePosition> {
        self.collect(|v| v.last_update >= since)
    }

    /// Records inside `bounds` updated at or after `since`, ordered by id.
    ///
    /// Records without both coordinates never match.
    #[must_use]
    pub fn in_bounds(&self, bounds: &BoundingBox, since: i64) -> Vec<VehiclePosition> {
        self.collect(|v| {
            v.last_update >= since
                && v
                    .coordinates()
                    .is_some_and(|(lon, lat)| bounds.contains(lon, lat))
        })
    }

    /// Validate the box edges, then query as [`in_bounds`](Self::in_bounds).
    pub fn in_box(
        &self,
        left: f64,
        right: f64,
        top: f64,
        bottom: f64,
        since: i64,
    ) -> Result<Vec<VehiclePosition>, BoundsError> {
        let bounds = BoundingBox::new(left, right, top, bottom)?;
        Ok(self.in_bounds(&bounds, since))
    }

    fn collect<F>(&self, keep: F) -> Vec<VehiclePosition>
    where
        F: Fn(&VehiclePosition) -> bool,
    {
        let mut out: Vec<VehiclePosition> =
            self.vehicles.values().filter(|v| keep(v)).cloned().collect();
        out.sort_by(|a, b| a.id.cmp(&b.id));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::outbound::RawEntry;

    fn ids(records: &[VehiclePosition]) -> Vec<&str> {
        records.iter().map(|v| v.id.as_str()).collect()
    }

    #[test]
    fn normalize_filters_and_tombstones() {
        let batch = RawBatch {
            last_update: 1234,
            vehicles: Some(vec![
                None,
                Some(RawEntry {
                    latitude: Some(1.0),
                    longitude: Some(2.0),
                    ..RawEntry::default()
                }),
                Some(RawEntry {
                    id: Some("partial".into()),
                    latitude: Some(5.0),
                    ..RawEntry::default()
                }),
                Some(RawEntry::located("ok", 1.0, 2.0).with_trip("t1")),
            ]),
        };

        let out = VehicleStore::normalize(Some(&batch));
        assert_eq!(out.len(), 2);
        assert_eq!(out[0], VehiclePosition::tombstone("partial", 1234));
        assert_eq!(out[1].id.as_str(), "ok");
        assert_eq!(out[1].trip_id, Some(TripId::new("t1")));
        assert!(!out[1].is_deleted);
        assert!(out.iter().all(|v| v.last_update == 1234));
    }

    #[test]
    fn normalize_drops_empty_ids() {
        let batch = RawBatch::new(1, vec![RawEntry::located("", 1.0, 1.0)]);
        assert!(VehicleStore::normalize(Some(&batch)).is_empty());
    }

    #[test]
    fn normalize_handles_missing_input() {
        assert!(VehicleStore::normalize(None).is_empty());
        let batch = RawBatch {
            last_update: 5,
            vehicles: None,
        };
        assert!(VehicleStore::normalize(Some(&batch)).is_empty());
    }

    #[test]
    fn normalize_keeps_coordinateless_entries() {
        let batch = RawBatch::new(9, vec![RawEntry::deleted("gone")]);
        let out = VehicleStore::normalize(Some(&batch));
        assert_eq!(out, vec![VehiclePosition::tombstone("gone", 9)]);
    }

    #[test]
    fn add_response_end_to_end() {
        let mut store = VehicleStore::new(0);
        store.add_response(
            Some(&RawBatch::new(
                100,
                vec![RawEntry::located("v1", 1.0, 2.0), RawEntry::deleted("v2")],
            )),
            1_000,
        );
        assert_eq!(ids(&store.since(0)), vec!["v1"]);
        assert_eq!(store.watermark(), 100);

        let summary = store.add_response(
            Some(&RawBatch::new(50, vec![RawEntry::deleted("v1")])),
            1_000,
        );
        assert_eq!(summary.ignored, 1);
        assert!(store.by_id(&VehicleId::new("v1")).is_some());
        assert_eq!(store.watermark(), 100);
    }

    #[test]
    fn merge_is_idempotent() {
        let batch = RawBatch::new(
            10,
            vec![
                RawEntry::located("a", 1.0, 1.0),
                RawEntry::located("b", 2.0, 2.0),
                RawEntry::deleted("c"),
            ],
        );
        let mut once = VehicleStore::new(0);
        once.add_response(Some(&batch), 10);
        let mut twice = once.clone();
        twice.add_response(Some(&batch), 10);

        assert_eq!(once.since(0), twice.since(0));
        assert_eq!(once.watermark(), twice.watermark());
    }

    #[test]
    fn newer_update_wins_regardless_of_order() {
        let old = VehiclePosition::new("v", 1.0, 1.0, 10);
        let new = VehiclePosition::new("v", 2.0, 2.0, 20);

        let mut forward = VehicleStore::new(0);
        forward.merge([old.clone(), new.clone()], 0);
        let mut backward = VehicleStore::new(0);
        backward.merge([new.clone(), old], 0);

        assert_eq!(forward.by_id(&VehicleId::new("v")), Some(&new));
        assert_eq!(backward.by_id(&VehicleId::new("v")), Some(&new));
    }

    #[test]
    fn equal_timestamp_keeps_existing() {
        let mut store = VehicleStore::new(0);
        store.merge([VehiclePosition::new("v", 1.0, 1.0, 10)], 0);
        let summary = store.merge([VehiclePosition::new("v", 9.0, 9.0, 10)], 0);

        assert_eq!(summary.ignored, 1);
        assert_eq!(
            store.by_id(&VehicleId::new("v")).and_then(|v| v.latitude),
            Some(1.0)
        );
    }

    #[test]
    fn tombstone_rules() {
        let mut store = VehicleStore::new(0);
        store.merge([VehiclePosition::new("v", 1.0, 1.0, 10)], 0);

        store.merge([VehiclePosition::tombstone("v", 10)], 0);
        assert_eq!(store.len(), 1, "equal-time delete is ignored");

        store.merge([VehiclePosition::tombstone("v", 5)], 0);
        assert_eq!(store.len(), 1, "older delete is ignored");

        let summary = store.merge([VehiclePosition::tombstone("unknown", 99)], 0);
        assert_eq!(summary.ignored, 1);
        assert_eq!(store.len(), 1);

        let summary = store.merge([VehiclePosition::tombstone("v", 11)], 0);
        assert_eq!(summary.deleted, 1);
        assert!(store.is_empty());
        assert_eq!(store.watermark(), 0);
    }

    #[test]
    fn ttl_evicts_on_empty_merge() {
        let mut store = VehicleStore::new(1_000);
        store.merge(
            [
                VehiclePosition::new("old", 0.0, 0.0, 100),
                VehiclePosition::new("new", 0.0, 0.0, 2_000),
            ],
            1_100,
        );
        assert_eq!(store.len(), 2);

        // old: 100 + 1000 < 1101 -> gone; new stays.
        let summary = store.merge(Vec::new(), 1_101);
        assert_eq!(summary.evicted, 1);
        assert_eq!(ids(&store.since(0)), vec!["new"]);
        assert_eq!(store.watermark(), 2_000);
    }

    #[test]
    fn ttl_boundary_is_inclusive() {
        let mut store = VehicleStore::new(1_000);
        store.merge([VehiclePosition::new("v", 0.0, 0.0, 100)], 1_100);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn zero_ttl_never_expires() {
        let mut store = VehicleStore::new(0);
        store.merge([VehiclePosition::new("v", 0.0, 0.0, 1)], i64::MAX);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn expired_incoming_record_is_not_kept() {
        let mut store = VehicleStore::new(10);
        let summary = store.merge([VehiclePosition::new("v", 0.0, 0.0, 1)], 100);
        assert_eq!(summary.upserted, 1);
        assert_eq!(summary.evicted, 1);
        assert!(store.is_empty());
    }

    #[test]
    fn since_filters_inclusively() {
        let mut store = VehicleStore::new(0);
        store.merge(
            [
                VehiclePosition::new("a", 0.0, 0.0, 10),
                VehiclePosition::new("b", 0.0, 0.0, 20),
                VehiclePosition::new("c", 0.0, 0.0, 30),
            ],
            0,
        );
        assert_eq!(ids(&store.since(20)), vec!["b", "c"]);
        assert_eq!(store.since(0).len(), 3);
    }

    #[test]
    fn in_box_selects_by_coordinates_and_time() {
        let mut store = VehicleStore::new(0);
        let mut no_coords = VehiclePosition::new("nocoord", 0.0, 0.0, 10);
        no_coords.latitude = None;
        no_coords.longitude = None;
        store.merge(
            [
                VehiclePosition::new("inside", 5.0, 5.0, 10),
                VehiclePosition::new("edge", 10.0, 0.0, 10),
                VehiclePosition::new("outside", 11.0, 5.0, 10),
                VehiclePosition::new("early", 5.0, 5.0, 1),
                no_coords,
            ],
            0,
        );

        let found = store.in_box(0.0, 10.0, 10.0, 0.0, 5).unwrap();
        assert_eq!(ids(&found), vec!["edge", "inside"]);
    }

    #[test]
    fn in_box_rejects_degenerate_boxes() {
        let store = VehicleStore::new(0);
        assert!(matches!(
            store.in_box(1.0, 1.0, 2.0, 1.0, 0),
            Err(BoundsError::LeftNotLessThanRight { .. })
        ));
        assert!(matches!(
            store.in_box(0.0, 1.0, 1.0, 2.0, 0),
            Err(BoundsError::TopNotGreaterThanBottom { .. })
        ));
    }

    #[test]
    fn by_trip_id_scans_records() {
        let mut store = VehicleStore::new(0);
        store.merge(
            [
                VehiclePosition::new("a", 0.0, 0.0, 10).with_trip("t1"),
                VehiclePosition::new("b", 0.0, 0.0, 20).with_trip("t2"),
                VehiclePosition::new("c", 0.0, 0.0, 30).with_trip("t1"),
            ],
            0,
        );
        let found = store.by_trip_id(&TripId::new("t1")).unwrap();
        assert_eq!(found.id.as_str(), "c");
        assert!(store.by_trip_id(&TripId::new("t9")).is_none());
    }

    #[test]
    fn passthrough_attributes_survive_normalize() {
        let batch = RawBatch::new(
            3,
            vec![RawEntry {
                name: Some("12 Hauptbahnhof".into()),
                heading: Some(90),
                category: Some("bus".into()),
                ..RawEntry::located("v", 1.0, 2.0)
            }],
        );
        let out = VehicleStore::normalize(Some(&batch));
        assert_eq!(out[0].name.as_deref(), Some("12 Hauptbahnhof"));
        assert_eq!(out[0].heading, Some(90));
        assert_eq!(out[0].category.as_deref(), Some("bus"));
    }
}
