//! Cache-aside vehicle storage.
//!
//! [`VehicleStorage`] answers queries from the in-memory [`VehicleStore`] and
//! refreshes it from the feed when the last refresh is older than the update
//! delay. Concurrent callers share a single in-flight refresh: the first one
//! to find the data stale performs the fetch, everyone else parks on the
//! [`LockGate`] and reads the status it publishes.
//!
//! # Refresh cycle
//!
//! ```text
//! query ─► stale? ──no──► serve cached status
//!            │yes
//!            ▼
//!        gate.enter() ──held──► wait for release ─► read status
//!            │owner
//!            ▼
//!        fetch(mode, watermark) ─► merge ─► publish status ─► release
//! ```

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, trace, warn};

use super::cache::gate::{LockGate, Turn};
use super::cache::store::VehicleStore;
use super::clock::{Clock, SystemClock};
use crate::domain::{
    BoundingBox, RefreshStatus, SuccessStatus, TripId, VehicleId, VehicleList, VehiclePosition,
};
use crate::error::{Error, NotFoundKind, Result};
use crate::port::outbound::{PositionMode, VehicleFeed};

/// Default minimum age of a refresh before another one is attempted.
pub const DEFAULT_UPDATE_DELAY_MS: u64 = 10_000;

/// Single-flight, last-write-wins cache in front of a [`VehicleFeed`].
pub struct VehicleStorage {
    feed: Arc<dyn VehicleFeed>,
    clock: Arc<dyn Clock>,
    store: RwLock<VehicleStore>,
    status: RwLock<Option<RefreshStatus>>,
    gate: LockGate,
    update_delay_ms: u64,
    mode: PositionMode,
}

impl std::fmt::Debug for VehicleStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VehicleStorage")
            .field("feed", &self.feed.name())
            .field("update_delay_ms", &self.update_delay_ms)
            .field("mode", &self.mode)
            .field("status", &*self.status.read())
            .finish_non_exhaustive()
    }
}

impl VehicleStorage {
    /// Storage with the default update delay, no TTL and raw positions.
    pub fn new(feed: Arc<dyn VehicleFeed>) -> Self {
        Self {
            feed,
            clock: Arc::new(SystemClock),
            store: RwLock::new(VehicleStore::new(0)),
            status: RwLock::new(None),
            gate: LockGate::new(),
            update_delay_ms: DEFAULT_UPDATE_DELAY_MS,
            mode: PositionMode::default(),
        }
    }

    #[must_use]
    pub fn with_update_delay(mut self, update_delay_ms: u64) -> Self {
        self.update_delay_ms = update_delay_ms;
        self
    }

    /// Expire records older than `ttl_ms` (0 disables expiry).
    #[must_use]
    pub fn with_ttl(mut self, ttl_ms: u64) -> Self {
        self.store = RwLock::new(VehicleStore::new(ttl_ms));
        self
    }

    #[must_use]
    pub fn with_position_mode(mut self, mode: PositionMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub const fn update_delay_ms(&self) -> u64 {
        self.update_delay_ms
    }

    #[must_use]
    pub const fn position_mode(&self) -> PositionMode {
        self.mode
    }

    /// Point-in-time copy of the underlying store.
    ///
    /// Owned so callers can keep it across awaits without blocking the next
    /// refresh's write.
    #[must_use]
    pub fn store(&self) -> VehicleStore {
        self.store.read().clone()
    }

    /// Status of the most recent refresh, if any has run.
    #[must_use]
    pub fn current_status(&self) -> Option<RefreshStatus> {
        self.status.read().clone()
    }

    /// Whether a refresh currently owns the gate.
    #[must_use]
    pub fn refresh_in_flight(&self) -> bool {
        self.gate.is_held()
    }

    /// Callers parked on the in-flight refresh.
    #[must_use]
    pub fn waiters(&self) -> usize {
        self.gate.waiting()
    }

    /// True when no refresh has completed or the last one is older than the
    /// update delay.
    #[must_use]
    pub fn stale_enough(&self, now: i64) -> bool {
        match self.status.read().as_ref() {
            None => true,
            Some(status) => {
                let delay = i64::try_from(self.update_delay_ms).unwrap_or(i64::MAX);
                status.timestamp().saturating_add(delay) < now
            }
        }
    }

    /// Return a status no older than the update delay, refreshing if needed.
    ///
    /// At most one feed call is in flight; callers arriving meanwhile wait
    /// for it and get the status it published. Feed failures are recorded as
    /// [`RefreshStatus::Error`], not returned as `Err`.
    pub async fn ensure_fresh(&self) -> Option<RefreshStatus> {
        if !self.stale_enough(self.clock.now_millis()) {
            trace!("Serving cached vehicle status");
            return self.current_status();
        }

        match self.gate.enter() {
            Turn::Wait(waiter) => {
                debug!("Vehicle refresh in flight, waiting");
                waiter.wait().await;
                self.current_status()
            }
            Turn::Owner(guard) => {
                // Another refresh may have finished between the staleness
                // check and taking the gate.
                if !self.stale_enough(self.clock.now_millis()) {
                    guard.release();
                    return self.current_status();
                }

                let status = self.refresh().await;
                // Publish before release so woken waiters see this status.
                *self.status.write() = Some(status.clone());
                guard.release();
                Some(status)
            }
        }
    }

    async fn refresh(&self) -> RefreshStatus {
        let since = self.store.read().watermark();
        debug!(feed = self.feed.name(), mode = %self.mode, since, "Refreshing vehicle positions");

        match self.feed.fetch_batch(self.mode, since).await {
            Ok(batch) => {
                let now = self.clock.now_millis();
                let (summary, stored) = {
                    let mut store = self.store.write();
                    let summary = store.add_response(Some(&batch), now);
                    (summary, store.len())
                };
                debug!(
                    last_update = batch.last_update,
                    received = batch.len(),
                    upserted = summary.upserted,
                    deleted = summary.deleted,
                    ignored = summary.ignored,
                    evicted = summary.evicted,
                    stored,
                    "Vehicle positions refreshed"
                );
                RefreshStatus::Success {
                    last_update: batch.last_update,
                    timestamp: now,
                }
            }
            Err(error) => {
                let now = self.clock.now_millis();
                let last_update = self
                    .status
                    .read()
                    .as_ref()
                    .map_or(0, RefreshStatus::last_update);
                warn!(error = %error, last_update, "Vehicle refresh failed");
                RefreshStatus::Error {
                    error,
                    last_update,
                    timestamp: now,
                }
            }
        }
    }

    /// Fresh status, or the error that the last refresh recorded.
    pub async fn require_success(&self) -> Result<SuccessStatus> {
        match self.ensure_fresh().await {
            Some(status) => status.into_result().map_err(Error::Upstream),
            None => Err(Error::Internal("no refresh status available".into())),
        }
    }

    /// Look up a vehicle by id.
    pub async fn get_by_id(&self, id: &VehicleId) -> Result<VehiclePosition> {
        self.require_success().await?;
        self.store
            .read()
            .by_id(id)
            .cloned()
            .ok_or_else(|| Error::NotFound {
                kind: NotFoundKind::Vehicle,
                id: id.to_string(),
            })
    }

    /// Look up the vehicle serving a trip.
    pub async fn get_by_trip_id(&self, trip_id: &TripId) -> Result<VehiclePosition> {
        self.require_success().await?;
        self.store
            .read()
            .by_trip_id(trip_id)
            .cloned()
            .ok_or_else(|| Error::NotFound {
                kind: NotFoundKind::Trip,
                id: trip_id.to_string(),
            })
    }

    /// Vehicles inside a box updated at or after `since`.
    ///
    /// A degenerate box is rejected before any refresh is attempted.
    pub async fn get_in_box(
        &self,
        left: f64,
        right: f64,
        top: f64,
        bottom: f64,
        since: i64,
    ) -> Result<VehicleList> {
        let bounds = BoundingBox::new(left, right, top, bottom)?;
        let status = self.require_success().await?;
        let vehicles = self.store.read().in_bounds(&bounds, since);
        Ok(VehicleList {
            last_update: status.last_update,
            vehicles,
        })
    }

    /// Every vehicle updated at or after `since`.
    pub async fn get_all(&self, since: i64) -> Result<VehicleList> {
        let status = self.require_success().await?;
        let vehicles = self.store.read().since(since);
        Ok(VehicleList {
            last_update: status.last_update,
            vehicles,
        })
    }
}
