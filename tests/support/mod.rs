#![allow(dead_code)]

pub mod architecture;

use std::sync::Arc;

use vehicle_cache::application::VehicleStorage;
use vehicle_cache::testkit::clock::ManualClock;
use vehicle_cache::testkit::feed::ScriptedFeed;

/// Wall-clock origin used by the storage tests.
pub const T0: i64 = 1_700_000_000_000;

/// Storage wired to `feed` and a manual clock starting at [`T0`].
pub fn storage(feed: &Arc<ScriptedFeed>) -> (VehicleStorage, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(T0));
    let storage = VehicleStorage::new(Arc::clone(feed) as _).with_clock(Arc::clone(&clock) as _);
    (storage, clock)
}

/// Spin until `check` holds, yielding to other tasks in between.
pub async fn wait_until<F: Fn() -> bool>(check: F) {
    tokio::time::timeout(std::time::Duration::from_secs(5), async {
        while !check() {
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("condition not reached in time");
}
