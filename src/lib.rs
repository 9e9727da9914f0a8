//! Vehicle Cache - single-flight cache of live transit vehicle positions.
//!
//! This crate keeps an in-memory snapshot of vehicle positions fed by
//! periodic batches from a remote feed and lets many concurrent callers
//! query it without each one triggering its own network refresh.
//!
//! # Architecture
//!
//! - **`application::cache::gate`** - `LockGate`, the single-flight gate:
//!   one refresh owns it, everyone else parks until it is released
//! - **`application::cache::store`** - `VehicleStore`, last-write-wins merge
//!   with tombstones and TTL eviction on every merge
//! - **`application::storage`** - `VehicleStorage`, the cache-aside
//!   orchestrator: staleness check, gate, feed call, merge, typed status
//!
//! # Modules
//!
//! - [`domain`] - Ids, position records, bounding boxes, refresh status
//! - [`port`] - The `VehicleFeed` trait the orchestrator fetches through
//! - [`application`] - Gate, store and orchestrator
//! - [`adapter`] - Trapeze HTTP feed and the CLI
//! - [`infrastructure`] - Configuration, logging and wiring
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use vehicle_cache::adapter::outbound::trapeze::TrapezeClient;
//! use vehicle_cache::application::VehicleStorage;
//!
//! # async fn run() -> vehicle_cache::error::Result<()> {
//! let feed = TrapezeClient::new("https://transit.example.org")?;
//! let storage = VehicleStorage::new(Arc::new(feed)).with_ttl(120_000);
//! let snapshot = storage.get_all(0).await?;
//! println!("{} vehicles", snapshot.vehicles.len());
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
