//! Runtime caches used by application services.
//!
//! - [`gate::LockGate`]: single-flight gate that serializes feed refreshes
//! - [`store::VehicleStore`]: last-write-wins vehicle snapshot with TTL eviction

pub mod gate;
pub mod store;
