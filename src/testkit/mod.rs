//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`feed`] - [`ScriptedFeed`](feed::ScriptedFeed), a mock
//!   [`VehicleFeed`](crate::port::outbound::VehicleFeed) with call counting
//!   and an optional hold to keep a fetch in flight.
//! - [`clock`] - [`ManualClock`](clock::ManualClock) and
//!   [`SequenceClock`](clock::SequenceClock) for deterministic time.
//! - [`domain`] - Builders for raw entries and batches.

pub mod clock;
pub mod domain;
pub mod feed;
