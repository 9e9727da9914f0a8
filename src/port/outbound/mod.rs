//! Outbound ports: traits the application calls out through.

pub mod feed;

pub use feed::{PositionMode, RawBatch, RawEntry, VehicleFeed};
