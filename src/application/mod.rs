//! Application services (use cases).
//!
//! These services orchestrate domain logic and coordinate adapters
//! to implement the application's use cases.

pub mod cache;
pub mod clock;
pub mod storage;

pub use storage::VehicleStorage;
