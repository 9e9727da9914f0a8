//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports define the extension points in the hexagonal architecture.
//! They are traits that adapters implement to integrate with external
//! systems.
//!
//! ```text
//!        ┌───────────────────────────┐
//!        │  Application (storage)    │
//!        └─────────────┬─────────────┘
//!                      │ VehicleFeed
//!                      ▼
//!              ┌───────────────┐
//!              │ Feed Adapter  │  (Trapeze HTTP, scripted test feed)
//!              └───────────────┘
//! ```

pub mod outbound;
