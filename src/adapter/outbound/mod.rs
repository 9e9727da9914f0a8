//! Outbound adapters (driven side).

pub mod trapeze;
