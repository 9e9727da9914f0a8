//! Implementations of ports (hexagonal adapters).
//!
//! - [`inbound`]: the command-line driver
//! - [`outbound`]: feed transports

pub mod inbound;
pub mod outbound;
