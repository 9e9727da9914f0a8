//! Trapeze geoservice feed adapter.

pub mod client;
pub mod dto;

pub use client::TrapezeClient;
