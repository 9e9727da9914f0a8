//! Domain identifier types with proper encapsulation.
//!
//! The feed sends identifiers either as strings or as integers; both are
//! normalized to their decimal string form at the wire boundary so that
//! lookups compare like with like.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Vehicle identifier - newtype for type safety.
///
/// The inner String is private to ensure all construction goes through
/// the defined constructors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VehicleId(String);

impl VehicleId {
    /// Create a new `VehicleId` from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the vehicle ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for VehicleId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for VehicleId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<i64> for VehicleId {
    fn from(n: i64) -> Self {
        Self(n.to_string())
    }
}

/// Trip identifier - newtype for type safety.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TripId(String);

impl TripId {
    /// Create a new `TripId` from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the trip ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TripId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for TripId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for TripId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<i64> for TripId {
    fn from(n: i64) -> Self {
        Self(n.to_string())
    }
}
