//! Feed-agnostic domain types.
//!
//! - [`id`]: `VehicleId` and `TripId` newtypes
//! - [`position`]: stored vehicle records and list results
//! - [`bounds`]: validated bounding boxes for area queries
//! - [`status`]: refresh outcome shared by all queries
//! - [`error`]: argument validation errors

pub mod bounds;
pub mod error;
pub mod id;
pub mod position;
pub mod status;

pub use bounds::BoundingBox;
pub use id::{TripId, VehicleId};
pub use position::{VehicleList, VehiclePosition};
pub use status::{RefreshStatus, SuccessStatus};
