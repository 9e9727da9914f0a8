//! Validation errors for query arguments.
//!
//! These are returned by [`BoundingBox::new`](super::bounds::BoundingBox::new)
//! before any store access or network refresh happens.
//!
//! # Examples
//!
//! ```
//! use vehicle_cache::domain::bounds::BoundingBox;
//! use vehicle_cache::domain::error::BoundsError;
//!
//! let result = BoundingBox::new(1.0, 1.0, 2.0, 1.0);
//! assert!(matches!(result, Err(BoundsError::LeftNotLessThanRight { .. })));
//! ```

use thiserror::Error;

/// A degenerate bounding box.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BoundsError {
    /// The western edge is not strictly west of the eastern edge.
    #[error("left must be smaller than right (left={left}, right={right})")]
    LeftNotLessThanRight {
        /// Supplied left longitude.
        left: f64,
        /// Supplied right longitude.
        right: f64,
    },

    /// The northern edge is not strictly north of the southern edge.
    #[error("top must be greater than bottom (top={top}, bottom={bottom})")]
    TopNotGreaterThanBottom {
        /// Supplied top latitude.
        top: f64,
        /// Supplied bottom latitude.
        bottom: f64,
    },
}
