//! Geographic bounding box used by area queries.

use serde::Serialize;

use super::error::BoundsError;

/// A validated, non-degenerate longitude/latitude rectangle.
///
/// Edges are inclusive. Construction is the only place the box is checked,
/// so holding a `BoundingBox` proves `left < right` and `bottom < top`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    left: f64,
    right: f64,
    top: f64,
    bottom: f64,
}

impl BoundingBox {
    /// Validate and build a box.
    ///
    /// NaN edges are rejected along with reversed or zero-width ones.
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    pub fn new(left: f64, right: f64, top: f64, bottom: f64) -> Result<Self, BoundsError> {
        if !(left < right) {
            return Err(BoundsError::LeftNotLessThanRight { left, right });
        }
        if !(top > bottom) {
            return Err(BoundsError::TopNotGreaterThanBottom { top, bottom });
        }
        Ok(Self {
            left,
            right,
            top,
            bottom,
        })
    }

    #[must_use]
    pub const fn left(&self) -> f64 {
        self.left
    }

    #[must_use]
    pub const fn right(&self) -> f64 {
        self.right
    }

    #[must_use]
    pub const fn top(&self) -> f64 {
        self.top
    }

    #[must_use]
    pub const fn bottom(&self) -> f64 {
        self.bottom
    }

    /// True when the point lies on or inside the box.
    #[must_use]
    pub fn contains(&self, longitude: f64, latitude: f64) -> bool {
        longitude >= self.left
            && longitude <= self.right
            && latitude >= self.bottom
            && latitude <= self.top
    }
}
