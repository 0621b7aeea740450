//! Axis-aligned bounding boxes.

use super::Point3;

/// Axis-aligned box given by its minimum and maximum corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Point3,
    pub max: Point3,
}

impl Aabb {
    /// Builds a box of the given full `size` centred on `center`.
    pub fn from_center_size(center: Point3, size: Point3) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn center(&self) -> Point3 {
        (self.min + self.max) * 0.5
    }
}
