//! Turn device motion into drag targets.
//!
//! The drag state machine only understands world-space targets. These
//! adapters produce them from a tracked controller pose or a screen pointer.

use nalgebra::Isometry3;

use crate::geometry::Point3;
use crate::ray::Ray;

/// Keeps a grabbed handle fixed in the controller's frame, so it follows the
/// controller rigidly while held.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerGrab {
    local: nalgebra::Point3<f64>,
}

impl ControllerGrab {
    /// Records `handle_position` relative to the controller at grab time.
    pub fn new(pose: &Isometry3<f64>, handle_position: Point3) -> Self {
        Self {
            local: pose.inverse_transform_point(&handle_position.into()),
        }
    }

    /// Where the handle should be for the controller's current pose.
    pub fn target(&self, pose: &Isometry3<f64>) -> Point3 {
        pose.transform_point(&self.local).into()
    }
}

/// Moves a handle within the plane through it that faces the camera, so a
/// pointer drag keeps the handle at its original depth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenDrag {
    origin: Point3,
    normal: Point3,
}

impl ScreenDrag {
    pub fn new(handle_position: Point3, view_direction: Point3) -> Self {
        Self {
            origin: handle_position,
            normal: view_direction.normalize(),
        }
    }

    /// Where the pointer `ray` meets the drag plane, if it does.
    pub fn target(&self, ray: &Ray) -> Option<Point3> {
        ray.intersect_plane(self.origin, self.normal)
            .map(|t| ray.point_at(t))
    }
}
