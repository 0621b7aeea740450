//! World-space rays and the intersection tests used for picking.

use nalgebra::{Isometry3, Matrix4, Vector3, Vector4};
use serde::{Deserialize, Serialize};

use crate::geometry::{Aabb, Point3};

const EPSILON: f64 = 1e-12;

/// Half-line starting at `origin` heading along unit `direction`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ray {
    pub origin: Point3,
    pub direction: Point3,
}

impl Ray {
    /// Creates a ray; `direction` is normalised.
    pub fn new(origin: Point3, direction: Point3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Ray cast forward (local -Z) from a tracked controller pose.
    pub fn from_pose(pose: &Isometry3<f64>) -> Self {
        let origin = Point3::from(pose.translation.vector);
        let direction = Point3::from(pose.rotation * Vector3::new(0.0, 0.0, -1.0));
        Self::new(origin, direction)
    }

    /// Ray through a screen point given in normalised device coordinates.
    ///
    /// `inverse_view_projection` maps clip space back to world space. Returns
    /// `None` if the matrix sends the point to infinity.
    pub fn from_screen(ndc: (f64, f64), inverse_view_projection: &Matrix4<f64>) -> Option<Self> {
        let near = unproject(ndc, -1.0, inverse_view_projection)?;
        let far = unproject(ndc, 1.0, inverse_view_projection)?;
        let direction = far - near;
        if direction.length() < EPSILON {
            return None;
        }
        Some(Self::new(near, direction))
    }

    pub fn point_at(&self, t: f64) -> Point3 {
        self.origin + self.direction * t
    }

    /// Distance along the ray to `aabb`, using the slab test.
    ///
    /// A ray starting inside the box reports the distance to where it exits.
    pub fn intersect_aabb(&self, aabb: &Aabb) -> Option<f64> {
        let mut t_min = f64::NEG_INFINITY;
        let mut t_max = f64::INFINITY;
        for axis in 0..3 {
            let o = self.origin.component(axis);
            let d = self.direction.component(axis);
            let lo = aabb.min.component(axis);
            let hi = aabb.max.component(axis);
            if d.abs() < EPSILON {
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }
            let mut t1 = (lo - o) / d;
            let mut t2 = (hi - o) / d;
            if t1 > t2 {
                std::mem::swap(&mut t1, &mut t2);
            }
            t_min = t_min.max(t1);
            t_max = t_max.min(t2);
            if t_max < t_min {
                return None;
            }
        }
        if t_max < 0.0 {
            None
        } else if t_min >= 0.0 {
            Some(t_min)
        } else {
            Some(t_max)
        }
    }

    /// Distance along the ray to the plane through `point` with `normal`.
    pub fn intersect_plane(&self, point: Point3, normal: Point3) -> Option<f64> {
        let denom = normal.dot(self.direction);
        if denom.abs() < EPSILON {
            return None;
        }
        let t = normal.dot(point - self.origin) / denom;
        if t < 0.0 {
            None
        } else {
            Some(t)
        }
    }
}

/// Converts a pixel position to normalised device coordinates (y up).
pub fn ndc_from_pixels(x: f64, y: f64, width: f64, height: f64) -> (f64, f64) {
    (x / width * 2.0 - 1.0, -(y / height) * 2.0 + 1.0)
}

fn unproject(ndc: (f64, f64), depth: f64, inverse: &Matrix4<f64>) -> Option<Point3> {
    let h = inverse * Vector4::new(ndc.0, ndc.1, depth, 1.0);
    if h.w.abs() < EPSILON {
        return None;
    }
    Some(Point3::new(h.x / h.w, h.y / h.w, h.z / h.w))
}
