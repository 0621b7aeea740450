//! Ray picking against handle bounding boxes.

use serde::Serialize;

use crate::handle::HandleSet;
use crate::ray::Ray;

/// Handle found under a ray and the distance along the ray to it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PickHit {
    pub joint_index: usize,
    pub distance: f64,
}

/// Returns the nearest handle hit by `ray`.
///
/// Equal distances resolve to the lower joint index. A miss is `None`.
pub fn resolve(ray: &Ray, handles: &HandleSet) -> Option<PickHit> {
    let mut hits: Vec<PickHit> = handles
        .iter()
        .filter_map(|h| {
            let bounds = handles.bounds(h.joint_index()).ok()?;
            ray.intersect_aabb(&bounds)
                .filter(|d| d.is_finite())
                .map(|distance| PickHit {
                    joint_index: h.joint_index(),
                    distance,
                })
        })
        .collect();

    hits.sort_by(|a, b| {
        a.distance
            .total_cmp(&b.distance)
            .then(a.joint_index.cmp(&b.joint_index))
    });

    let nearest = hits.first().copied();
    log::trace!("pick {:?} -> {:?}", ray, nearest);
    nearest
}
