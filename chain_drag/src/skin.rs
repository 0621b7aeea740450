//! Skinned box mesh bound to the chain.
//!
//! Every vertex is bound to the two joints bracketing its height. Joints
//! only ever translate, so linear blend skinning reduces to adding the
//! weighted joint displacements to each rest vertex.

use serde::Serialize;

use crate::chain::ChainModel;
use crate::error::{ChainError, Result};
use crate::geometry::Point3;

/// Two-joint skin binding of one vertex.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SkinWeight {
    pub joints: [usize; 2],
    pub weights: [f64; 2],
}

/// Binding for a vertex `height` above the bottom of the mesh.
///
/// The lower joint is `floor(height / segment_length)`, clamped to the chain;
/// the weight moves linearly to the upper joint across the segment.
pub fn skin_weight(height: f64, segment_length: f64, segment_count: usize) -> SkinWeight {
    let height = height.max(0.0);
    let segment = (height / segment_length).floor() as usize;
    if segment >= segment_count {
        return SkinWeight {
            joints: [segment_count, segment_count],
            weights: [1.0, 0.0],
        };
    }
    let f = (height % segment_length) / segment_length;
    SkinWeight {
        joints: [segment, segment + 1],
        weights: [1.0 - f, f],
    }
}

/// Box-shaped mesh wrapped around the chain in its rest pose.
#[derive(Debug, Clone, PartialEq)]
pub struct SkinnedBox {
    rest_vertices: Vec<Point3>,
    bindings: Vec<SkinWeight>,
    rest_joints: Vec<Point3>,
}

impl SkinnedBox {
    /// Builds rings of four corners from the bottom to the top of the chain,
    /// with `rings_per_segment` rings per segment (at least one).
    pub fn new(chain: &ChainModel, width: f64, depth: f64, rings_per_segment: usize) -> Self {
        let rings_per_segment = rings_per_segment.max(1);
        let segment_length = chain.segment_length();
        let segment_count = chain.segment_count();
        let half_height = segment_length * segment_count as f64 * 0.5;
        let step = segment_length / rings_per_segment as f64;
        let (hw, hd) = (width * 0.5, depth * 0.5);
        let anchor = chain.anchor();

        let ring_count = segment_count * rings_per_segment + 1;
        let mut rest_vertices = Vec::with_capacity(ring_count * 4);
        let mut bindings = Vec::with_capacity(ring_count * 4);
        for ring in 0..ring_count {
            let height = step * ring as f64;
            let binding = skin_weight(height, segment_length, segment_count);
            for (x, z) in [(-hw, -hd), (hw, -hd), (hw, hd), (-hw, hd)] {
                rest_vertices.push(anchor + Point3::new(x, height - half_height, z));
                bindings.push(binding);
            }
        }

        Self {
            rest_vertices,
            bindings,
            rest_joints: chain.rest_positions(),
        }
    }

    pub fn rest_vertices(&self) -> &[Point3] {
        &self.rest_vertices
    }

    pub fn bindings(&self) -> &[SkinWeight] {
        &self.bindings
    }

    /// Vertex positions for the chain's current pose.
    pub fn deform(&self, chain: &ChainModel) -> Result<Vec<Point3>> {
        if chain.len() != self.rest_joints.len() {
            return Err(ChainError::JointCountMismatch {
                expected: self.rest_joints.len(),
                found: chain.len(),
            });
        }
        let displacement: Vec<Point3> = chain
            .absolute_positions()
            .into_iter()
            .zip(&self.rest_joints)
            .map(|(now, rest)| now - *rest)
            .collect();

        Ok(self
            .rest_vertices
            .iter()
            .zip(&self.bindings)
            .map(|(v, b)| {
                *v + displacement[b.joints[0]] * b.weights[0]
                    + displacement[b.joints[1]] * b.weights[1]
            })
            .collect())
    }
}
