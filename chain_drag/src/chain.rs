//! Articulated chain stored as parent-relative joint offsets.
//!
//! A joint's world position is the anchor plus the sum of every offset from
//! the root up to and including that joint. Mutation touches a single joint;
//! bringing handles back in line is the job of [`crate::propagate`].

use serde::Serialize;

use crate::config::ChainConfig;
use crate::error::{check_index, Result};
use crate::geometry::Point3;

/// One link of the chain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Joint {
    index: usize,
    /// Position relative to the parent joint, or to the anchor for the root.
    pub local_offset: Point3,
}

impl Joint {
    pub fn index(&self) -> usize {
        self.index
    }
}

/// Ordered, unbranched sequence of joints from root to tip.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainModel {
    joints: Vec<Joint>,
    anchor: Point3,
    segment_length: f64,
}

impl ChainModel {
    /// Builds a straight chain of `segment_count + 1` joints centred on `anchor`.
    pub fn new(segment_count: usize, segment_length: f64, anchor: Point3) -> Result<Self> {
        Self::from_config(&ChainConfig::new(segment_count, segment_length, anchor))
    }

    pub fn from_config(config: &ChainConfig) -> Result<Self> {
        config.validate()?;
        let half_height = config.total_height() * 0.5;
        let mut joints = Vec::with_capacity(config.segment_count + 1);
        joints.push(Joint {
            index: 0,
            local_offset: Point3::new(0.0, -half_height, 0.0),
        });
        for index in 1..=config.segment_count {
            joints.push(Joint {
                index,
                local_offset: Point3::new(0.0, config.segment_length, 0.0),
            });
        }
        log::debug!(
            "created chain with {} joints at anchor {}",
            joints.len(),
            config.anchor
        );
        Ok(Self {
            joints,
            anchor: config.anchor,
            segment_length: config.segment_length,
        })
    }

    pub fn len(&self) -> usize {
        self.joints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }

    pub fn segment_count(&self) -> usize {
        self.joints.len().saturating_sub(1)
    }

    pub fn segment_length(&self) -> f64 {
        self.segment_length
    }

    pub fn anchor(&self) -> Point3 {
        self.anchor
    }

    /// Moves the whole chain by placing it at a new anchor.
    pub fn re_anchor(&mut self, anchor: Point3) {
        self.anchor = anchor;
    }

    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }

    pub fn joint(&self, index: usize) -> Result<&Joint> {
        check_index(index, self.joints.len())?;
        Ok(&self.joints[index])
    }

    pub fn local_offset(&self, index: usize) -> Result<Point3> {
        Ok(self.joint(index)?.local_offset)
    }

    /// Replaces the offset of joint `index` only. No other joint is touched.
    pub fn set_local_offset(&mut self, index: usize, offset: Point3) -> Result<()> {
        check_index(index, self.joints.len())?;
        self.joints[index].local_offset = offset;
        Ok(())
    }

    /// World position of joint `index`: anchor plus the prefix sum of offsets.
    pub fn absolute_position(&self, index: usize) -> Result<Point3> {
        check_index(index, self.joints.len())?;
        Ok(self.joints[..=index]
            .iter()
            .fold(self.anchor, |acc, j| acc + j.local_offset))
    }

    /// World position of the parent of joint `index`, the anchor for the root.
    pub fn parent_position(&self, index: usize) -> Result<Point3> {
        check_index(index, self.joints.len())?;
        if index == 0 {
            Ok(self.anchor)
        } else {
            self.absolute_position(index - 1)
        }
    }

    /// All joint world positions computed in a single pass.
    pub fn absolute_positions(&self) -> Vec<Point3> {
        let mut acc = self.anchor;
        self.joints
            .iter()
            .map(|j| {
                acc += j.local_offset;
                acc
            })
            .collect()
    }

    /// Joint world positions of the straight pose this chain was created in.
    pub fn rest_positions(&self) -> Vec<Point3> {
        let half_height = self.segment_length * self.segment_count() as f64 * 0.5;
        (0..self.joints.len())
            .map(|i| {
                self.anchor + Point3::new(0.0, self.segment_length * i as f64 - half_height, 0.0)
            })
            .collect()
    }
}
