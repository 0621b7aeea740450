//! Per-source pick/hold/release state machine.
//!
//! Each input source (a controller, a mouse pointer) owns one
//! [`DragSession`]. A session is either idle or holding exactly one handle,
//! and a handle is held by at most one session; [`HandleSet::try_hold`]
//! enforces the latter.

use serde::{Deserialize, Serialize};

use crate::chain::ChainModel;
use crate::error::Result;
use crate::geometry::Point3;
use crate::handle::HandleSet;
use crate::pick::{self, PickHit};
use crate::propagate::{propagate, Propagation};
use crate::ray::Ray;

/// Identifier of an input source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceId(pub u32);

impl std::fmt::Display for SourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "source {}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragState {
    Idle,
    Holding { joint_index: usize },
}

/// Interaction state of one input source.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    source: SourceId,
    state: DragState,
}

impl DragSession {
    pub fn new(source: SourceId) -> Self {
        Self {
            source,
            state: DragState::Idle,
        }
    }

    pub fn source(&self) -> SourceId {
        self.source
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn held_joint(&self) -> Option<usize> {
        match self.state {
            DragState::Idle => None,
            DragState::Holding { joint_index } => Some(joint_index),
        }
    }

    pub fn is_holding(&self) -> bool {
        self.held_joint().is_some()
    }

    /// Picks under `ray` and starts holding the hit handle.
    ///
    /// Returns `None` and stays idle on a miss, when the handle is already
    /// held by another source, or when this session is already holding.
    pub fn begin_drag(&mut self, ray: &Ray, handles: &mut HandleSet) -> Option<PickHit> {
        if let Some(held) = self.held_joint() {
            log::warn!("{} already holds joint {}, ignoring begin", self.source, held);
            return None;
        }
        let Some(hit) = pick::resolve(ray, handles) else {
            log::debug!("{} begin drag: nothing under ray", self.source);
            return None;
        };
        match self.hold(hit.joint_index, handles) {
            Ok(true) => Some(hit),
            _ => None,
        }
    }

    /// Starts holding the handle of `joint_index` directly, without picking.
    pub fn hold(&mut self, joint_index: usize, handles: &mut HandleSet) -> Result<bool> {
        if self.is_holding() {
            return Ok(false);
        }
        if !handles.try_hold(joint_index, self.source)? {
            log::warn!(
                "{} cannot hold joint {}: held by another source",
                self.source,
                joint_index
            );
            return Ok(false);
        }
        log::debug!("{} holding joint {}", self.source, joint_index);
        self.state = DragState::Holding { joint_index };
        Ok(true)
    }

    /// Moves the held joint to `target` and carries the downstream chain along.
    ///
    /// The joint's new offset is `target` minus its parent's position, so the
    /// joint lands exactly on the target while every upstream joint stays put.
    /// Idle sessions do nothing.
    pub fn update_drag(
        &mut self,
        target: Point3,
        chain: &mut ChainModel,
        handles: &mut HandleSet,
    ) -> Result<Option<Propagation>> {
        let Some(joint_index) = self.held_joint() else {
            return Ok(None);
        };
        if !self.sync_with(chain, handles) {
            return Ok(None);
        }
        let offset = target - chain.parent_position(joint_index)?;
        chain.set_local_offset(joint_index, offset)?;
        let propagation = propagate(chain, handles, joint_index)?;
        log::trace!("{} dragged joint {} to {}", self.source, joint_index, target);
        Ok(Some(propagation))
    }

    /// Releases the held handle. A no-op on an idle session.
    pub fn end_drag(&mut self, handles: &mut HandleSet) -> Option<usize> {
        let joint_index = self.held_joint()?;
        self.state = DragState::Idle;
        if joint_index < handles.len() {
            let _ = handles.release(joint_index, self.source);
        }
        log::debug!("{} released joint {}", self.source, joint_index);
        Some(joint_index)
    }

    /// Drops back to idle if the held handle or its joint no longer exists,
    /// or no longer records this source as its holder. Returns whether the
    /// session is still validly holding.
    pub fn sync_with(&mut self, chain: &ChainModel, handles: &HandleSet) -> bool {
        let Some(joint_index) = self.held_joint() else {
            return false;
        };
        let backed = joint_index < chain.len()
            && handles
                .get(joint_index)
                .map(|h| h.selected_by() == Some(self.source))
                .unwrap_or(false);
        if !backed {
            log::warn!(
                "{} lost joint {}, forcing release",
                self.source,
                joint_index
            );
            self.state = DragState::Idle;
        }
        backed
    }
}
