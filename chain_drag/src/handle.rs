//! Draggable proxies, one per joint.
//!
//! Handles cache the world position of the joint they stand for. The cache
//! is only valid after [`HandleSet::refresh`] (or a propagation) has run for
//! the latest chain mutation.

use serde::Serialize;

use crate::chain::ChainModel;
use crate::drag::SourceId;
use crate::error::{check_index, Result};
use crate::geometry::{Aabb, Point3};

/// Presentation state of a handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VisualState {
    Idle,
    Hovered,
    Held,
}

/// Typed proxy bound to a single joint.
#[derive(Debug, Clone, PartialEq)]
pub struct Handle {
    joint_index: usize,
    world_position: Point3,
    selected_by: Option<SourceId>,
    hovered: bool,
}

impl Handle {
    pub fn joint_index(&self) -> usize {
        self.joint_index
    }

    pub fn world_position(&self) -> Point3 {
        self.world_position
    }

    /// The input source currently holding this handle.
    pub fn selected_by(&self) -> Option<SourceId> {
        self.selected_by
    }

    /// Held wins over hovered; hover only lasts for the current frame.
    pub fn visual_state(&self) -> VisualState {
        if self.selected_by.is_some() {
            VisualState::Held
        } else if self.hovered {
            VisualState::Hovered
        } else {
            VisualState::Idle
        }
    }
}

/// All handles of a chain, indexed by joint.
#[derive(Debug, Clone, PartialEq)]
pub struct HandleSet {
    handles: Vec<Handle>,
    size: Point3,
}

impl HandleSet {
    /// Places one handle on every joint of `chain`.
    pub fn build(chain: &ChainModel, size: Point3) -> Self {
        let handles = chain
            .absolute_positions()
            .into_iter()
            .enumerate()
            .map(|(joint_index, world_position)| Handle {
                joint_index,
                world_position,
                selected_by: None,
                hovered: false,
            })
            .collect();
        Self { handles, size }
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Full dimensions of every handle's box.
    pub fn size(&self) -> Point3 {
        self.size
    }

    pub fn get(&self, index: usize) -> Result<&Handle> {
        check_index(index, self.handles.len())?;
        Ok(&self.handles[index])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Handle> {
        self.handles.iter()
    }

    /// Bounding volume used for picking.
    pub fn bounds(&self, index: usize) -> Result<Aabb> {
        Ok(Aabb::from_center_size(self.get(index)?.world_position, self.size))
    }

    /// Recomputes every cached position from the chain.
    pub fn refresh(&mut self, chain: &ChainModel) {
        for (handle, position) in self.handles.iter_mut().zip(chain.absolute_positions()) {
            handle.world_position = position;
        }
    }

    /// Recomputes cached positions for handles at `from` and beyond, leaving
    /// the ones closer to the root untouched.
    pub fn refresh_from(&mut self, chain: &ChainModel, from: usize) -> Result<()> {
        check_index(from, self.handles.len())?;
        let mut position = chain.absolute_position(from)?;
        for (offset, handle) in self.handles[from..].iter_mut().enumerate() {
            if offset > 0 {
                position += chain.local_offset(from + offset)?;
            }
            handle.world_position = position;
        }
        Ok(())
    }

    /// Records `source` as the holder. Refuses if another source holds it.
    pub fn try_hold(&mut self, index: usize, source: SourceId) -> Result<bool> {
        check_index(index, self.handles.len())?;
        let handle = &mut self.handles[index];
        match handle.selected_by {
            Some(holder) if holder != source => Ok(false),
            _ => {
                handle.selected_by = Some(source);
                Ok(true)
            }
        }
    }

    /// Clears the holder if it is `source`. Returns whether anything changed.
    pub fn release(&mut self, index: usize, source: SourceId) -> Result<bool> {
        check_index(index, self.handles.len())?;
        let handle = &mut self.handles[index];
        if handle.selected_by == Some(source) {
            handle.selected_by = None;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Index of the handle held by `source`, if any.
    pub fn held_by(&self, source: SourceId) -> Option<usize> {
        self.handles
            .iter()
            .position(|h| h.selected_by == Some(source))
    }

    pub fn set_hovered(&mut self, index: usize) -> Result<()> {
        check_index(index, self.handles.len())?;
        self.handles[index].hovered = true;
        Ok(())
    }

    /// Drops last frame's hover highlights.
    pub fn clear_hover(&mut self) {
        for handle in &mut self.handles {
            handle.hovered = false;
        }
    }
}
