//! Keeps handles consistent after a single joint's offset changes.
//!
//! Joint positions are a prefix sum of offsets, so changing joint `i`
//! rigidly translates every joint after it without changing their offsets.
//! Propagation only has to bring the cached handle positions from `i` onward
//! up to date; handles closer to the root are never touched.

use serde::Serialize;

use crate::chain::ChainModel;
use crate::error::Result;
use crate::geometry::Point3;
use crate::handle::HandleSet;

/// Outcome of a propagation pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Propagation {
    pub from_index: usize,
    /// How far the edited joint, and with it the whole downstream sub-chain, moved.
    pub delta: Point3,
    /// Number of joints after `from_index` that were carried along.
    pub downstream: usize,
}

/// Recomputes handle positions for `from_index` and every joint after it.
pub fn propagate(chain: &ChainModel, handles: &mut HandleSet, from_index: usize) -> Result<Propagation> {
    let before = handles.get(from_index)?.world_position();
    handles.refresh_from(chain, from_index)?;
    let after = handles.get(from_index)?.world_position();

    let propagation = Propagation {
        from_index,
        delta: after - before,
        downstream: handles.len() - from_index - 1,
    };
    log::trace!(
        "propagated joint {} by {} across {} downstream joints",
        from_index,
        propagation.delta,
        propagation.downstream
    );
    Ok(propagation)
}
