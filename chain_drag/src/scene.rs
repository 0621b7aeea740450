//! Frame-driven front door: queues input events, drains them once per tick
//! and exposes what the renderer reads back.
//!
//! Events from all sources are drained in arrival order. Moves are coalesced
//! so a session applies at most one drag update per tick; a pending move is
//! flushed before a later begin or end from the same source, so
//! press-move-release inside one frame still lands. Hover highlighting runs
//! after every update, against fully propagated handles.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::chain::ChainModel;
use crate::config::ChainConfig;
use crate::drag::{DragSession, SourceId};
use crate::error::Result;
use crate::geometry::Point3;
use crate::handle::{HandleSet, VisualState};
use crate::pick::{self, PickHit};
use crate::propagate::Propagation;
use crate::ray::Ray;
use crate::skin::SkinnedBox;

/// Laser length shown when a pointer ray hits nothing.
pub const DEFAULT_LASER_LENGTH: f64 = 5.0;
/// Width and depth of the skinned box wrapped around the chain.
pub const MESH_WIDTH: f64 = 5.0;
pub const MESH_RINGS_PER_SEGMENT: usize = 4;

/// Input reported by a pointing device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    BeginDrag { ray: Ray },
    MoveDrag { target: Point3 },
    EndDrag,
    HoverRay { ray: Ray },
    /// The device stopped being tracked; any held handle is released.
    TrackingLost,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourcedEvent {
    pub source: SourceId,
    pub event: InputEvent,
}

/// Frames of events, each frame drained by one tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Script {
    pub frames: Vec<Vec<SourcedEvent>>,
}

/// Reads an event script from a JSON file.
pub fn load_script(path: &str) -> Result<Script> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PickRecord {
    pub source: SourceId,
    pub hit: PickHit,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReleaseRecord {
    pub source: SourceId,
    pub joint_index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DragRecord {
    pub source: SourceId,
    pub propagation: Propagation,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HoverRecord {
    pub source: SourceId,
    pub joint_index: Option<usize>,
    pub laser_length: f64,
}

/// What happened during one tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FrameReport {
    pub frame: u64,
    pub picks: Vec<PickRecord>,
    pub drags: Vec<DragRecord>,
    pub releases: Vec<ReleaseRecord>,
    pub hovers: Vec<HoverRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct JointSnapshot {
    pub index: usize,
    pub local_offset: Point3,
    pub absolute_position: Point3,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HandleSnapshot {
    pub joint_index: usize,
    pub world_position: Point3,
    pub visual_state: VisualState,
    pub selected_by: Option<SourceId>,
}

/// State read by the render collaborator after a tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneSnapshot {
    pub frame: u64,
    pub anchor: Point3,
    pub joints: Vec<JointSnapshot>,
    pub handles: Vec<HandleSnapshot>,
}

/// One chain, its handles and a drag session per active input source.
#[derive(Debug)]
pub struct Scene {
    chain: ChainModel,
    handles: HandleSet,
    mesh: SkinnedBox,
    sessions: BTreeMap<SourceId, DragSession>,
    hover_rays: BTreeMap<SourceId, Ray>,
    queue: VecDeque<SourcedEvent>,
    frame: u64,
}

impl Scene {
    pub fn new(config: &ChainConfig) -> Result<Self> {
        let chain = ChainModel::from_config(config)?;
        let handles = HandleSet::build(&chain, config.handle_size);
        let mesh = SkinnedBox::new(&chain, MESH_WIDTH, MESH_WIDTH, MESH_RINGS_PER_SEGMENT);
        Ok(Self {
            chain,
            handles,
            mesh,
            sessions: BTreeMap::new(),
            hover_rays: BTreeMap::new(),
            queue: VecDeque::new(),
            frame: 0,
        })
    }

    pub fn chain(&self) -> &ChainModel {
        &self.chain
    }

    pub fn handles(&self) -> &HandleSet {
        &self.handles
    }

    /// The live session of `source`. Sessions exist only while holding a handle.
    pub fn session(&self, source: SourceId) -> Option<&DragSession> {
        self.sessions.get(&source)
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Queues an event for the next tick.
    pub fn push(&mut self, source: SourceId, event: InputEvent) {
        self.queue.push_back(SourcedEvent { source, event });
    }

    /// Drains queued input, applies drags and recomputes hover highlights.
    pub fn tick(&mut self) -> Result<FrameReport> {
        self.frame += 1;
        let mut report = FrameReport {
            frame: self.frame,
            ..FrameReport::default()
        };
        let mut pending: BTreeMap<SourceId, Point3> = BTreeMap::new();
        let mut updated: BTreeSet<SourceId> = BTreeSet::new();

        while let Some(SourcedEvent { source, event }) = self.queue.pop_front() {
            match event {
                InputEvent::MoveDrag { target } => {
                    pending.insert(source, target);
                }
                InputEvent::HoverRay { ray } => {
                    self.hover_rays.insert(source, ray);
                }
                InputEvent::BeginDrag { ray } => {
                    if let Some(target) = pending.remove(&source) {
                        self.apply_move(source, target, &mut updated, &mut report)?;
                    }
                    let mut session = self
                        .sessions
                        .remove(&source)
                        .unwrap_or_else(|| DragSession::new(source));
                    if let Some(hit) = session.begin_drag(&ray, &mut self.handles) {
                        report.picks.push(PickRecord { source, hit });
                    }
                    if session.is_holding() {
                        self.sessions.insert(source, session);
                    }
                }
                InputEvent::EndDrag => {
                    if let Some(target) = pending.remove(&source) {
                        self.apply_move(source, target, &mut updated, &mut report)?;
                    }
                    self.release(source, &mut report);
                }
                InputEvent::TrackingLost => {
                    pending.remove(&source);
                    self.release(source, &mut report);
                    self.hover_rays.remove(&source);
                    log::debug!("{} lost tracking", source);
                }
            }
        }

        for (source, target) in pending {
            self.apply_move(source, target, &mut updated, &mut report)?;
        }

        self.hover_pass(&mut report);
        Ok(report)
    }

    /// Feeds every frame of `script` through the queue, one tick per frame.
    pub fn run_script(&mut self, script: &Script) -> Result<Vec<FrameReport>> {
        let mut reports = Vec::with_capacity(script.frames.len());
        for frame in &script.frames {
            for e in frame {
                self.push(e.source, e.event.clone());
            }
            reports.push(self.tick()?);
        }
        Ok(reports)
    }

    /// Joint offsets and handle state for the renderer.
    pub fn snapshot(&self) -> SceneSnapshot {
        let joints = self
            .chain
            .joints()
            .iter()
            .zip(self.chain.absolute_positions())
            .map(|(j, absolute_position)| JointSnapshot {
                index: j.index(),
                local_offset: j.local_offset,
                absolute_position,
            })
            .collect();
        let handles = self
            .handles
            .iter()
            .map(|h| HandleSnapshot {
                joint_index: h.joint_index(),
                world_position: h.world_position(),
                visual_state: h.visual_state(),
                selected_by: h.selected_by(),
            })
            .collect();
        SceneSnapshot {
            frame: self.frame,
            anchor: self.chain.anchor(),
            joints,
            handles,
        }
    }

    /// Skinned mesh vertices for the current pose.
    pub fn mesh_vertices(&self) -> Result<Vec<Point3>> {
        self.mesh.deform(&self.chain)
    }

    fn apply_move(
        &mut self,
        source: SourceId,
        target: Point3,
        updated: &mut BTreeSet<SourceId>,
        report: &mut FrameReport,
    ) -> Result<()> {
        let Some(session) = self.sessions.get_mut(&source) else {
            return Ok(());
        };
        if !updated.insert(source) {
            log::trace!("{} already dragged this frame, dropping move", source);
            return Ok(());
        }
        let outcome = session.update_drag(target, &mut self.chain, &mut self.handles)?;
        if !session.is_holding() {
            self.sessions.remove(&source);
        }
        if let Some(propagation) = outcome {
            report.drags.push(DragRecord {
                source,
                propagation,
            });
        }
        Ok(())
    }

    fn release(&mut self, source: SourceId, report: &mut FrameReport) {
        if let Some(mut session) = self.sessions.remove(&source) {
            if let Some(joint_index) = session.end_drag(&mut self.handles) {
                report.releases.push(ReleaseRecord {
                    source,
                    joint_index,
                });
            }
        }
    }

    fn hover_pass(&mut self, report: &mut FrameReport) {
        self.handles.clear_hover();
        let rays = std::mem::take(&mut self.hover_rays);
        for (source, ray) in rays {
            let holding = self
                .sessions
                .get(&source)
                .is_some_and(|s| s.is_holding());
            if holding {
                continue;
            }
            let hit = pick::resolve(&ray, &self.handles);
            if let Some(hit) = hit {
                let _ = self.handles.set_hovered(hit.joint_index);
            }
            report.hovers.push(HoverRecord {
                source,
                joint_index: hit.map(|h| h.joint_index),
                laser_length: hit.map_or(DEFAULT_LASER_LENGTH, |h| h.distance),
            });
        }
    }
}
