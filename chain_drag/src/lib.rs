//! Core library for bending an articulated chain by dragging joint handles.
//!
//! A [`ChainModel`] stores parent-relative joint offsets, a [`HandleSet`]
//! gives every joint a pickable proxy, and one [`DragSession`] per input
//! source turns picks and drag targets into offset updates. [`Scene`] ties
//! these together behind a per-frame event queue.

pub mod chain;
pub mod config;
pub mod drag;
pub mod error;
pub mod geometry;
pub mod handle;
pub mod pick;
pub mod pointer;
pub mod propagate;
pub mod ray;
pub mod scene;
pub mod skin;

pub use chain::{ChainModel, Joint};
pub use config::{load_config, ChainConfig};
pub use drag::{DragSession, DragState, SourceId};
pub use error::{ChainError, Result};
pub use geometry::{Aabb, Point3};
pub use handle::{Handle, HandleSet, VisualState};
pub use pick::PickHit;
pub use propagate::{propagate, Propagation};
pub use ray::Ray;
pub use scene::{InputEvent, Scene, SceneSnapshot, Script};
