//! Chain creation parameters, loaded from JSON or built in code.

use serde::{Deserialize, Serialize};

use crate::error::{ChainError, Result};
use crate::geometry::Point3;

/// Parameters supplied once when a chain session starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    /// Number of segments; the chain has one more joint than this.
    pub segment_count: usize,
    /// Rest length of every segment.
    pub segment_length: f64,
    /// World-space placement of the chain, the point the root is offset from.
    pub anchor: Point3,
    /// Full dimensions of the box used to pick each handle.
    pub handle_size: Point3,
}

impl ChainConfig {
    pub const DEFAULT_SEGMENT_COUNT: usize = 4;
    pub const DEFAULT_SEGMENT_LENGTH: f64 = 5.0;

    /// Creates a configuration with the default handle size.
    pub fn new(segment_count: usize, segment_length: f64, anchor: Point3) -> Self {
        Self {
            segment_count,
            segment_length,
            anchor,
            ..Self::default()
        }
    }

    /// Total rest height of the straight chain.
    pub fn total_height(&self) -> f64 {
        self.segment_length * self.segment_count as f64
    }

    /// Rejects topologies the core cannot represent.
    pub fn validate(&self) -> Result<()> {
        if self.segment_count == 0 {
            return Err(ChainError::InvalidSegmentCount(self.segment_count));
        }
        if !(self.segment_length.is_finite() && self.segment_length > 0.0) {
            return Err(ChainError::InvalidSegmentLength(self.segment_length));
        }
        let s = self.handle_size;
        if !(s.is_finite() && s.x > 0.0 && s.y > 0.0 && s.z > 0.0) {
            return Err(ChainError::InvalidHandleSize);
        }
        Ok(())
    }
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            segment_count: Self::DEFAULT_SEGMENT_COUNT,
            segment_length: Self::DEFAULT_SEGMENT_LENGTH,
            anchor: Point3::new(0.0, 0.0, -30.0),
            handle_size: Point3::new(7.0, 2.0, 7.0),
        }
    }
}

/// Reads and validates a JSON configuration file.
pub fn load_config(path: &str) -> Result<ChainConfig> {
    let contents = std::fs::read_to_string(path)?;
    let config: ChainConfig = serde_json::from_str(&contents)?;
    config.validate()?;
    log::debug!(
        "loaded chain config from {}: {} segments of {}",
        path,
        config.segment_count,
        config.segment_length
    );
    Ok(config)
}
