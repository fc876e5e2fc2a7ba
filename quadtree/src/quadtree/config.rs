use crate::error::{QuadtreeError, QuadtreeResult};

// Deeper trees halve the region past any useful f64 precision.
pub const MAX_DEPTH_LIMIT: u32 = 32;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Arena slots reserved up front.
    pub pool_size: usize,
    /// Items a node holds before it splits.
    pub node_capacity: usize,
    pub max_depth: u32,
}

impl Config {
    /// Broad-phase defaults used by a physics world: 8 items per node, 4 levels.
    pub fn world() -> Self {
        Config {
            node_capacity: 8,
            ..Config::default()
        }
    }

    pub fn validate(&self) -> QuadtreeResult<()> {
        if self.node_capacity == 0 {
            return Err(QuadtreeError::InvalidNodeCapacity {
                capacity: self.node_capacity,
            });
        }
        if self.max_depth > MAX_DEPTH_LIMIT {
            return Err(QuadtreeError::MaxDepthTooLarge {
                max_depth: self.max_depth,
                limit: MAX_DEPTH_LIMIT,
            });
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            pool_size: 64,
            node_capacity: 4,
            max_depth: 4,
        }
    }
}
