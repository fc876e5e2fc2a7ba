use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QuadtreeError {
    InvalidNodeCapacity {
        capacity: usize,
    },
    MaxDepthTooLarge {
        max_depth: u32,
        limit: u32,
    },
    InvalidRegion {
        left: f64,
        top: f64,
        width: f64,
        height: f64,
    },
}

pub type QuadtreeResult<T> = Result<T, QuadtreeError>;

impl fmt::Display for QuadtreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuadtreeError::InvalidNodeCapacity { capacity } => {
                write!(
                    f,
                    "node capacity must be at least 1 (capacity: {})",
                    capacity
                )
            }
            QuadtreeError::MaxDepthTooLarge { max_depth, limit } => {
                write!(
                    f,
                    "max depth must not exceed {} (max_depth: {})",
                    limit, max_depth
                )
            }
            QuadtreeError::InvalidRegion {
                left,
                top,
                width,
                height,
            } => {
                write!(
                    f,
                    "region must be finite with non-negative width/height (left: {}, top: {}, width: {}, height: {})",
                    left, top, width, height
                )
            }
        }
    }
}

impl std::error::Error for QuadtreeError {}
