use crate::error::{QuadtreeError, QuadtreeResult};
use common::{Bounds, Collidable, ViewTransform, Viewport};

use std::fmt::Debug;
use tracing::trace;

mod classify;
mod config;
mod insert;
mod maintenance;
mod remove;
mod retrieve;
mod types;

pub use classify::Quadrant;
pub use config::{Config, MAX_DEPTH_LIMIT};
pub use types::Item;

use types::{Node, NodeId, ROOT};

/// Region quadtree used as the collision broad phase.
///
/// Nodes live in an arena owned by the index. Splitting takes nodes from the
/// free list (or grows the arena) and clearing / pruning hands them back, so a
/// world that rebuilds the tree every step stops allocating once it has
/// reached its working size.
///
/// Items are `(id, bounds)` snapshots. The bounds are recorded in the index
/// frame: floating entities are projected through the viewport first.
pub struct SpatialIndex<Id, V = ViewTransform> {
    nodes: Vec<Node<Id>>,
    free_nodes: Vec<NodeId>,
    config: Config,
    viewport: V,
    len: usize,
}

impl<Id, V> SpatialIndex<Id, V>
where
    Id: Copy + Eq + Debug,
    V: Viewport + Default,
{
    pub fn new(region: Bounds) -> QuadtreeResult<Self> {
        Self::new_with_config(region, Config::default())
    }

    pub fn new_with_config(region: Bounds, config: Config) -> QuadtreeResult<Self> {
        Self::with_viewport(region, config, V::default())
    }
}

impl<Id, V> SpatialIndex<Id, V>
where
    Id: Copy + Eq + Debug,
    V: Viewport,
{
    pub fn with_viewport(region: Bounds, config: Config, viewport: V) -> QuadtreeResult<Self> {
        config.validate()?;
        validate_region(&region)?;
        let mut nodes = Vec::with_capacity(config.pool_size.max(1));
        nodes.push(Node::new(region, 0));
        Ok(SpatialIndex {
            nodes,
            free_nodes: Vec::new(),
            config,
            viewport,
            len: 0,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn region(&self) -> Bounds {
        self.nodes[ROOT].region
    }

    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    /// Replace the view transform used for floating entities. Items already
    /// stored keep the bounds they were inserted with.
    pub fn set_viewport(&mut self, viewport: V) {
        self.viewport = viewport;
    }

    /// Number of stored items.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bounds of `entity` in the index frame (floating entities projected
    /// through the viewport), or `None` when it cannot be indexed.
    pub fn index_bounds<E>(&self, entity: &E) -> Option<Bounds>
    where
        E: Collidable<Id = Id> + ?Sized,
    {
        let Some(bounds) = entity.bounds().filter(Bounds::is_valid) else {
            trace!(id = ?entity.id(), "entity has no usable bounds, skipping");
            return None;
        };
        if !entity.is_floating() {
            return Some(bounds);
        }
        let pos = self.viewport.local_to_world(bounds.left, bounds.top);
        Some(Bounds::new(pos.x, pos.y, bounds.width, bounds.height))
    }
}

pub(crate) fn validate_region(region: &Bounds) -> QuadtreeResult<()> {
    if region.is_valid() {
        return Ok(());
    }
    Err(QuadtreeError::InvalidRegion {
        left: region.left,
        top: region.top,
        width: region.width,
        height: region.height,
    })
}
