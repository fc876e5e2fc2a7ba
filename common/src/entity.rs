use crate::bounds::{Bounds, Vector2};
use std::fmt::Debug;
use std::hash::Hash;

/// Anything the broad phase can bucket.
///
/// The index only keeps the `Id` handle and a bounds snapshot; the entity
/// itself stays owned by the world.
pub trait Collidable {
    type Id: Copy + Eq + Hash + Debug;

    fn id(&self) -> Self::Id;

    /// Current bounds, or `None` for objects that cannot be indexed.
    fn bounds(&self) -> Option<Bounds>;

    /// Positioned in view space rather than world space.
    fn is_floating(&self) -> bool {
        false
    }

    /// Excluded from spatial bucketing altogether.
    fn is_kinematic(&self) -> bool {
        false
    }
}

impl<T: Collidable + ?Sized> Collidable for &T {
    type Id = T::Id;

    fn id(&self) -> Self::Id {
        (**self).id()
    }

    fn bounds(&self) -> Option<Bounds> {
        (**self).bounds()
    }

    fn is_floating(&self) -> bool {
        (**self).is_floating()
    }

    fn is_kinematic(&self) -> bool {
        (**self).is_kinematic()
    }
}

/// Maps view-local coordinates into the world frame.
pub trait Viewport {
    fn local_to_world(&self, x: f64, y: f64) -> Vector2;
}

/// Camera transform: `world = offset + local / zoom`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    pub offset: Vector2,
    pub zoom: f64,
}

impl ViewTransform {
    pub fn new(offset_x: f64, offset_y: f64) -> Self {
        Self {
            offset: Vector2::new(offset_x, offset_y),
            zoom: 1.0,
        }
    }

    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.zoom = zoom;
        self
    }
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl Viewport for ViewTransform {
    fn local_to_world(&self, x: f64, y: f64) -> Vector2 {
        // A zero or non-finite zoom would poison every floating bound
        let zoom = if self.zoom.is_normal() { self.zoom } else { 1.0 };
        self.offset + Vector2::new(x, y) / zoom
    }
}

/// Scene graph handed to bulk insertion.
#[derive(Debug, Clone)]
pub enum SceneNode<E> {
    Leaf(E),
    Container {
        /// Set when the container itself has collidable bounds.
        entity: Option<E>,
        kinematic: bool,
        children: Vec<SceneNode<E>>,
    },
}

impl<E> SceneNode<E> {
    pub fn container(children: Vec<SceneNode<E>>) -> Self {
        SceneNode::Container {
            entity: None,
            kinematic: false,
            children,
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self, SceneNode::Container { .. })
    }
}
