pub mod bounds;
pub mod entity;
pub mod object_pool;

pub use bounds::{Bounds, Vector2};
pub use entity::{Collidable, SceneNode, ViewTransform, Viewport};
pub use object_pool::{ObjectPool, Resettable};
