/// Collision type bits. A body carries one (or several) of these as its
/// type and a mask of the types it accepts.
pub mod types {
    pub const NO_OBJECT: u32 = 0;
    pub const PLAYER_OBJECT: u32 = 1 << 0;
    pub const NPC_OBJECT: u32 = 1 << 1;
    pub const ENEMY_OBJECT: u32 = 1 << 2;
    pub const COLLECTABLE_OBJECT: u32 = 1 << 3;
    pub const ACTION_OBJECT: u32 = 1 << 4;
    pub const PROJECTILE_OBJECT: u32 = 1 << 5;
    pub const WORLD_SHAPE: u32 = 1 << 6;
    /// First bit free for game specific types.
    pub const USER: u32 = 1 << 7;
    pub const ALL_OBJECT: u32 = 0xffff_ffff;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CollisionFilter {
    pub collision_type: u32,
    pub collision_mask: u32,
}

impl CollisionFilter {
    pub fn new(collision_type: u32, collision_mask: u32) -> Self {
        Self {
            collision_type,
            collision_mask,
        }
    }

    /// Never collides with anything.
    pub fn none() -> Self {
        Self::new(types::NO_OBJECT, types::NO_OBJECT)
    }

    /// Both sides have to accept the other's type.
    pub fn should_collide(&self, other: &CollisionFilter) -> bool {
        self.collision_mask & other.collision_type != 0
            && self.collision_type & other.collision_mask != 0
    }
}

impl Default for CollisionFilter {
    fn default() -> Self {
        Self::new(types::ENEMY_OBJECT, types::ALL_OBJECT)
    }
}
