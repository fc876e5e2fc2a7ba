use super::*;

/// Child slot of a split node.
///
/// The numbering matches the order children are stored in; callers should
/// only depend on it through `SpatialIndex` paths, not as external indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Quadrant {
    TopRight = 0,
    TopLeft = 1,
    BottomLeft = 2,
    BottomRight = 3,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::TopRight,
        Quadrant::TopLeft,
        Quadrant::BottomLeft,
        Quadrant::BottomRight,
    ];

    #[inline(always)]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The quadrant of `region` that holds `bounds` entirely, strictly on one
    /// side of both midlines. Anything touching or crossing a midline stays
    /// with the parent.
    pub fn classify(region: &Bounds, bounds: &Bounds) -> Option<Quadrant> {
        let mid_x = region.left + region.width / 2.0;
        let mid_y = region.top + region.height / 2.0;

        let top = bounds.top < mid_y && bounds.bottom() < mid_y;
        let bottom = bounds.top > mid_y;

        if bounds.left < mid_x && bounds.right() < mid_x {
            if top {
                return Some(Quadrant::TopLeft);
            }
            if bottom {
                return Some(Quadrant::BottomLeft);
            }
        } else if bounds.left > mid_x {
            if top {
                return Some(Quadrant::TopRight);
            }
            if bottom {
                return Some(Quadrant::BottomRight);
            }
        }
        None
    }

    /// The sub-region this quadrant covers after `parent` is split.
    pub fn region_of(self, parent: &Bounds) -> Bounds {
        let half_width = parent.width / 2.0;
        let half_height = parent.height / 2.0;
        let mid_x = parent.left + half_width;
        let mid_y = parent.top + half_height;
        match self {
            Quadrant::TopRight => Bounds::new(mid_x, parent.top, half_width, half_height),
            Quadrant::TopLeft => Bounds::new(parent.left, parent.top, half_width, half_height),
            Quadrant::BottomLeft => Bounds::new(parent.left, mid_y, half_width, half_height),
            Quadrant::BottomRight => Bounds::new(mid_x, mid_y, half_width, half_height),
        }
    }
}

impl<Id, V> SpatialIndex<Id, V>
where
    Id: Copy + Eq + Debug,
    V: Viewport,
{
    /// Root-level quadrant `entity` falls into, `None` if it straddles a
    /// midline or has no usable bounds.
    pub fn classify<E>(&self, entity: &E) -> Option<Quadrant>
    where
        E: Collidable<Id = Id> + ?Sized,
    {
        let bounds = self.index_bounds(entity)?;
        Quadrant::classify(&self.nodes[ROOT].region, &bounds)
    }
}
