use rand::Rng;

pub type Vector2 = nalgebra::Vector2<f64>;

/// Axis-aligned rectangle anchored at its top-left corner (y grows downwards).
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn from_min_max(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            left: min_x,
            top: min_y,
            width: max_x - min_x,
            height: max_y - min_y,
        }
    }

    // Zero-sized bounds centered on a point
    pub fn point(x: f64, y: f64) -> Self {
        Self::new(x, y, 0.0, 0.0)
    }

    pub fn set_min_max(&mut self, min_x: f64, min_y: f64, max_x: f64, max_y: f64) {
        *self = Self::from_min_max(min_x, min_y, max_x, max_y);
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn center(&self) -> Vector2 {
        Vector2::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Finite coordinates and non-negative extents.
    pub fn is_valid(&self) -> bool {
        self.left.is_finite()
            && self.top.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width >= 0.0
            && self.height >= 0.0
    }

    // Closed-interval test, touching edges count as overlapping
    pub fn overlaps(&self, other: &Bounds) -> bool {
        self.left <= other.right()
            && self.right() >= other.left
            && self.top <= other.bottom()
            && self.bottom() >= other.top
    }

    pub fn contains(&self, other: &Bounds) -> bool {
        self.left <= other.left
            && self.right() >= other.right()
            && self.top <= other.top
            && self.bottom() >= other.bottom()
    }

    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.left && x <= self.right() && y >= self.top && y <= self.bottom()
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.left += dx;
        self.top += dy;
    }

    pub fn expand_to_include(&mut self, other: &Bounds) {
        let left = f64::min(self.left, other.left);
        let top = f64::min(self.top, other.top);
        let right = f64::max(self.right(), other.right());
        let bottom = f64::max(self.bottom(), other.bottom());
        self.set_min_max(left, top, right, bottom);
    }

    /// Bounds of a point cloud. Returns the default (empty) bounds for no points.
    pub fn from_points<'a, I>(points: I) -> Self
    where
        I: IntoIterator<Item = &'a Vector2>,
    {
        let mut iter = points.into_iter();
        let Some(first) = iter.next() else {
            return Self::default();
        };
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in iter {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Self::from_min_max(min_x, min_y, max_x, max_y)
    }

    pub fn random_point_inside<R: Rng>(&self, margin: f64, rng: &mut R) -> (f64, f64) {
        (
            safe_range(rng, self.left + margin, self.right() - margin),
            safe_range(rng, self.top + margin, self.bottom() - margin),
        )
    }
}

fn safe_range<R: Rng>(rng: &mut R, min: f64, max: f64) -> f64 {
    if min >= max {
        return min;
    }
    rng.gen_range(min..=max)
}
