use common::{Resettable, Vector2};

/// Result of one narrow-phase test.
///
/// A single instance is meant to be reused across many tests: call
/// [`Response::reset`] before each independent test. The SAT routines write
/// into it in place and assume they start from the reset state.
///
/// `overlap_vector` points from A towards B. Subtracting it from A's
/// position (or adding it to B's) separates the two shapes along the
/// shortest path.
#[derive(Debug, Clone, PartialEq)]
pub struct Response<Id> {
    pub shape_a: Option<Id>,
    pub shape_b: Option<Id>,
    /// Penetration depth; `f64::INFINITY` until a test records a collision.
    pub overlap: f64,
    /// Unit axis of minimum penetration.
    pub overlap_axis: Vector2,
    pub overlap_vector: Vector2,
    pub a_in_b: bool,
    pub b_in_a: bool,
    /// Index into A's shape list, -1 when unset.
    pub shape_index_a: i32,
    pub shape_index_b: i32,
}

impl<Id> Response<Id> {
    pub fn new() -> Self {
        Response {
            shape_a: None,
            shape_b: None,
            overlap: f64::INFINITY,
            overlap_axis: Vector2::zeros(),
            overlap_vector: Vector2::zeros(),
            a_in_b: true,
            b_in_a: true,
            shape_index_a: -1,
            shape_index_b: -1,
        }
    }

    pub fn reset(&mut self) -> &mut Self {
        self.shape_a = None;
        self.shape_b = None;
        self.overlap = f64::INFINITY;
        self.overlap_axis = Vector2::zeros();
        self.overlap_vector = Vector2::zeros();
        self.a_in_b = true;
        self.b_in_a = true;
        self.shape_index_a = -1;
        self.shape_index_b = -1;
        self
    }

    /// Whether a test recorded an overlap since the last reset.
    pub fn is_colliding(&self) -> bool {
        self.overlap.is_finite()
    }
}

impl<Id> Default for Response<Id> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Id> Resettable for Response<Id> {
    fn reset(&mut self) {
        Response::reset(self);
    }
}
