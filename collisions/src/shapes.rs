use common::{Bounds, Vector2};
use smallvec::SmallVec;

// Squared length under which an edge counts as collapsed.
pub(crate) const EDGE_EPSILON: f64 = 1e-12;

pub(crate) type Points = SmallVec<[Vector2; 4]>;

/// Convex polygon, vertices relative to `pos`.
///
/// Vertices go clockwise on screen (y pointing down), which makes
/// `(edge.y, -edge.x)` the outward normal of every edge.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub pos: Vector2,
    points: Points,
    normals: Points,
}

impl Polygon {
    pub fn new<I>(x: f64, y: f64, points: I) -> Self
    where
        I: IntoIterator<Item = Vector2>,
    {
        let mut polygon = Polygon {
            pos: Vector2::new(x, y),
            points: SmallVec::new(),
            normals: SmallVec::new(),
        };
        polygon.set_points(points);
        polygon
    }

    /// Axis-aligned box covering `bounds`.
    pub fn from_bounds(bounds: &Bounds) -> Self {
        Self::new(
            bounds.left,
            bounds.top,
            [
                Vector2::new(0.0, 0.0),
                Vector2::new(bounds.width, 0.0),
                Vector2::new(bounds.width, bounds.height),
                Vector2::new(0.0, bounds.height),
            ],
        )
    }

    /// Two-point polygon, used for line segments and rays.
    pub fn segment(from: Vector2, to: Vector2) -> Self {
        Self::new(from.x, from.y, [Vector2::zeros(), to - from])
    }

    pub fn set_points<I>(&mut self, points: I)
    where
        I: IntoIterator<Item = Vector2>,
    {
        self.points.clear();
        self.points.extend(points);
        self.recalc();
    }

    // Edge normals, skipping collapsed edges
    fn recalc(&mut self) {
        self.normals.clear();
        let len = self.points.len();
        if len < 2 {
            return;
        }
        for i in 0..len {
            let edge = self.points[(i + 1) % len] - self.points[i];
            if edge.norm_squared() <= EDGE_EPSILON {
                continue;
            }
            self.normals.push(perp(&edge).normalize());
        }
    }

    pub fn points(&self) -> &[Vector2] {
        &self.points
    }

    /// Unit outward normals of the non-degenerate edges, in edge order.
    pub fn normals(&self) -> &[Vector2] {
        &self.normals
    }

    pub fn bounds(&self) -> Bounds {
        let mut bounds = Bounds::from_points(self.points.iter());
        bounds.translate(self.pos.x, self.pos.y);
        bounds
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.pos += Vector2::new(dx, dy);
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub pos: Vector2,
    pub radius: f64,
}

impl Circle {
    pub fn new(x: f64, y: f64, radius: f64) -> Self {
        Self {
            pos: Vector2::new(x, y),
            radius,
        }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(
            self.pos.x - self.radius,
            self.pos.y - self.radius,
            self.radius * 2.0,
            self.radius * 2.0,
        )
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.pos += Vector2::new(dx, dy);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Polygon(Polygon),
    Circle(Circle),
}

impl Shape {
    pub fn bounds(&self) -> Bounds {
        match self {
            Shape::Polygon(polygon) => polygon.bounds(),
            Shape::Circle(circle) => circle.bounds(),
        }
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        match self {
            Shape::Polygon(polygon) => polygon.translate(dx, dy),
            Shape::Circle(circle) => circle.translate(dx, dy),
        }
    }
}

impl From<Polygon> for Shape {
    fn from(polygon: Polygon) -> Self {
        Shape::Polygon(polygon)
    }
}

impl From<Circle> for Shape {
    fn from(circle: Circle) -> Self {
        Shape::Circle(circle)
    }
}

#[inline(always)]
pub(crate) fn perp(v: &Vector2) -> Vector2 {
    Vector2::new(v.y, -v.x)
}
