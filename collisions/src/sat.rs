//! Separating Axis Theorem tests between convex polygons and circles.
//!
//! Every test takes a freshly reset [`Response`] and returns whether the
//! shapes overlap. On overlap the response holds the minimum translation
//! (`overlap`, `overlap_axis`, `overlap_vector`) and the containment flags.
//! On a miss `overlap` keeps its sentinel value and both containment flags
//! are cleared.
//!
//! Candidate axes are tested in edge order, A's edges before B's. When two
//! axes give the same overlap the first one wins, so the reported axis only
//! depends on vertex order.

use crate::response::Response;
use crate::shapes::{perp, Circle, Polygon, Shape, EDGE_EPSILON};
use common::Vector2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VoronoiRegion {
    Left,
    Middle,
    Right,
}

pub fn test_shapes<Id>(a: &Shape, b: &Shape, response: &mut Response<Id>) -> bool {
    match (a, b) {
        (Shape::Polygon(a), Shape::Polygon(b)) => test_polygon_polygon(a, b, response),
        (Shape::Polygon(a), Shape::Circle(b)) => test_polygon_circle(a, b, response),
        (Shape::Circle(a), Shape::Polygon(b)) => test_circle_polygon(a, b, response),
        (Shape::Circle(a), Shape::Circle(b)) => test_circle_circle(a, b, response),
    }
}

pub fn test_polygon_polygon<Id>(a: &Polygon, b: &Polygon, response: &mut Response<Id>) -> bool {
    let offset = b.pos - a.pos;
    let mut contact = Contact::new();
    let mut tested = false;
    for axis in a.normals().iter().chain(b.normals()) {
        tested = true;
        if is_separating_axis(&offset, a.points(), b.points(), axis, &mut contact) {
            return disjoint(response);
        }
    }

    // Both polygons collapsed to points: fall back to their bounds
    if !tested && !a.bounds().overlaps(&b.bounds()) {
        return disjoint(response);
    }
    contact.commit(response)
}

pub fn test_circle_circle<Id>(a: &Circle, b: &Circle, response: &mut Response<Id>) -> bool {
    let difference = b.pos - a.pos;
    let total_radius = a.radius + b.radius;
    let distance_sq = difference.norm_squared();
    if distance_sq > total_radius * total_radius {
        return disjoint(response);
    }

    let distance = distance_sq.sqrt();
    let mut contact = Contact::new();
    contact.a_in_b = a.radius <= b.radius && distance <= b.radius - a.radius;
    contact.b_in_a = b.radius <= a.radius && distance <= a.radius - b.radius;
    if distance_sq > EDGE_EPSILON {
        contact.offer(total_radius - distance, difference / distance);
    }
    contact.commit(response)
}

pub fn test_polygon_circle<Id>(
    polygon: &Polygon,
    circle: &Circle,
    response: &mut Response<Id>,
) -> bool {
    let center = circle.pos - polygon.pos;
    let radius = circle.radius;
    let radius_sq = radius * radius;
    let points = polygon.points();
    let len = points.len();
    if len == 0 {
        return disjoint(response);
    }

    let mut contact = Contact::new();
    let mut tested = false;
    for i in 0..len {
        let next = (i + 1) % len;
        let prev = (i + len - 1) % len;
        let edge = points[next] - points[i];
        if edge.norm_squared() <= EDGE_EPSILON {
            continue;
        }
        tested = true;

        let point = center - points[i];
        if point.norm_squared() > radius_sq {
            contact.a_in_b = false;
        }

        match voronoi_region(&edge, &point) {
            VoronoiRegion::Left => {
                // Closest feature is vertex i if the circle is also past the previous edge
                let prev_edge = points[i] - points[prev];
                let from_prev = center - points[prev];
                if voronoi_region(&prev_edge, &from_prev) == VoronoiRegion::Right {
                    let distance = point.norm();
                    if distance > radius {
                        return disjoint(response);
                    }
                    contact.b_in_a = false;
                    contact.offer(radius - distance, normalize_or_zero(&point));
                }
            }
            VoronoiRegion::Right => {
                let next_edge = points[(next + 1) % len] - points[next];
                let from_next = center - points[next];
                if voronoi_region(&next_edge, &from_next) == VoronoiRegion::Left {
                    let distance = from_next.norm();
                    if distance > radius {
                        return disjoint(response);
                    }
                    contact.b_in_a = false;
                    contact.offer(radius - distance, normalize_or_zero(&from_next));
                }
            }
            VoronoiRegion::Middle => {
                let normal = perp(&edge).normalize();
                let distance = point.dot(&normal);
                if distance > radius {
                    return disjoint(response);
                }
                let overlap = radius - distance;
                if distance >= 0.0 || overlap < 2.0 * radius {
                    contact.b_in_a = false;
                }
                contact.offer(overlap, normal);
            }
        }
    }

    if !tested {
        // Every vertex coincides: the polygon is a single point
        let point = center - points[0];
        let distance = point.norm();
        if distance > radius {
            return disjoint(response);
        }
        contact.b_in_a = radius <= 0.0;
        if distance > EDGE_EPSILON {
            contact.offer(radius - distance, point / distance);
        }
    }
    contact.commit(response)
}

/// Circle against polygon: the polygon-circle test with A and B swapped back.
pub fn test_circle_polygon<Id>(
    circle: &Circle,
    polygon: &Polygon,
    response: &mut Response<Id>,
) -> bool {
    if !test_polygon_circle(polygon, circle, response) {
        return false;
    }
    response.overlap_axis = -response.overlap_axis;
    response.overlap_vector = -response.overlap_vector;
    std::mem::swap(&mut response.a_in_b, &mut response.b_in_a);
    true
}

// Best axis seen so far. Nothing reaches the response until every axis has
// been tested, so a miss leaves the overlap sentinel in place.
struct Contact {
    overlap: f64,
    axis: Vector2,
    a_in_b: bool,
    b_in_a: bool,
}

impl Contact {
    fn new() -> Self {
        Contact {
            overlap: f64::INFINITY,
            axis: Vector2::zeros(),
            a_in_b: true,
            b_in_a: true,
        }
    }

    // Strictly smaller wins, so the first of two equal axes is kept.
    fn offer(&mut self, overlap: f64, axis: Vector2) {
        if overlap.abs() < self.overlap.abs() {
            self.overlap = overlap;
            self.axis = axis;
        }
    }

    fn commit<Id>(self, response: &mut Response<Id>) -> bool {
        response.a_in_b = self.a_in_b;
        response.b_in_a = self.b_in_a;
        if !self.overlap.is_finite() || self.axis == Vector2::zeros() {
            // Overlapping, but no usable axis to push along
            response.overlap = 0.0;
            response.overlap_axis = Vector2::zeros();
            response.overlap_vector = Vector2::zeros();
            return true;
        }
        response.overlap = self.overlap;
        response.overlap_axis = self.axis;
        response.overlap_vector = self.axis * self.overlap;
        true
    }
}

// Projects both point sets on `axis` (B shifted by `offset`). Returns true on
// a gap. Otherwise offers the overlap, oriented from A towards B, and clears
// whichever containment flag this axis disproves.
fn is_separating_axis(
    offset: &Vector2,
    a_points: &[Vector2],
    b_points: &[Vector2],
    axis: &Vector2,
    contact: &mut Contact,
) -> bool {
    let (a_min, a_max) = project(a_points, axis);
    let (b_min, b_max) = project(b_points, axis);
    let projected_offset = offset.dot(axis);
    let (b_min, b_max) = (b_min + projected_offset, b_max + projected_offset);

    if a_min > b_max || b_min > a_max {
        return true;
    }

    contact.a_in_b &= a_min >= b_min && a_max <= b_max;
    contact.b_in_a &= b_min >= a_min && b_max <= a_max;

    let overlap = if a_min < b_min && a_max < b_max {
        a_max - b_min
    } else if a_min > b_min && a_max > b_max {
        a_min - b_max
    } else {
        shortest_exit(a_min, a_max, b_min, b_max)
    };

    let axis = if overlap < 0.0 { -axis } else { *axis };
    contact.offer(overlap.abs(), axis);
    false
}

// One interval contains the other: push out through the nearer end.
fn shortest_exit(a_min: f64, a_max: f64, b_min: f64, b_max: f64) -> f64 {
    let forward = a_max - b_min;
    let backward = b_max - a_min;
    if forward < backward {
        forward
    } else {
        -backward
    }
}

fn project(points: &[Vector2], axis: &Vector2) -> (f64, f64) {
    points
        .iter()
        .map(|p| p.dot(axis))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), d| {
            (min.min(d), max.max(d))
        })
}

fn voronoi_region(edge: &Vector2, point: &Vector2) -> VoronoiRegion {
    let dp = point.dot(edge);
    if dp < 0.0 {
        VoronoiRegion::Left
    } else if dp > edge.norm_squared() {
        VoronoiRegion::Right
    } else {
        VoronoiRegion::Middle
    }
}

fn normalize_or_zero(v: &Vector2) -> Vector2 {
    let norm = v.norm();
    if norm <= EDGE_EPSILON {
        return Vector2::zeros();
    }
    v / norm
}

// A miss only clears the containment flags; overlap and axes keep their
// reset values.
fn disjoint<Id>(response: &mut Response<Id>) -> bool {
    response.a_in_b = false;
    response.b_in_a = false;
    false
}
