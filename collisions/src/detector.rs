use crate::filter::CollisionFilter;
use crate::response::Response;
use crate::sat::test_shapes;
use crate::shapes::{Polygon, Shape};
use common::{Collidable, ObjectPool, Vector2, Viewport};
use quadtree::SpatialIndex;
use std::fmt::Debug;
use tracing::trace;

/// A collidable entity made of one or more convex shapes.
pub trait Body: Collidable {
    /// Shapes positioned in world coordinates.
    fn shapes(&self) -> &[Shape];

    fn filter(&self) -> CollisionFilter {
        CollisionFilter::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectorConfig {
    /// Released responses kept around for reuse.
    pub response_pool_size: usize,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            response_pool_size: 16,
        }
    }
}

/// Narrow phase driver. Pulls candidates from a [`SpatialIndex`], filters
/// them and runs the SAT tests shape by shape.
pub struct Detector<Id> {
    responses: ObjectPool<Response<Id>>,
    candidates: Vec<Id>,
}

impl<Id> Detector<Id>
where
    Id: Copy + Eq + Debug,
{
    pub fn new() -> Self {
        Self::with_config(DetectorConfig::default())
    }

    pub fn with_config(config: DetectorConfig) -> Self {
        Self {
            responses: ObjectPool::new(config.response_pool_size),
            candidates: Vec::new(),
        }
    }

    /// A reset response, reused from the pool when one is available.
    pub fn acquire_response(&mut self) -> Response<Id> {
        let mut response = self.responses.get();
        response.reset();
        response
    }

    pub fn release_response(&mut self, response: Response<Id>) {
        self.responses.return_object(response);
    }

    pub fn pooled_responses(&self) -> usize {
        self.responses.len()
    }

    /// Responses created because the pool was empty.
    pub fn allocated_responses(&self) -> usize {
        self.responses.allocated()
    }

    /// Test `body` against everything the index returns for it.
    ///
    /// The bounds pre-check runs in the index frame, the same frame the
    /// candidates were bucketed in.
    ///
    /// `lookup` resolves candidate ids back to bodies. `on_collision` runs
    /// once per colliding shape pair with the response (A is `body`) and the
    /// other body. Returns the number of colliding shape pairs.
    pub fn collisions<'w, B, V, L, F>(
        &mut self,
        index: &SpatialIndex<Id, V>,
        body: &B,
        mut lookup: L,
        mut on_collision: F,
    ) -> usize
    where
        B: Body<Id = Id> + 'w,
        V: Viewport,
        L: FnMut(Id) -> Option<&'w B>,
        F: FnMut(&Response<Id>, &B),
    {
        if body.is_kinematic() {
            return 0;
        }
        let Some(bounds) = index.index_bounds(body) else {
            return 0;
        };
        let id = body.id();
        let filter = body.filter();

        index.retrieve(body, &mut self.candidates);
        let mut response = self.acquire_response();
        let mut count = 0;
        for &other_id in &self.candidates {
            if other_id == id {
                continue;
            }
            let Some(other) = lookup(other_id) else {
                trace!(?other_id, "candidate not found");
                continue;
            };
            if other.is_kinematic() || !filter.should_collide(&other.filter()) {
                continue;
            }
            match index.index_bounds(other) {
                Some(other_bounds) if bounds.overlaps(&other_bounds) => {}
                _ => continue,
            }

            for (index_a, shape_a) in body.shapes().iter().enumerate() {
                for (index_b, shape_b) in other.shapes().iter().enumerate() {
                    response.reset();
                    if !test_shapes(shape_a, shape_b, &mut response) {
                        continue;
                    }
                    response.shape_a = Some(id);
                    response.shape_b = Some(other_id);
                    response.shape_index_a = index_a as i32;
                    response.shape_index_b = index_b as i32;
                    count += 1;
                    on_collision(&response, other);
                }
            }
        }
        self.release_response(response);

        trace!(?id, candidates = self.candidates.len(), count, "collision check");
        count
    }

    /// Collect into `hits` (cleared first) every body with a shape crossed
    /// by the segment `from -> to`. Each body is reported once, in candidate
    /// order. Returns the number of hits.
    pub fn ray_cast<'w, B, V, L>(
        &mut self,
        index: &SpatialIndex<Id, V>,
        from: Vector2,
        to: Vector2,
        mut lookup: L,
        hits: &mut Vec<Id>,
    ) -> usize
    where
        B: Body<Id = Id> + 'w,
        V: Viewport,
        L: FnMut(Id) -> Option<&'w B>,
    {
        hits.clear();
        let ray = Shape::from(Polygon::segment(from, to));
        let ray_bounds = ray.bounds();

        index.retrieve_bounds(&ray_bounds, &mut self.candidates);
        let mut response = self.acquire_response();
        for &other_id in &self.candidates {
            if hits.contains(&other_id) {
                continue;
            }
            let Some(other) = lookup(other_id) else {
                continue;
            };
            match index.index_bounds(other) {
                Some(other_bounds) if ray_bounds.overlaps(&other_bounds) => {}
                _ => continue,
            }
            let hit = other.shapes().iter().any(|shape| {
                response.reset();
                test_shapes(&ray, shape, &mut response)
            });
            if hit {
                hits.push(other_id);
            }
        }
        self.release_response(response);
        hits.len()
    }
}

impl<Id> Default for Detector<Id>
where
    Id: Copy + Eq + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}
