use collisions::filter::types;
use collisions::*;
use common::{Bounds, Collidable, Vector2, ViewTransform};
use quadtree::{Config, SpatialIndex};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const EPSILON: f64 = 1e-9;

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < EPSILON,
        "expected {expected}, got {actual}"
    );
}

fn assert_vec_close(actual: Vector2, x: f64, y: f64) {
    assert_close(actual.x, x);
    assert_close(actual.y, y);
}

fn assert_finite(response: &Response<u32>) {
    assert!(!response.overlap.is_nan());
    assert!(response.overlap_axis.iter().all(|v| v.is_finite()));
    assert!(response.overlap_vector.iter().all(|v| v.is_finite()));
}

fn square(left: f64, top: f64, size: f64) -> Polygon {
    Polygon::from_bounds(&Bounds::new(left, top, size, size))
}

#[test]
fn test_overlapping_boxes() {
    let a = square(0.0, 0.0, 10.0);
    let b = square(5.0, 5.0, 10.0);
    let mut response = Response::<u32>::new();

    assert!(test_polygon_polygon(&a, &b, &mut response));
    assert_close(response.overlap, 5.0);
    assert_vec_close(response.overlap_axis, 0.0, 1.0);
    assert_vec_close(response.overlap_vector, 0.0, 5.0);
    assert!(!response.a_in_b);
    assert!(!response.b_in_a);
    assert!(response.is_colliding());
}

#[test]
fn test_overlapping_boxes_swapped() {
    let a = square(0.0, 0.0, 10.0);
    let b = square(5.0, 5.0, 10.0);
    let mut response = Response::<u32>::new();

    assert!(test_polygon_polygon(&b, &a, &mut response));
    assert_close(response.overlap, 5.0);
    assert_vec_close(response.overlap_axis, 0.0, -1.0);
    assert_vec_close(response.overlap_vector, 0.0, -5.0);
}

#[test]
fn test_separated_boxes() {
    let a = square(0.0, 0.0, 10.0);
    let b = square(20.0, 0.0, 10.0);
    let mut response = Response::<u32>::new();

    assert!(!test_polygon_polygon(&a, &b, &mut response));
    assert!(response.overlap.is_infinite());
    assert!(!response.a_in_b);
    assert!(!response.b_in_a);
    assert!(!response.is_colliding());
}

#[test]
fn test_boxes_overlapping_on_one_axis_only() {
    let a = square(0.0, 0.0, 10.0);
    let b = square(20.0, 5.0, 10.0);
    let mut response = Response::<u32>::new();

    assert!(!test_polygon_polygon(&a, &b, &mut response));
    assert!(response.overlap.is_infinite());
    assert_vec_close(response.overlap_axis, 0.0, 0.0);
    assert_vec_close(response.overlap_vector, 0.0, 0.0);
    assert!(!response.a_in_b);
    assert!(!response.b_in_a);
    assert!(!response.is_colliding());
}

#[test]
fn test_polygon_circle_miss_keeps_sentinel() {
    let polygon = square(0.0, 0.0, 10.0);
    let circle = Circle::new(5.0, 20.0, 2.0);
    let mut response = Response::<u32>::new();

    assert!(!test_polygon_circle(&polygon, &circle, &mut response));
    assert!(response.overlap.is_infinite());
    assert_vec_close(response.overlap_vector, 0.0, 0.0);
    assert!(!response.is_colliding());

    response.reset();
    assert!(!test_circle_polygon(&circle, &polygon, &mut response));
    assert!(response.overlap.is_infinite());
    assert_vec_close(response.overlap_axis, 0.0, 0.0);
    assert!(!response.a_in_b);
    assert!(!response.b_in_a);
    assert!(!response.is_colliding());
}

#[test]
fn test_box_inside_box_sharing_a_corner() {
    let big = square(0.0, 0.0, 10.0);
    let small = square(0.0, 0.0, 5.0);
    let mut response = Response::<u32>::new();

    assert!(test_polygon_polygon(&big, &small, &mut response));
    assert!(!response.a_in_b);
    assert!(response.b_in_a);
    assert_close(response.overlap, 5.0);

    response.reset();
    assert!(test_polygon_polygon(&small, &big, &mut response));
    assert!(response.a_in_b);
    assert!(!response.b_in_a);
    assert_close(response.overlap, 5.0);
}

#[test]
fn test_box_inside_box() {
    let small = square(2.0, 2.0, 2.0);
    let big = square(0.0, 0.0, 10.0);
    let mut response = Response::<u32>::new();

    assert!(test_polygon_polygon(&small, &big, &mut response));
    assert!(response.a_in_b);
    assert!(!response.b_in_a);
    assert_close(response.overlap, 4.0);

    response.reset();
    assert!(test_polygon_polygon(&big, &small, &mut response));
    assert!(!response.a_in_b);
    assert!(response.b_in_a);
}

#[test]
fn test_circles() {
    let a = Circle::new(0.0, 0.0, 5.0);
    let b = Circle::new(8.0, 0.0, 5.0);
    let mut response = Response::<u32>::new();

    assert!(test_circle_circle(&a, &b, &mut response));
    assert_close(response.overlap, 2.0);
    assert_vec_close(response.overlap_axis, 1.0, 0.0);
    assert_vec_close(response.overlap_vector, 2.0, 0.0);
    assert!(!response.a_in_b);
    assert!(!response.b_in_a);

    response.reset();
    assert!(!test_circle_circle(&a, &Circle::new(11.0, 0.0, 5.0), &mut response));
    assert!(response.overlap.is_infinite());
}

#[test]
fn test_circle_inside_circle() {
    let small = Circle::new(0.0, 0.0, 2.0);
    let big = Circle::new(1.0, 0.0, 5.0);
    let mut response = Response::<u32>::new();

    assert!(test_circle_circle(&small, &big, &mut response));
    assert!(response.a_in_b);
    assert!(!response.b_in_a);
}

#[test]
fn test_coincident_circles() {
    let a = Circle::new(3.0, 3.0, 1.0);
    let b = Circle::new(3.0, 3.0, 1.0);
    let mut response = Response::<u32>::new();

    assert!(test_circle_circle(&a, &b, &mut response));
    assert_finite(&response);
    assert_close(response.overlap, 0.0);
    assert_vec_close(response.overlap_vector, 0.0, 0.0);
    assert!(response.a_in_b);
    assert!(response.b_in_a);
}

#[test]
fn test_polygon_circle_edge() {
    let polygon = square(0.0, 0.0, 10.0);
    let circle = Circle::new(13.0, 5.0, 5.0);
    let mut response = Response::<u32>::new();

    assert!(test_polygon_circle(&polygon, &circle, &mut response));
    assert_close(response.overlap, 2.0);
    assert_vec_close(response.overlap_axis, 1.0, 0.0);
    assert_vec_close(response.overlap_vector, 2.0, 0.0);
    assert!(!response.a_in_b);
    assert!(!response.b_in_a);
}

#[test]
fn test_polygon_circle_vertex() {
    let polygon = square(0.0, 0.0, 10.0);
    let circle = Circle::new(12.0, 13.0, 5.0);
    let mut response = Response::<u32>::new();

    assert!(test_polygon_circle(&polygon, &circle, &mut response));
    let distance = 13f64.sqrt();
    assert_close(response.overlap, 5.0 - distance);
    assert_vec_close(response.overlap_axis, 2.0 / distance, 3.0 / distance);

    response.reset();
    let far = Circle::new(14.0, 14.0, 5.0);
    assert!(!test_polygon_circle(&polygon, &far, &mut response));
}

#[test]
fn test_circle_polygon_swaps_back() {
    let polygon = square(0.0, 0.0, 10.0);
    let circle = Circle::new(13.0, 5.0, 5.0);
    let mut response = Response::<u32>::new();

    assert!(test_circle_polygon(&circle, &polygon, &mut response));
    assert_close(response.overlap, 2.0);
    assert_vec_close(response.overlap_axis, -1.0, 0.0);
    assert_vec_close(response.overlap_vector, -2.0, 0.0);
}

#[test]
fn test_circle_inside_polygon() {
    let polygon = square(0.0, 0.0, 10.0);
    let circle = Circle::new(5.0, 5.0, 1.0);
    let mut response = Response::<u32>::new();

    assert!(test_polygon_circle(&polygon, &circle, &mut response));
    assert!(!response.a_in_b);
    assert!(response.b_in_a);
    assert_close(response.overlap, 6.0);

    response.reset();
    assert!(test_circle_polygon(&circle, &polygon, &mut response));
    assert!(response.a_in_b);
    assert!(!response.b_in_a);
}

#[test]
fn test_dispatch_through_shape() {
    let a = Shape::from(square(0.0, 0.0, 10.0));
    let b = Shape::from(Circle::new(13.0, 5.0, 5.0));
    let mut response = Response::<u32>::new();

    assert!(test_shapes(&a, &b, &mut response));
    assert_close(response.overlap, 2.0);
    response.reset();
    assert!(test_shapes(&b, &a, &mut response));
    assert_vec_close(response.overlap_axis, -1.0, 0.0);
}

#[test]
fn test_collapsed_polygons_do_not_produce_nan() {
    let point = Polygon::new(0.0, 0.0, [Vector2::zeros(); 3]);
    let same_point = Polygon::new(0.0, 0.0, [Vector2::zeros(); 2]);
    let other_point = Polygon::new(5.0, 0.0, [Vector2::zeros(); 2]);
    let mut response = Response::<u32>::new();

    assert!(point.normals().is_empty());
    assert!(test_polygon_polygon(&point, &same_point, &mut response));
    assert_finite(&response);
    assert_close(response.overlap, 0.0);

    response.reset();
    assert!(!test_polygon_polygon(&point, &other_point, &mut response));
    assert!(!response.a_in_b);

    response.reset();
    let around = square(-1.0, -1.0, 2.0);
    assert!(test_polygon_polygon(&point, &around, &mut response));
    assert_finite(&response);

    response.reset();
    assert!(test_polygon_circle(&point, &Circle::new(0.0, 0.0, 2.0), &mut response));
    assert_finite(&response);
    assert_close(response.overlap, 0.0);
}

#[test]
fn test_duplicate_vertices_are_skipped() {
    let polygon = Polygon::new(
        0.0,
        0.0,
        [
            Vector2::new(0.0, 0.0),
            Vector2::new(10.0, 0.0),
            Vector2::new(10.0, 0.0),
            Vector2::new(10.0, 10.0),
            Vector2::new(0.0, 10.0),
        ],
    );
    assert_eq!(polygon.normals().len(), 4);

    let mut response = Response::<u32>::new();
    assert!(test_polygon_circle(&polygon, &Circle::new(13.0, 5.0, 5.0), &mut response));
    assert_finite(&response);
    assert_close(response.overlap, 2.0);
}

fn random_shape(rng: &mut StdRng) -> Shape {
    let x = rng.gen_range(0.0..20.0);
    let y = rng.gen_range(0.0..20.0);
    if rng.gen_bool(0.5) {
        let width = rng.gen_range(1.0..10.0);
        let height = rng.gen_range(1.0..10.0);
        Polygon::from_bounds(&Bounds::new(x, y, width, height)).into()
    } else {
        Circle::new(x, y, rng.gen_range(0.5..6.0)).into()
    }
}

#[test]
fn test_swapping_shapes_mirrors_the_response() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut forward = Response::<u32>::new();
    let mut backward = Response::<u32>::new();
    let mut hits = 0;

    for _ in 0..500 {
        let a = random_shape(&mut rng);
        let b = random_shape(&mut rng);
        forward.reset();
        backward.reset();
        let hit = test_shapes(&a, &b, &mut forward);
        assert_eq!(hit, test_shapes(&b, &a, &mut backward));
        assert_eq!(forward.a_in_b, backward.b_in_a);
        assert_eq!(forward.b_in_a, backward.a_in_b);

        if !hit {
            assert!(forward.overlap.is_infinite());
            assert!(backward.overlap.is_infinite());
            assert!(!forward.is_colliding() && !backward.is_colliding());
            assert!(!forward.a_in_b && !forward.b_in_a);
            continue;
        }
        hits += 1;
        assert_finite(&forward);
        assert!((forward.overlap - backward.overlap).abs() < 1e-6);
        assert!((forward.overlap_axis + backward.overlap_axis).norm() < 1e-6);
        assert!((forward.overlap_vector + backward.overlap_vector).norm() < 1e-6);
    }
    assert!(hits > 0);
}

#[test]
fn test_response_reset() {
    let mut response = Response::<u32>::new();
    response.shape_a = Some(1);
    response.shape_b = Some(2);
    response.overlap = 3.0;
    response.overlap_axis = Vector2::new(1.0, 0.0);
    response.overlap_vector = Vector2::new(3.0, 0.0);
    response.a_in_b = false;
    response.shape_index_a = 4;

    response.reset();
    assert_eq!(response, Response::new());
    assert!(response.overlap.is_infinite());
    assert!(response.a_in_b && response.b_in_a);
    assert_eq!(response.shape_index_a, -1);
    assert_eq!(response.shape_index_b, -1);
}

#[test]
fn test_filter_masks() {
    let enemy = CollisionFilter::default();
    assert!(enemy.should_collide(&CollisionFilter::default()));

    let player = CollisionFilter::new(types::PLAYER_OBJECT, types::ENEMY_OBJECT);
    assert!(player.should_collide(&enemy));
    assert!(enemy.should_collide(&player));

    let coin = CollisionFilter::new(types::COLLECTABLE_OBJECT, types::ALL_OBJECT);
    assert!(!player.should_collide(&coin));
    assert!(!coin.should_collide(&player));

    assert!(!CollisionFilter::none().should_collide(&enemy));
    assert!(!enemy.should_collide(&CollisionFilter::none()));
}

struct Thing {
    id: u32,
    shapes: Vec<Shape>,
    filter: CollisionFilter,
    kinematic: bool,
    // View-local bounds of a floating thing
    view_bounds: Option<Bounds>,
}

impl Thing {
    fn new(id: u32, shapes: Vec<Shape>) -> Self {
        Thing {
            id,
            shapes,
            filter: CollisionFilter::default(),
            kinematic: false,
            view_bounds: None,
        }
    }
}

impl Collidable for Thing {
    type Id = u32;

    fn id(&self) -> u32 {
        self.id
    }

    fn bounds(&self) -> Option<Bounds> {
        if self.view_bounds.is_some() {
            return self.view_bounds;
        }
        let (first, rest) = self.shapes.split_first()?;
        let mut bounds = first.bounds();
        for shape in rest {
            bounds.expand_to_include(&shape.bounds());
        }
        Some(bounds)
    }

    fn is_floating(&self) -> bool {
        self.view_bounds.is_some()
    }

    fn is_kinematic(&self) -> bool {
        self.kinematic
    }
}

impl Body for Thing {
    fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    fn filter(&self) -> CollisionFilter {
        self.filter
    }
}

const PLAYER: u32 = 1;
const WALL: u32 = 2;
const COIN: u32 = 3;
const GHOST: u32 = 4;
const FILTERED: u32 = 5;

fn world() -> Vec<Thing> {
    let player = Thing::new(
        PLAYER,
        vec![
            square(10.0, 10.0, 10.0).into(),
            Circle::new(25.0, 15.0, 3.0).into(),
        ],
    );
    let wall = Thing::new(
        WALL,
        vec![Polygon::from_bounds(&Bounds::new(18.0, 10.0, 10.0, 10.0)).into()],
    );
    let coin = Thing::new(COIN, vec![square(60.0, 60.0, 5.0).into()]);
    let mut ghost = Thing::new(GHOST, vec![square(12.0, 12.0, 2.0).into()]);
    ghost.kinematic = true;
    let mut filtered = Thing::new(FILTERED, vec![square(14.0, 14.0, 4.0).into()]);
    filtered.filter = CollisionFilter::none();
    vec![player, wall, coin, ghost, filtered]
}

fn index_of(things: &[Thing]) -> SpatialIndex<u32> {
    let mut index = SpatialIndex::new(Bounds::new(0.0, 0.0, 100.0, 100.0)).unwrap();
    for thing in things {
        assert!(index.insert(thing));
    }
    index
}

#[test]
fn test_detector_compound_shapes() {
    let things = world();
    let index = index_of(&things);
    let mut detector = Detector::<u32>::new();
    let lookup = |id: u32| things.iter().find(|thing| thing.id == id);

    let mut hits = Vec::new();
    let count = detector.collisions(&index, &things[0], lookup, |response, other| {
        assert_eq!(response.shape_a, Some(PLAYER));
        assert_eq!(response.shape_b, Some(other.id));
        hits.push((
            other.id,
            response.shape_index_a,
            response.shape_index_b,
            response.overlap,
            response.overlap_axis,
        ));
    });

    assert_eq!(count, 2);
    assert_eq!(hits.len(), 2);
    assert!(hits.iter().all(|hit| hit.0 == WALL));

    let (_, index_a, index_b, overlap, axis) = hits[0];
    assert_eq!((index_a, index_b), (0, 0));
    assert_close(overlap, 2.0);
    assert_vec_close(axis, 1.0, 0.0);
    assert_eq!((hits[1].1, hits[1].2), (1, 0));
}

#[test]
fn test_detector_reuses_responses() {
    let things = world();
    let index = index_of(&things);
    let mut detector = Detector::<u32>::with_config(DetectorConfig {
        response_pool_size: 2,
    });
    let lookup = |id: u32| things.iter().find(|thing| thing.id == id);

    for _ in 0..3 {
        detector.collisions(&index, &things[0], lookup, |_, _| {});
    }
    assert_eq!(detector.allocated_responses(), 1);
    assert_eq!(detector.pooled_responses(), 1);

    let response = detector.acquire_response();
    assert_eq!(response, Response::new());
    assert_eq!(detector.pooled_responses(), 0);
    detector.release_response(response);
    assert_eq!(detector.pooled_responses(), 1);
}

#[test]
fn test_detector_skips_kinematic_and_missing() {
    let things = world();
    let index = index_of(&things);
    let mut detector = Detector::<u32>::new();

    // Lookup that lost the wall
    let lookup = |id: u32| things.iter().find(|thing| thing.id == id && id != WALL);
    assert_eq!(detector.collisions(&index, &things[0], lookup, |_, _| {}), 0);

    let lookup = |id: u32| things.iter().find(|thing| thing.id == id);
    assert_eq!(detector.collisions(&index, &things[3], lookup, |_, _| {}), 0);
}

#[test]
fn test_detector_floating_body_uses_index_frame() {
    // Floating HUD box drawn at (10, 10) in view space, (60, 10) in the world
    let mut hud = Thing::new(PLAYER, vec![square(60.0, 10.0, 10.0).into()]);
    hud.view_bounds = Some(Bounds::new(10.0, 10.0, 10.0, 10.0));
    let wall = Thing::new(WALL, vec![square(58.0, 10.0, 10.0).into()]);
    let things = vec![hud, wall];

    let mut index = SpatialIndex::with_viewport(
        Bounds::new(0.0, 0.0, 200.0, 200.0),
        Config::default(),
        ViewTransform::new(50.0, 0.0),
    )
    .unwrap();
    for thing in &things {
        assert!(index.insert(thing));
    }
    assert_eq!(
        index.index_bounds(&things[0]),
        Some(Bounds::new(60.0, 10.0, 10.0, 10.0))
    );

    let mut detector = Detector::<u32>::new();
    let lookup = |id: u32| things.iter().find(|thing| thing.id == id);
    let mut others = Vec::new();
    let count = detector.collisions(&index, &things[0], lookup, |_, other| {
        others.push(other.id)
    });
    assert_eq!(count, 1);
    assert_eq!(others, vec![WALL]);

    let count = detector.collisions(&index, &things[1], lookup, |_, other| {
        assert_eq!(other.id, PLAYER)
    });
    assert_eq!(count, 1);
}

#[test]
fn test_ray_cast() {
    let things = world();
    let index = index_of(&things);
    let mut detector = Detector::<u32>::new();
    let lookup = |id: u32| things.iter().find(|thing| thing.id == id);

    let mut hits = vec![99];
    let count = detector.ray_cast(
        &index,
        Vector2::new(0.0, 15.0),
        Vector2::new(50.0, 15.0),
        lookup,
        &mut hits,
    );
    assert_eq!(count, 3);
    hits.sort();
    assert_eq!(hits, vec![PLAYER, WALL, FILTERED]);

    let count = detector.ray_cast(
        &index,
        Vector2::new(0.0, 90.0),
        Vector2::new(50.0, 90.0),
        lookup,
        &mut hits,
    );
    assert_eq!(count, 0);
    assert!(hits.is_empty());
}
