pub mod detector;
pub mod filter;
pub mod response;
pub mod sat;
pub mod shapes;

pub use detector::{Body, Detector, DetectorConfig};
pub use filter::CollisionFilter;
pub use response::Response;
pub use sat::{test_circle_circle, test_circle_polygon, test_polygon_circle, test_polygon_polygon, test_shapes};
pub use shapes::{Circle, Polygon, Shape};
