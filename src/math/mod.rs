pub mod vec3;
pub mod mat3;
pub mod ray;
pub mod roots;
pub mod transform;

pub use vec3::Vec3;
pub use mat3::Mat3;
pub use ray::Ray;
pub use transform::Transform;
pub use std::f64::INFINITY;
pub use std::f64::consts::*;

/// Smallest accepted hit distance; keeps secondary rays off their own surface.
pub const EPSILON: f64 = 1e-6;
pub const INV_PI: f64 = FRAC_1_PI;
pub const INV_2_PI: f64 = 0.5 * FRAC_1_PI;

pub fn lerp(a: Vec3, b: Vec3, t: f64) -> Vec3 {
	(1.0 - t) * a + t * b
}

pub fn deg_to_rad(deg: f64) -> f64 {
	deg * PI / 180.0
}
