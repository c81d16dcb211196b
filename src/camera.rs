use crate::math::*;

/// Pinhole camera spanning the image plane with a corner and two edges.
#[derive(Clone, Debug)]
pub struct Camera {
	origin: Vec3,
	corner: Vec3,
	right: Vec3,
	down: Vec3,
}

impl Camera {
	/// `fov` is the horizontal field of view in radians, `aspect` is
	/// width / height. Z is up.
	pub fn new(origin: Vec3, target: Vec3, fov: f64, aspect: f64) -> Camera {
		let dir = (target - origin).normalized();

		let mut up = Vec3::new(0.0, 0.0, 1.0);
		if Vec3::cross(dir, up).length_squared() < 1e-12 {
			log::warn!("camera looks along the Z axis, using +Y as up");
			up = Vec3::new(0.0, 1.0, 0.0);
		}

		let right = Vec3::cross(dir, up).normalized() * (2.0 * (fov / 2.0).tan());
		let down = Vec3::cross(dir, right).normalized() * (right.length() / aspect);
		let corner = dir - 0.5 * down - 0.5 * right;

		Camera { origin, corner, right, down }
	}

	/// Ray through the image plane at (x, y) in [0, 1]², with (0, 0) the top
	/// left corner.
	pub fn ray(&self, x: f64, y: f64) -> Ray {
		Ray::new(self.origin, self.corner + x * self.right + y * self.down)
	}
}
