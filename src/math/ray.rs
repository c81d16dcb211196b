use crate::math::Vec3;

#[derive(Copy, Clone, Debug)]
pub struct Ray {
	pub origin: Vec3,
	pub direction: Vec3,
}

impl Ray {
	#[inline(always)]
	pub fn new(origin: Vec3, direction: Vec3) -> Ray {
		Ray { origin, direction }
	}

	#[inline(always)]
	pub fn point_at(&self, t: f64) -> Vec3 {
		self.origin + self.direction * t
	}
}
