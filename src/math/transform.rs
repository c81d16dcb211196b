use crate::math::{Mat3, Ray, Vec3};

/// Rigid model -> world transform: rotate, then translate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
	rotation: Mat3,
	rotation_inv: Mat3,
	translation: Vec3,
}

impl Default for Transform {
	fn default() -> Transform {
		Transform::identity()
	}
}

impl Transform {
	pub fn identity() -> Transform {
		Transform {
			rotation: Mat3::identity(),
			rotation_inv: Mat3::identity(),
			translation: Vec3::zero(),
		}
	}

	pub fn is_identity(&self) -> bool {
		*self == Transform::identity()
	}

	pub fn translate(mut self, offset: Vec3) -> Transform {
		self.translation += offset;
		self
	}

	/// Apply `rot` after the current rotation. The translation is left as is,
	/// so objects spin about their own origin.
	pub fn rotate(mut self, rot: Mat3) -> Transform {
		self.rotation = rot * self.rotation;
		// rotations are orthonormal
		self.rotation_inv = self.rotation.transpose();
		self
	}

	pub fn rotate_x(self, alpha: f64) -> Transform {
		self.rotate(Mat3::rot_x(alpha))
	}

	pub fn rotate_y(self, alpha: f64) -> Transform {
		self.rotate(Mat3::rot_y(alpha))
	}

	pub fn rotate_z(self, alpha: f64) -> Transform {
		self.rotate(Mat3::rot_z(alpha))
	}

	/// World-space ray to model-space ray
	pub fn to_local(&self, ray: Ray) -> Ray {
		Ray {
			origin: self.rotation_inv.transform(ray.origin - self.translation),
			direction: self.rotation_inv.transform(ray.direction),
		}
	}

	pub fn point_to_world(&self, p: Vec3) -> Vec3 {
		self.rotation.transform(p) + self.translation
	}

	/// Normals go through the inverse transpose, which for a rotation is the
	/// rotation itself.
	pub fn normal_to_world(&self, n: Vec3) -> Vec3 {
		self.rotation_inv.transpose().transform(n).normalized()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn local_and_world_round_trip() {
		let transform = Transform::identity()
			.rotate_x(0.4)
			.rotate_z(-1.3)
			.translate(Vec3::new(1.0, -2.0, 0.5));
		let ray = Ray::new(Vec3::new(3.0, 1.0, -1.0), Vec3::new(0.0, 1.0, 0.0));
		let local = transform.to_local(ray);
		let back = transform.point_to_world(local.point_at(2.5));
		assert!((back - ray.point_at(2.5)).length() < 1e-12);
	}

	#[test]
	fn translation_moves_origin() {
		let transform = Transform::identity().translate(Vec3::new(0.0, 0.0, 2.0));
		let local = transform.to_local(Ray::new(Vec3::zero(), Vec3::new(0.0, 0.0, 1.0)));
		assert_eq!(local.origin, Vec3::new(0.0, 0.0, -2.0));
		assert_eq!(local.direction, Vec3::new(0.0, 0.0, 1.0));
	}
}
