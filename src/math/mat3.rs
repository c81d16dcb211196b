use std::ops::{Index, Mul};
use crate::math::Vec3;

/// row-major 3x3 matrix
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Mat3([f64; 9]);

impl Mat3 {
	pub fn identity() -> Mat3 {
		Mat3([
			1.0, 0.0, 0.0,
			0.0, 1.0, 0.0,
			0.0, 0.0, 1.0,
		])
	}

	/// Counter-clockwise rotation of `alpha` radians about the X axis
	pub fn rot_x(alpha: f64) -> Mat3 {
		let (s, c) = alpha.sin_cos();
		Mat3([
			1.0, 0.0, 0.0,
			0.0,   c,  -s,
			0.0,   s,   c,
		])
	}

	pub fn rot_y(alpha: f64) -> Mat3 {
		let (s, c) = alpha.sin_cos();
		Mat3([
			  c, 0.0,   s,
			0.0, 1.0, 0.0,
			 -s, 0.0,   c,
		])
	}

	pub fn rot_z(alpha: f64) -> Mat3 {
		let (s, c) = alpha.sin_cos();
		Mat3([
			  c,  -s, 0.0,
			  s,   c, 0.0,
			0.0, 0.0, 1.0,
		])
	}

	pub fn transpose(&self) -> Mat3 {
		let a = &self.0;
		Mat3([
			a[0], a[3], a[6],
			a[1], a[4], a[7],
			a[2], a[5], a[8],
		])
	}

	pub fn transform(&self, v: Vec3) -> Vec3 {
		let a = &self;
		Vec3 {
			x: a[(0,0)] * v.x + a[(0,1)] * v.y + a[(0,2)] * v.z,
			y: a[(1,0)] * v.x + a[(1,1)] * v.y + a[(1,2)] * v.z,
			z: a[(2,0)] * v.x + a[(2,1)] * v.y + a[(2,2)] * v.z,
		}
	}
}

impl Mul for Mat3 {
	type Output = Mat3;
	fn mul(self, rhs: Mat3) -> Mat3 {
		let a = &self.0;
		let b = &rhs.0;
		let mut result = [0.0; 9];

		for i in 0..3 {
			for t in 0..3 {
				result[i*3 + t] =
					a[i*3 + 0]*b[0*3 + t] +
					a[i*3 + 1]*b[1*3 + t] +
					a[i*3 + 2]*b[2*3 + t];
			}
		}

		Mat3(result)
	}
}

impl Index<(usize, usize)> for Mat3 {
	type Output = f64;

	fn index(&self, coord: (usize, usize)) -> &f64 {
		&self.0[3 * coord.0 + coord.1]
	}
}
