use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign, Mul, MulAssign, Div, DivAssign, Neg};

/// Point, direction or linear RGB color
#[derive(Copy, Clone, PartialEq, Debug, Default)]
pub struct Vec3 {
	pub x: f64,
	pub y: f64,
	pub z: f64,
}

impl Vec3 {
	#[inline(always)]
	pub const fn new(x: f64, y: f64, z: f64) -> Vec3 {
		Vec3 { x, y, z }
	}

	#[inline(always)]
	pub const fn zero() -> Vec3 {
		Vec3::thrice(0.0)
	}

	#[inline(always)]
	pub const fn thrice(v: f64) -> Vec3 {
		Vec3::new(v, v, v)
	}

	#[inline(always)]
	pub fn dot(lhs: Vec3, rhs: Vec3) -> f64 {
		lhs.x * rhs.x + lhs.y * rhs.y + lhs.z * rhs.z
	}

	#[inline(always)]
	pub fn cross(lhs: Vec3, rhs: Vec3) -> Vec3 {
		Vec3::new(
			lhs.y * rhs.z - lhs.z * rhs.y,
			lhs.z * rhs.x - lhs.x * rhs.z,
			lhs.x * rhs.y - lhs.y * rhs.x,
		)
	}

	#[inline(always)]
	pub fn length_squared(self) -> f64 {
		Vec3::dot(self, self)
	}

	#[inline(always)]
	pub fn length(self) -> f64 {
		self.length_squared().sqrt()
	}

	/// NaN for the zero vector
	#[inline(always)]
	pub fn normalized(self) -> Vec3 {
		self / self.length()
	}

	/// Mirror `self` about the plane with unit normal `normal`.
	#[inline(always)]
	pub fn reflect(self, normal: Vec3) -> Vec3 {
		self - 2.0 * Vec3::dot(self, normal) * normal
	}

	/// Mean of the three components
	#[inline(always)]
	pub fn avg(self) -> f64 {
		(self.x + self.y + self.z) / 3.0
	}

	#[inline(always)]
	pub fn has_nan(self) -> bool {
		self.x.is_nan() || self.y.is_nan() || self.z.is_nan()
	}

	#[inline(always)]
	pub fn to_array(self) -> [f64; 3] {
		[self.x, self.y, self.z]
	}
}

// component-wise binary operators, with their assigning forms
macro_rules! componentwise {
	($Op:ident, $op:ident, $OpAssign:ident, $op_assign:ident, $sym:tt) => {
		impl $Op for Vec3 {
			type Output = Vec3;
			#[inline(always)]
			fn $op(self, rhs: Vec3) -> Vec3 {
				Vec3::new(self.x $sym rhs.x, self.y $sym rhs.y, self.z $sym rhs.z)
			}
		}

		impl $OpAssign for Vec3 {
			#[inline(always)]
			fn $op_assign(&mut self, rhs: Vec3) {
				*self = *self $sym rhs;
			}
		}
	};
}

componentwise!(Add, add, AddAssign, add_assign, +);
componentwise!(Sub, sub, SubAssign, sub_assign, -);
componentwise!(Mul, mul, MulAssign, mul_assign, *);

impl Mul<f64> for Vec3 {
	type Output = Vec3;
	#[inline(always)]
	fn mul(self, s: f64) -> Vec3 {
		Vec3::new(self.x * s, self.y * s, self.z * s)
	}
}

impl Mul<Vec3> for f64 {
	type Output = Vec3;
	#[inline(always)]
	fn mul(self, v: Vec3) -> Vec3 {
		v * self
	}
}

impl MulAssign<f64> for Vec3 {
	#[inline(always)]
	fn mul_assign(&mut self, s: f64) {
		*self = *self * s;
	}
}

impl Div<f64> for Vec3 {
	type Output = Vec3;
	#[inline(always)]
	fn div(self, s: f64) -> Vec3 {
		self * (1.0 / s)
	}
}

impl DivAssign<f64> for Vec3 {
	#[inline(always)]
	fn div_assign(&mut self, s: f64) {
		*self = *self / s;
	}
}

impl Sum for Vec3 {
	fn sum<I: Iterator<Item = Vec3>>(iter: I) -> Vec3 {
		iter.fold(Vec3::zero(), |acc, v| acc + v)
	}
}

impl Neg for Vec3 {
	type Output = Vec3;
	#[inline(always)]
	fn neg(self) -> Vec3 {
		Vec3::new(-self.x, -self.y, -self.z)
	}
}
