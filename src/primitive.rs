//! Analytic surfaces, all expressed in their own model space.

use crate::geometry::*;
use crate::math::*;
use crate::math::roots::solve_quartic;

/// Sphere of the given radius centered at the origin
#[derive(Copy, Clone, Debug)]
pub struct Sphere {
	pub radius: f64,
}

impl Sphere {
	pub fn new(radius: f64) -> Sphere {
		Sphere { radius }
	}
}

impl Surface for Sphere {
	fn intersect(&self, ray: Ray, hit: &mut Hit) -> bool {
		// a t^2 + 2 b t + c = 0
		let a = Vec3::dot(ray.direction, ray.direction);
		let b = Vec3::dot(ray.origin, ray.direction);
		let c = Vec3::dot(ray.origin, ray.origin) - self.radius * self.radius;
		let discriminant = b * b - a * c;
		if discriminant < 0.0 {
			return false;
		}

		let s = discriminant.sqrt();
		let t = {
			let t1 = (-b - s) / a;
			if hit.accepts(t1) { t1 } else { (-b + s) / a }
		};
		if !hit.accepts(t) {
			return false;
		}

		let point = ray.point_at(t);
		let normal = point / self.radius;
		let u = normal.y.atan2(normal.x) * INV_2_PI;
		let v = normal.z.max(-1.0).min(1.0).acos() * INV_PI;

		hit.t = t;
		hit.point = point;
		hit.normal = normal;
		hit.uv = (u - u.floor(), v);
		true
	}
}

/// Open tube around the Z axis, from z = 0 up to z = height
#[derive(Copy, Clone, Debug)]
pub struct Cylinder {
	pub radius: f64,
	pub height: f64,
}

impl Cylinder {
	pub fn new(radius: f64, height: f64) -> Cylinder {
		Cylinder { radius, height }
	}
}

impl Surface for Cylinder {
	fn intersect(&self, ray: Ray, hit: &mut Hit) -> bool {
		let (ox, oy) = (ray.origin.x, ray.origin.y);
		let (dx, dy) = (ray.direction.x, ray.direction.y);
		let a = dx * dx + dy * dy;
		let b = ox * dx + oy * dy;
		let c = ox * ox + oy * oy - self.radius * self.radius;
		let discriminant = b * b - a * c;

		// also rejects rays parallel to the axis (a == 0 gives NaN roots)
		if !(discriminant >= 0.0) || a == 0.0 {
			return false;
		}

		let s = discriminant.sqrt();
		for &t in &[(-b - s) / a, (-b + s) / a] {
			if !hit.accepts(t) {
				continue;
			}
			let p = ray.point_at(t);
			if p.z < 0.0 || p.z > self.height {
				continue;
			}

			let u = p.y.atan2(p.x) * INV_2_PI;
			hit.t = t;
			hit.point = p;
			hit.normal = Vec3::new(p.x, p.y, 0.0).normalized();
			hit.uv = (u - u.floor(), p.z / self.height);
			return true;
		}
		false
	}
}

/// Infinite plane through the origin
#[derive(Copy, Clone, Debug)]
pub struct Plane {
	pub normal: Vec3,
}

impl Plane {
	pub fn new(normal: Vec3) -> Plane {
		Plane { normal: normal.normalized() }
	}
}

impl Surface for Plane {
	fn intersect(&self, ray: Ray, hit: &mut Hit) -> bool {
		let t = -Vec3::dot(ray.origin, self.normal) / Vec3::dot(ray.direction, self.normal);
		if !hit.accepts(t) {
			return false;
		}

		let point = ray.point_at(t);
		hit.t = t;
		hit.point = point;
		hit.normal = self.normal;
		hit.uv = (point.x, point.y);
		true
	}
}

/// Torus around the Z axis: a tube of radius `radius2` swept along a circle of
/// radius `radius` in the XY plane.
#[derive(Copy, Clone, Debug)]
pub struct Torus {
	pub radius: f64,
	pub radius2: f64,
	// cache
	r2_major: f64,
	r2_minor: f64,
}

impl Torus {
	pub fn new(radius: f64, radius2: f64) -> Torus {
		Torus {
			radius,
			radius2,
			r2_major: radius * radius,
			r2_minor: radius2 * radius2,
		}
	}
}

impl Surface for Torus {
	fn intersect(&self, ray: Ray, hit: &mut Hit) -> bool {
		// implicit form: (|p|^2 - R^2 - r^2)^2 - 4 R^2 (r^2 - z^2) = 0
		let xi = self.r2_major + self.r2_minor;
		let (o, d) = (ray.origin, ray.direction);

		let alpha = Vec3::dot(d, d);
		let beta = Vec3::dot(o, d);
		let sigma = Vec3::dot(o, o) - xi;

		// a t^4 + b t^3 + c t^2 + d t + e = 0
		let a = alpha * alpha;
		let b = 4.0 * alpha * beta;
		let c = 2.0 * alpha * sigma + 4.0 * beta * beta + 4.0 * self.r2_major * d.z * d.z;
		let dd = 4.0 * beta * sigma + 8.0 * self.r2_major * o.z * d.z;
		let e = sigma * sigma - 4.0 * self.r2_major * (self.r2_minor - o.z * o.z);

		let roots = solve_quartic(b / a, c / a, dd / a, e / a);
		let mut t = INFINITY;
		for &root in &roots {
			// NaN fails both comparisons
			if hit.accepts(root) && root < t {
				t = root;
			}
		}
		if !t.is_finite() {
			return false;
		}

		let point = ray.point_at(t);
		let k = Vec3::dot(point, point) - xi;
		let normal = (point * Vec3::new(k, k, k + 2.0 * self.r2_major)).normalized();
		if normal.has_nan() {
			return false;
		}

		let u = point.y.atan2(point.x) * INV_2_PI;
		let ring = (point.x * point.x + point.y * point.y).sqrt() - self.radius;
		let v = point.z.atan2(ring) * INV_2_PI;

		hit.t = t;
		hit.point = point;
		hit.normal = normal;
		hit.uv = (u - u.floor(), v - v.floor());
		true
	}
}
