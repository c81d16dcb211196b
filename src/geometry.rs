use crate::material::Material;
use crate::math::*;
use crate::mesh::Mesh;
use crate::primitive::*;

/// Closest intersection found so far along a ray.
///
/// `t` doubles as the upper bound for the next candidate: a surface only
/// records itself when it is strictly closer than the current value.
#[derive(Copy, Clone)]
pub struct Hit<'a> {
	pub t: f64,
	pub point: Vec3,
	pub normal: Vec3,
	pub uv: (f64, f64),
	pub material: Option<&'a Material>,
}

impl<'a> Hit<'a> {
	pub fn new() -> Hit<'a> {
		Hit {
			t: INFINITY,
			point: Vec3::zero(),
			normal: Vec3::zero(),
			uv: (0.0, 0.0),
			material: None,
		}
	}

	/// Whether a candidate at distance `t` may replace the current hit
	#[inline(always)]
	pub fn accepts(&self, t: f64) -> bool {
		t > EPSILON && t < self.t
	}
}

impl<'a> Default for Hit<'a> {
	fn default() -> Hit<'a> {
		Hit::new()
	}
}

/// Model-space intersection. Implementations write `t`, `point`, `normal`
/// (unit length) and `uv` when, and only when, `hit.accepts(t)`.
pub trait Surface {
	fn intersect(&self, ray: Ray, hit: &mut Hit) -> bool;
}

pub enum Shape {
	Sphere(Sphere),
	Cylinder(Cylinder),
	Plane(Plane),
	Torus(Torus),
	Mesh(Mesh),
}

impl Surface for Shape {
	fn intersect(&self, ray: Ray, hit: &mut Hit) -> bool {
		match *self {
			Shape::Sphere(ref s) => s.intersect(ray, hit),
			Shape::Cylinder(ref s) => s.intersect(ray, hit),
			Shape::Plane(ref s) => s.intersect(ray, hit),
			Shape::Torus(ref s) => s.intersect(ray, hit),
			Shape::Mesh(ref s) => s.intersect(ray, hit),
		}
	}
}

/// A shape placed in the world along with its material
pub struct Object {
	pub shape: Shape,
	pub material: Material,
	pub transform: Transform,
}

impl Object {
	pub fn new(shape: Shape, material: Material) -> Object {
		Object { shape, material, transform: Transform::identity() }
	}

	pub fn with_transform(mut self, transform: Transform) -> Object {
		self.transform = transform;
		self
	}

	pub fn intersect<'a>(&'a self, ray: Ray, hit: &mut Hit<'a>) -> bool {
		let found = if self.transform.is_identity() {
			self.shape.intersect(ray, hit)
		} else {
			let local = self.transform.to_local(ray);
			let found = self.shape.intersect(local, hit);
			if found {
				hit.point = self.transform.point_to_world(hit.point);
				hit.normal = self.transform.normal_to_world(hit.normal);
			}
			found
		};
		if found {
			hit.material = Some(&self.material);
		}
		found
	}
}

pub enum Geometry {
	Object(Object),
	Set(GeometrySet),
}

impl Geometry {
	pub fn intersect<'a>(&'a self, ray: Ray, hit: &mut Hit<'a>) -> bool {
		match *self {
			Geometry::Object(ref o) => o.intersect(ray, hit),
			Geometry::Set(ref s) => s.intersect(ray, hit),
		}
	}
}

impl From<Object> for Geometry {
	fn from(o: Object) -> Geometry {
		Geometry::Object(o)
	}
}

impl From<GeometrySet> for Geometry {
	fn from(s: GeometrySet) -> Geometry {
		Geometry::Set(s)
	}
}

/// Plain list of geometry, scanned linearly.
#[derive(Default)]
pub struct GeometrySet {
	children: Vec<Geometry>,
}

impl GeometrySet {
	pub fn new() -> GeometrySet {
		GeometrySet { children: Vec::new() }
	}

	pub fn add<G: Into<Geometry>>(&mut self, geometry: G) {
		self.children.push(geometry.into());
	}

	pub fn len(&self) -> usize {
		self.children.len()
	}

	pub fn is_empty(&self) -> bool {
		self.children.is_empty()
	}

	pub fn intersect<'a>(&'a self, ray: Ray, hit: &mut Hit<'a>) -> bool {
		let mut found = false;
		for child in &self.children {
			found |= child.intersect(ray, hit);
		}
		found
	}
}

impl FromIterator<Object> for GeometrySet {
	fn from_iter<I: IntoIterator<Item = Object>>(iter: I) -> GeometrySet {
		GeometrySet { children: iter.into_iter().map(Geometry::Object).collect() }
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::texture::Texture;

	fn sphere_at(center: Vec3, radius: f64, gray: f64) -> Object {
		Object::new(Shape::Sphere(Sphere::new(radius)), Material::diffuse(Texture::gray(gray)))
			.with_transform(Transform::identity().translate(center))
	}

	#[test]
	fn empty_scene_misses() {
		let world = GeometrySet::new();
		let mut hit = Hit::new();
		let ray = Ray::new(Vec3::zero(), Vec3::new(0.3, -0.2, 1.0));
		assert!(!world.intersect(ray, &mut hit));
		assert_eq!(hit.t, INFINITY);
		assert!(hit.material.is_none());
	}

	#[test]
	fn set_keeps_closest_in_any_order() {
		let near = sphere_at(Vec3::new(0.0, 3.0, 0.0), 1.0, 0.1);
		let far = sphere_at(Vec3::new(0.0, 8.0, 0.0), 1.0, 0.9);
		let ray = Ray::new(Vec3::zero(), Vec3::new(0.0, 1.0, 0.0));

		let mut hit_near = Hit::new();
		assert!(near.intersect(ray, &mut hit_near));
		let mut hit_far = Hit::new();
		assert!(far.intersect(ray, &mut hit_far));
		let best = hit_near.t.min(hit_far.t);

		let forward: GeometrySet = vec![
			sphere_at(Vec3::new(0.0, 3.0, 0.0), 1.0, 0.1),
			sphere_at(Vec3::new(0.0, 8.0, 0.0), 1.0, 0.9),
		].into_iter().collect();
		let backward: GeometrySet = vec![
			sphere_at(Vec3::new(0.0, 8.0, 0.0), 1.0, 0.9),
			sphere_at(Vec3::new(0.0, 3.0, 0.0), 1.0, 0.1),
		].into_iter().collect();

		for world in [&forward, &backward] {
			let mut hit = Hit::new();
			assert!(world.intersect(ray, &mut hit));
			assert!((hit.t - best).abs() < 1e-12);
			assert!((hit.t - 2.0).abs() < 1e-9);
			let albedo = hit.material.unwrap().diffuse.as_ref().unwrap().eval((0.0, 0.0));
			assert_eq!(albedo, Vec3::thrice(0.1));
		}
	}

	#[test]
	fn farther_hit_does_not_overwrite() {
		let near = sphere_at(Vec3::new(0.0, 3.0, 0.0), 1.0, 0.1);
		let far = sphere_at(Vec3::new(0.0, 8.0, 0.0), 1.0, 0.9);
		let ray = Ray::new(Vec3::zero(), Vec3::new(0.0, 1.0, 0.0));
		let mut hit = Hit::new();
		assert!(near.intersect(ray, &mut hit));
		let before = hit.t;
		assert!(!far.intersect(ray, &mut hit));
		assert_eq!(hit.t, before);
	}

	#[test]
	fn nested_sets_are_searched() {
		let mut inner = GeometrySet::new();
		inner.add(sphere_at(Vec3::new(0.0, 0.0, 5.0), 1.0, 0.5));
		let mut world = GeometrySet::new();
		world.add(inner);
		world.add(sphere_at(Vec3::new(0.0, 0.0, 9.0), 1.0, 0.5));
		let mut hit = Hit::new();
		assert!(world.intersect(Ray::new(Vec3::zero(), Vec3::new(0.0, 0.0, 1.0)), &mut hit));
		assert!((hit.t - 4.0).abs() < 1e-9);
	}

	#[test]
	fn rotated_object_reports_world_normal() {
		// plane with local normal +z, tipped a quarter turn about x: world normal -y
		let plane = Object::new(Shape::Plane(Plane::new(Vec3::new(0.0, 0.0, 1.0))), Material::default())
			.with_transform(Transform::identity().rotate_x(FRAC_PI_2).translate(Vec3::new(0.0, 2.0, 0.0)));
		let mut hit = Hit::new();
		assert!(plane.intersect(Ray::new(Vec3::zero(), Vec3::new(0.0, 1.0, 0.0)), &mut hit));
		assert!((hit.t - 2.0).abs() < 1e-9);
		assert!((hit.point - Vec3::new(0.0, 2.0, 0.0)).length() < 1e-9);
		assert!((hit.normal - Vec3::new(0.0, -1.0, 0.0)).length() < 1e-9);
	}
}
