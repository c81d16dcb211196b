//! JSON scene files.
//!
//! ```json
//! {
//!   "camera": { "origin": [0, -2, 0.5], "target": [0, 0, 0.5], "fov": 90 },
//!   "objects": [
//!     { "type": "sphere", "radius": 0.5, "origin": [0, 0, 0.5],
//!       "material": { "diffuse": [0.8, 0.2, 0.2] } },
//!     { "type": "plane", "material": { "diffuse": "floor.png", "glow": 0.1 } }
//!   ]
//! }
//! ```

use std::fs;
use std::path::Path;

use crate::camera::Camera;
use crate::error::SceneError;
use crate::geometry::GeometrySet;
use crate::math::{deg_to_rad, Vec3};

/// Where the camera sits; the aspect ratio comes from the output resolution.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct View {
	pub origin: Vec3,
	pub target: Vec3,
	/// Horizontal field of view, in degrees
	pub fov: f64,
}

impl Default for View {
	fn default() -> View {
		View {
			origin: Vec3::new(0.0, -2.0, 0.5),
			target: Vec3::new(0.0, 0.0, 0.5),
			fov: 90.0,
		}
	}
}

impl View {
	pub fn camera(&self, aspect: f64) -> Camera {
		Camera::new(self.origin, self.target, deg_to_rad(self.fov), aspect)
	}
}

pub struct Scene {
	pub world: GeometrySet,
	pub view: View,
}

/// Read a scene file. Texture paths are relative to the file's directory.
pub fn load_scene<P: AsRef<Path>>(path: P) -> Result<Scene, SceneError> {
	let path = path.as_ref();
	let text = fs::read_to_string(path)
		.map_err(|source| SceneError::Io { path: path.to_path_buf(), source })?;
	let dir = path.parent().unwrap_or_else(|| Path::new("."));
	let scene = parse_scene(&text, dir)?;
	log::info!("loaded scene {} ({} objects)", path.display(), scene.world.len());
	Ok(scene)
}

pub fn parse_scene(text: &str, dir: &Path) -> Result<Scene, SceneError> {
	let desc: json::Scene = serde_json::from_str(text)?;
	desc.convert(dir)
}

mod json {
	use std::path::Path;

	use serde_derive::Deserialize;

	use crate::error::SceneError;
	use crate::geometry::{self, GeometrySet, Shape};
	use crate::math::{self, deg_to_rad};
	use crate::mesh::Mesh;
	use crate::{material, primitive, texture};

	#[derive(Deserialize, Debug, Copy, Clone)]
	#[serde(untagged)]
	pub enum Vec3 {
		Thrice(f64),
		Explicit(f64, f64, f64),
	}

	#[derive(Deserialize, Debug)]
	pub struct Scene {
		objects: Vec<Object>,
		#[serde(default)]
		camera: Option<Camera>,
	}

	#[derive(Deserialize, Debug)]
	struct Camera {
		origin: Option<Vec3>,
		target: Option<Vec3>,
		fov: Option<f64>,
	}

	#[derive(Deserialize, Debug)]
	struct Object {
		#[serde(flatten)]
		shape: Primitive,
		material: Material,
		origin: Option<Vec3>,
		/// Degrees about x, then y, then z
		rotation: Option<Vec3>,
	}

	#[derive(Deserialize, Debug)]
	#[serde(tag = "type", rename_all = "snake_case")]
	enum Primitive {
		Sphere {
			#[serde(default = "default_radius")]
			radius: f64,
		},
		Cylinder {
			#[serde(default = "default_radius")]
			radius: f64,
			#[serde(default = "default_height")]
			height: f64,
		},
		Plane {
			normal: Option<Vec3>,
		},
		Torus {
			#[serde(default = "default_torus_radius")]
			radius: f64,
			#[serde(default = "default_torus_radius2")]
			radius2: f64,
		},
		TorusKnot { p: i32, q: i32, n: usize, m: usize },
	}

	fn default_radius() -> f64 { 0.5 }
	fn default_height() -> f64 { 1.0 }
	fn default_torus_radius() -> f64 { 0.375 }
	fn default_torus_radius2() -> f64 { 0.125 }
	fn default_checker_res() -> f64 { 10.0 }

	#[derive(Deserialize, Debug)]
	struct Material {
		diffuse: Option<Texture>,
		reflective: Option<Texture>,
		glow: Option<Texture>,
		#[serde(default)]
		fuzz: f64,
	}

	#[derive(Deserialize, Debug)]
	#[serde(untagged)]
	enum Texture {
		Constant(Vec3),
		Procedural(ProceduralTexture),
		Bitmap(String),
	}

	#[derive(Deserialize, Debug)]
	#[serde(tag = "type", rename_all = "snake_case")]
	enum ProceduralTexture {
		Checker {
			on_color: Option<Vec3>,
			off_color: Option<Vec3>,
			#[serde(default = "default_checker_res")]
			res_u: f64,
			#[serde(default = "default_checker_res")]
			res_v: f64,
		},
		Mandelbrot,
	}

	fn invalid(object: &'static str, reason: String) -> SceneError {
		SceneError::Invalid { object, reason }
	}

	fn positive(object: &'static str, name: &str, v: f64) -> Result<f64, SceneError> {
		if v > 0.0 && v.is_finite() {
			Ok(v)
		} else {
			Err(invalid(object, format!("{} must be positive, got {}", name, v)))
		}
	}

	impl Vec3 {
		pub fn convert(self) -> math::Vec3 {
			match self {
				Vec3::Thrice(v) => math::Vec3::thrice(v),
				Vec3::Explicit(x, y, z) => math::Vec3 { x, y, z },
			}
		}
	}

	impl Scene {
		pub fn convert(self, dir: &Path) -> Result<super::Scene, SceneError> {
			let mut world = GeometrySet::new();
			for o in self.objects {
				world.add(o.convert(dir)?);
			}
			let view = match self.camera {
				Some(c) => c.convert()?,
				None => super::View::default(),
			};
			Ok(super::Scene { world, view })
		}
	}

	impl Camera {
		fn convert(self) -> Result<super::View, SceneError> {
			let default = super::View::default();
			let view = super::View {
				origin: self.origin.map_or(default.origin, Vec3::convert),
				target: self.target.map_or(default.target, Vec3::convert),
				fov: self.fov.unwrap_or(default.fov),
			};
			if (view.target - view.origin).length_squared() == 0.0 {
				return Err(invalid("camera", "origin and target coincide".to_string()));
			}
			if !(view.fov > 0.0 && view.fov < 180.0) {
				return Err(invalid("camera", format!("fov must be within ]0, 180[ degrees, got {}", view.fov)));
			}
			Ok(view)
		}
	}

	impl Object {
		fn convert(self, dir: &Path) -> Result<geometry::Object, SceneError> {
			let shape = self.shape.convert()?;
			let mut transform = math::Transform::identity();
			if let Some(r) = self.rotation {
				let r = r.convert();
				transform = transform
					.rotate_x(deg_to_rad(r.x))
					.rotate_y(deg_to_rad(r.y))
					.rotate_z(deg_to_rad(r.z));
			}
			if let Some(o) = self.origin {
				transform = transform.translate(o.convert());
			}
			Ok(geometry::Object::new(shape, self.material.convert(dir)?).with_transform(transform))
		}
	}

	impl Primitive {
		fn convert(self) -> Result<Shape, SceneError> {
			Ok(match self {
				Primitive::Sphere { radius } => {
					Shape::Sphere(primitive::Sphere::new(positive("sphere", "radius", radius)?))
				}
				Primitive::Cylinder { radius, height } => {
					Shape::Cylinder(primitive::Cylinder::new(
						positive("cylinder", "radius", radius)?,
						positive("cylinder", "height", height)?,
					))
				}
				Primitive::Plane { normal } => {
					let normal = normal.map_or(math::Vec3::new(0.0, 0.0, 1.0), Vec3::convert);
					if !(normal.length_squared() > 0.0) {
						return Err(invalid("plane", "normal must not be zero".to_string()));
					}
					Shape::Plane(primitive::Plane::new(normal))
				}
				Primitive::Torus { radius, radius2 } => {
					Shape::Torus(primitive::Torus::new(
						positive("torus", "radius", radius)?,
						positive("torus", "radius2", radius2)?,
					))
				}
				Primitive::TorusKnot { p, q, n, m } => Shape::Mesh(Mesh::torus_knot(p, q, n, m)?),
			})
		}
	}

	impl Material {
		fn convert(self, dir: &Path) -> Result<material::Material, SceneError> {
			let convert = |t: Option<Texture>| t.map(|t| t.convert(dir)).transpose();
			Ok(material::Material {
				diffuse: convert(self.diffuse)?,
				reflective: convert(self.reflective)?,
				glow: convert(self.glow)?,
				fuzz: self.fuzz,
			})
		}
	}

	impl Texture {
		fn convert(self, dir: &Path) -> Result<texture::Texture, SceneError> {
			Ok(match self {
				Texture::Constant(v) => texture::Texture::Constant(v.convert()),
				Texture::Procedural(ProceduralTexture::Checker { on_color, off_color, res_u, res_v }) => {
					texture::Texture::Checker {
						on_color: on_color.map_or(math::Vec3::thrice(1.0), Vec3::convert),
						off_color: off_color.map_or(math::Vec3::zero(), Vec3::convert),
						resolution: (res_u, res_v),
					}
				}
				Texture::Procedural(ProceduralTexture::Mandelbrot) => texture::Texture::Mandelbrot,
				Texture::Bitmap(file) => texture::Texture::Bitmap(texture::Image::load(dir.join(&file))?),
			})
		}
	}
}
