use rand::Rng;

use crate::math::*;
use crate::texture::Texture;
use crate::warp::*;

/// Continuation of a path after a surface interaction
#[derive(Copy, Clone, Debug)]
pub struct Scatter {
	pub direction: Vec3,
	/// Color multiplier applied to everything gathered along `direction`
	pub attenuation: Vec3,
}

/// Surface response made of optional parts. Which textures are present
/// decides the behavior: diffuse, reflective, both, glowing, or none of them
/// (a perfect absorber).
#[derive(Default)]
pub struct Material {
	pub diffuse: Option<Texture>,
	pub reflective: Option<Texture>,
	pub glow: Option<Texture>,
	/// Roughness of the reflective part; 0 is a perfect mirror
	pub fuzz: f64,
}

impl Material {
	pub fn diffuse(albedo: Texture) -> Material {
		Material { diffuse: Some(albedo), ..Default::default() }
	}

	pub fn mirror(albedo: Texture, fuzz: f64) -> Material {
		Material { reflective: Some(albedo), fuzz, ..Default::default() }
	}

	pub fn emitter(glow: Texture) -> Material {
		Material { glow: Some(glow), ..Default::default() }
	}

	pub fn with_glow(mut self, glow: Texture) -> Material {
		self.glow = Some(glow);
		self
	}

	pub fn has_diffuse(&self) -> bool {
		self.diffuse.is_some()
	}

	pub fn has_reflective(&self) -> bool {
		self.reflective.is_some()
	}

	/// Emitted radiance, independent of the incoming direction
	pub fn glow(&self, uv: (f64, f64)) -> Vec3 {
		match self.glow {
			Some(ref tex) => tex.eval(uv),
			None => Vec3::zero(),
		}
	}

	/// Diffuse bounce: the normal pushed by a random unit vector.
	pub fn scatter_diffuse<R: Rng>(&self, normal: Vec3, uv: (f64, f64), rng: &mut R) -> Option<Scatter> {
		let albedo = self.diffuse.as_ref()?;
		let d = normal + random_sphere(rng);
		// the sample can land on -normal
		let direction = if d.length_squared() > 1e-12 { d.normalized() } else { normal };
		Some(Scatter { direction, attenuation: albedo.eval(uv) })
	}

	/// Mirror bounce, blurred by `fuzz`. Directions that end up under the
	/// surface give no scatter at all.
	pub fn scatter_reflective<R: Rng>(&self, dir_in: Vec3, normal: Vec3, uv: (f64, f64), rng: &mut R) -> Option<Scatter> {
		let albedo = self.reflective.as_ref()?;
		let mirrored = dir_in.normalized().reflect(normal);
		let direction = (mirrored + self.fuzz * random_sphere(rng)).normalized();
		if !(Vec3::dot(direction, normal) > 0.0) {
			return None;
		}
		Some(Scatter { direction, attenuation: albedo.eval(uv) })
	}

	/// One continuation per call. With both parts present a fair coin picks
	/// the branch, and the attenuation is doubled to compensate.
	pub fn scatter<R: Rng>(&self, dir_in: Vec3, normal: Vec3, uv: (f64, f64), rng: &mut R) -> Option<Scatter> {
		match (self.has_diffuse(), self.has_reflective()) {
			(true, true) => {
				let sample = if bernoulli(rng, 0.5) {
					self.scatter_diffuse(normal, uv, rng)
				} else {
					self.scatter_reflective(dir_in, normal, uv, rng)
				};
				sample.map(|s| Scatter { attenuation: s.attenuation * 2.0, ..s })
			}
			(true, false) => self.scatter_diffuse(normal, uv, rng),
			(false, true) => self.scatter_reflective(dir_in, normal, uv, rng),
			(false, false) => None,
		}
	}
}
