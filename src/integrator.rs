use crate::geometry::*;
use crate::math::*;
use crate::warp::*;

/// How a material with several scattering parts continues a path
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ScatterMode {
	/// Follow one randomly chosen part per bounce
	Stochastic,
	/// Follow the diffuse part, then the reflective part, on every bounce
	Additive,
}

/// Radiance returned by rays leaving the scene
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Background {
	Black,
	/// White at the horizon blending to light blue straight up (+Z)
	Sky,
}

impl Background {
	pub fn eval(&self, direction: Vec3) -> Vec3 {
		match *self {
			Background::Black => Vec3::zero(),
			Background::Sky => {
				let t = 0.5 * (direction.normalized().z + 1.0);
				lerp(Vec3::thrice(1.0), Vec3::new(0.5, 0.7, 1.0), t)
			}
		}
	}
}

#[derive(Clone, Debug)]
pub struct TraceSettings {
	/// Bounces after the primary hit; a path makes at most max_depth + 1
	/// intersection queries.
	pub max_depth: i32,
	pub roulette: bool,
	pub scatter: ScatterMode,
	pub background: Background,
}

impl Default for TraceSettings {
	fn default() -> TraceSettings {
		TraceSettings {
			max_depth: 10,
			roulette: true,
			scatter: ScatterMode::Stochastic,
			background: Background::Black,
		}
	}
}

/// Mutable state of a render: the random stream and some counters.
pub struct TraceContext {
	pub rng: Sampler,
	/// Intersection queries issued
	pub rays: u64,
	/// Deepest bounce that reached the scene, 0 being the primary ray
	pub deepest: u32,
}

impl TraceContext {
	pub fn new(seed: u64) -> TraceContext {
		TraceContext { rng: seeded(seed), rays: 0, deepest: 0 }
	}
}

pub struct Integrator<'a> {
	world: &'a GeometrySet,
	settings: TraceSettings,
}

impl<'a> Integrator<'a> {
	pub fn new(world: &'a GeometrySet, settings: TraceSettings) -> Integrator<'a> {
		Integrator { world, settings }
	}

	/// Estimate the radiance arriving along a camera ray
	pub fn radiance(&self, ray: Ray, ctx: &mut TraceContext) -> Vec3 {
		self.sample(ray, Vec3::thrice(1.0), self.settings.max_depth, ctx)
	}

	/// One sample of the light carried back along `ray`, already weighted by
	/// the path throughput `attenuation`.
	pub fn sample(&self, ray: Ray, attenuation: Vec3, depth: i32, ctx: &mut TraceContext) -> Vec3 {
		if depth < 0 {
			return Vec3::zero();
		}

		// russian roulette
		let mut attenuation = attenuation;
		if self.settings.roulette {
			let survival = attenuation.length();
			if survival < 1.0 {
				if !bernoulli(&mut ctx.rng, survival) {
					return Vec3::zero();
				}
				attenuation /= survival;
			}
		}

		ctx.rays += 1;
		let bounce = (self.settings.max_depth - depth).max(0) as u32;
		ctx.deepest = ctx.deepest.max(bounce);

		let mut hit = Hit::new();
		if !self.world.intersect(ray, &mut hit) {
			return attenuation * self.settings.background.eval(ray.direction);
		}
		let material = match hit.material {
			Some(m) => m,
			None => return Vec3::zero(),
		};

		// only possible with open or badly wound surfaces
		let mut normal = hit.normal;
		if Vec3::dot(normal, ray.direction) > 0.0 {
			normal = -normal;
		}

		let mut color = attenuation * material.glow(hit.uv);

		match self.settings.scatter {
			ScatterMode::Stochastic => {
				if let Some(s) = material.scatter(ray.direction, normal, hit.uv, &mut ctx.rng) {
					color += self.sample(Ray::new(hit.point, s.direction), attenuation * s.attenuation, depth - 1, ctx);
				}
			}
			ScatterMode::Additive => {
				if let Some(s) = material.scatter_diffuse(normal, hit.uv, &mut ctx.rng) {
					color += self.sample(Ray::new(hit.point, s.direction), attenuation * s.attenuation, depth - 1, ctx);
				}
				if let Some(s) = material.scatter_reflective(ray.direction, normal, hit.uv, &mut ctx.rng) {
					color += self.sample(Ray::new(hit.point, s.direction), attenuation * s.attenuation, depth - 1, ctx);
				}
			}
		}

		color
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::material::Material;
	use crate::primitive::Sphere;
	use crate::texture::Texture;

	fn world_of(material: Material, radius: f64) -> GeometrySet {
		vec![Object::new(Shape::Sphere(Sphere::new(radius)), material)].into_iter().collect()
	}

	fn settings(max_depth: i32, roulette: bool, scatter: ScatterMode) -> TraceSettings {
		TraceSettings { max_depth, roulette, scatter, background: Background::Black }
	}

	/// Camera-like ray from inside a sphere scene
	fn inner_ray() -> Ray {
		Ray::new(Vec3::new(0.1, -0.2, 0.05), Vec3::new(0.3, 1.0, 0.2))
	}

	#[test]
	fn negative_depth_is_black() {
		let world = world_of(Material::emitter(Texture::gray(1.0)), 1.0);
		let integrator = Integrator::new(&world, TraceSettings::default());
		let mut ctx = TraceContext::new(0);
		assert_eq!(integrator.sample(inner_ray(), Vec3::thrice(1.0), -1, &mut ctx), Vec3::zero());
		assert_eq!(ctx.rays, 0);
	}

	#[test]
	fn miss_returns_background() {
		let world = GeometrySet::new();
		let mut ctx = TraceContext::new(0);
		let up = Ray::new(Vec3::zero(), Vec3::new(0.0, 0.0, 1.0));
		let black = Integrator::new(&world, TraceSettings::default());
		assert_eq!(black.radiance(up, &mut ctx), Vec3::zero());
		let sky = Integrator::new(&world, TraceSettings { background: Background::Sky, ..Default::default() });
		assert!((sky.radiance(up, &mut ctx) - Vec3::new(0.5, 0.7, 1.0)).length() < 1e-12);
	}

	#[test]
	fn emitter_is_its_glow_at_any_depth() {
		let red = Vec3::new(1.0, 0.0, 0.0);
		let world = world_of(Material::emitter(Texture::Constant(red)), 1.0);
		let ray = Ray::new(Vec3::new(0.0, -5.0, 0.0), Vec3::new(0.0, 1.0, 0.0));
		for &depth in &[0, 1, 10] {
			let integrator = Integrator::new(&world, settings(depth, true, ScatterMode::Stochastic));
			let mut ctx = TraceContext::new(9);
			assert_eq!(integrator.radiance(ray, &mut ctx), red);
		}
	}

	#[test]
	fn recursion_is_bounded_in_closed_mirror() {
		let world = world_of(Material::mirror(Texture::gray(1.0), 0.0), 1.0);
		for &depth in &[0, 3, 7] {
			let integrator = Integrator::new(&world, settings(depth, true, ScatterMode::Stochastic));
			let mut ctx = TraceContext::new(5);
			assert_eq!(integrator.radiance(inner_ray(), &mut ctx), Vec3::zero());
			assert_eq!(ctx.deepest, depth as u32);
			assert_eq!(ctx.rays, depth as u64 + 1);
		}
	}

	#[test]
	fn depth_above_the_limit_counts_as_primary() {
		let world = world_of(Material::emitter(Texture::gray(1.0)), 1.0);
		let integrator = Integrator::new(&world, settings(2, false, ScatterMode::Stochastic));
		let mut ctx = TraceContext::new(0);
		assert_eq!(integrator.sample(inner_ray(), Vec3::thrice(1.0), 5, &mut ctx), Vec3::thrice(1.0));
		assert_eq!(ctx.deepest, 0);
	}

	#[test]
	fn closed_diffuse_glow_converges_without_roulette() {
		// every bounce hits the sphere again: L = sum_k 0.5 * 0.5^k
		let world = world_of(Material::diffuse(Texture::gray(0.5)).with_glow(Texture::gray(0.5)), 1.0);
		let depth = 40;
		let integrator = Integrator::new(&world, settings(depth, false, ScatterMode::Stochastic));
		let mut ctx = TraceContext::new(1);
		let expected = 1.0 - 0.5f64.powi(depth + 1);
		let l = integrator.radiance(inner_ray(), &mut ctx);
		assert!((l - Vec3::thrice(expected)).length() < 1e-12, "{:?}", l);
	}

	#[test]
	fn russian_roulette_is_unbiased() {
		let world = world_of(Material::diffuse(Texture::gray(0.5)).with_glow(Texture::gray(0.5)), 1.0);
		let depth = 40;
		let expected = 1.0 - 0.5f64.powi(depth + 1);

		let integrator = Integrator::new(&world, settings(depth, true, ScatterMode::Stochastic));
		let n = 20000;
		let mut sum = Vec3::zero();
		let mut rays = 0;
		for seed in 0..n {
			let mut ctx = TraceContext::new(seed);
			sum += integrator.radiance(inner_ray(), &mut ctx);
			rays += ctx.rays;
		}
		let mean = sum / n as f64;
		assert!((mean.avg() - expected).abs() < 0.02, "mean {:?}", mean);
		// roulette cuts paths well short of the depth bound
		assert!((rays as f64 / n as f64) < 5.0);
	}

	#[test]
	fn scatter_modes_share_the_expectation() {
		// diffuse + mirror inside a closed sphere: each bounce passes 0.6 on
		let material = || Material {
			diffuse: Some(Texture::gray(0.3)),
			reflective: Some(Texture::gray(0.3)),
			glow: Some(Texture::gray(0.2)),
			fuzz: 0.0,
		};
		let world = world_of(material(), 1.0);
		let depth = 10;
		let expected = 0.2 * (1.0 - 0.6f64.powi(depth + 1)) / 0.4;

		for &mode in &[ScatterMode::Stochastic, ScatterMode::Additive] {
			let integrator = Integrator::new(&world, settings(depth, false, mode));
			let mut ctx = TraceContext::new(2);
			let l = integrator.radiance(inner_ray(), &mut ctx);
			assert!((l.avg() - expected).abs() < 1e-9, "{:?}: {:?}", mode, l);
		}
	}

	#[test]
	fn same_seed_same_sample() {
		let world = world_of(Material::diffuse(Texture::gray(0.5)).with_glow(Texture::gray(0.5)), 1.0);
		let integrator = Integrator::new(&world, TraceSettings::default());
		let a = integrator.radiance(inner_ray(), &mut TraceContext::new(77));
		let b = integrator.radiance(inner_ray(), &mut TraceContext::new(77));
		assert_eq!(a, b);
	}
}
