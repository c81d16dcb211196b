pub mod accumulator;
pub mod camera;
pub mod error;
pub mod geometry;
pub mod integrator;
pub mod material;
pub mod math;
pub mod mesh;
pub mod output;
pub mod preview;
pub mod primitive;
pub mod scene;
pub mod texture;
pub mod warp;

use std::time::{Duration, Instant};

use rand::Rng;

use accumulator::*;
use camera::Camera;
use geometry::GeometrySet;
use integrator::*;
use preview::PreviewSender;

#[derive(Clone, Debug)]
pub struct RenderSettings {
	pub width: usize,
	pub height: usize,
	/// Sample passes, one sample per pixel each
	pub samples: u32,
	pub seed: u64,
	/// Random sub-pixel offsets; pixel centers otherwise
	pub jitter: bool,
	/// Applied when converting to 8 bits
	pub gamma: f64,
	pub trace: TraceSettings,
}

impl Default for RenderSettings {
	fn default() -> RenderSettings {
		RenderSettings {
			width: 640,
			height: 480,
			samples: 100,
			seed: 0,
			jitter: true,
			gamma: 2.2,
			trace: TraceSettings::default(),
		}
	}
}

impl RenderSettings {
	pub fn aspect(&self) -> f64 {
		self.width as f64 / self.height as f64
	}
}

#[derive(Clone, Debug, Default)]
pub struct RenderStats {
	pub passes: u32,
	pub rays: u64,
	pub deepest: u32,
	/// NaN samples left out of the image
	pub dropped: u64,
	pub trace_time: Duration,
	/// Time spent building and handing over preview frames
	pub display_time: Duration,
}

impl RenderStats {
	pub fn rays_per_pixel(&self, width: usize, height: usize) -> f64 {
		let primary = self.passes as u64 * (width * height) as u64;
		if primary == 0 { 0.0 } else { self.rays as f64 / primary as f64 }
	}
}

pub struct Rendered {
	pub frame: Frame,
	pub noise: NoiseStats,
	pub stats: RenderStats,
}

/// Progressive render: one sample per pixel per pass, with a snapshot offered
/// to `preview` after each pass. Stops early when the preview asks to quit; the
/// image is normalized by the passes actually completed.
pub fn render(world: &GeometrySet, camera: &Camera, settings: &RenderSettings, preview: Option<&PreviewSender>) -> Rendered {
	let (width, height) = (settings.width, settings.height);
	let integrator = Integrator::new(world, settings.trace.clone());
	let mut ctx = TraceContext::new(settings.seed);
	let mut acc = Accumulator::new(width, height);
	let mut stats = RenderStats::default();

	log::info!("start rendering {}x{} with {} samples per pixel (seed {})", width, height, settings.samples, settings.seed);

	for pass in 0..settings.samples {
		if preview.map_or(false, |p| p.quit_requested()) {
			log::info!("render stopped after {} of {} passes", pass, settings.samples);
			break;
		}

		let start = Instant::now();
		let mut dropped = 0;
		for y in 0..height {
			for x in 0..width {
				let (dx, dy) = if settings.jitter { (ctx.rng.gen(), ctx.rng.gen()) } else { (0.5, 0.5) };
				let ray = camera.ray((x as f64 + dx) / width as f64, (y as f64 + dy) / height as f64);
				let v = integrator.radiance(ray, &mut ctx);
				if v.has_nan() {
					dropped += 1;
				} else {
					acc.add(x, y, v);
				}
			}
		}
		acc.end_pass();
		stats.trace_time += start.elapsed();

		if dropped > 0 {
			log::warn!("pass {}: dropped {} NaN samples", pass + 1, dropped);
			stats.dropped += dropped;
		}
		log::debug!("pass {}/{} done, {} rays so far", pass + 1, settings.samples, ctx.rays);

		if let Some(p) = preview {
			let start = Instant::now();
			p.offer(acc.snapshot());
			stats.display_time += start.elapsed();
		}
	}

	stats.passes = acc.passes();
	stats.rays = ctx.rays;
	stats.deepest = ctx.deepest;

	let (frame, noise) = acc.finish();
	log::info!(
		"rendered {} spp in {:.3}s ({:.3}s per sample)",
		stats.passes,
		stats.trace_time.as_secs_f64(),
		stats.trace_time.as_secs_f64() / stats.passes.max(1) as f64,
	);

	Rendered { frame, noise, stats }
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::geometry::*;
	use crate::material::Material;
	use crate::math::*;
	use crate::primitive::*;
	use crate::texture::Texture;

	fn small(samples: u32) -> RenderSettings {
		RenderSettings { width: 8, height: 6, samples, ..Default::default() }
	}

	#[test]
	fn same_seed_same_image() {
		let world: GeometrySet = vec![
			Object::new(Shape::Sphere(Sphere::new(0.5)), Material::diffuse(Texture::gray(0.7))),
			Object::new(Shape::Plane(Plane::new(Vec3::new(0.0, 0.0, 1.0))), Material::emitter(Texture::gray(1.0)))
				.with_transform(Transform::identity().translate(Vec3::new(0.0, 0.0, 3.0))),
		].into_iter().collect();
		let settings = small(4);
		let camera = Camera::new(Vec3::new(0.0, -2.0, 0.5), Vec3::zero(), deg_to_rad(90.0), settings.aspect());

		let a = render(&world, &camera, &settings, None);
		let b = render(&world, &camera, &settings, None);
		assert_eq!(a.frame, b.frame);
		assert_eq!(a.stats.passes, 4);
		assert!(a.stats.rays >= 4 * 48);
	}

	#[test]
	fn quit_before_first_pass_gives_black_frame() {
		let world: GeometrySet = vec![
			Object::new(Shape::Sphere(Sphere::new(10.0)), Material::emitter(Texture::gray(1.0))),
		].into_iter().collect();
		let settings = small(10);
		let camera = Camera::new(Vec3::zero(), Vec3::new(0.0, 1.0, 0.0), deg_to_rad(90.0), settings.aspect());

		let (tx, rx) = preview::channel();
		rx.request_quit();
		let out = render(&world, &camera, &settings, Some(&tx));
		assert_eq!(out.stats.passes, 0);
		assert!(out.frame.pixels.iter().all(|&p| p == Vec3::zero()));
		assert!(rx.try_recv().is_none());
	}

	#[test]
	fn preview_sees_progress() {
		let world: GeometrySet = vec![
			Object::new(Shape::Sphere(Sphere::new(10.0)), Material::emitter(Texture::gray(0.25))),
		].into_iter().collect();
		let settings = small(3);
		let camera = Camera::new(Vec3::zero(), Vec3::new(0.0, 1.0, 0.0), deg_to_rad(90.0), settings.aspect());

		let (tx, rx) = preview::channel();
		let out = render(&world, &camera, &settings, Some(&tx));
		let last = rx.try_recv().unwrap();
		assert_eq!(last, out.frame);
		assert!(last.pixels.iter().all(|&p| (p - Vec3::thrice(0.25)).length() < 1e-12));
	}
}
