use std::fs;
use std::path::PathBuf;

use tracer::camera::Camera;
use tracer::geometry::{GeometrySet, Object, Shape};
use tracer::integrator::TraceSettings;
use tracer::material::Material;
use tracer::math::{deg_to_rad, Transform, Vec3};
use tracer::primitive::{Plane, Sphere};
use tracer::texture::Texture;
use tracer::{output, render, scene, RenderSettings};

fn settings(width: usize, height: usize, samples: u32, max_depth: i32) -> RenderSettings {
	RenderSettings {
		width,
		height,
		samples,
		seed: 1234,
		jitter: false,
		trace: TraceSettings { max_depth, ..Default::default() },
		..Default::default()
	}
}

/// Fresh directory under the system temp dir
fn scratch_dir(name: &str) -> PathBuf {
	let dir = std::env::temp_dir().join(format!("tracer-{}-{}", name, std::process::id()));
	fs::create_dir_all(&dir).unwrap();
	dir
}

#[test]
fn uniform_plane_is_uniform() {
	// seen from above, the glow is all there is: diffuse bounces escape
	let world: GeometrySet = vec![
		Object::new(
			Shape::Plane(Plane::new(Vec3::new(0.0, 0.0, 1.0))),
			Material::diffuse(Texture::gray(0.5)).with_glow(Texture::gray(0.5)),
		),
	].into_iter().collect();
	let settings = settings(16, 12, 1, 10);
	let camera = Camera::new(Vec3::new(0.0, 0.0, 1.0), Vec3::zero(), deg_to_rad(90.0), settings.aspect());

	let out = render(&world, &camera, &settings, None);
	assert_eq!(out.stats.passes, 1);
	for &p in &out.frame.pixels {
		assert!((p - Vec3::thrice(0.5)).length() < 1e-12, "{:?}", p);
	}
	assert!(out.noise.max.abs() < 1e-12);
}

#[test]
fn emissive_sphere_is_solid_red_at_any_depth() {
	let red = Vec3::new(1.0, 0.0, 0.0);
	let world: GeometrySet = vec![
		Object::new(Shape::Sphere(Sphere::new(0.5)), Material::emitter(Texture::Constant(red)))
			.with_transform(Transform::identity().translate(Vec3::new(0.0, 0.0, 0.5))),
	].into_iter().collect();

	for &depth in &[0, 5] {
		let settings = settings(9, 9, 2, depth);
		let view = scene::View::default();
		let camera = view.camera(settings.aspect());
		let out = render(&world, &camera, &settings, None);

		assert_eq!(out.frame.get(4, 4), red);
		// corners see past the sphere
		assert_eq!(out.frame.get(0, 0), Vec3::zero());
		assert_eq!(out.frame.get(8, 8), Vec3::zero());
		assert!(out.frame.pixels.iter().all(|&p| p == red || p == Vec3::zero()));
	}
}

#[test]
fn closed_mirror_respects_max_depth() {
	let world: GeometrySet = vec![
		Object::new(Shape::Sphere(Sphere::new(3.0)), Material::mirror(Texture::gray(1.0), 0.1)),
	].into_iter().collect();
	for &depth in &[0, 4, 12] {
		let mut settings = settings(4, 4, 2, depth);
		settings.jitter = true;
		let camera = Camera::new(Vec3::zero(), Vec3::new(0.0, 1.0, 0.0), deg_to_rad(90.0), 1.0);
		let out = render(&world, &camera, &settings, None);
		assert!(out.stats.deepest <= depth as u32);
		assert!(out.stats.rays <= (depth as u64 + 1) * 2 * 16);
	}
}

#[test]
fn scene_file_render_and_write() {
	let dir = scratch_dir("scene");
	image::RgbImage::from_pixel(2, 2, image::Rgb([255, 255, 255]))
		.save(dir.join("white.png"))
		.unwrap();
	let scene_path = dir.join("plane.json");
	fs::write(&scene_path, r#"{
		"camera": { "origin": [0, 0, 1], "target": [0, 0, 0], "fov": 60 },
		"objects": [
			{ "type": "plane", "material": { "glow": "white.png", "diffuse": 0.3 } }
		]
	}"#).unwrap();

	let scene = scene::load_scene(&scene_path).unwrap();
	let settings = settings(8, 6, 3, 4);
	let camera = scene.view.camera(settings.aspect());
	let out = render(&scene.world, &camera, &settings, None);
	for &p in &out.frame.pixels {
		assert!((p - Vec3::thrice(1.0)).length() < 1e-9, "{:?}", p);
	}

	let image_path = dir.join("out.png");
	output::write_image(&image_path, &out.frame, settings.gamma).unwrap();
	let written = image::open(&image_path).unwrap().to_rgb8();
	assert_eq!(written.dimensions(), (8, 6));
	assert!(written.pixels().all(|p| p.0 == [255, 255, 255]));

	assert!(output::write_image(dir.join("out.exr"), &out.frame, settings.gamma).is_err());
	fs::remove_dir_all(&dir).ok();
}
