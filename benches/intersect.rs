use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};

use tracer::geometry::{Hit, Surface};
use tracer::math::{Ray, Vec3};
use tracer::mesh::Mesh;
use tracer::primitive::{Sphere, Torus};

/// Rays fanning out from in front of the origin, some of them missing
fn rays(n: usize) -> Vec<Ray> {
	(0..n)
		.map(|i| {
			let a = i as f64 / n as f64;
			let target = Vec3::new(0.8 * (a * 7.0).sin(), 0.0, 0.8 * (a * 13.0).cos());
			let origin = Vec3::new(0.05, -2.0, 0.1);
			Ray::new(origin, target - origin)
		})
		.collect()
}

fn intersect_all<S: Surface>(surface: &S, rays: &[Ray]) -> usize {
	rays.iter()
		.filter(|&&ray| {
			let mut hit = Hit::new();
			surface.intersect(ray, &mut hit)
		})
		.count()
}

fn intersect(c: &mut Criterion) {
	let rays = rays(1024);
	let sphere = Sphere::new(0.5);
	let torus = Torus::new(0.375, 0.125);
	let knot = Mesh::torus_knot(2, 3, 128, 12).unwrap();

	c.bench_function("sphere", |b| b.iter(|| intersect_all(black_box(&sphere), &rays)));
	c.bench_function("torus", |b| b.iter(|| intersect_all(black_box(&torus), &rays)));
	c.bench_function("torus_knot", |b| b.iter(|| intersect_all(black_box(&knot), &rays)));
}

criterion_group!(benches, intersect);
criterion_main!(benches);
