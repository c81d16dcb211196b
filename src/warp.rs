use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::math::*;

/// Generator threaded through every random decision of a render.
pub type Sampler = SmallRng;

pub fn seeded(seed: u64) -> Sampler {
	SmallRng::seed_from_u64(seed)
}

/// Warp a sample from [0:1[² on the unit sphere
pub fn uniform_sphere((u, v): (f64, f64)) -> Vec3 {
	let z = 1.0 - 2.0 * u;
	let r = (1.0 - z * z).max(0.0).sqrt();
	let phi = 2.0 * PI * v;
	Vec3::new(r * phi.cos(), r * phi.sin(), z)
}

/// Uniformly distributed point on the unit sphere
pub fn random_sphere<R: Rng>(rng: &mut R) -> Vec3 {
	uniform_sphere((rng.gen(), rng.gen()))
}

/// True with probability `p`, clamped to [0, 1]. NaN never succeeds.
pub fn bernoulli<R: Rng>(rng: &mut R, p: f64) -> bool {
	if !(p > 0.0) {
		return false;
	}
	rng.gen::<f64>() < p
}
