use crate::math::Vec3;

/// A finished (or in-progress, rescaled) image in linear color, row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
	pub width: usize,
	pub height: usize,
	pub pixels: Vec<Vec3>,
}

impl Frame {
	pub fn new(width: usize, height: usize) -> Frame {
		Frame { width, height, pixels: vec![Vec3::zero(); width * height] }
	}

	pub fn get(&self, x: usize, y: usize) -> Vec3 {
		self.pixels[y * self.width + x]
	}
}

/// Per-channel spread of the samples around their mean, scaled by 1/sqrt(N)
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct NoiseStats {
	pub avg: f64,
	pub max: f64,
}

/// Running per-pixel sums over all completed sample passes
pub struct Accumulator {
	width: usize,
	height: usize,
	sum: Vec<Vec3>,
	sum_sq: Vec<Vec3>,
	passes: u32,
}

impl Accumulator {
	pub fn new(width: usize, height: usize) -> Accumulator {
		Accumulator {
			width,
			height,
			sum: vec![Vec3::zero(); width * height],
			sum_sq: vec![Vec3::zero(); width * height],
			passes: 0,
		}
	}

	pub fn passes(&self) -> u32 {
		self.passes
	}

	#[inline(always)]
	pub fn add(&mut self, x: usize, y: usize, color: Vec3) {
		let i = y * self.width + x;
		self.sum[i] += color;
		self.sum_sq[i] += color * color;
	}

	pub fn end_pass(&mut self) {
		self.passes += 1;
	}

	/// Current estimate, i.e. the sums scaled by 1 / passes. The sums
	/// themselves are left untouched.
	pub fn snapshot(&self) -> Frame {
		let scale = if self.passes > 0 { 1.0 / self.passes as f64 } else { 0.0 };
		Frame {
			width: self.width,
			height: self.height,
			pixels: self.sum.iter().map(|&s| s * scale).collect(),
		}
	}

	pub fn noise(&self) -> NoiseStats {
		if self.passes == 0 || self.sum.is_empty() {
			return NoiseStats::default();
		}
		let n = self.passes as f64;
		let mut total = 0.0;
		let mut max: f64 = 0.0;
		for (&s, &sq) in self.sum.iter().zip(self.sum_sq.iter()) {
			let mean = s / n;
			let var = sq / n - mean * mean;
			for &c in &var.to_array() {
				let noise = c / n.sqrt();
				total += noise;
				max = max.max(noise);
			}
		}
		NoiseStats { avg: total / (3 * self.sum.len()) as f64, max }
	}

	/// Final normalized image and its noise estimate
	pub fn finish(&self) -> (Frame, NoiseStats) {
		(self.snapshot(), self.noise())
	}
}
