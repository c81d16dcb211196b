use std::path::Path;

use crate::error::SceneError;
use crate::math::Vec3;

/// Gamma used to turn 8-bit texture files into linear color
pub const DECODE_GAMMA: f64 = 2.2;

pub enum Texture {
	Constant(Vec3),
	Checker { on_color: Vec3, off_color: Vec3, resolution: (f64, f64) },
	Mandelbrot,
	Bitmap(Image),
}

const MANDELBROT_ITERATIONS: usize = 20;
const MANDELBROT_PALETTE: [Vec3; 7] = [
	Vec3::new(0.0, 0.0, 0.2),
	Vec3::new(0.0, 0.0, 0.4),
	Vec3::new(0.0, 0.2, 0.4),
	Vec3::new(0.0, 0.4, 0.2),
	Vec3::new(0.0, 0.4, 0.0),
	Vec3::new(0.0, 0.2, 0.0),
	Vec3::new(0.0, 0.2, 0.2),
];

impl Texture {
	pub fn gray(v: f64) -> Texture {
		Texture::Constant(Vec3::thrice(v))
	}

	pub fn eval(&self, (u, v): (f64, f64)) -> Vec3 {
		match *self {
			Texture::Constant(c) => c,
			Texture::Checker { on_color, off_color, resolution } => {
				let ui = (resolution.0 * u).floor() as i64;
				let vi = (resolution.1 * v).floor() as i64;
				let on = (ui ^ vi) & 1 != 0;
				if on { on_color } else { off_color }
			},
			Texture::Mandelbrot => mandelbrot((u, v)),
			Texture::Bitmap(ref img) => {
				img.eval((u, v))
			},
		}
	}
}

/// Escape-time coloring of the point `u + iv`
fn mandelbrot((u, v): (f64, f64)) -> Vec3 {
	let (mut zr, mut zi) = (0.0, 0.0);
	for iter in 0..MANDELBROT_ITERATIONS {
		let next = zr * zr - zi * zi + u;
		zi = 2.0 * zr * zi + v;
		zr = next;
		if zr * zr + zi * zi > 4.0 {
			return MANDELBROT_PALETTE[iter % MANDELBROT_PALETTE.len()];
		}
	}
	Vec3::zero()
}

pub struct Image {
	pub width: usize,
	pub height: usize,
	pixels: Vec<Vec3>,
}

impl Image {
	pub fn new(width: usize, height: usize, pixels: Vec<Vec3>) -> Result<Image, SceneError> {
		if width == 0 || height == 0 || pixels.len() != width * height {
			return Err(SceneError::Invalid {
				object: "image",
				reason: format!("{} pixels for a {}x{} image", pixels.len(), width, height),
			});
		}
		Ok(Image { width, height, pixels })
	}

	/// Load an 8-bit image file as linear color
	pub fn load<P: AsRef<Path>>(filepath: P) -> Result<Image, SceneError> {
		let path = filepath.as_ref();
		let img = image::open(path)
			.map_err(|source| SceneError::Texture { path: path.to_path_buf(), source })?
			.to_rgb8();
		let (width, height) = img.dimensions();
		log::debug!("loaded texture {} ({}x{})", path.display(), width, height);

		Image::new(width as usize, height as usize, img.pixels().map(|p| gamma_decode(p.0)).collect())
	}

	pub fn get(&self, x: usize, y: usize) -> Vec3 {
		self.pixels[self.width * y + x]
	}

	/// Nearest-pixel lookup; coordinates outside [0, 1[ repeat the image.
	pub fn eval(&self, (u, v): (f64, f64)) -> Vec3 {
		let w = self.width as i64;
		let h = self.height as i64;
		let x = modulo((u * w as f64).floor() as i64, w);
		let y = modulo((v * h as f64).floor() as i64, h);
		self.get(x, y)
	}
}

/// Non-negative remainder of a divided by b.
fn modulo(a: i64, b: i64) -> usize {
	a.rem_euclid(b) as usize
}

fn gamma_decode([r, g, b]: [u8; 3]) -> Vec3 {
	let f = |v| (v as f64 / 255.0).powf(DECODE_GAMMA);
	Vec3::new(f(r), f(g), f(b))
}
