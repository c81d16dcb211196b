use std::path::Path;

use image::{ColorType, ImageFormat};
use rayon::prelude::*;

use crate::accumulator::Frame;
use crate::error::OutputError;

/// Map a linear channel value to 8 bits after `v^(1/gamma)`.
/// Non-positive and NaN values give 0, anything at or above 1 gives 255.
#[inline]
pub fn quantize(v: f64, gamma: f64) -> u8 {
	let x = v.powf(1.0 / gamma);
	if !(x > 0.0) {
		0
	} else if x >= 1.0 {
		255
	} else {
		(x * 256.0) as u8
	}
}

/// Interleaved RGB bytes, row-major
pub fn frame_to_rgb8(frame: &Frame, gamma: f64) -> Vec<u8> {
	let mut bytes = vec![0; frame.pixels.len() * 3];
	frame.pixels.par_iter().zip(bytes.par_chunks_mut(3)).for_each(|(&p, rgb)| {
		rgb[0] = quantize(p.x, gamma);
		rgb[1] = quantize(p.y, gamma);
		rgb[2] = quantize(p.z, gamma);
	});
	bytes
}

/// Pick the encoder from the file extension (png, bmp, tga, jpg)
pub fn image_format(path: &Path) -> Result<ImageFormat, OutputError> {
	let ext = path.extension()
		.and_then(|e| e.to_str())
		.map(|e| e.to_ascii_lowercase());
	match ext.as_deref() {
		Some("png") => Ok(ImageFormat::Png),
		Some("bmp") => Ok(ImageFormat::Bmp),
		Some("tga") => Ok(ImageFormat::Tga),
		Some("jpg") | Some("jpeg") => Ok(ImageFormat::Jpeg),
		_ => Err(OutputError::UnsupportedExtension(path.to_path_buf())),
	}
}

pub fn write_image<P: AsRef<Path>>(path: P, frame: &Frame, gamma: f64) -> Result<(), OutputError> {
	let path = path.as_ref();
	let format = image_format(path)?;
	let bytes = frame_to_rgb8(frame, gamma);
	image::save_buffer_with_format(path, &bytes, frame.width as u32, frame.height as u32, ColorType::Rgb8, format)
		.map_err(|source| OutputError::Encode { path: path.to_path_buf(), source })?;
	log::info!("wrote {}x{} image to {}", frame.width, frame.height, path.display());
	Ok(())
}
