use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while turning a scene file into geometry.
#[derive(Error, Debug)]
pub enum SceneError {
	#[error("cannot read scene file {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("malformed scene description: {0}")]
	Parse(#[from] serde_json::Error),

	#[error("cannot load texture {path}: {source}")]
	Texture {
		path: PathBuf,
		#[source]
		source: image::ImageError,
	},

	#[error("invalid {object}: {reason}")]
	Invalid { object: &'static str, reason: String },
}

/// Errors raised while encoding the final image.
#[derive(Error, Debug)]
pub enum OutputError {
	#[error("unknown image file extension for {0} (supported: png, bmp, tga, jpg)")]
	UnsupportedExtension(PathBuf),

	#[error("could not write image file {path}: {source}")]
	Encode {
		path: PathBuf,
		#[source]
		source: image::ImageError,
	},
}

/// Errors of the interactive preview surface.
#[derive(Error, Debug)]
pub enum PreviewError {
	#[error("display backend failure: {0}")]
	Backend(String),

	#[error("render thread panicked while previewing")]
	Panicked,
}
