use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::LevelFilter;

use tracer::integrator::{Background, ScatterMode, TraceSettings};
use tracer::{output, scene, RenderSettings, Rendered};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
	Error,
	Warn,
	Info,
	Debug,
	Trace,
}

impl From<LogLevel> for LevelFilter {
	fn from(level: LogLevel) -> LevelFilter {
		match level {
			LogLevel::Error => LevelFilter::Error,
			LogLevel::Warn => LevelFilter::Warn,
			LogLevel::Info => LevelFilter::Info,
			LogLevel::Debug => LevelFilter::Debug,
			LogLevel::Trace => LevelFilter::Trace,
		}
	}
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Scatter {
	/// One randomly chosen branch per bounce
	Stochastic,
	/// Diffuse and reflective branches on every bounce
	Additive,
}

impl From<Scatter> for ScatterMode {
	fn from(s: Scatter) -> ScatterMode {
		match s {
			Scatter::Stochastic => ScatterMode::Stochastic,
			Scatter::Additive => ScatterMode::Additive,
		}
	}
}

#[derive(Parser, Debug)]
#[command(name = "render")]
#[command(about = "Progressive Monte-Carlo path tracer")]
struct Args {
	/// Scene description (JSON)
	scene: PathBuf,

	#[arg(long, default_value_t = 100, help = "Samples per pixel")]
	samples: u32,

	#[arg(long, default_value_t = 640, help = "Image width in pixels")]
	width: usize,

	#[arg(long, default_value_t = 480, help = "Image height in pixels")]
	height: usize,

	#[arg(short, long, help = "Output image (.png, .bmp, .tga or .jpg)")]
	output: Option<PathBuf>,

	#[arg(long, default_value_t = 10, help = "Maximum number of bounces")]
	depth: i32,

	#[arg(long, help = "Random seed; drawn at random when omitted")]
	seed: Option<u64>,

	#[arg(long, value_enum, default_value = "stochastic")]
	scatter: Scatter,

	#[arg(long, help = "Disable russian roulette path termination")]
	no_roulette: bool,

	#[arg(long, help = "Sample pixel centers only")]
	no_jitter: bool,

	#[arg(long, help = "Light escaping rays with a sky gradient instead of black")]
	sky: bool,

	#[arg(long, default_value_t = 2.2, help = "Output gamma")]
	gamma: f64,

	#[arg(long, help = "Do not open the preview window")]
	no_preview: bool,

	#[arg(long, value_enum, default_value = "info")]
	log_level: LogLevel,
}

impl Args {
	fn settings(&self) -> RenderSettings {
		RenderSettings {
			width: self.width,
			height: self.height,
			samples: self.samples,
			seed: self.seed.unwrap_or_else(rand::random),
			jitter: !self.no_jitter,
			gamma: self.gamma,
			trace: TraceSettings {
				max_depth: self.depth,
				roulette: !self.no_roulette,
				scatter: self.scatter.into(),
				background: if self.sky { Background::Sky } else { Background::Black },
			},
		}
	}
}

fn init_logger(level: LevelFilter) {
	env_logger::Builder::from_default_env()
		.filter_level(level)
		.init();
}

#[cfg(feature = "gui")]
fn render_with_preview(scene: scene::Scene, camera: tracer::camera::Camera, settings: RenderSettings) -> Result<Rendered> {
	let (tx, rx) = tracer::preview::channel();
	let gamma = settings.gamma;
	let worker = std::thread::spawn(move || tracer::render(&scene.world, &camera, &settings, Some(&tx)));
	// the window owns the main thread, the renderer runs beside it
	if let Err(e) = tracer::preview::run_window(rx, gamma) {
		log::warn!("preview failed, rendering continues without it: {}", e);
	}
	Ok(worker.join().map_err(|_| tracer::error::PreviewError::Panicked)?)
}

#[cfg(not(feature = "gui"))]
fn render_with_preview(scene: scene::Scene, camera: tracer::camera::Camera, settings: RenderSettings) -> Result<Rendered> {
	log::info!("built without the gui feature, no preview window");
	Ok(tracer::render(&scene.world, &camera, &settings, None))
}

fn main() -> Result<()> {
	let args = Args::parse();
	init_logger(args.log_level.into());

	if args.width == 0 || args.height == 0 {
		anyhow::bail!("resolution must be positive, got {}x{}", args.width, args.height);
	}
	// fail before rendering rather than after
	if let Some(ref path) = args.output {
		output::image_format(path)?;
	}

	let scene = scene::load_scene(&args.scene)
		.with_context(|| format!("failed to load scene {}", args.scene.display()))?;
	let settings = args.settings();
	let camera = scene.view.camera(settings.aspect());

	let rendered = if args.no_preview {
		tracer::render(&scene.world, &camera, &settings, None)
	} else {
		render_with_preview(scene, camera, settings.clone())?
	};

	let stats = &rendered.stats;
	log::info!(
		"{} rays ({:.2} per pixel and pass), deepest bounce {}",
		stats.rays,
		stats.rays_per_pixel(settings.width, settings.height),
		stats.deepest,
	);
	log::info!("noise: avg {:.1} ppm, max {:.1} ppm", rendered.noise.avg * 1e6, rendered.noise.max * 1e6);
	log::info!(
		"tracing {:.3}s, preview {:.3}s",
		stats.trace_time.as_secs_f64(),
		stats.display_time.as_secs_f64(),
	);
	if stats.dropped > 0 {
		log::warn!("{} NaN samples dropped", stats.dropped);
	}

	if let Some(ref path) = args.output {
		output::write_image(path, &rendered.frame, settings.gamma)
			.with_context(|| format!("failed to write {}", path.display()))?;
	}

	Ok(())
}
