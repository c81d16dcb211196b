//! Hand-off of in-progress frames from the render loop to a display.
//!
//! The channel holds a single frame. The renderer never waits on the
//! display: a frame that was not picked up yet is replaced by the newer one.
//! The display asks the renderer to stop through a shared flag, checked
//! between passes.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TrySendError};

use crate::accumulator::Frame;

pub fn channel() -> (PreviewSender, PreviewReceiver) {
	let (tx, rx) = crossbeam_channel::bounded(1);
	let quit = Arc::new(AtomicBool::new(false));
	let sender = PreviewSender { tx, stale: rx.clone(), quit: quit.clone() };
	(sender, PreviewReceiver { rx, quit })
}

pub struct PreviewSender {
	tx: Sender<Frame>,
	// used to evict the frame still waiting in the slot
	stale: Receiver<Frame>,
	quit: Arc<AtomicBool>,
}

impl PreviewSender {
	/// Publish `frame`, dropping any frame the display has not taken yet.
	pub fn offer(&self, frame: Frame) {
		match self.tx.try_send(frame) {
			Ok(()) => {}
			Err(TrySendError::Full(frame)) => {
				let _ = self.stale.try_recv();
				// single producer: the slot is free now
				let _ = self.tx.try_send(frame);
			}
			Err(TrySendError::Disconnected(_)) => {}
		}
	}

	pub fn quit_requested(&self) -> bool {
		self.quit.load(Ordering::Relaxed)
	}
}

/// Outcome of [`PreviewReceiver::wait`]
#[derive(Debug)]
pub enum Wait {
	Frame(Frame),
	/// Nothing new yet
	Idle,
	/// The renderer is gone and every frame was taken
	Finished,
}

pub struct PreviewReceiver {
	rx: Receiver<Frame>,
	quit: Arc<AtomicBool>,
}

impl PreviewReceiver {
	/// Block until a frame arrives. `None` once the renderer is gone and
	/// the slot is empty.
	pub fn recv(&self) -> Option<Frame> {
		self.rx.recv().ok()
	}

	/// Wait up to `timeout` for a frame.
	pub fn wait(&self, timeout: Duration) -> Wait {
		match self.rx.recv_timeout(timeout) {
			Ok(f) => Wait::Frame(f),
			Err(RecvTimeoutError::Timeout) => Wait::Idle,
			Err(RecvTimeoutError::Disconnected) => Wait::Finished,
		}
	}

	pub fn try_recv(&self) -> Option<Frame> {
		self.rx.try_recv().ok()
	}

	pub fn request_quit(&self) {
		self.quit.store(true, Ordering::Relaxed);
	}
}

/// Display frames in an SDL window until the user closes it (window close,
/// Escape or Q). The last frame stays on screen once the renderer finishes.
/// Closing early requests the renderer to stop.
#[cfg(feature = "gui")]
pub fn run_window(receiver: PreviewReceiver, gamma: f64) -> Result<(), crate::error::PreviewError> {
	use sdl2::event::Event;
	use sdl2::keyboard::Keycode;
	use sdl2::pixels::PixelFormatEnum;

	use crate::error::PreviewError;
	use crate::output::frame_to_rgb8;

	fn backend<E: std::fmt::Display>(e: E) -> PreviewError {
		PreviewError::Backend(e.to_string())
	}

	let first = match receiver.recv() {
		Some(f) => f,
		None => return Ok(()),
	};
	let (width, height) = (first.width, first.height);
	let mut frame = Some(first);

	// init a SDL window and a texture
	let sdl_context = sdl2::init().map_err(backend)?;
	let video_subsystem = sdl_context.video().map_err(backend)?;
	let window = video_subsystem.window("tracer", width as u32, height as u32).build().map_err(backend)?;
	let mut event_pump = sdl_context.event_pump().map_err(backend)?;
	let mut canvas = window.into_canvas().build().map_err(backend)?;
	let texture_creator = canvas.texture_creator();
	let mut texture = texture_creator
		.create_texture_streaming(PixelFormatEnum::RGB24, width as u32, height as u32)
		.map_err(backend)?;

	let mut shown = 0;
	let mut finished = false;
	'display: loop {
		if let Some(f) = frame.take() {
			let rgb = frame_to_rgb8(&f, gamma);
			texture.update(None, &rgb, width * 3).map_err(backend)?;
			canvas.copy(&texture, None, None).map_err(backend)?;
			canvas.present();
			shown += 1;
			canvas.window_mut().set_title(&format!("tracer - pass {}", shown)).map_err(backend)?;
		}

		for event in event_pump.poll_iter() {
			match event {
				Event::Quit { .. }
				| Event::KeyDown { keycode: Some(Keycode::Escape), .. }
				| Event::KeyDown { keycode: Some(Keycode::Q), .. } => {
					if !finished {
						log::info!("preview closed, stopping render");
						receiver.request_quit();
					}
					break 'display;
				}
				_ => {}
			}
		}

		if finished {
			std::thread::sleep(Duration::from_millis(30));
			continue;
		}
		match receiver.wait(Duration::from_millis(30)) {
			Wait::Frame(f) => frame = Some(f),
			Wait::Idle => {}
			Wait::Finished => {
				finished = true;
				log::info!("render finished, close the window to exit");
				canvas.window_mut().set_title(&format!("tracer - done after {} passes", shown)).map_err(backend)?;
			}
		}
	}

	Ok(())
}
