//! Frame scheduling for the layout engine.
//!
//! The engine is subscribed to a [`TickSource`] only while it has work: a
//! frame is requested on wake, each frame asks for the next one while the
//! callback reports more work, and the loop goes quiet once it does not.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;

/// Something that can call back once on the next frame.
pub trait TickSource {
	/// Returns false when no frame could be scheduled.
	fn request_tick(&self) -> bool;
}

pub struct Ticker<S: TickSource> {
	source: S,
	pending: Cell<bool>,
}

impl<S: TickSource> Ticker<S> {
	pub fn new(source: S) -> Self {
		Self {
			source,
			pending: Cell::new(false),
		}
	}

	pub fn source(&self) -> &S {
		&self.source
	}

	#[cfg(test)]
	pub fn is_pending(&self) -> bool {
		self.pending.get()
	}

	/// Subscribes for one frame unless a frame is already pending. A refused
	/// request leaves the ticker idle so the next wake retries.
	pub fn wake(&self) {
		if !self.pending.replace(true) && !self.source.request_tick() {
			self.pending.set(false);
		}
	}

	/// Runs one frame; `frame` returns whether more frames are needed.
	pub fn on_tick(&self, frame: impl FnOnce() -> bool) {
		self.pending.set(false);
		if frame() {
			self.wake();
		}
	}
}

/// `requestAnimationFrame` driven tick source.
#[derive(Clone, Default)]
pub struct AnimationFrame {
	callback: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
}

impl AnimationFrame {
	pub fn set_callback(&self, callback: Closure<dyn FnMut()>) {
		*self.callback.borrow_mut() = Some(callback);
	}
}

impl TickSource for AnimationFrame {
	fn request_tick(&self) -> bool {
		let Some(window) = web_sys::window() else {
			return false;
		};
		let callback = self.callback.borrow();
		let Some(cb) = callback.as_ref() else {
			return false;
		};
		match window.request_animation_frame(cb.as_ref().unchecked_ref()) {
			Ok(_) => true,
			Err(e) => {
				log::warn!("requestAnimationFrame failed: {e:?}");
				false
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[derive(Default)]
	struct CountingSource {
		requests: Cell<usize>,
		refuse: Cell<bool>,
	}

	impl TickSource for &CountingSource {
		fn request_tick(&self) -> bool {
			self.requests.set(self.requests.get() + 1);
			!self.refuse.get()
		}
	}

	#[test]
	fn wake_requests_once_while_pending() {
		let source = CountingSource::default();
		let ticker = Ticker::new(&source);
		ticker.wake();
		ticker.wake();
		assert_eq!(source.requests.get(), 1);
		assert!(ticker.is_pending());
	}

	#[test]
	fn unsubscribes_when_frame_reports_idle() {
		let source = CountingSource::default();
		let ticker = Ticker::new(&source);
		ticker.wake();
		let mut remaining = 3;
		while ticker.is_pending() {
			ticker.on_tick(|| {
				remaining -= 1;
				remaining > 0
			});
		}
		assert_eq!(remaining, 0);
		assert_eq!(source.requests.get(), 3);

		// reactivates on the next wake
		ticker.wake();
		assert_eq!(source.requests.get(), 4);
	}

	#[test]
	fn refused_request_can_be_retried() {
		let source = CountingSource::default();
		source.refuse.set(true);
		let ticker = Ticker::new(&source);
		ticker.wake();
		assert!(!ticker.is_pending());

		source.refuse.set(false);
		ticker.wake();
		assert!(ticker.is_pending());
		assert_eq!(source.requests.get(), 2);
	}
}
