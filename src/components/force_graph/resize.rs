//! Container measurement and size observation.
//!
//! A DOM container is watched by both a window `resize` listener and a
//! `ResizeObserver`; either one calls back into the chart, which resizes its
//! surface. The returned bindings release both registrations when dropped.

use std::rc::Rc;

use gloo_events::EventListener;
use log::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, ResizeObserver};

use crate::binding::Binding;

/// Something the chart can be laid out in.
pub trait Container {
	/// Current `(width, height)` in CSS pixels.
	fn bounding_size(&self) -> (f64, f64);

	/// Registers observers calling `on_resize` whenever the size may have
	/// changed. Containers that never change size register nothing.
	fn observe_resize(&self, on_resize: Rc<dyn Fn()>) -> Vec<Binding> {
		let _ = on_resize;
		Vec::new()
	}
}

/// A fixed size, for layouts that are not backed by the DOM.
impl Container for (f64, f64) {
	fn bounding_size(&self) -> (f64, f64) {
		*self
	}
}

impl Container for Element {
	fn bounding_size(&self) -> (f64, f64) {
		let rect = self.get_bounding_client_rect();
		(rect.width(), rect.height())
	}

	fn observe_resize(&self, on_resize: Rc<dyn Fn()>) -> Vec<Binding> {
		let mut bindings: Vec<Binding> = Vec::with_capacity(2);
		match web_sys::window() {
			Some(window) => {
				let on_window_resize = on_resize.clone();
				bindings.push(Box::new(EventListener::new(&window, "resize", move |_| {
					on_window_resize()
				})));
			}
			None => warn!("peerscout: no window, skipping resize listener"),
		}
		match ResizeObservation::observe(self, on_resize) {
			Ok(observation) => bindings.push(Box::new(observation)),
			Err(err) => warn!("peerscout: resize observer unavailable: {err:?}"),
		}
		bindings
	}
}

/// A live `ResizeObserver` on one element. Disconnects when dropped.
pub struct ResizeObservation {
	observer: ResizeObserver,
	_callback: Closure<dyn FnMut()>,
}

impl ResizeObservation {
	/// Calls `on_resize` whenever `target` changes size.
	pub fn observe(target: &Element, on_resize: Rc<dyn Fn()>) -> Result<Self, JsValue> {
		let callback = Closure::<dyn FnMut()>::new(move || on_resize());
		let observer = ResizeObserver::new(callback.as_ref().unchecked_ref())?;
		observer.observe(target);
		Ok(Self {
			observer,
			_callback: callback,
		})
	}
}

impl Drop for ResizeObservation {
	fn drop(&mut self) {
		self.observer.disconnect();
	}
}
