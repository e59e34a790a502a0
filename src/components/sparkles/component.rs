//! Leptos component hosting the sparkle canvas.
//!
//! The component creates the canvas element, drives [`SparkleLoop`] from
//! `requestAnimationFrame`, and turns DOM mouse events into surface-local
//! [`InputEvent`]s. Unmounting stops the loop, cancels the pending frame,
//! removes the window listener and drops the frame callback.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use send_wrapper::SendWrapper;
use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};

use super::config::SparkleConfig;
use super::frame_loop::{InputEvent, SparkleLoop};
use super::theme::SparkleTheme;

fn window_size(window: &Window) -> Option<(f64, f64)> {
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

/// Top-left corner of the canvas in client coordinates.
fn canvas_origin(canvas: &HtmlCanvasElement) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(rect.left(), rect.top())
}

/// Stop the loop and take the frame callback out of its slot. The callback
/// holds a handle to its own slot, so taking it breaks that cycle.
fn shut_down<F>(
	context: &RefCell<Option<SparkleLoop>>,
	frame_callback: &RefCell<Option<F>>,
) -> Option<F> {
	if let Some(ref mut sl) = *context.borrow_mut() {
		sl.stop();
	}
	frame_callback.borrow_mut().take()
}

fn local_point(ev: &MouseEvent, origin: (f64, f64)) -> (f64, f64) {
	(
		ev.client_x() as f64 - origin.0,
		ev.client_y() as f64 - origin.1,
	)
}

/// Renders the sparkle effect on a canvas element.
///
/// The canvas sizes itself to its parent container by default; set
/// `fullscreen = true` to fill the viewport and follow window resizes.
/// Explicit `width`/`height` override automatic sizing. Click to release a
/// burst of sparkles, drag to leave a trail.
#[component]
pub fn SparkleCanvas(
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
	#[prop(default = None)] capacity: Option<usize>,
	#[prop(default = true)] show_counter: bool,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<SparkleLoop>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let origin: Rc<Cell<(f64, f64)>> = Rc::new(Cell::new((0.0, 0.0)));
	let frame_id: Rc<Cell<i32>> = Rc::new(Cell::new(0));

	let (context_init, animate_init, resize_cb_init, origin_init, frame_id_init) = (
		context.clone(),
		animate.clone(),
		resize_cb.clone(),
		origin.clone(),
		frame_id.clone(),
	);

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			warn!("sparkles: no window, animation not started");
			return;
		};

		let (w, h) = if fullscreen {
			window_size(&window).unwrap_or((800.0, 600.0))
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);
		origin_init.set(canvas_origin(&canvas));

		let Some(mut ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			warn!("sparkles: canvas has no 2d context, animation not started");
			return;
		};

		let mut config = SparkleConfig {
			show_counter,
			..SparkleConfig::default()
		};
		if let Some(capacity) = capacity {
			config.capacity = capacity;
		}
		let seed = (js_sys::Math::random() * u64::MAX as f64) as u64;
		*context_init.borrow_mut() = Some(SparkleLoop::new(
			config,
			SparkleTheme::default(),
			w,
			h,
			seed,
		));

		let (context_resize, canvas_resize, origin_resize) =
			(context_init.clone(), canvas.clone(), origin_init.clone());
		*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
			if fullscreen {
				let Some((nw, nh)) = web_sys::window().as_ref().and_then(window_size) else {
					return;
				};
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut sl) = *context_resize.borrow_mut() {
					sl.handle_input(InputEvent::Resize {
						width: nw,
						height: nh,
					});
				}
			}
			origin_resize.set(canvas_origin(&canvas_resize));
		}));
		if let Some(ref cb) = *resize_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let (context_anim, animate_inner) = (context_init.clone(), animate_init.clone());
		let frame_id_anim = frame_id_init.clone();
		*animate_init.borrow_mut() = Some(Closure::new(move |t: f64| {
			let mut context = context_anim.borrow_mut();
			let Some(ref mut sl) = *context else {
				return;
			};
			if !sl.is_running() {
				return;
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				if let Some(win) = web_sys::window() {
					if let Ok(id) = win.request_animation_frame(cb.as_ref().unchecked_ref()) {
						frame_id_anim.set(id);
					}
				}
			}
			sl.tick(t, &mut ctx);
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			if let Ok(id) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
				frame_id_init.set(id);
			}
		}
	});

	// The cleanup hook must be Send + Sync; everything here stays on the main thread.
	let teardown = SendWrapper::new((context.clone(), animate.clone(), resize_cb.clone(), frame_id));
	on_cleanup(move || {
		let (context, animate, resize_cb, frame_id) = teardown.take();
		if let Some(window) = web_sys::window() {
			let _ = window.cancel_animation_frame(frame_id.get());
			if let Some(ref cb) = *resize_cb.borrow() {
				let _ = window
					.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}
		resize_cb.borrow_mut().take();
		drop(shut_down(&context, &animate));
	});

	let (context_md, origin_md) = (context.clone(), origin.clone());
	let on_mousedown = move |ev: MouseEvent| {
		if let Some(canvas) = canvas_ref.get() {
			let canvas: HtmlCanvasElement = canvas.into();
			origin_md.set(canvas_origin(&canvas));
		}
		let (x, y) = local_point(&ev, origin_md.get());
		if let Some(ref mut sl) = *context_md.borrow_mut() {
			sl.handle_input(InputEvent::Press { x, y });
		}
	};

	let (context_mu, origin_mu) = (context.clone(), origin.clone());
	let on_mouseup = move |ev: MouseEvent| {
		let (x, y) = local_point(&ev, origin_mu.get());
		if let Some(ref mut sl) = *context_mu.borrow_mut() {
			sl.handle_input(InputEvent::Release { x, y });
		}
	};

	let (context_mm, origin_mm) = (context.clone(), origin.clone());
	let on_mousemove = move |ev: MouseEvent| {
		let (x, y) = local_point(&ev, origin_mm.get());
		let held = ev.buttons() != 0;
		if let Some(ref mut sl) = *context_mm.borrow_mut() {
			sl.handle_input(InputEvent::Move { x, y, held });
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut sl) = *context_ml.borrow_mut() {
			sl.handle_input(InputEvent::Leave);
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="sparkle-canvas"
			on:mousedown=on_mousedown
			on:mouseup=on_mouseup
			on:mousemove=on_mousemove
			on:mouseleave=on_mouseleave
			style="display: block; cursor: crosshair;"
		/>
	}
}

#[cfg(test)]
mod tests {
	use super::super::frame_loop::LoopState;
	use super::*;

	fn running_loop() -> SparkleLoop {
		SparkleLoop::new(
			SparkleConfig::default(),
			SparkleTheme::default(),
			100.0,
			100.0,
			3,
		)
	}

	#[test]
	fn shut_down_stops_loop_and_releases_callback() {
		type Slot = Rc<RefCell<Option<Box<dyn FnMut(f64)>>>>;

		let context = Rc::new(RefCell::new(Some(running_loop())));
		let slot: Slot = Rc::new(RefCell::new(None));
		let (context_cb, slot_cb) = (context.clone(), slot.clone());
		*slot.borrow_mut() = Some(Box::new(move |_t| {
			let _ = (&context_cb, &slot_cb);
		}));
		assert_eq!(Rc::strong_count(&slot), 2);
		assert_eq!(Rc::strong_count(&context), 2);

		drop(shut_down(&context, &slot));

		assert!(slot.borrow().is_none());
		assert_eq!(Rc::strong_count(&slot), 1);
		assert_eq!(Rc::strong_count(&context), 1);
		let state = context.borrow().as_ref().map(SparkleLoop::state);
		assert_eq!(state, Some(LoopState::Stopped));
	}

	#[test]
	fn shut_down_before_mount_is_harmless() {
		let context: RefCell<Option<SparkleLoop>> = RefCell::new(None);
		let slot: RefCell<Option<Box<dyn FnMut(f64)>>> = RefCell::new(None);
		assert!(shut_down(&context, &slot).is_none());
		assert!(context.borrow().is_none());
	}
}
