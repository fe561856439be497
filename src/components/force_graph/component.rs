//! Leptos component hosting the reviewer chart.
//!
//! The component renders a container and a canvas once and never re-renders
//! them. An effect feeds prop changes into a `ChartLifecycle`, which rebuilds
//! or updates the chart; an animation loop via `requestAnimationFrame` ticks
//! the simulation and repaints only frames where the scene changed. Cleanup
//! destroys the chart and cancels the pending frame.

use std::rc::Rc;
use std::sync::Arc;

use leptos::prelude::*;
use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Element, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::builder::GraphOptions;
use super::chart::Chart;
use super::lifecycle::{ChartHandlers, ChartLifecycle, ChartProps};
use super::render;
use super::theme::Theme;
use super::types::GraphNode;
use crate::model::SearchResult;
use crate::selection::Selection;

type LifecycleSlot = StoredValue<Option<ChartLifecycle<Element>>, LocalStorage>;

fn with_chart(lifecycle: LifecycleSlot, f: impl FnOnce(&Chart)) {
	lifecycle.with_value(|slot| {
		if let Some(chart) = slot.as_ref().and_then(ChartLifecycle::chart) {
			f(chart);
		}
	});
}

/// Pointer position relative to the canvas.
fn local_position(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

/// Force-directed chart of potential reviewers and their manuscripts.
///
/// The graph is rebuilt when `search_result` or `graph_options` change;
/// `selection` and `legend_open` are pushed into the live chart.
#[component]
pub fn ChartResult(
	#[prop(into)] search_result: Signal<Option<Arc<SearchResult>>>,
	#[prop(into, optional)] graph_options: Signal<GraphOptions>,
	#[prop(into, optional)] selection: Signal<Selection>,
	#[prop(into, optional)] legend_open: Signal<bool>,
	#[prop(optional)] on_node_clicked: Option<Callback<GraphNode>>,
	#[prop(optional)] on_open_legend: Option<Callback<()>>,
	#[prop(optional)] on_close_legend: Option<Callback<()>>,
) -> impl IntoView {
	let container_ref = NodeRef::<leptos::html::Div>::new();
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let lifecycle: LifecycleSlot = StoredValue::new_local(None);
	let frame: StoredValue<Option<Closure<dyn FnMut()>>, LocalStorage> = StoredValue::new_local(None);
	let frame_id: StoredValue<Option<i32>> = StoredValue::new(None);

	let handlers = ChartHandlers {
		on_open_legend: on_open_legend.map(|cb| Rc::new(move || cb.run(())) as Rc<dyn Fn()>),
		on_close_legend: on_close_legend.map(|cb| Rc::new(move || cb.run(())) as Rc<dyn Fn()>),
		on_node_clicked: on_node_clicked
			.map(|cb| Rc::new(move |node: &GraphNode| cb.run(node.clone())) as Rc<dyn Fn(&GraphNode)>),
	};

	Effect::new(move |_| {
		let props = ChartProps {
			search_result: search_result.get(),
			graph_options: graph_options.get(),
			selection: selection.get(),
			legend_open: legend_open.get(),
		};
		let Some(container) = container_ref.get() else {
			return;
		};
		let container: Element = container.into();
		lifecycle.update_value(|slot| {
			slot.get_or_insert_with(|| ChartLifecycle::new(container, handlers.clone()))
				.update(props);
		});
	});

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if frame.with_value(Option::is_some) {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		let ctx = match canvas.get_context("2d") {
			Ok(Some(ctx)) => ctx.dyn_into::<CanvasRenderingContext2d>().ok(),
			_ => None,
		};
		let Some(ctx) = ctx else {
			warn!("peerscout: canvas 2d context unavailable");
			return;
		};
		let theme = Theme::default();

		frame.set_value(Some(Closure::new(move || {
			with_chart(lifecycle, |chart| {
				if !chart.advance_frame() {
					return;
				}
				let scene = chart.scene();
				render::sync_canvas_size(&canvas, &scene);
				render::render(&scene, &ctx, &theme);
			});
			request_frame(frame, frame_id);
		})));
		request_frame(frame, frame_id);
	});

	on_cleanup(move || {
		if let (Some(window), Some(Some(id))) = (web_sys::window(), frame_id.try_get_value()) {
			let _ = window.cancel_animation_frame(id);
		}
		lifecycle.try_update_value(|slot| {
			if let Some(mut lifecycle) = slot.take() {
				lifecycle.unmount();
			}
		});
	});

	let canvas_position = move |ev: &MouseEvent| {
		canvas_ref.get().map(|canvas| {
			let canvas: HtmlCanvasElement = canvas.into();
			local_position(&canvas, ev)
		})
	};

	let on_mousedown = move |ev: MouseEvent| {
		if let Some((x, y)) = canvas_position(&ev) {
			with_chart(lifecycle, |chart| chart.pointer_down(x, y));
		}
	};
	let on_mousemove = move |ev: MouseEvent| {
		if let Some((x, y)) = canvas_position(&ev) {
			with_chart(lifecycle, |chart| chart.pointer_move(x, y));
		}
	};
	let on_mouseup = move |ev: MouseEvent| {
		if let Some((x, y)) = canvas_position(&ev) {
			with_chart(lifecycle, |chart| chart.pointer_up(x, y));
		}
	};
	let on_mouseleave = move |_: MouseEvent| {
		with_chart(lifecycle, Chart::pointer_leave);
	};
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let mouse: &MouseEvent = &ev;
		if let Some((x, y)) = canvas_position(mouse) {
			with_chart(lifecycle, |chart| chart.wheel(x, y, ev.delta_y()));
		}
	};

	view! {
		<div node_ref=container_ref class="chart-result">
			<canvas
				node_ref=canvas_ref
				class="chart-result-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				style="display: block; position: absolute; top: 0; left: 0; cursor: grab;"
			/>
		</div>
	}
}

fn request_frame(
	frame: StoredValue<Option<Closure<dyn FnMut()>>, LocalStorage>,
	frame_id: StoredValue<Option<i32>>,
) {
	let Some(window) = web_sys::window() else {
		return;
	};
	let id = frame.try_with_value(|cb| {
		cb.as_ref()
			.and_then(|cb| window.request_animation_frame(cb.as_ref().unchecked_ref()).ok())
	});
	if let Some(id) = id.flatten() {
		frame_id.try_set_value(Some(id));
	}
}
