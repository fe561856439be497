//! Pointer input: node drag, background pan, wheel zoom, hover tooltip,
//! node clicks and the legend toggle.
//!
//! Coordinates are screen pixels relative to the surface. Callbacks run after
//! the chart borrow is released so they may call back into the chart.

use log::debug;

use super::chart::Chart;
use super::legend;
use super::scene::{LegendState, Tooltip};
use super::state::DRAG_ALPHA_TARGET;
use super::tooltip::tooltip_for_node;

const ZOOM_IN: f64 = 1.1;
const ZOOM_OUT: f64 = 0.9;

impl Chart {
	/// Starts a drag, a pan, or toggles the legend.
	pub fn pointer_down(&self, sx: f64, sy: f64) {
		let legend_callback = {
			let mut inner = self.inner.borrow_mut();
			if inner.destroyed {
				return;
			}

			if legend::hits_toggle(inner.scene.width(), sx, sy) {
				let legend = inner.scene.legend();
				let callback = if legend.open {
					inner.options.on_close_legend.clone()
				} else {
					inner.options.on_open_legend.clone()
				};
				// Without a callback the chart owns the legend state.
				if callback.is_none() {
					inner.scene.set_legend(LegendState {
						open: !legend.open,
						..legend
					});
				}
				callback
			} else if legend::hits_panel(inner.scene.width(), inner.scene.legend(), sx, sy) {
				None
			} else if let Some(idx) = inner.state.node_at_position(sx, sy) {
				inner.state.drag.active = true;
				inner.state.drag.node_idx = Some(idx);
				inner.state.drag.moved = false;
				if !inner.state.nodes[idx].fixed {
					let (gx, gy) = inner.state.screen_to_graph(sx, sy);
					inner.state.pin(idx, gx, gy);
				}
				inner.state.simulation.set_alpha_target(DRAG_ALPHA_TARGET);
				inner.state.simulation.restart();
				None
			} else {
				let transform = *inner.scene.transform();
				let pan = &mut inner.state.pan;
				pan.active = true;
				pan.start_x = sx;
				pan.start_y = sy;
				pan.transform_start_x = transform.x;
				pan.transform_start_y = transform.y;
				None
			}
		};
		if let Some(callback) = legend_callback {
			callback();
		}
	}

	/// Moves the dragged node or the view, else updates the hover tooltip.
	pub fn pointer_move(&self, sx: f64, sy: f64) {
		let mut inner = self.inner.borrow_mut();
		if inner.destroyed {
			return;
		}

		if inner.state.drag.active {
			if let Some(idx) = inner.state.drag.node_idx {
				let (gx, gy) = inner.state.screen_to_graph(sx, sy);
				inner.state.drag.moved = true;
				inner.state.pin(idx, gx, gy);
			}
			return;
		}

		if inner.state.pan.active {
			let pan = inner.state.pan.clone();
			let mut transform = *inner.scene.transform();
			transform.x = pan.transform_start_x + (sx - pan.start_x);
			transform.y = pan.transform_start_y + (sy - pan.start_y);
			inner.state.transform = transform;
			inner.scene.set_transform(transform);
			return;
		}

		let hovered = inner.state.node_at_position(sx, sy);
		if hovered == inner.state.hovered {
			return;
		}
		inner.state.hovered = hovered;
		let tooltip = hovered.and_then(|idx| {
			let node = &inner.state.nodes[idx];
			tooltip_for_node(node).map(|content| Tooltip {
				node_id: node.id.clone(),
				content,
				x: node.x,
				y: node.y,
			})
		});
		match tooltip {
			Some(tooltip) => inner.scene.show_tooltip(tooltip),
			None => inner.scene.hide_tooltip(),
		}
	}

	/// Ends a drag or pan. A press released without moving is a click.
	pub fn pointer_up(&self, _sx: f64, _sy: f64) {
		let clicked = {
			let mut inner = self.inner.borrow_mut();
			if inner.destroyed {
				return;
			}
			inner.state.pan.active = false;
			let clicked = end_drag(&mut inner.state);
			clicked.and_then(|idx| {
				let handler = inner.options.on_node_clicked.clone()?;
				Some((handler, inner.state.nodes[idx].clone()))
			})
		};
		if let Some((handler, node)) = clicked {
			debug!("peerscout: node clicked: {}", node.id);
			handler(&node);
		}
	}

	/// Ends any drag or pan without a click and drops the hover tooltip.
	pub fn pointer_leave(&self) {
		let mut inner = self.inner.borrow_mut();
		if inner.destroyed {
			return;
		}
		inner.state.pan.active = false;
		end_drag(&mut inner.state);
		inner.state.hovered = None;
		inner.scene.hide_tooltip();
	}

	/// Zooms about the pointer; negative `delta_y` zooms in. Horizontal-only
	/// scrolling leaves the zoom alone.
	pub fn wheel(&self, sx: f64, sy: f64, delta_y: f64) {
		let mut inner = self.inner.borrow_mut();
		if inner.destroyed || delta_y == 0.0 {
			return;
		}
		let factor = if delta_y > 0.0 { ZOOM_OUT } else { ZOOM_IN };
		let transform = inner.scene.transform().zoom_about(sx, sy, factor);
		inner.state.transform = transform;
		inner.scene.set_transform(transform);
	}
}

/// Cools the simulation and releases the dragged node unless it is
/// permanently fixed. Returns the node index when the drag was a click.
fn end_drag(state: &mut super::state::ForceGraphState) -> Option<usize> {
	if !state.drag.active {
		return None;
	}
	let idx = state.drag.node_idx.take()?;
	let clicked = !state.drag.moved;
	state.drag.active = false;
	state.drag.moved = false;
	state.simulation.set_alpha_target(0.0);
	if !state.nodes[idx].fixed {
		state.unpin(idx);
	}
	clicked.then_some(idx)
}
