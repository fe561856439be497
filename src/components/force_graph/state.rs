//! Graph simulation state and interaction tracking.
//!
//! Wraps the force simulation with the graph nodes it lays out, the view
//! transform for pan/zoom, and drag/pan/hover bookkeeping for pointer input.

use std::collections::HashMap;
use std::f64::consts::PI;

use log::warn;

use super::simulation::{SimNode, Simulation, SimulationParameters};
use super::types::{GraphData, GraphNode};

/// Zoom scale bounds.
pub const ZOOM_EXTENT: (f64, f64) = (0.1, 40.0);
/// Hit detection radius in graph units.
pub const HIT_RADIUS: f64 = 12.0;
/// Alpha target while a node is dragged.
pub const DRAG_ALPHA_TARGET: f64 = 0.3;

/// Pan and zoom transform applied to the whole graph view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	/// Zoom factor (1.0 = 100%, clamped to `ZOOM_EXTENT`).
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

impl ViewTransform {
	/// Zooms by `factor` keeping the screen point (`sx`, `sy`) in place.
	pub fn zoom_about(&self, sx: f64, sy: f64, factor: f64) -> Self {
		let k = (self.k * factor).clamp(ZOOM_EXTENT.0, ZOOM_EXTENT.1);
		let ratio = k / self.k;
		Self {
			x: sx - (sx - self.x) * ratio,
			y: sy - (sy - self.y) * ratio,
			k,
		}
	}

	/// Graph to screen coordinates.
	pub fn apply(&self, gx: f64, gy: f64) -> (f64, f64) {
		(gx * self.k + self.x, gy * self.k + self.y)
	}

	/// Screen to graph coordinates.
	pub fn invert(&self, sx: f64, sy: f64) -> (f64, f64) {
		((sx - self.x) / self.k, (sy - self.y) / self.k)
	}
}

/// Tracks an in-progress node drag operation.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<usize>,
	/// Set once the pointer moves; a drag without movement is a click.
	pub moved: bool,
}

/// Tracks an in-progress canvas pan operation.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Seeds a node's position: anchors are pinned at the centre, every other
/// node goes on a spiral by index.
pub fn initialise_node_position(node: &mut GraphNode, index: usize, width: f64, height: f64) {
	let (cx, cy) = (width / 2.0, height / 2.0);
	if node.is_anchor() {
		node.fixed = true;
		node.fx = Some(cx);
		node.fy = Some(cy);
		node.x = cx;
		node.y = cy;
		return;
	}
	let t = (index as f64 / 10.0) * PI * 2.0;
	let scale = 10.0 * index as f64;
	node.x = cx + t.cos() * scale;
	node.y = cy + t.sin() * scale;
}

/// Core graph state combining the physics simulation with interaction tracking.
pub struct ForceGraphState {
	pub nodes: Vec<GraphNode>,
	/// Resolved link endpoints as node indices.
	pub links: Vec<(usize, usize)>,
	pub simulation: Simulation,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hovered: Option<usize>,
	pub width: f64,
	pub height: f64,
}

impl ForceGraphState {
	/// Lays out `data` in a `width` by `height` surface and starts the simulation.
	pub fn new(data: GraphData, width: f64, height: f64) -> Self {
		let mut nodes = data.nodes;
		for (i, node) in nodes.iter_mut().enumerate() {
			initialise_node_position(node, i, width, height);
		}

		let id_to_idx: HashMap<&str, usize> = nodes
			.iter()
			.enumerate()
			.map(|(i, n)| (n.id.as_str(), i))
			.collect();
		let mut links = Vec::with_capacity(data.links.len());
		let mut sim_links = Vec::with_capacity(data.links.len());
		for link in &data.links {
			match (
				id_to_idx.get(link.source.as_str()),
				id_to_idx.get(link.target.as_str()),
			) {
				(Some(&src), Some(&tgt)) => {
					links.push((src, tgt));
					sim_links.push((src, tgt, link.distance));
				}
				_ => warn!(
					"peerscout: dropping link {} -> {} with unknown endpoint",
					link.source, link.target
				),
			}
		}

		let sim_nodes = nodes
			.iter()
			.map(|n| SimNode {
				fx: n.fx,
				fy: n.fy,
				..SimNode::at(n.x, n.y)
			})
			.collect();
		let simulation = Simulation::new(sim_nodes, &sim_links, SimulationParameters::default());

		Self {
			nodes,
			links,
			simulation,
			transform: ViewTransform::default(),
			drag: DragState::default(),
			pan: PanState::default(),
			hovered: None,
			width,
			height,
		}
	}

	/// Screen point in graph coordinates.
	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		self.transform.invert(sx, sy)
	}

	/// Topmost node under the screen point, if any.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<usize> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		self.nodes
			.iter()
			.enumerate()
			.rev()
			.find(|(_, n)| {
				let (dx, dy) = (n.x - gx, n.y - gy);
				(dx * dx + dy * dy).sqrt() < HIT_RADIUS
			})
			.map(|(i, _)| i)
	}

	/// Pins a node at a graph position in both the node and the simulation.
	pub fn pin(&mut self, idx: usize, x: f64, y: f64) {
		if let Some(node) = self.nodes.get_mut(idx) {
			node.fx = Some(x);
			node.fy = Some(y);
		}
		if let Some(sim) = self.simulation.node_mut(idx) {
			sim.pin(x, y);
		}
	}

	/// Releases a dragged node.
	pub fn unpin(&mut self, idx: usize) {
		if let Some(node) = self.nodes.get_mut(idx) {
			node.fx = None;
			node.fy = None;
		}
		if let Some(sim) = self.simulation.node_mut(idx) {
			sim.unpin();
		}
	}

	/// Advances the simulation and copies positions back onto the nodes.
	pub fn tick(&mut self) -> bool {
		let running = self.simulation.tick();
		for (node, sim) in self.nodes.iter_mut().zip(self.simulation.nodes()) {
			node.x = sim.x;
			node.y = sim.y;
		}
		running
	}

	/// Records the new surface size.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}
