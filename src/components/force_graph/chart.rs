//! The live chart: simulation, scene graph and browser bindings behind one handle.
//!
//! `Chart::create` seeds node positions, starts the simulation, builds the
//! scene and registers the container's resize observers. Every later change
//! (ticks, selection, legend, resizes, pointer input) goes through the handle
//! and mutates the scene directly. After `destroy` every method is a no-op.

use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

use log::{debug, info};

use super::builder::GraphOptions;
use super::highlight::{HighlightSelection, Highlights};
use super::resize::Container;
use super::scene::{LegendState, NodeKind, SceneGraph, SceneLink, SceneNode};
use super::state::ForceGraphState;
use super::types::{GraphData, GraphNode, NodeRole};
use crate::binding::Binding;
use crate::format::person_full_name;
use crate::model::PotentialReviewer;

/// Called with the clicked node.
pub type NodeClickHandler = Rc<dyn Fn(&GraphNode)>;
/// Called when the legend toggle is pressed.
pub type LegendHandler = Rc<dyn Fn()>;

/// Chart behaviour and callbacks.
#[derive(Clone, Default)]
pub struct ChartOptions {
	/// Options the graph was built with.
	pub graph: GraphOptions,
	pub legend_open: bool,
	pub on_open_legend: Option<LegendHandler>,
	pub on_close_legend: Option<LegendHandler>,
	/// Called with the clicked node. Clicks are ignored without it.
	pub on_node_clicked: Option<NodeClickHandler>,
}

impl fmt::Debug for ChartOptions {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ChartOptions")
			.field("graph", &self.graph)
			.field("legend_open", &self.legend_open)
			.field("on_open_legend", &self.on_open_legend.is_some())
			.field("on_close_legend", &self.on_close_legend.is_some())
			.field("on_node_clicked", &self.on_node_clicked.is_some())
			.finish()
	}
}

pub(super) struct ChartInner {
	pub(super) state: ForceGraphState,
	pub(super) scene: SceneGraph,
	pub(super) options: ChartOptions,
	bindings: Vec<Binding>,
	pub(super) destroyed: bool,
	/// Scene revision last handed out for painting.
	painted: Option<u64>,
}

impl ChartInner {
	/// Copies node and link positions from the layout into the scene.
	fn sync_scene(&mut self) {
		for (idx, node) in self.state.nodes.iter().enumerate() {
			self.scene.set_node_position(idx, node.x, node.y);
		}
		for (idx, &(source, target)) in self.state.links.iter().enumerate() {
			let (s, t) = (&self.state.nodes[source], &self.state.nodes[target]);
			self.scene.set_link_position(
				idx,
				SceneLink {
					x1: s.x,
					y1: s.y,
					x2: t.x,
					y2: t.y,
				},
			);
		}
	}

	pub(super) fn apply_selection(&mut self, selection: HighlightSelection<'_>) {
		Highlights::derive(selection).apply(&self.state.nodes, &mut self.scene);
	}
}

fn scene_node(node: &GraphNode) -> SceneNode {
	let (kind, label) = match &node.role {
		NodeRole::Main => (NodeKind::Main, None),
		NodeRole::Search => (NodeKind::Search, None),
		NodeRole::Reviewer(reviewer) => {
			let person = reviewer.person.as_ref();
			(
				NodeKind::Reviewer {
					early_career: person.is_some_and(|p| p.is_early_career_researcher),
				},
				person.map(person_full_name).filter(|name| !name.is_empty()),
			)
		}
		NodeRole::Manuscript(_) => (NodeKind::Manuscript, None),
	};
	SceneNode::new(node.id.clone(), kind, label)
}

/// Handle to a live chart.
pub struct Chart {
	pub(super) inner: Rc<RefCell<ChartInner>>,
}

impl Chart {
	/// Lays out `graph` in `container` and starts the simulation.
	pub fn create<C>(container: &C, graph: GraphData, options: ChartOptions) -> Self
	where
		C: Container + Clone + 'static,
	{
		let (width, height) = container.bounding_size();
		let state = ForceGraphState::new(graph, width, height);

		let mut scene = SceneGraph::new(width, height);
		for node in &state.nodes {
			scene.append_node(scene_node(node));
		}
		for _ in &state.links {
			scene.append_link(SceneLink::default());
		}
		scene.set_legend(LegendState {
			open: options.legend_open,
			show_search: state.nodes.first().is_some_and(GraphNode::is_search),
		});

		info!(
			"peerscout: chart created with {} nodes, {} links ({}x{})",
			state.nodes.len(),
			state.links.len(),
			width,
			height
		);

		let mut inner = ChartInner {
			state,
			scene,
			options,
			bindings: Vec::new(),
			destroyed: false,
			painted: None,
		};
		inner.sync_scene();
		let chart = Self {
			inner: Rc::new(RefCell::new(inner)),
		};

		let weak = Rc::downgrade(&chart.inner);
		let observed = container.clone();
		let bindings = container.observe_resize(Rc::new(move || {
			if let Some(inner) = weak.upgrade() {
				let (w, h) = observed.bounding_size();
				Chart { inner }.on_container_resize(w, h);
			}
		}));
		for binding in bindings {
			chart.attach(binding);
		}
		chart
	}

	/// Keeps `binding` alive until the chart is destroyed.
	pub fn attach(&self, binding: Binding) {
		let mut inner = self.inner.borrow_mut();
		if inner.destroyed {
			return;
		}
		inner.bindings.push(binding);
	}

	/// Stops the simulation and releases every binding.
	pub fn destroy(&self) {
		let bindings = {
			let mut inner = self.inner.borrow_mut();
			if inner.destroyed {
				return;
			}
			inner.destroyed = true;
			inner.state.simulation.stop();
			inner.scene.hide_tooltip();
			std::mem::take(&mut inner.bindings)
		};
		debug!("peerscout: chart destroyed, releasing {} bindings", bindings.len());
		drop(bindings);
	}

	/// Whether `destroy` has run.
	pub fn is_destroyed(&self) -> bool {
		self.inner.borrow().destroyed
	}

	/// Advances the simulation one step and writes positions into the scene.
	/// Returns whether the simulation is still running.
	pub fn tick(&self) -> bool {
		let mut inner = self.inner.borrow_mut();
		if inner.destroyed {
			return false;
		}
		let running = inner.state.tick();
		inner.sync_scene();
		running
	}

	/// One animation frame: ticks a running simulation and reports whether
	/// the scene changed since the last frame that was painted. An idle or
	/// destroyed chart needs no paint.
	pub fn advance_frame(&self) -> bool {
		let mut inner = self.inner.borrow_mut();
		if inner.destroyed {
			return false;
		}
		if inner.state.simulation.is_running() {
			inner.state.tick();
			inner.sync_scene();
		}
		let revision = inner.scene.revision();
		if inner.painted == Some(revision) {
			return false;
		}
		inner.painted = Some(revision);
		true
	}

	/// Highlights `node`, its manuscript's corresponding authors and its
	/// reviewer's corresponding-author manuscripts. `None` clears all highlights.
	pub fn select_node(&self, node: Option<&GraphNode>) {
		let mut inner = self.inner.borrow_mut();
		if inner.destroyed {
			return;
		}
		inner.apply_selection(HighlightSelection::from_node(node));
	}

	/// Highlights the reviewer's node and the manuscripts they are a
	/// corresponding author of. `None` clears all highlights.
	pub fn selected_reviewer(&self, reviewer: Option<&PotentialReviewer>) {
		let mut inner = self.inner.borrow_mut();
		if inner.destroyed {
			return;
		}
		inner.apply_selection(HighlightSelection::from_reviewer(reviewer));
	}

	/// Shows or hides the legend panel.
	pub fn set_legend_open(&self, open: bool) {
		let mut inner = self.inner.borrow_mut();
		if inner.destroyed {
			return;
		}
		let legend = LegendState {
			open,
			..inner.scene.legend()
		};
		inner.scene.set_legend(legend);
	}

	/// Resizes the surface. Nodes keep their positions.
	pub fn on_container_resize(&self, width: f64, height: f64) {
		let mut inner = self.inner.borrow_mut();
		if inner.destroyed {
			return;
		}
		inner.scene.set_size(width, height);
		inner.state.resize(width, height);
	}

	/// Retained scene, borrowed.
	pub fn scene(&self) -> Ref<'_, SceneGraph> {
		Ref::map(self.inner.borrow(), |inner| &inner.scene)
	}

	/// Graph nodes with their current positions.
	pub fn nodes(&self) -> Ref<'_, [GraphNode]> {
		Ref::map(self.inner.borrow(), |inner| inner.state.nodes.as_slice())
	}

	/// Current simulation heat.
	pub fn alpha(&self) -> f64 {
		self.inner.borrow().state.simulation.alpha()
	}

	/// Heat the simulation cools towards.
	pub fn alpha_target(&self) -> f64 {
		self.inner.borrow().state.simulation.alpha_target()
	}

	/// Whether the simulation is still ticking.
	pub fn is_running(&self) -> bool {
		self.inner.borrow().state.simulation.is_running()
	}
}

impl fmt::Debug for Chart {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let inner = self.inner.borrow();
		f.debug_struct("Chart")
			.field("nodes", &inner.state.nodes.len())
			.field("links", &inner.state.links.len())
			.field("destroyed", &inner.destroyed)
			.finish()
	}
}
