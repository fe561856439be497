//! Retained scene graph: the chart's rendering surface.
//!
//! The chart mutates the scene directly (sizes, transform, positions, class
//! toggles, tooltip, legend) and the canvas renderer paints whatever the scene
//! holds each animation frame. Nothing here knows about the simulation.

use std::collections::{BTreeSet, HashMap};

use super::state::ViewTransform;
use super::tooltip::TooltipContent;

/// Highlight classes toggled on nodes by the selection engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeClass {
	/// The clicked node.
	Selected,
	/// Reviewer who is a corresponding author of the selected manuscript.
	CorrespondingAuthor,
	/// Manuscript on which the selected reviewer is a corresponding author.
	ManuscriptOfCorrespondingAuthor,
}

impl NodeClass {
	/// Every class, in paint order.
	pub const ALL: [NodeClass; 3] = [
		NodeClass::Selected,
		NodeClass::CorrespondingAuthor,
		NodeClass::ManuscriptOfCorrespondingAuthor,
	];

	/// CSS class name.
	pub fn as_str(self) -> &'static str {
		match self {
			NodeClass::Selected => "selected",
			NodeClass::CorrespondingAuthor => "node-corresponding-author",
			NodeClass::ManuscriptOfCorrespondingAuthor => "node-manuscript-of-corresponding-author",
		}
	}
}

/// Visual kind of a node, derived from its role.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
	/// Manuscript anchor.
	Main,
	/// Search anchor.
	Search,
	/// Potential reviewer.
	Reviewer { early_career: bool },
	/// Related manuscript.
	Manuscript,
}

/// Drawable node with its highlight classes.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneNode {
	pub id: String,
	pub kind: NodeKind,
	pub label: Option<String>,
	pub x: f64,
	pub y: f64,
	classes: BTreeSet<NodeClass>,
}

impl SceneNode {
	/// Unclassed node at the origin.
	pub fn new(id: impl Into<String>, kind: NodeKind, label: Option<String>) -> Self {
		Self {
			id: id.into(),
			kind,
			label,
			x: 0.0,
			y: 0.0,
			classes: BTreeSet::new(),
		}
	}

	/// Whether the node carries `class`.
	pub fn has_class(&self, class: NodeClass) -> bool {
		self.classes.contains(&class)
	}

	/// Classes in paint order.
	pub fn classes(&self) -> impl Iterator<Item = NodeClass> + '_ {
		self.classes.iter().copied()
	}
}

/// Line element of a link.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SceneLink {
	pub x1: f64,
	pub y1: f64,
	pub x2: f64,
	pub y2: f64,
}

/// The single reusable tooltip overlay, anchored in graph coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct Tooltip {
	pub node_id: String,
	pub content: TooltipContent,
	pub x: f64,
	pub y: f64,
}

/// Legend toggle state.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LegendState {
	pub open: bool,
	/// Whether the search anchor entry is listed.
	pub show_search: bool,
}

/// Retained drawing state of one chart.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneGraph {
	width: f64,
	height: f64,
	transform: ViewTransform,
	nodes: Vec<SceneNode>,
	index: HashMap<String, usize>,
	links: Vec<SceneLink>,
	tooltip: Option<Tooltip>,
	legend: LegendState,
	revision: u64,
}

impl SceneGraph {
	/// Empty scene of the given size.
	pub fn new(width: f64, height: f64) -> Self {
		Self {
			width,
			height,
			transform: ViewTransform::default(),
			nodes: Vec::new(),
			index: HashMap::new(),
			links: Vec::new(),
			tooltip: None,
			legend: LegendState::default(),
			revision: 0,
		}
	}

	/// Counter bumped by every mutation; equal revisions paint the same frame.
	pub fn revision(&self) -> u64 {
		self.revision
	}

	fn touch(&mut self) {
		self.revision = self.revision.wrapping_add(1);
	}

	/// Surface width.
	pub fn width(&self) -> f64 {
		self.width
	}

	/// Surface height.
	pub fn height(&self) -> f64 {
		self.height
	}

	/// Resizes the surface.
	pub fn set_size(&mut self, width: f64, height: f64) {
		self.touch();
		self.width = width;
		self.height = height;
	}

	/// Current zoom and pan.
	pub fn transform(&self) -> &ViewTransform {
		&self.transform
	}

	/// Replaces the zoom and pan.
	pub fn set_transform(&mut self, transform: ViewTransform) {
		self.touch();
		self.transform = transform;
	}

	/// Adds a node, indexed by id.
	pub fn append_node(&mut self, node: SceneNode) {
		self.touch();
		self.index.insert(node.id.clone(), self.nodes.len());
		self.nodes.push(node);
	}

	/// Adds a link line.
	pub fn append_link(&mut self, link: SceneLink) {
		self.touch();
		self.links.push(link);
	}

	/// Nodes in paint order.
	pub fn nodes(&self) -> &[SceneNode] {
		&self.nodes
	}

	/// Node by id.
	pub fn node(&self, id: &str) -> Option<&SceneNode> {
		self.index.get(id).map(|&i| &self.nodes[i])
	}

	/// Link lines.
	pub fn links(&self) -> &[SceneLink] {
		&self.links
	}

	/// Moves a node. Out of range indices are ignored.
	pub fn set_node_position(&mut self, idx: usize, x: f64, y: f64) {
		self.touch();
		if let Some(node) = self.nodes.get_mut(idx) {
			node.x = x;
			node.y = y;
		}
	}

	/// Replaces a link line. Out of range indices are ignored.
	pub fn set_link_position(&mut self, idx: usize, link: SceneLink) {
		self.touch();
		if let Some(slot) = self.links.get_mut(idx) {
			*slot = link;
		}
	}

	/// Adds or removes a class on a node.
	pub fn set_class(&mut self, idx: usize, class: NodeClass, on: bool) {
		self.touch();
		if let Some(node) = self.nodes.get_mut(idx) {
			if on {
				node.classes.insert(class);
			} else {
				node.classes.remove(&class);
			}
		}
	}

	/// Ids of nodes currently carrying `class`, in node order.
	pub fn nodes_with_class(&self, class: NodeClass) -> Vec<&str> {
		self.nodes
			.iter()
			.filter(|n| n.has_class(class))
			.map(|n| n.id.as_str())
			.collect()
	}

	/// The visible tooltip, if any.
	pub fn tooltip(&self) -> Option<&Tooltip> {
		self.tooltip.as_ref()
	}

	/// Shows the tooltip, replacing any other.
	pub fn show_tooltip(&mut self, tooltip: Tooltip) {
		self.touch();
		self.tooltip = Some(tooltip);
	}

	/// Hides the tooltip.
	pub fn hide_tooltip(&mut self) {
		self.touch();
		self.tooltip = None;
	}

	/// Legend state.
	pub fn legend(&self) -> LegendState {
		self.legend
	}

	/// Replaces the legend state.
	pub fn set_legend(&mut self, legend: LegendState) {
		self.touch();
		self.legend = legend;
	}
}
