//! Graph data structures for input to the chart.

use std::sync::Arc;

use crate::model::{Manuscript, PotentialReviewer};

/// What a node stands for. Exactly one role per node.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeRole {
	/// The query the recommendation was made for.
	Main,
	/// Anchor of a free-text search.
	Search,
	/// A potential reviewer.
	Reviewer(Arc<PotentialReviewer>),
	/// A matching or related manuscript.
	Manuscript(Arc<Manuscript>),
}

/// A node in the graph.
#[derive(Clone, Debug)]
pub struct GraphNode {
	/// Unique identifier within a graph. Used to reference nodes in links.
	pub id: String,
	pub role: NodeRole,
	pub x: f64,
	pub y: f64,
	/// Fixed position overrides; set only while the node is pinned.
	pub fx: Option<f64>,
	pub fy: Option<f64>,
	/// Permanently pinned (main and search nodes).
	pub fixed: bool,
}

impl GraphNode {
	/// Node at the origin, not pinned.
	pub fn new(id: impl Into<String>, role: NodeRole) -> Self {
		Self {
			id: id.into(),
			role,
			x: 0.0,
			y: 0.0,
			fx: None,
			fy: None,
			fixed: false,
		}
	}

	/// Whether this is the manuscript anchor.
	pub fn is_main(&self) -> bool {
		matches!(self.role, NodeRole::Main)
	}

	/// Whether this is the search anchor.
	pub fn is_search(&self) -> bool {
		matches!(self.role, NodeRole::Search)
	}

	/// Main and search nodes stay at the container centre.
	pub fn is_anchor(&self) -> bool {
		self.is_main() || self.is_search()
	}

	/// Reviewer shown by this node.
	pub fn potential_reviewer(&self) -> Option<&PotentialReviewer> {
		match &self.role {
			NodeRole::Reviewer(reviewer) => Some(reviewer),
			_ => None,
		}
	}

	/// Manuscript shown by this node.
	pub fn manuscript(&self) -> Option<&Manuscript> {
		match &self.role {
			NodeRole::Manuscript(manuscript) => Some(manuscript),
			_ => None,
		}
	}
}

/// Nodes are the same node when their ids match; positions are transient.
impl PartialEq for GraphNode {
	fn eq(&self, other: &Self) -> bool {
		self.id == other.id
	}
}

/// An undirected edge between two nodes.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphLink {
	/// Source node ID.
	pub source: String,
	/// Target node ID.
	pub target: String,
	/// Preferred link length handed to the link force.
	pub distance: f64,
}

/// Complete graph data: nodes in placement order and links.
#[derive(Clone, Debug, Default)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	pub links: Vec<GraphLink>,
}

impl GraphData {
	/// Node by id.
	pub fn node(&self, id: &str) -> Option<&GraphNode> {
		self.nodes.iter().find(|n| n.id == id)
	}
}
