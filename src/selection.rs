//! What the user has selected, shared by the list view and the chart.

use std::sync::Arc;

use crate::components::force_graph::GraphNode;
use crate::model::{Manuscript, PotentialReviewer};

/// At most one thing is selected. A selected manuscript is a node whose role
/// is a manuscript.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Selection {
	/// Nothing selected.
	#[default]
	None,
	/// A clicked chart node.
	Node(GraphNode),
	/// A reviewer picked from the list.
	Reviewer(Arc<PotentialReviewer>),
}

impl Selection {
	/// Whether nothing is selected.
	pub fn is_empty(&self) -> bool {
		matches!(self, Selection::None)
	}

	/// The selected node.
	pub fn node(&self) -> Option<&GraphNode> {
		match self {
			Selection::Node(node) => Some(node),
			_ => None,
		}
	}

	/// The explicitly selected reviewer, or the reviewer of a selected node.
	pub fn reviewer(&self) -> Option<&PotentialReviewer> {
		match self {
			Selection::Reviewer(reviewer) => Some(reviewer),
			Selection::Node(node) => node.potential_reviewer(),
			Selection::None => None,
		}
	}

	/// Manuscript of the selected node.
	pub fn manuscript(&self) -> Option<&Manuscript> {
		self.node().and_then(GraphNode::manuscript)
	}

	/// Selection made by clicking a chart node. Anchors select nothing.
	pub fn from_clicked_node(node: &GraphNode) -> Self {
		if node.is_anchor() {
			return Selection::None;
		}
		Selection::Node(node.clone())
	}
}
