//! Selection-driven highlighting.
//!
//! A selection is either nothing, a node, or a reviewer. Three pure functions
//! derive what to highlight from it; `Highlights::apply` then toggles the
//! matching classes on every scene node, so applying twice changes nothing.

use std::collections::HashSet;

use super::builder::person_to_id;
use super::scene::{NodeClass, SceneGraph};
use super::types::GraphNode;
use crate::model::{PersonId, PotentialReviewer};

/// What to derive highlights from.
#[derive(Clone, Copy, Debug)]
pub enum HighlightSelection<'a> {
	/// Nothing selected.
	None,
	/// A clicked chart node.
	Node(&'a GraphNode),
	/// A reviewer picked from the list.
	Reviewer(&'a PotentialReviewer),
}

impl<'a> HighlightSelection<'a> {
	/// Node selection, or `None`.
	pub fn from_node(node: Option<&'a GraphNode>) -> Self {
		node.map_or(Self::None, Self::Node)
	}

	/// Reviewer selection, or `None`.
	pub fn from_reviewer(reviewer: Option<&'a PotentialReviewer>) -> Self {
		reviewer.map_or(Self::None, Self::Reviewer)
	}
}

/// Id of the node to mark `selected`.
pub fn selected_node_id(selection: HighlightSelection<'_>) -> Option<String> {
	match selection {
		HighlightSelection::None => None,
		HighlightSelection::Node(node) => Some(node.id.clone()),
		HighlightSelection::Reviewer(reviewer) => reviewer.person.as_ref().and_then(person_to_id),
	}
}

/// Person ids of the corresponding authors of the selected node's manuscript.
/// Reviewer selections highlight none: there is no single selected manuscript.
pub fn corresponding_author_ids(selection: HighlightSelection<'_>) -> HashSet<PersonId> {
	match selection {
		HighlightSelection::Node(node) => node
			.manuscript()
			.map(|m| m.corresponding_author_ids().into_iter().cloned().collect())
			.unwrap_or_default(),
		_ => HashSet::new(),
	}
}

/// Version ids of manuscripts on which the selected reviewer (or the selected
/// node's reviewer) is a corresponding author.
pub fn corresponding_author_manuscript_ids(selection: HighlightSelection<'_>) -> HashSet<String> {
	let reviewer = match selection {
		HighlightSelection::None => None,
		HighlightSelection::Node(node) => node.potential_reviewer(),
		HighlightSelection::Reviewer(reviewer) => Some(reviewer),
	};
	reviewer
		.map(|r| {
			r.corresponding_author_version_ids()
				.into_iter()
				.map(str::to_string)
				.collect()
		})
		.unwrap_or_default()
}

/// Derived highlight sets for one selection.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Highlights {
	pub selected: Option<String>,
	pub corresponding_authors: HashSet<PersonId>,
	pub manuscripts_of_corresponding_author: HashSet<String>,
}

impl Highlights {
	/// Computes all highlight sets for `selection`.
	pub fn derive(selection: HighlightSelection<'_>) -> Self {
		Self {
			selected: selected_node_id(selection),
			corresponding_authors: corresponding_author_ids(selection),
			manuscripts_of_corresponding_author: corresponding_author_manuscript_ids(selection),
		}
	}

	/// Whether `node` should carry `class`.
	pub fn has_class(&self, node: &GraphNode, class: NodeClass) -> bool {
		match class {
			NodeClass::Selected => self.selected.as_deref() == Some(node.id.as_str()),
			NodeClass::CorrespondingAuthor => node
				.potential_reviewer()
				.and_then(PotentialReviewer::person_id)
				.is_some_and(|id| self.corresponding_authors.contains(id)),
			NodeClass::ManuscriptOfCorrespondingAuthor => node
				.manuscript()
				.and_then(|m| m.version_id.as_ref())
				.is_some_and(|id| self.manuscripts_of_corresponding_author.contains(id)),
		}
	}

	/// Toggles all three classes on every node. `nodes` and the scene share order.
	pub fn apply(&self, nodes: &[GraphNode], scene: &mut SceneGraph) {
		for (idx, node) in nodes.iter().enumerate() {
			for class in NodeClass::ALL {
				scene.set_class(idx, class, self.has_class(node, class));
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;

	use super::*;
	use crate::components::force_graph::types::NodeRole;
	use crate::model::{Manuscript, Person};

	fn person(id: &str, corresponding: bool) -> Person {
		Person {
			person_id: Some(PersonId::new(id)),
			is_corresponding_author: corresponding,
			..Person::default()
		}
	}

	fn reviewer_node(id: &str) -> GraphNode {
		GraphNode::new(
			format!("person:{id}"),
			NodeRole::Reviewer(Arc::new(PotentialReviewer {
				person: Some(person(id, false)),
				..PotentialReviewer::default()
			})),
		)
	}

	#[test]
	fn manuscript_node_never_counts_as_corresponding_author() {
		let manuscript = Manuscript {
			version_id: Some("v1".into()),
			authors: vec![person("1", true)],
			..Manuscript::default()
		};
		let node = GraphNode::new("manuscript:v1", NodeRole::Manuscript(Arc::new(manuscript)));
		let highlights = Highlights::derive(HighlightSelection::Node(&node));
		assert!(!highlights.has_class(&node, NodeClass::CorrespondingAuthor));
		assert!(highlights.has_class(&reviewer_node("1"), NodeClass::CorrespondingAuthor));
	}

	#[test]
	fn reviewer_selection_selects_person_node() {
		let node = reviewer_node("5");
		let reviewer = node.potential_reviewer().unwrap().clone();
		let highlights = Highlights::derive(HighlightSelection::Reviewer(&reviewer));
		assert_eq!(highlights.selected.as_deref(), Some("person:5"));
		assert!(highlights.corresponding_authors.is_empty());
	}

	#[test]
	fn nothing_selected_highlights_nothing() {
		assert_eq!(Highlights::derive(HighlightSelection::None), Highlights::default());
	}
}
