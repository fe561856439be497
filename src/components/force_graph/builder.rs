//! Builds the reviewer graph from a search result.
//!
//! The first node is the anchor: a search node for free-text searches, the
//! main node otherwise. Matching manuscripts hang off the anchor, reviewers
//! hang off the anchor at a distance shrinking with their score, and each
//! reviewer links to their related manuscripts.

use std::collections::HashSet;
use std::sync::Arc;

use log::{debug, warn};

use super::types::{GraphData, GraphLink, GraphNode, NodeRole};
use crate::model::{Manuscript, Person, PotentialReviewer, SearchResult};

/// Id of the manuscript anchor node.
pub const MAIN_NODE_ID: &str = "main";
/// Id of the free-text search anchor node.
pub const SEARCH_NODE_ID: &str = "search";

const MATCHING_MANUSCRIPT_DISTANCE: f64 = 60.0;
const RELATED_MANUSCRIPT_DISTANCE: f64 = 40.0;
const REVIEWER_MIN_DISTANCE: f64 = 60.0;
const REVIEWER_DISTANCE_RANGE: f64 = 140.0;

/// Display options that change the shape of the graph.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphOptions {
	pub show_all_related_manuscripts: bool,
	/// Per-reviewer cap on related manuscripts when not showing all.
	pub max_related_manuscripts: usize,
}

impl Default for GraphOptions {
	fn default() -> Self {
		Self {
			show_all_related_manuscripts: false,
			max_related_manuscripts: 3,
		}
	}
}

/// Node id of a person's reviewer node.
pub fn person_to_id(person: &Person) -> Option<String> {
	person.person_id.as_ref().map(|id| format!("person:{id}"))
}

/// Node id of a manuscript node.
pub fn manuscript_to_id(manuscript: &Manuscript) -> Option<String> {
	manuscript
		.version_id
		.as_ref()
		.or(manuscript.manuscript_id.as_ref())
		.map(|id| format!("manuscript:{id}"))
}

/// Link length between the anchor and a reviewer with the given combined score.
pub fn reviewer_link_distance(score: Option<f64>) -> f64 {
	let score = score.unwrap_or(0.0).clamp(0.0, 1.0);
	REVIEWER_MIN_DISTANCE + REVIEWER_DISTANCE_RANGE * (1.0 - score)
}

#[derive(Default)]
struct Builder {
	graph: GraphData,
	node_ids: HashSet<String>,
	link_keys: HashSet<(String, String)>,
}

impl Builder {
	fn add_node(&mut self, id: String, role: NodeRole) -> String {
		if self.node_ids.insert(id.clone()) {
			self.graph.nodes.push(GraphNode::new(id.clone(), role));
		}
		id
	}

	fn add_link(&mut self, source: &str, target: &str, distance: f64) {
		if source == target {
			return;
		}
		let key = if source < target {
			(source.to_string(), target.to_string())
		} else {
			(target.to_string(), source.to_string())
		};
		if self.link_keys.insert(key) {
			self.graph.links.push(GraphLink {
				source: source.to_string(),
				target: target.to_string(),
				distance,
			});
		}
	}

	fn add_manuscript(&mut self, manuscript: &Manuscript) -> Option<String> {
		let id = manuscript_to_id(manuscript)?;
		Some(self.add_node(id, NodeRole::Manuscript(Arc::new(manuscript.clone()))))
	}
}

/// Authored then reviewed manuscripts of a reviewer, deduplicated, capped
/// unless all are requested. The cap keeps the best scoring ones.
fn related_manuscripts<'a>(
	reviewer: &'a PotentialReviewer,
	options: &GraphOptions,
) -> Vec<&'a Manuscript> {
	let mut seen = HashSet::new();
	let mut related: Vec<&Manuscript> = reviewer
		.author_of_manuscripts
		.iter()
		.chain(reviewer.reviewer_of_manuscripts.iter())
		.filter(|m| manuscript_to_id(m).is_some_and(|id| seen.insert(id)))
		.collect();
	if !options.show_all_related_manuscripts {
		related.sort_by(|a, b| {
			let (sa, sb) = (
				reviewer.scores.for_manuscript(a).unwrap_or(0.0),
				reviewer.scores.for_manuscript(b).unwrap_or(0.0),
			);
			sb.total_cmp(&sa)
		});
		related.truncate(options.max_related_manuscripts);
	}
	related
}

/// Transforms a search result into nodes and links.
pub fn recommended_reviewers_to_graph(result: &SearchResult, options: &GraphOptions) -> GraphData {
	let mut builder = Builder::default();

	let anchor = if result.search.is_some() {
		builder.add_node(SEARCH_NODE_ID.to_string(), NodeRole::Search)
	} else {
		builder.add_node(MAIN_NODE_ID.to_string(), NodeRole::Main)
	};

	for manuscript in &result.matching_manuscripts {
		if let Some(id) = builder.add_manuscript(manuscript) {
			builder.add_link(&anchor, &id, MATCHING_MANUSCRIPT_DISTANCE);
		}
	}

	for reviewer in &result.potential_reviewers {
		let Some(person) = reviewer.person.as_ref() else {
			warn!("peerscout: skipping potential reviewer without person");
			continue;
		};
		let Some(reviewer_id) = person_to_id(person) else {
			warn!("peerscout: skipping potential reviewer without person id");
			continue;
		};
		let reviewer_id =
			builder.add_node(reviewer_id, NodeRole::Reviewer(Arc::new(reviewer.clone())));
		builder.add_link(
			&anchor,
			&reviewer_id,
			reviewer_link_distance(reviewer.scores.combined),
		);

		for manuscript in related_manuscripts(reviewer, options) {
			if let Some(id) = builder.add_manuscript(manuscript) {
				builder.add_link(&reviewer_id, &id, RELATED_MANUSCRIPT_DISTANCE);
			}
		}
	}

	debug!(
		"peerscout: built graph with {} nodes, {} links",
		builder.graph.nodes.len(),
		builder.graph.links.len()
	);
	builder.graph
}
