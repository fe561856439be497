//! What the result list shows for a search result and a selection.

use std::collections::HashSet;
use std::sync::Arc;

use crate::format::extract_all_subject_areas;
use crate::model::{Manuscript, PotentialReviewer, SearchResult};
use crate::selection::Selection;

/// Shown when the server refused the search.
pub const NOT_AUTHORIZED_MESSAGE: &str = "You are not authorized to see the results.";
/// Shown on any other failure.
pub const TECHNICAL_ERROR_MESSAGE: &str = "This is very unfortunate, but there seems to be some sort of technical issue. Have you tried turning it off and on again?";
/// Shown when the search found nobody.
pub const NO_RESULTS_MESSAGE: &str = "No potential reviewers found";

/// Notices, manuscript summaries and reviewer cards to render, in order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResultList {
	pub error_message: Option<&'static str>,
	pub not_found_message: Option<String>,
	pub manuscripts: Vec<Manuscript>,
	pub reviewers: Vec<Arc<PotentialReviewer>>,
	pub no_results: Option<&'static str>,
	pub show_clear_selection: bool,
	/// Subject areas of the matching manuscripts; related manuscripts outside
	/// them are dimmed.
	pub requested_subject_areas: HashSet<String>,
}

impl ResultList {
	/// List for `result` under `selection`.
	pub fn new(result: &SearchResult, selection: &Selection) -> Self {
		let error_message = result.error.then_some(if result.not_authorized {
			NOT_AUTHORIZED_MESSAGE
		} else {
			TECHNICAL_ERROR_MESSAGE
		});
		let not_found_message = (!result.manuscripts_not_found.is_empty()).then(|| {
			format!(
				"Manuscript not found: {}",
				result.manuscripts_not_found.join(", ")
			)
		});

		let selected_manuscript = selection.manuscript();
		let selected_reviewer = selection.reviewer();

		let manuscripts = if result.error {
			Vec::new()
		} else if let Some(manuscript) = selected_manuscript {
			vec![manuscript.clone()]
		} else if selected_reviewer.is_some() {
			Vec::new()
		} else {
			result.matching_manuscripts.clone()
		};

		let reviewers = if result.error || selected_manuscript.is_some() {
			Vec::new()
		} else {
			let wanted = selected_reviewer.map(PotentialReviewer::person_id);
			result
				.potential_reviewers
				.iter()
				.filter(|reviewer| wanted.is_none_or(|id| reviewer.person_id() == id))
				.cloned()
				.map(Arc::new)
				.collect()
		};

		let no_results = (!result.error
			&& not_found_message.is_none()
			&& result.potential_reviewers.is_empty())
		.then_some(NO_RESULTS_MESSAGE);

		Self {
			error_message,
			not_found_message,
			manuscripts,
			reviewers,
			no_results,
			show_clear_selection: selected_manuscript.is_some() || selected_reviewer.is_some(),
			requested_subject_areas: extract_all_subject_areas(&result.matching_manuscripts),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::{GraphNode, NodeRole};
	use crate::model::{Person, PersonId};

	fn reviewer(id: &str) -> PotentialReviewer {
		PotentialReviewer {
			person: Some(Person {
				person_id: Some(PersonId::new(id)),
				..Person::default()
			}),
			..PotentialReviewer::default()
		}
	}

	fn result() -> SearchResult {
		SearchResult {
			potential_reviewers: vec![reviewer("1"), reviewer("2")],
			matching_manuscripts: vec![Manuscript {
				version_id: Some("v1".into()),
				subject_areas: vec!["Neuroscience".into()],
				..Manuscript::default()
			}],
			..SearchResult::default()
		}
	}

	#[test]
	fn nothing_selected_shows_everything() {
		let list = ResultList::new(&result(), &Selection::None);
		assert_eq!(list.manuscripts.len(), 1);
		assert_eq!(list.reviewers.len(), 2);
		assert!(!list.show_clear_selection);
		assert_eq!(list.no_results, None);
		assert!(list.requested_subject_areas.contains("Neuroscience"));
	}

	#[test]
	fn technical_error_hides_results() {
		let mut failed = result();
		failed.error = true;
		let list = ResultList::new(&failed, &Selection::None);
		assert_eq!(list.error_message, Some(TECHNICAL_ERROR_MESSAGE));
		assert!(list.reviewers.is_empty());
		assert_eq!(list.no_results, None);
	}

	#[test]
	fn reviewer_node_selection_filters_by_person() {
		let node = GraphNode::new("person:2", NodeRole::Reviewer(Arc::new(reviewer("2"))));
		let list = ResultList::new(&result(), &Selection::Node(node));
		assert!(list.manuscripts.is_empty());
		assert_eq!(list.reviewers.len(), 1);
		assert_eq!(list.reviewers[0].person_id(), Some(&PersonId::new("2")));
		assert!(list.show_clear_selection);
	}
}
