use std::sync::Arc;

use peerscout_viewer::components::force_graph::{GraphNode, NodeRole};
use peerscout_viewer::components::search_result::{
	NO_RESULTS_MESSAGE, NOT_AUTHORIZED_MESSAGE, ResultList,
};
use peerscout_viewer::model::{Manuscript, Person, PersonId, PotentialReviewer, SearchResult};
use peerscout_viewer::selection::Selection;

fn reviewer(id: &str) -> PotentialReviewer {
	PotentialReviewer {
		person: Some(Person {
			person_id: Some(PersonId::new(id)),
			..Person::default()
		}),
		..PotentialReviewer::default()
	}
}

fn manuscript(version_id: &str) -> Manuscript {
	Manuscript {
		version_id: Some(version_id.into()),
		..Manuscript::default()
	}
}

#[test]
fn not_authorized_shows_only_the_notice() {
	let result = SearchResult::from_json(
		r#"{"error": true, "notAuthorized": true, "potentialReviewers": [{"person": {"person_id": 1}}]}"#,
	)
	.unwrap();
	let list = ResultList::new(&result, &Selection::None);
	assert_eq!(list.error_message, Some(NOT_AUTHORIZED_MESSAGE));
	assert!(list.manuscripts.is_empty());
	assert!(list.reviewers.is_empty());
	assert_eq!(list.no_results, None);
	assert!(!list.show_clear_selection);
}

#[test]
fn empty_result_says_no_reviewers_found() {
	let list = ResultList::new(&SearchResult::default(), &Selection::None);
	assert_eq!(list.error_message, None);
	assert_eq!(list.no_results, Some(NO_RESULTS_MESSAGE));
}

#[test]
fn manuscripts_not_found_are_listed_without_no_results_notice() {
	let result = SearchResult {
		manuscripts_not_found: vec!["a".into(), "b".into()],
		..SearchResult::default()
	};
	let list = ResultList::new(&result, &Selection::None);
	assert_eq!(list.not_found_message.as_deref(), Some("Manuscript not found: a, b"));
	assert_eq!(list.no_results, None);
}

#[test]
fn selected_manuscript_replaces_matching_ones_and_hides_reviewers() {
	let result = SearchResult {
		matching_manuscripts: vec![manuscript("v1"), manuscript("v2")],
		potential_reviewers: vec![reviewer("1")],
		..SearchResult::default()
	};
	let selected = manuscript("v7");
	let node = GraphNode::new("manuscript:v7", NodeRole::Manuscript(Arc::new(selected.clone())));
	let list = ResultList::new(&result, &Selection::Node(node));
	assert_eq!(list.manuscripts, vec![selected]);
	assert!(list.reviewers.is_empty());
	assert!(list.show_clear_selection);
}

#[test]
fn selected_reviewer_filters_reviewers_and_hides_manuscripts() {
	let result = SearchResult {
		matching_manuscripts: vec![manuscript("v1")],
		potential_reviewers: vec![reviewer("1"), reviewer("2"), reviewer("1")],
		..SearchResult::default()
	};
	let list = ResultList::new(&result, &Selection::Reviewer(Arc::new(reviewer("1"))));
	assert!(list.manuscripts.is_empty());
	assert_eq!(list.reviewers.len(), 2);
	assert!(
		list.reviewers
			.iter()
			.all(|r| r.person_id() == Some(&PersonId::new("1")))
	);
	assert!(list.show_clear_selection);
	assert_eq!(list.no_results, None);
}

#[test]
fn anchor_click_clears_selection_in_the_list() {
	let result = SearchResult {
		potential_reviewers: vec![reviewer("1"), reviewer("2")],
		..SearchResult::default()
	};
	let selection = Selection::from_clicked_node(&GraphNode::new("main", NodeRole::Main));
	let list = ResultList::new(&result, &selection);
	assert_eq!(list.reviewers.len(), 2);
	assert!(!list.show_clear_selection);
}
