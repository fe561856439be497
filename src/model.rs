//! Search result data as delivered by the recommendation API.
//!
//! Every field is optional or defaulted: a partially populated response must
//! still deserialize, and missing nested data degrades to omitted output.
//! Top-level result fields accept both the camelCase client spelling and the
//! snake_case server spelling.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Deserializer};

/// Identity of a person. The API sends either strings or numbers.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PersonId(pub String);

impl PersonId {
	/// Id from any string.
	pub fn new(id: impl Into<String>) -> Self {
		Self(id.into())
	}

	/// The id text.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for PersonId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl<'de> Deserialize<'de> for PersonId {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		#[derive(Deserialize)]
		#[serde(untagged)]
		enum Raw {
			Text(String),
			Number(serde_json::Number),
		}

		Ok(match Raw::deserialize(deserializer)? {
			Raw::Text(s) => PersonId(s),
			Raw::Number(n) => PersonId(n.to_string()),
		})
	}
}

/// External identifier record, e.g. an ORCID.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Membership {
	pub member_type: String,
	pub member_id: String,
}

/// A date range.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DateRange {
	pub start_date: Option<String>,
	pub end_date: Option<String>,
}

/// Review duration summary, in days.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReviewDuration {
	pub mean: Option<f64>,
	pub count: Option<u32>,
	pub min: Option<f64>,
	pub max: Option<f64>,
}

/// Review activity over one period.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PeriodStats {
	#[serde(alias = "review-duration")]
	pub review_duration: Option<ReviewDuration>,
	pub reviews_in_progress: Option<u32>,
	pub waiting_to_be_accepted: Option<u32>,
	pub declined: Option<u32>,
}

/// Review activity overall and in the last 12 months.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PersonStats {
	pub overall: Option<PeriodStats>,
	pub last_12m: Option<PeriodStats>,
}

/// A person as it appears in reviewer, author, editor and reviewer lists.
///
/// `is_corresponding_author` is only meaningful inside a manuscript's author list.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Person {
	pub person_id: Option<PersonId>,
	pub title: Option<String>,
	pub first_name: Option<String>,
	pub middle_name: Option<String>,
	pub last_name: Option<String>,
	pub institution: Option<String>,
	pub email: Option<String>,
	pub status: Option<String>,
	pub is_early_career_researcher: bool,
	pub is_corresponding_author: bool,
	pub memberships: Vec<Membership>,
	pub dates_not_available: Vec<DateRange>,
	pub stats: Option<PersonStats>,
}

/// A manuscript as sent by the API.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Manuscript {
	pub version_id: Option<String>,
	pub manuscript_id: Option<String>,
	pub doi: Option<String>,
	pub title: Option<String>,
	#[serde(rename = "abstract")]
	pub abstract_text: Option<String>,
	#[serde(alias = "published-date")]
	pub published_date: Option<String>,
	pub subject_areas: Vec<String>,
	pub authors: Vec<Person>,
	pub reviewers: Vec<Person>,
	pub editors: Vec<Person>,
	pub senior_editors: Vec<Person>,
	pub alternatives: Vec<Manuscript>,
}

impl Manuscript {
	/// Person ids of authors flagged as corresponding author.
	pub fn corresponding_author_ids(&self) -> HashSet<&PersonId> {
		self.authors
			.iter()
			.filter(|author| author.is_corresponding_author)
			.filter_map(|author| author.person_id.as_ref())
			.collect()
	}

	/// Whether `person_id` is a corresponding author.
	pub fn has_corresponding_author(&self, person_id: &PersonId) -> bool {
		self.authors.iter().any(|author| {
			author.is_corresponding_author && author.person_id.as_ref() == Some(person_id)
		})
	}
}

/// Assignment of a reviewer to the searched manuscript.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AssignmentStatus {
	pub status: Option<String>,
}

/// Score of a reviewer against one of their manuscripts.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ManuscriptScore {
	pub manuscript_id: Option<String>,
	pub version_id: Option<String>,
	pub combined: Option<f64>,
	pub keyword: Option<f64>,
	pub similarity: Option<f64>,
}

/// Scores of a reviewer.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Scores {
	pub combined: Option<f64>,
	pub keyword: Option<f64>,
	pub similarity: Option<f64>,
	pub by_manuscript: Vec<ManuscriptScore>,
}

impl Scores {
	/// Combined score recorded for the given manuscript, matched by version
	/// id first and manuscript id second.
	pub fn for_manuscript(&self, manuscript: &Manuscript) -> Option<f64> {
		self.by_manuscript
			.iter()
			.find(|score| {
				(score.version_id.is_some() && score.version_id == manuscript.version_id)
					|| (score.manuscript_id.is_some()
						&& score.manuscript_id == manuscript.manuscript_id)
			})
			.and_then(|score| score.combined)
	}
}

/// A recommended reviewer.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PotentialReviewer {
	pub person: Option<Person>,
	pub author_of_manuscripts: Vec<Manuscript>,
	pub reviewer_of_manuscripts: Vec<Manuscript>,
	pub assignment_status: Option<AssignmentStatus>,
	pub scores: Scores,
}

impl PotentialReviewer {
	/// Person id, if the person is known.
	pub fn person_id(&self) -> Option<&PersonId> {
		self.person.as_ref().and_then(|p| p.person_id.as_ref())
	}

	/// Version ids of authored manuscripts on which this reviewer is a
	/// corresponding author.
	pub fn corresponding_author_version_ids(&self) -> HashSet<&str> {
		let Some(person_id) = self.person_id() else {
			return HashSet::new();
		};
		self.author_of_manuscripts
			.iter()
			.filter(|m| m.has_corresponding_author(person_id))
			.filter_map(|m| m.version_id.as_deref())
			.collect()
	}
}

/// Free-text criteria of a search not anchored on a manuscript.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SearchCriteria {
	pub subject_areas: Vec<String>,
	pub keywords: Vec<String>,
	#[serde(rename = "abstract")]
	pub abstract_text: Option<String>,
}

/// Response of a reviewer recommendation search.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchResult {
	#[serde(alias = "potential_reviewers")]
	pub potential_reviewers: Vec<PotentialReviewer>,
	#[serde(alias = "matching_manuscripts")]
	pub matching_manuscripts: Vec<Manuscript>,
	#[serde(alias = "manuscripts_not_found")]
	pub manuscripts_not_found: Vec<String>,
	#[serde(alias = "not_authorized")]
	pub not_authorized: bool,
	pub error: bool,
	pub search: Option<SearchCriteria>,
}

impl SearchResult {
	/// Parses an API response.
	pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(text)
	}

	/// Result standing in for a search that could not be completed.
	pub fn failed(not_authorized: bool) -> Self {
		Self {
			error: true,
			not_authorized,
			..Self::default()
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn person_id_accepts_numbers_and_strings() {
		let person: Person = serde_json::from_str(r#"{"person_id": 12}"#).unwrap();
		assert_eq!(person.person_id, Some(PersonId::new("12")));
		let person: Person = serde_json::from_str(r#"{"person_id": "p-7"}"#).unwrap();
		assert_eq!(person.person_id, Some(PersonId::new("p-7")));
	}

	#[test]
	fn search_result_accepts_server_field_names() {
		let result = SearchResult::from_json(
			r#"{
				"potential_reviewers": [{"person": {"person_id": "1"}}],
				"manuscripts_not_found": ["123"],
				"not_authorized": true
			}"#,
		)
		.unwrap();
		assert_eq!(result.potential_reviewers.len(), 1);
		assert_eq!(result.manuscripts_not_found, vec!["123".to_string()]);
		assert!(result.not_authorized);
		assert!(!result.error);
	}

	#[test]
	fn missing_nested_fields_default() {
		let result = SearchResult::from_json(
			r#"{"potentialReviewers": [{}], "matchingManuscripts": [{"title": "T"}]}"#,
		)
		.unwrap();
		let reviewer = &result.potential_reviewers[0];
		assert!(reviewer.person.is_none());
		assert!(reviewer.author_of_manuscripts.is_empty());
		assert_eq!(reviewer.scores.combined, None);
		assert!(result.matching_manuscripts[0].authors.is_empty());
	}

	#[test]
	fn corresponding_author_version_ids_require_the_flag() {
		let reviewer: PotentialReviewer = serde_json::from_value(serde_json::json!({
			"person": {"person_id": 1},
			"author_of_manuscripts": [
				{"version_id": "v1", "authors": [{"person_id": 1, "is_corresponding_author": true}]},
				{"version_id": "v2", "authors": [{"person_id": 1}]},
				{"version_id": "v3", "authors": [{"person_id": 2, "is_corresponding_author": true}]}
			]
		}))
		.unwrap();
		let ids = reviewer.corresponding_author_version_ids();
		assert_eq!(ids, HashSet::from(["v1"]));
	}
}
