//! Client for the reviewer recommendation endpoint.

use gloo_net::http::Request;
use log::{debug, warn};
use url::form_urlencoded;

use crate::error::SearchError;
use crate::model::SearchResult;

const RECOMMEND_PATH: &str = "recommend-reviewers";

/// What to recommend reviewers for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchQuery {
	/// Reviewers for an existing manuscript.
	Manuscript(String),
	/// Reviewers for free-text criteria. Empty fields are omitted.
	Text {
		keywords: String,
		subject_area: String,
		abstract_text: String,
	},
}

impl SearchQuery {
	/// Whether the query has any criteria to send.
	pub fn is_empty(&self) -> bool {
		match self {
			SearchQuery::Manuscript(manuscript_no) => manuscript_no.trim().is_empty(),
			SearchQuery::Text {
				keywords,
				subject_area,
				abstract_text,
			} => [keywords, subject_area, abstract_text]
				.iter()
				.all(|value| value.trim().is_empty()),
		}
	}

	/// Query parameters for the recommendation endpoint.
	pub fn query_string(&self) -> String {
		let mut serializer = form_urlencoded::Serializer::new(String::new());
		match self {
			SearchQuery::Manuscript(manuscript_no) => {
				serializer.append_pair("manuscript_no", manuscript_no.trim());
			}
			SearchQuery::Text {
				keywords,
				subject_area,
				abstract_text,
			} => {
				for (key, value) in [
					("keywords", keywords),
					("subject_area", subject_area),
					("abstract", abstract_text),
				] {
					let value = value.trim();
					if !value.is_empty() {
						serializer.append_pair(key, value);
					}
				}
			}
		}
		serializer.finish()
	}

	/// Endpoint URL under `api_base`.
	pub fn url(&self, api_base: &str) -> String {
		format!(
			"{}/{RECOMMEND_PATH}?{}",
			api_base.trim_end_matches('/'),
			self.query_string()
		)
	}
}

/// Runs a search, sending `access_token` as a bearer token when present.
pub async fn fetch_search_result(
	api_base: &str,
	query: &SearchQuery,
	access_token: Option<&str>,
) -> Result<SearchResult, SearchError> {
	let url = query.url(api_base);
	debug!("peerscout: fetching {url}");

	let mut request = Request::get(&url);
	if let Some(token) = access_token {
		request = request.header("Authorization", &format!("Bearer {token}"));
	}
	let response = request
		.send()
		.await
		.map_err(|err| SearchError::Request(err.to_string()))?;

	match response.status() {
		403 => return Err(SearchError::NotAuthorized),
		status if !response.ok() => return Err(SearchError::Status(status)),
		_ => {}
	}

	let text = response
		.text()
		.await
		.map_err(|err| SearchError::Request(err.to_string()))?;
	SearchResult::from_json(&text).map_err(|err| SearchError::Decode(err.to_string()))
}

/// Result shown in place of a failed search.
pub fn result_for_error(error: &SearchError) -> SearchResult {
	warn!("peerscout: search failed: {error}");
	SearchResult::failed(matches!(error, SearchError::NotAuthorized))
}
