//! Error types for configuration loading, authentication and searching.

use thiserror::Error;

/// Failure to read configuration embedded in the host page.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// No element has the id.
	#[error("no element with id \"{0}\"")]
	MissingElement(String),
	/// The element is not a `<script>`.
	#[error("element \"{0}\" is not a script element")]
	NotAScript(String),
	/// Not running in a browser document.
	#[error("browser document is not available")]
	NoDocument,
	/// The element text is not valid JSON.
	#[error("invalid JSON in \"{id}\": {source}")]
	Parse {
		id: String,
		#[source]
		source: serde_json::Error,
	},
}

/// Failure reported by the identity provider or the profile lookup.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AuthError {
	/// Login was rejected.
	#[error("{0}")]
	Authorization(String),
	/// The profile could not be fetched.
	#[error("profile lookup failed: {0}")]
	Profile(String),
	/// The provider SDK is missing or failed to start.
	#[error("identity provider unavailable: {0}")]
	ProviderUnavailable(String),
}

impl AuthError {
	/// Text shown to the user as the authentication error description.
	pub fn description(&self) -> String {
		match self {
			AuthError::Authorization(description) => description.clone(),
			other => other.to_string(),
		}
	}
}

/// Failure to obtain a search result from the recommendation API.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
	/// The server answered 401 or 403.
	#[error("not authorized to see the results")]
	NotAuthorized,
	/// Any other non-success status.
	#[error("server responded with status {0}")]
	Status(u16),
	/// The request did not complete.
	#[error("request failed: {0}")]
	Request(String),
	/// The body did not parse.
	#[error("invalid response: {0}")]
	Decode(String),
}
