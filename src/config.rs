//! Configuration embedded in the host page.
//!
//! The page carries a `<script id="app-config" type="application/json">`
//! element and optionally a `#search-result` element with a result to show
//! before the first search.

use log::info;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use wasm_bindgen::JsCast;
use web_sys::HtmlScriptElement;

use crate::components::force_graph::GraphOptions;
use crate::error::ConfigError;
use crate::model::SearchResult;

/// Script element holding the `AppConfig` JSON.
pub const CONFIG_ELEMENT_ID: &str = "app-config";
/// Script element holding a preloaded search result.
pub const SEARCH_RESULT_ELEMENT_ID: &str = "search-result";

/// Identity provider client settings. Without them login is disabled.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct AuthConfig {
	pub client_id: String,
	pub domain: String,
}

/// Settings embedded in the host page.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
	pub auth: Option<AuthConfig>,
	pub api_base: String,
	pub max_related_manuscripts: usize,
	pub show_all_related_manuscripts: bool,
}

impl Default for AppConfig {
	fn default() -> Self {
		Self {
			auth: None,
			api_base: "/api".to_string(),
			max_related_manuscripts: 3,
			show_all_related_manuscripts: false,
		}
	}
}

impl AppConfig {
	/// Parses the config JSON.
	pub fn from_json(text: &str) -> Result<Self, ConfigError> {
		serde_json::from_str(text).map_err(|source| ConfigError::Parse {
			id: CONFIG_ELEMENT_ID.to_string(),
			source,
		})
	}

	/// Chart options derived from these settings.
	pub fn graph_options(&self) -> GraphOptions {
		GraphOptions {
			show_all_related_manuscripts: self.show_all_related_manuscripts,
			max_related_manuscripts: self.max_related_manuscripts,
		}
	}

	/// Reads `#app-config` from the document.
	pub fn load() -> Result<Self, ConfigError> {
		let config: Self = load_json(CONFIG_ELEMENT_ID)?;
		info!(
			"peerscout: loaded config (api {}, auth {})",
			config.api_base,
			if config.auth.is_some() { "enabled" } else { "disabled" }
		);
		Ok(config)
	}
}

/// Reads the result embedded in `#search-result`.
pub fn load_initial_search_result() -> Result<SearchResult, ConfigError> {
	let result: SearchResult = load_json(SEARCH_RESULT_ELEMENT_ID)?;
	info!(
		"peerscout: loaded {} potential reviewers, {} manuscripts",
		result.potential_reviewers.len(),
		result.matching_manuscripts.len()
	);
	Ok(result)
}

fn script_text(id: &str) -> Result<String, ConfigError> {
	let document = web_sys::window()
		.and_then(|window| window.document())
		.ok_or(ConfigError::NoDocument)?;
	let element = document
		.get_element_by_id(id)
		.ok_or_else(|| ConfigError::MissingElement(id.to_string()))?;
	let script: HtmlScriptElement = element
		.dyn_into()
		.map_err(|_| ConfigError::NotAScript(id.to_string()))?;
	Ok(script.text().unwrap_or_default())
}

fn load_json<T: DeserializeOwned>(id: &str) -> Result<T, ConfigError> {
	let text = script_text(id)?;
	serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
		id: id.to_string(),
		source,
	})
}
