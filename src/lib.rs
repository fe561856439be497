//! peerscout-viewer: reviewer recommendation viewer.
//!
//! This crate provides a WASM client that searches for potential peer
//! reviewers, shows them as a force-directed graph around the searched
//! manuscript together with a detailed result list, and authenticates users
//! through a passwordless identity provider.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};

pub mod api;
pub mod auth;
pub mod binding;
pub mod components;
pub mod config;
pub mod error;
pub mod format;
pub mod model;
pub mod selection;

use api::{SearchQuery, fetch_search_result, result_for_error};
use auth::AuthContext;
use components::auth_status::AuthStatus;
use components::force_graph::{ChartResult, GraphNode};
use components::search_form::SearchForm;
use components::search_result::SearchResultList;
use config::{AppConfig, load_initial_search_result};
use error::{ConfigError, SearchError};
use model::{PotentialReviewer, SearchResult};
use selection::Selection;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("peerscout: logging initialized");
}

fn load_config() -> AppConfig {
	match AppConfig::load() {
		Ok(config) => config,
		Err(ConfigError::MissingElement(_)) => {
			info!("peerscout: no embedded config, using defaults");
			AppConfig::default()
		}
		Err(err) => {
			warn!("peerscout: {err}, using defaults");
			AppConfig::default()
		}
	}
}

fn load_initial_result() -> Option<Arc<SearchResult>> {
	match load_initial_search_result() {
		Ok(result) => Some(Arc::new(result)),
		Err(ConfigError::MissingElement(_)) => None,
		Err(err) => {
			warn!("peerscout: {err}");
			None
		}
	}
}

/// Main application component.
/// Wires the auth context, the search form, the chart and the result list
/// around one shared search result and selection.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_config();
	let auth = config.auth.as_ref().and_then(|auth_config| {
		auth::connect(auth_config)
			.inspect_err(|err| warn!("peerscout: login disabled: {err}"))
			.ok()
	});
	let auth = AuthContext::provide(auth);
	let auth_state = auth.state();

	let search_result = RwSignal::new(load_initial_result());
	let selection = RwSignal::new(Selection::None);
	let legend_open = RwSignal::new(false);
	let busy = RwSignal::new(false);
	// Only the latest request may publish its result.
	let request_seq = StoredValue::new(0u64);

	let graph_options = config.graph_options();
	let graph_options = Signal::derive(move || graph_options.clone());
	let api_base = config.api_base.clone();

	let on_search = Callback::new(move |query: SearchQuery| {
		let seq = request_seq.get_value() + 1;
		request_seq.set_value(seq);
		busy.set(true);
		let api_base = api_base.clone();
		let token = auth.access_token();
		wasm_bindgen_futures::spawn_local(async move {
			let result = match fetch_search_result(&api_base, &query, token.as_deref()).await {
				Ok(result) => result,
				Err(err) => {
					if err == SearchError::NotAuthorized {
						auth.revalidate_token();
					}
					result_for_error(&err)
				}
			};
			if request_seq.try_get_value() != Some(seq) {
				return;
			}
			info!(
				"peerscout: {} potential reviewers found",
				result.potential_reviewers.len()
			);
			selection.set(Selection::None);
			search_result.set(Some(Arc::new(result)));
			busy.set(false);
		});
	});

	let search_allowed = move || !auth.enabled() || auth_state.get().authenticated;

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="light" />
		<Title text="PeerScout" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="app">
			<header class="app-header">
				<h1>"PeerScout"</h1>
				{auth.enabled().then(|| view! { <AuthStatus auth=auth /> })}
			</header>
			{move || search_allowed().then(|| view! { <SearchForm on_search=on_search busy=busy /> })}
			<div class="results">
				<div class="chart-panel">
					<ChartResult
						search_result=search_result
						graph_options=graph_options
						selection=selection
						legend_open=legend_open
						on_node_clicked=Callback::new(move |node: GraphNode| {
							selection.set(Selection::from_clicked_node(&node))
						})
						on_open_legend=Callback::new(move |_: ()| legend_open.set(true))
						on_close_legend=Callback::new(move |_: ()| legend_open.set(false))
					/>
					<p class="chart-hint">"Drag nodes to reposition. Scroll to zoom. Drag background to pan."</p>
				</div>
				<div class="list-panel">
					<SearchResultList
						search_result=search_result
						selection=selection
						on_select_reviewer=Callback::new(move |reviewer: Arc<PotentialReviewer>| {
							selection.set(Selection::Reviewer(reviewer))
						})
						on_clear_selection=Callback::new(move |_: ()| selection.set(Selection::None))
					/>
				</div>
			</div>
		</div>
	}
}
