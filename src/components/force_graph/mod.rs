//! Force-directed chart of potential reviewers.
//!
//! Renders the reviewer graph on an HTML canvas with:
//! - Graph building from a search result, anchored on the query or search node
//! - Physics-based layout with per-link distances, repulsion and collision
//! - Pan, zoom, node dragging, hover tooltips and node clicks
//! - Selection highlighting of corresponding authors and their manuscripts
//! - A legend overlay and resizing with the container
//!
//! # Example
//!
//! ```ignore
//! use peerscout_viewer::components::force_graph::ChartResult;
//!
//! view! {
//!     <ChartResult
//!         search_result=result
//!         selection=selection
//!         on_node_clicked=Callback::new(move |node| set_selection.set(Selection::from_clicked_node(&node)))
//!     />
//! }
//! ```

mod builder;
mod chart;
mod component;
mod highlight;
mod interaction;
mod legend;
mod lifecycle;
mod render;
mod resize;
mod scene;
mod simulation;
mod state;
mod theme;
mod tooltip;
mod types;

pub use builder::{
	GraphOptions, MAIN_NODE_ID, SEARCH_NODE_ID, manuscript_to_id, person_to_id,
	recommended_reviewers_to_graph, reviewer_link_distance,
};
pub use chart::{Chart, ChartOptions, LegendHandler, NodeClickHandler};
pub use component::ChartResult;
pub use highlight::{
	HighlightSelection, Highlights, corresponding_author_ids, corresponding_author_manuscript_ids,
	selected_node_id,
};
pub use legend::{LegendEntry, LegendSwatch, legend_entries};
pub use lifecycle::{
	ChartHandlers, ChartLifecycle, ChartProps, ChartUpdate, LifecycleState, plan_chart_update,
};
pub use resize::{Container, ResizeObservation};
pub use scene::{LegendState, NodeClass, NodeKind, SceneGraph, SceneLink, SceneNode, Tooltip};
pub use simulation::{SimNode, Simulation, SimulationParameters};
pub use state::{ViewTransform, ZOOM_EXTENT, initialise_node_position};
pub use theme::Theme;
pub use tooltip::{TooltipContent, tooltip_for_node};
pub use types::{GraphData, GraphLink, GraphNode, NodeRole};
