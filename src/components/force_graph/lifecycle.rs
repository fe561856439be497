//! Mount, update and unmount of a chart driven by changing inputs.
//!
//! An update is planned as an ordered list of steps. A rebuild replaces the
//! chart and supersedes everything else; otherwise selection and legend
//! changes are pushed into the live chart. Selection steps re-apply the whole
//! selection, which is idempotent, so the steps do not depend on each other.

use std::sync::Arc;

use log::debug;

use super::builder::{GraphOptions, recommended_reviewers_to_graph};
use super::chart::{Chart, ChartOptions, LegendHandler, NodeClickHandler};
use super::resize::Container;
use crate::model::SearchResult;
use crate::selection::Selection;

/// Inputs the chart is rendered from.
#[derive(Clone, Debug, Default)]
pub struct ChartProps {
	pub search_result: Option<Arc<SearchResult>>,
	pub graph_options: GraphOptions,
	pub selection: Selection,
	pub legend_open: bool,
}

/// A step taken to bring the chart in line with new props.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChartUpdate {
	/// Discard the chart and build a new one.
	Rebuild,
	/// Reapply the node selection.
	SelectNode,
	/// Reapply the reviewer selection.
	SelectReviewer,
	/// Open or close the legend.
	SetLegendOpen(bool),
}

fn same_result(a: &Option<Arc<SearchResult>>, b: &Option<Arc<SearchResult>>) -> bool {
	match (a, b) {
		(Some(a), Some(b)) => Arc::ptr_eq(a, b),
		(None, None) => true,
		_ => false,
	}
}

fn selected_reviewer_changed(previous: &Selection, next: &Selection) -> bool {
	match (previous, next) {
		(Selection::Reviewer(a), Selection::Reviewer(b)) => !Arc::ptr_eq(a, b) && a != b,
		(Selection::Reviewer(_), _) | (_, Selection::Reviewer(_)) => true,
		_ => false,
	}
}

/// Steps turning a chart rendered from `previous` into one for `next`.
pub fn plan_chart_update(previous: &ChartProps, next: &ChartProps) -> Vec<ChartUpdate> {
	let result_changed =
		next.search_result.is_some() && !same_result(&previous.search_result, &next.search_result);
	let options_changed = previous.graph_options != next.graph_options;
	if result_changed || (options_changed && next.search_result.is_some()) {
		return vec![ChartUpdate::Rebuild];
	}

	let mut steps = Vec::new();
	if previous.selection.node() != next.selection.node() {
		steps.push(ChartUpdate::SelectNode);
	}
	if selected_reviewer_changed(&previous.selection, &next.selection) {
		steps.push(ChartUpdate::SelectReviewer);
	}
	if previous.legend_open != next.legend_open {
		steps.push(ChartUpdate::SetLegendOpen(next.legend_open));
	}
	steps
}

fn apply_selection(chart: &Chart, selection: &Selection) {
	match selection {
		Selection::None => chart.select_node(None),
		Selection::Node(node) => chart.select_node(Some(node)),
		Selection::Reviewer(reviewer) => chart.selected_reviewer(Some(reviewer)),
	}
}

/// Callbacks handed to every chart the lifecycle creates.
#[derive(Clone, Default)]
pub struct ChartHandlers {
	pub on_open_legend: Option<LegendHandler>,
	pub on_close_legend: Option<LegendHandler>,
	pub on_node_clicked: Option<NodeClickHandler>,
}

/// Where the lifecycle stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleState {
	/// Not attached to a container.
	Unmounted,
	/// Mounted without a search result to show.
	Mounted,
	/// Mounted with a chart.
	Live,
}

/// Owns the chart for one container across prop changes.
pub struct ChartLifecycle<C: Container + Clone + 'static> {
	container: C,
	handlers: ChartHandlers,
	props: ChartProps,
	chart: Option<Chart>,
	mounted: bool,
}

impl<C: Container + Clone + 'static> ChartLifecycle<C> {
	/// Lifecycle for `container`, not yet mounted.
	pub fn new(container: C, handlers: ChartHandlers) -> Self {
		Self {
			container,
			handlers,
			props: ChartProps::default(),
			chart: None,
			mounted: false,
		}
	}

	/// Current state.
	pub fn state(&self) -> LifecycleState {
		match (self.mounted, &self.chart) {
			(false, _) => LifecycleState::Unmounted,
			(true, None) => LifecycleState::Mounted,
			(true, Some(_)) => LifecycleState::Live,
		}
	}

	/// The live chart, if any.
	pub fn chart(&self) -> Option<&Chart> {
		self.chart.as_ref()
	}

	/// Props last applied.
	pub fn props(&self) -> &ChartProps {
		&self.props
	}

	/// Attaches to the container and builds a chart when there is a result.
	pub fn mount(&mut self, props: ChartProps) {
		self.mounted = true;
		self.props = props;
		self.rebuild();
	}

	/// Applies new props, mounting first if needed. Returns the steps
	/// taken; mounting without a search result builds nothing.
	pub fn update(&mut self, props: ChartProps) -> Vec<ChartUpdate> {
		if !self.mounted {
			self.mount(props);
			return match self.chart {
				Some(_) => vec![ChartUpdate::Rebuild],
				None => Vec::new(),
			};
		}
		let steps = plan_chart_update(&self.props, &props);
		self.props = props;
		for step in &steps {
			match step {
				ChartUpdate::Rebuild => self.rebuild(),
				ChartUpdate::SelectNode | ChartUpdate::SelectReviewer => {
					if let Some(chart) = &self.chart {
						apply_selection(chart, &self.props.selection);
					}
				}
				ChartUpdate::SetLegendOpen(open) => {
					if let Some(chart) = &self.chart {
						chart.set_legend_open(*open);
					}
				}
			}
		}
		steps
	}

	/// Destroys the chart and detaches.
	pub fn unmount(&mut self) {
		if let Some(chart) = self.chart.take() {
			chart.destroy();
		}
		self.mounted = false;
	}

	/// Destroys any live chart and creates one for the current props.
	fn rebuild(&mut self) {
		if let Some(chart) = self.chart.take() {
			chart.destroy();
		}
		let Some(result) = self.props.search_result.clone() else {
			return;
		};
		debug!("peerscout: rebuilding chart");
		let graph = recommended_reviewers_to_graph(&result, &self.props.graph_options);
		let options = ChartOptions {
			graph: self.props.graph_options.clone(),
			legend_open: self.props.legend_open,
			on_open_legend: self.handlers.on_open_legend.clone(),
			on_close_legend: self.handlers.on_close_legend.clone(),
			on_node_clicked: self.handlers.on_node_clicked.clone(),
		};
		let chart = Chart::create(&self.container, graph, options);
		apply_selection(&chart, &self.props.selection);
		self.chart = Some(chart);
	}
}

impl<C: Container + Clone + 'static> Drop for ChartLifecycle<C> {
	fn drop(&mut self) {
		self.unmount();
	}
}
