use std::cell::{Cell, RefCell};
use std::f64::consts::PI;
use std::rc::Rc;
use std::sync::Arc;

use peerscout_viewer::binding::Binding;
use peerscout_viewer::components::force_graph::{
	Chart, ChartHandlers, ChartLifecycle, ChartOptions, ChartProps, ChartUpdate, Container, GraphData,
	GraphLink, GraphNode, GraphOptions, LifecycleState, NodeClass, NodeRole, ZOOM_EXTENT,
	recommended_reviewers_to_graph,
};
use peerscout_viewer::model::{
	Manuscript, Person, PersonId, PotentialReviewer, SearchCriteria, SearchResult,
};
use peerscout_viewer::selection::Selection;

const SIZE: (f64, f64) = (800.0, 600.0);

fn close(a: f64, b: f64) -> bool {
	(a - b).abs() < 1e-9
}

fn person(id: &str, corresponding: bool) -> Person {
	Person {
		person_id: Some(PersonId::new(id)),
		first_name: Some(format!("Person{id}")),
		is_corresponding_author: corresponding,
		..Person::default()
	}
}

fn manuscript(version_id: &str, authors: Vec<Person>) -> Manuscript {
	Manuscript {
		version_id: Some(version_id.into()),
		manuscript_id: Some(format!("ms-{version_id}")),
		title: Some(format!("Title {version_id}")),
		authors,
		..Manuscript::default()
	}
}

/// Manuscript v1 with person 1 as corresponding author; person 1 authored it,
/// person 2 authored v2 without being its corresponding author.
fn search_result() -> SearchResult {
	let v1 = manuscript("v1", vec![person("1", true), person("2", false)]);
	let v2 = manuscript("v2", vec![person("2", false), person("3", true)]);
	SearchResult {
		matching_manuscripts: vec![v1.clone()],
		potential_reviewers: vec![
			PotentialReviewer {
				person: Some(person("1", false)),
				author_of_manuscripts: vec![v1],
				..PotentialReviewer::default()
			},
			PotentialReviewer {
				person: Some(person("2", false)),
				author_of_manuscripts: vec![v2],
				..PotentialReviewer::default()
			},
		],
		..SearchResult::default()
	}
}

fn chart_with(options: ChartOptions) -> Chart {
	let graph = recommended_reviewers_to_graph(&search_result(), &GraphOptions::default());
	Chart::create(&SIZE, graph, options)
}

fn node(chart: &Chart, id: &str) -> GraphNode {
	chart
		.nodes()
		.iter()
		.find(|n| n.id == id)
		.cloned()
		.unwrap_or_else(|| panic!("no node {id}"))
}

fn classes(chart: &Chart) -> Vec<Vec<String>> {
	let scene = chart.scene();
	NodeClass::ALL
		.iter()
		.map(|&class| {
			scene
				.nodes_with_class(class)
				.into_iter()
				.map(str::to_string)
				.collect()
		})
		.collect()
}

/// Container whose size and resize events are driven by the test, counting
/// released bindings.
#[derive(Clone, Default)]
struct TestContainer {
	size: Rc<Cell<(f64, f64)>>,
	on_resize: Rc<RefCell<Vec<Rc<dyn Fn()>>>>,
	released: Rc<Cell<usize>>,
}

struct Release(Rc<Cell<usize>>);

impl Drop for Release {
	fn drop(&mut self) {
		self.0.set(self.0.get() + 1);
	}
}

impl TestContainer {
	fn new(size: (f64, f64)) -> Self {
		let container = Self::default();
		container.size.set(size);
		container
	}

	fn resize(&self, width: f64, height: f64) {
		self.size.set((width, height));
		let callbacks = self.on_resize.borrow().clone();
		for callback in callbacks {
			callback();
		}
	}
}

impl Container for TestContainer {
	fn bounding_size(&self) -> (f64, f64) {
		self.size.get()
	}

	fn observe_resize(&self, on_resize: Rc<dyn Fn()>) -> Vec<Binding> {
		self.on_resize.borrow_mut().push(on_resize);
		vec![Box::new(Release(self.released.clone()))]
	}
}

#[test]
fn anchor_is_pinned_at_centre_and_others_spiral() {
	let chart = chart_with(ChartOptions::default());
	let nodes = chart.nodes();
	let main = &nodes[0];
	assert!(main.is_main() && main.fixed);
	assert_eq!((main.fx, main.fy), (Some(400.0), Some(300.0)));
	assert_eq!((main.x, main.y), (400.0, 300.0));

	for (i, node) in nodes.iter().enumerate().skip(1) {
		let t = (i as f64 / 10.0) * 2.0 * PI;
		let scale = 10.0 * i as f64;
		assert!(close(node.x, 400.0 + t.cos() * scale), "x of {}", node.id);
		assert!(close(node.y, 300.0 + t.sin() * scale), "y of {}", node.id);
		assert!(!node.fixed);
	}
	let scene = chart.scene();
	assert_eq!(scene.nodes().len(), nodes.len());
	assert_eq!((scene.nodes()[1].x, scene.nodes()[1].y), (nodes[1].x, nodes[1].y));
}

#[test]
fn search_anchor_is_pinned_at_centre_and_reviewers_spiral() {
	let result = SearchResult {
		matching_manuscripts: Vec::new(),
		search: Some(SearchCriteria {
			keywords: vec!["cells".into()],
			..SearchCriteria::default()
		}),
		..search_result()
	};
	let graph = recommended_reviewers_to_graph(&result, &GraphOptions::default());
	let chart = Chart::create(&(640.0, 480.0), graph, ChartOptions::default());
	let nodes = chart.nodes();

	let search = &nodes[0];
	assert_eq!(search.id, "search");
	assert!(search.is_search() && !search.is_main() && search.fixed);
	assert_eq!((search.fx, search.fy), (Some(320.0), Some(240.0)));
	assert_eq!((search.x, search.y), (320.0, 240.0));
	assert!(chart.scene().legend().show_search);

	assert_eq!(nodes[1].id, "person:1");
	for (i, node) in nodes.iter().enumerate().skip(1) {
		let t = (i as f64 / 10.0) * 2.0 * PI;
		let scale = 10.0 * i as f64;
		assert!(close(node.x, 320.0 + t.cos() * scale), "x of {}", node.id);
		assert!(close(node.y, 240.0 + t.sin() * scale), "y of {}", node.id);
		assert!(!node.fixed && node.fx.is_none());
	}
}

#[test]
fn dangling_links_are_dropped() {
	let graph = GraphData {
		nodes: vec![
			GraphNode::new("main", NodeRole::Main),
			GraphNode::new("a", NodeRole::Search),
		],
		links: vec![
			GraphLink {
				source: "main".into(),
				target: "a".into(),
				distance: 30.0,
			},
			GraphLink {
				source: "main".into(),
				target: "missing".into(),
				distance: 30.0,
			},
		],
	};
	let chart = Chart::create(&SIZE, graph, ChartOptions::default());
	assert_eq!(chart.scene().links().len(), 1);
}

#[test]
fn selecting_a_manuscript_highlights_its_corresponding_authors() {
	let chart = chart_with(ChartOptions::default());
	chart.select_node(Some(&node(&chart, "manuscript:v1")));
	assert_eq!(
		classes(&chart),
		vec![
			vec!["manuscript:v1".to_string()],
			vec!["person:1".to_string()],
			Vec::new()
		]
	);
}

#[test]
fn selecting_a_reviewer_node_highlights_their_corresponding_manuscripts() {
	let chart = chart_with(ChartOptions::default());
	chart.select_node(Some(&node(&chart, "person:1")));
	assert_eq!(
		classes(&chart),
		vec![
			vec!["person:1".to_string()],
			Vec::new(),
			vec!["manuscript:v1".to_string()]
		]
	);

	// Person 2 authored v2 but is not its corresponding author.
	chart.select_node(Some(&node(&chart, "person:2")));
	assert_eq!(
		classes(&chart),
		vec![vec!["person:2".to_string()], Vec::new(), Vec::new()]
	);
}

#[test]
fn selected_reviewer_clears_corresponding_author_highlights() {
	let chart = chart_with(ChartOptions::default());
	chart.select_node(Some(&node(&chart, "manuscript:v1")));
	let reviewer = search_result().potential_reviewers[0].clone();
	chart.selected_reviewer(Some(&reviewer));
	assert_eq!(
		classes(&chart),
		vec![
			vec!["person:1".to_string()],
			Vec::new(),
			vec!["manuscript:v1".to_string()]
		]
	);
}

#[test]
fn clearing_and_reapplying_selection() {
	let chart = chart_with(ChartOptions::default());
	let selected = node(&chart, "manuscript:v1");
	chart.select_node(Some(&selected));
	let once = classes(&chart);
	chart.select_node(Some(&selected));
	assert_eq!(classes(&chart), once);

	chart.select_node(None);
	assert!(classes(&chart).iter().all(Vec::is_empty));
}

#[test]
fn resize_changes_surface_but_not_positions() {
	let container = TestContainer::new(SIZE);
	let graph = recommended_reviewers_to_graph(&search_result(), &GraphOptions::default());
	let chart = Chart::create(&container, graph, ChartOptions::default());
	let before: Vec<(f64, f64)> = chart.nodes().iter().map(|n| (n.x, n.y)).collect();

	container.resize(1000.0, 700.0);
	assert_eq!((chart.scene().width(), chart.scene().height()), (1000.0, 700.0));
	let after: Vec<(f64, f64)> = chart.nodes().iter().map(|n| (n.x, n.y)).collect();
	assert_eq!(before, after);
	assert_eq!(chart.nodes()[0].fx, Some(400.0));
}

#[test]
fn destroy_releases_bindings_and_ignores_later_calls() {
	let container = TestContainer::new(SIZE);
	let graph = recommended_reviewers_to_graph(&search_result(), &GraphOptions::default());
	let chart = Chart::create(&container, graph, ChartOptions::default());
	chart.destroy();
	assert!(chart.is_destroyed());
	assert_eq!(container.released.get(), 1);

	let before: Vec<(f64, f64)> = chart.nodes().iter().map(|n| (n.x, n.y)).collect();
	assert!(!chart.tick());
	container.resize(100.0, 100.0);
	assert_eq!(chart.scene().width(), 800.0);
	let after: Vec<(f64, f64)> = chart.nodes().iter().map(|n| (n.x, n.y)).collect();
	assert_eq!(before, after);

	chart.destroy();
	assert_eq!(container.released.get(), 1);
}

#[test]
fn simulation_cools_down_and_keeps_anchor_fixed() {
	let chart = chart_with(ChartOptions::default());
	assert!(chart.is_running());
	let mut ticks = 0;
	while chart.tick() {
		ticks += 1;
		assert!(ticks < 2000, "simulation never stopped");
	}
	assert!(chart.alpha() < 0.001);
	let main = &chart.nodes()[0];
	assert_eq!((main.x, main.y), (400.0, 300.0));
}

#[test]
fn idle_frames_skip_painting() {
	let chart = chart_with(ChartOptions::default());
	assert!(chart.advance_frame());
	let mut frames = 0;
	while chart.is_running() {
		assert!(chart.advance_frame());
		frames += 1;
		assert!(frames < 2000, "simulation never stopped");
	}
	assert!(!chart.advance_frame());
	assert!(!chart.advance_frame());

	chart.set_legend_open(true);
	assert!(chart.advance_frame());
	assert!(!chart.advance_frame());

	chart.destroy();
	chart.on_container_resize(100.0, 100.0);
	assert!(!chart.advance_frame());
}

#[test]
fn dragging_reheats_and_release_cools() {
	let clicked = Rc::new(RefCell::new(Vec::new()));
	let sink = clicked.clone();
	let chart = chart_with(ChartOptions {
		on_node_clicked: Some(Rc::new(move |node: &GraphNode| sink.borrow_mut().push(node.id.clone()))),
		..ChartOptions::default()
	});
	let last = chart.nodes().len() - 1;
	let (x, y) = (chart.nodes()[last].x, chart.nodes()[last].y);

	chart.pointer_down(x, y);
	assert_eq!(chart.alpha_target(), 0.3);
	assert!(chart.is_running());
	assert_eq!(chart.nodes()[last].fx, Some(x));

	chart.pointer_move(x + 30.0, y);
	assert_eq!(chart.nodes()[last].fx, Some(x + 30.0));

	chart.pointer_up(x + 30.0, y);
	assert_eq!(chart.alpha_target(), 0.0);
	assert_eq!(chart.nodes()[last].fx, None);
	assert!(clicked.borrow().is_empty());
}

#[test]
fn click_without_movement_forwards_the_node() {
	let clicked = Rc::new(RefCell::new(Vec::new()));
	let sink = clicked.clone();
	let chart = chart_with(ChartOptions {
		on_node_clicked: Some(Rc::new(move |node: &GraphNode| sink.borrow_mut().push(node.id.clone()))),
		..ChartOptions::default()
	});
	let last = chart.nodes().len() - 1;
	let (id, x, y) = {
		let node = &chart.nodes()[last];
		(node.id.clone(), node.x, node.y)
	};
	chart.pointer_down(x, y);
	chart.pointer_up(x, y);
	assert_eq!(*clicked.borrow(), vec![id]);
}

#[test]
fn click_without_handler_does_nothing() {
	let chart = chart_with(ChartOptions::default());
	let last = chart.nodes().len() - 1;
	let (x, y) = (chart.nodes()[last].x, chart.nodes()[last].y);
	chart.pointer_down(x, y);
	chart.pointer_up(x, y);
	assert!(classes(&chart).iter().all(Vec::is_empty));
}

#[test]
fn dragged_anchor_stays_fixed() {
	let graph = GraphData {
		nodes: vec![GraphNode::new("main", NodeRole::Main)],
		links: Vec::new(),
	};
	let chart = Chart::create(&SIZE, graph, ChartOptions::default());
	chart.pointer_down(400.0, 300.0);
	chart.pointer_move(420.0, 310.0);
	chart.pointer_up(420.0, 310.0);
	let main = &chart.nodes()[0];
	assert!(main.fixed);
	assert_eq!((main.fx, main.fy), (Some(420.0), Some(310.0)));
}

#[test]
fn hovering_a_manuscript_shows_its_tooltip() {
	let graph = GraphData {
		nodes: vec![
			GraphNode::new("main", NodeRole::Main),
			GraphNode::new("person:1", NodeRole::Reviewer(Arc::new(PotentialReviewer::default()))),
			GraphNode::new("person:2", NodeRole::Reviewer(Arc::new(PotentialReviewer::default()))),
			GraphNode::new(
				"manuscript:v9",
				NodeRole::Manuscript(Arc::new(manuscript("v9", Vec::new()))),
			),
		],
		links: Vec::new(),
	};
	let chart = Chart::create(&SIZE, graph, ChartOptions::default());
	let (x, y) = (chart.nodes()[3].x, chart.nodes()[3].y);

	chart.pointer_move(x, y);
	let tooltip = chart.scene().tooltip().map(|t| t.node_id.clone());
	assert_eq!(tooltip.as_deref(), Some("manuscript:v9"));

	chart.pointer_leave();
	assert!(chart.scene().tooltip().is_none());
}

#[test]
fn wheel_zoom_is_clamped() {
	let chart = chart_with(ChartOptions::default());
	for _ in 0..200 {
		chart.wheel(100.0, 100.0, -1.0);
	}
	assert!(close(chart.scene().transform().k, ZOOM_EXTENT.1));
	for _ in 0..200 {
		chart.wheel(100.0, 100.0, 1.0);
	}
	assert!(close(chart.scene().transform().k, ZOOM_EXTENT.0));
}

#[test]
fn horizontal_scroll_does_not_zoom() {
	let chart = chart_with(ChartOptions::default());
	let before = *chart.scene().transform();
	chart.wheel(100.0, 100.0, 0.0);
	assert_eq!(*chart.scene().transform(), before);
}

#[test]
fn legend_toggle_uses_callbacks_when_present() {
	let chart = chart_with(ChartOptions::default());
	let (tx, ty) = (800.0 - 10.0 - 12.0, 10.0 + 12.0);
	chart.pointer_down(tx, ty);
	assert!(chart.scene().legend().open);
	chart.pointer_down(tx, ty);
	assert!(!chart.scene().legend().open);

	let opened = Rc::new(Cell::new(0));
	let counter = opened.clone();
	let chart = chart_with(ChartOptions {
		on_open_legend: Some(Rc::new(move || counter.set(counter.get() + 1))),
		..ChartOptions::default()
	});
	chart.pointer_down(tx, ty);
	assert_eq!(opened.get(), 1);
	assert!(!chart.scene().legend().open);
	chart.set_legend_open(true);
	assert!(chart.scene().legend().open);
}

#[test]
fn press_on_open_legend_panel_is_swallowed() {
	let chart = chart_with(ChartOptions::default());
	chart.set_legend_open(true);
	let before = *chart.scene().transform();
	let (px, py) = (800.0 - 10.0 - 100.0, 10.0 + 24.0 + 10.0 + 20.0);
	chart.pointer_down(px, py);
	chart.pointer_move(px - 150.0, py + 150.0);
	chart.pointer_up(px - 150.0, py + 150.0);
	assert_eq!(*chart.scene().transform(), before);
	assert_eq!(chart.alpha_target(), 0.0);
	assert!(chart.scene().legend().open);
}

#[test]
fn lifecycle_rebuilds_on_new_result_and_updates_in_place() {
	let container = TestContainer::new(SIZE);
	let mut lifecycle = ChartLifecycle::new(container.clone(), ChartHandlers::default());
	assert_eq!(lifecycle.state(), LifecycleState::Unmounted);

	assert!(lifecycle.update(ChartProps::default()).is_empty());
	assert_eq!(lifecycle.state(), LifecycleState::Mounted);
	assert!(lifecycle.chart().is_none());

	let result = Arc::new(search_result());
	let props = ChartProps {
		search_result: Some(result.clone()),
		..ChartProps::default()
	};
	assert_eq!(lifecycle.update(props.clone()), vec![ChartUpdate::Rebuild]);
	assert_eq!(lifecycle.state(), LifecycleState::Live);

	let selected = lifecycle
		.chart()
		.map(|chart| node(chart, "manuscript:v1"))
		.unwrap();
	let steps = lifecycle.update(ChartProps {
		selection: Selection::Node(selected),
		legend_open: true,
		..props.clone()
	});
	assert_eq!(steps, vec![ChartUpdate::SelectNode, ChartUpdate::SetLegendOpen(true)]);
	let chart = lifecycle.chart().unwrap();
	assert_eq!(chart.scene().nodes_with_class(NodeClass::Selected), vec!["manuscript:v1"]);
	assert!(chart.scene().legend().open);
	assert_eq!(container.released.get(), 0);

	let steps = lifecycle.update(ChartProps {
		search_result: Some(Arc::new(search_result())),
		..props
	});
	assert_eq!(steps, vec![ChartUpdate::Rebuild]);
	assert_eq!(container.released.get(), 1);

	lifecycle.unmount();
	assert_eq!(lifecycle.state(), LifecycleState::Unmounted);
	assert_eq!(container.released.get(), 2);
}
