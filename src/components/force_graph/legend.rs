//! Legend overlay: entries and the toggle button's hit area.
//!
//! The legend lives in screen space in the top-right corner and is unaffected
//! by zoom and pan.

use super::scene::{LegendState, NodeClass, NodeKind};

/// Side of the square toggle button.
pub const TOGGLE_SIZE: f64 = 24.0;
/// Gap between the surface edge and the legend.
pub const MARGIN: f64 = 10.0;
/// Height of one legend row.
pub const ROW_HEIGHT: f64 = 20.0;
/// Width of the open panel.
pub const WIDTH: f64 = 260.0;
/// Inner padding of the open panel.
pub const PADDING: f64 = 8.0;

/// What a legend row shows a swatch of.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LegendSwatch {
	/// Fill of a node kind.
	Kind(NodeKind),
	/// Ring of a highlight class.
	Class(NodeClass),
}

/// One legend row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LegendEntry {
	pub swatch: LegendSwatch,
	pub label: &'static str,
}

/// Rows of the legend, top to bottom.
pub fn legend_entries(legend: LegendState) -> Vec<LegendEntry> {
	let mut entries = Vec::with_capacity(7);
	if legend.show_search {
		entries.push(LegendEntry {
			swatch: LegendSwatch::Kind(NodeKind::Search),
			label: "Search",
		});
	} else {
		entries.push(LegendEntry {
			swatch: LegendSwatch::Kind(NodeKind::Main),
			label: "Manuscript being reviewed",
		});
	}
	entries.extend([
		LegendEntry {
			swatch: LegendSwatch::Kind(NodeKind::Reviewer {
				early_career: false,
			}),
			label: "Potential reviewer",
		},
		LegendEntry {
			swatch: LegendSwatch::Kind(NodeKind::Reviewer { early_career: true }),
			label: "Early career reviewer",
		},
		LegendEntry {
			swatch: LegendSwatch::Kind(NodeKind::Manuscript),
			label: "Related manuscript",
		},
		LegendEntry {
			swatch: LegendSwatch::Class(NodeClass::Selected),
			label: "Selected",
		},
		LegendEntry {
			swatch: LegendSwatch::Class(NodeClass::CorrespondingAuthor),
			label: "Corresponding author",
		},
		LegendEntry {
			swatch: LegendSwatch::Class(NodeClass::ManuscriptOfCorrespondingAuthor),
			label: "Manuscript of corresponding author",
		},
	]);
	entries
}

/// Top-left corner of the toggle button for a surface of the given width.
pub fn toggle_origin(surface_width: f64) -> (f64, f64) {
	(surface_width - MARGIN - TOGGLE_SIZE, MARGIN)
}

/// Whether a screen point falls on the toggle button.
pub fn hits_toggle(surface_width: f64, sx: f64, sy: f64) -> bool {
	let (x, y) = toggle_origin(surface_width);
	contains((x, y, TOGGLE_SIZE, TOGGLE_SIZE), sx, sy)
}

/// `(x, y, width, height)` of the open legend panel, below the toggle.
pub fn panel_rect(surface_width: f64, legend: LegendState) -> Option<(f64, f64, f64, f64)> {
	if !legend.open {
		return None;
	}
	let (tx, ty) = toggle_origin(surface_width);
	let rows = legend_entries(legend).len() as f64;
	Some((
		tx + TOGGLE_SIZE - WIDTH,
		ty + TOGGLE_SIZE + MARGIN,
		WIDTH,
		rows * ROW_HEIGHT + PADDING * 2.0,
	))
}

/// Whether a screen point falls on the open legend panel.
pub fn hits_panel(surface_width: f64, legend: LegendState, sx: f64, sy: f64) -> bool {
	panel_rect(surface_width, legend).is_some_and(|rect| contains(rect, sx, sy))
}

fn contains((x, y, w, h): (f64, f64, f64, f64), sx: f64, sy: f64) -> bool {
	sx >= x && sx <= x + w && sy >= y && sy <= y + h
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn search_entry_only_for_search_graphs() {
		let search = legend_entries(LegendState {
			open: true,
			show_search: true,
		});
		assert_eq!(search[0].label, "Search");
		let main = legend_entries(LegendState::default());
		assert!(main.iter().all(|e| e.label != "Search"));
	}

	#[test]
	fn toggle_sits_in_top_right_corner() {
		assert!(hits_toggle(500.0, 480.0, 20.0));
		assert!(!hits_toggle(500.0, 20.0, 20.0));
	}

	#[test]
	fn panel_is_hit_only_while_open() {
		let open = LegendState {
			open: true,
			show_search: false,
		};
		let (x, y, w, h) = panel_rect(500.0, open).unwrap();
		assert_eq!((x + w, y), (500.0 - MARGIN, MARGIN * 2.0 + TOGGLE_SIZE));
		assert_eq!(h, 7.0 * ROW_HEIGHT + PADDING * 2.0);
		assert!(hits_panel(500.0, open, x + 5.0, y + 5.0));
		assert!(!hits_panel(500.0, LegendState::default(), x + 5.0, y + 5.0));
	}
}
