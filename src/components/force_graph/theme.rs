//! Visual theming for the reviewer chart.
//!
//! Colors per node kind and per highlight class, plus overlay styles.

use super::scene::{NodeClass, NodeKind};

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Color with alpha.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Darken the color by a factor (0.0 = unchanged, 1.0 = black)
	pub fn darken(self, factor: f64) -> Self {
		let f = 1.0 - factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 * f) as u8,
			g: (self.g as f64 * f) as u8,
			b: (self.b as f64 * f) as u8,
			a: self.a,
		}
	}

	/// CSS color string.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Fill and radius of one node kind.
#[derive(Clone, Copy, Debug)]
pub struct NodeStyle {
	pub color: Color,
	pub radius: f64,
}

/// Ring drawn around nodes carrying a highlight class.
#[derive(Clone, Copy, Debug)]
pub struct RingStyle {
	pub color: Color,
	pub width: f64,
}

/// Box style shared by the tooltip and the legend.
#[derive(Clone, Debug)]
pub struct OverlayStyle {
	pub background: Color,
	pub border: Color,
	pub text: Color,
	pub font: &'static str,
	pub line_height: f64,
	pub padding: f64,
}

/// Colors and strokes of the chart.
#[derive(Clone, Debug)]
pub struct Theme {
	pub background: Color,
	pub background_secondary: Color,
	pub link: Color,
	pub link_width: f64,
	pub main: NodeStyle,
	pub search: NodeStyle,
	pub reviewer: NodeStyle,
	pub early_career_reviewer: NodeStyle,
	pub manuscript: NodeStyle,
	pub selected: RingStyle,
	pub corresponding_author: RingStyle,
	pub manuscript_of_corresponding_author: RingStyle,
	pub label: Color,
	pub label_font: &'static str,
	/// Labels are hidden below this zoom factor.
	pub label_min_zoom: f64,
	pub overlay: OverlayStyle,
}

impl Theme {
	/// Style of a node kind.
	pub fn node(&self, kind: NodeKind) -> NodeStyle {
		match kind {
			NodeKind::Main => self.main,
			NodeKind::Search => self.search,
			NodeKind::Reviewer {
				early_career: false,
			} => self.reviewer,
			NodeKind::Reviewer { early_career: true } => self.early_career_reviewer,
			NodeKind::Manuscript => self.manuscript,
		}
	}

	/// Ring drawn for a highlight class.
	pub fn ring(&self, class: NodeClass) -> RingStyle {
		match class {
			NodeClass::Selected => self.selected,
			NodeClass::CorrespondingAuthor => self.corresponding_author,
			NodeClass::ManuscriptOfCorrespondingAuthor => self.manuscript_of_corresponding_author,
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self {
			background: Color::rgb(250, 250, 252),
			background_secondary: Color::rgb(236, 239, 244),
			link: Color::rgba(140, 150, 165, 0.6),
			link_width: 1.0,
			main: NodeStyle {
				color: Color::rgb(214, 39, 40),
				radius: 10.0,
			},
			search: NodeStyle {
				color: Color::rgb(148, 103, 189),
				radius: 10.0,
			},
			reviewer: NodeStyle {
				color: Color::rgb(31, 119, 180),
				radius: 7.0,
			},
			early_career_reviewer: NodeStyle {
				color: Color::rgb(44, 160, 44),
				radius: 7.0,
			},
			manuscript: NodeStyle {
				color: Color::rgb(255, 127, 14),
				radius: 5.0,
			},
			selected: RingStyle {
				color: Color::rgb(20, 20, 20),
				width: 3.0,
			},
			corresponding_author: RingStyle {
				color: Color::rgb(227, 119, 194),
				width: 2.5,
			},
			manuscript_of_corresponding_author: RingStyle {
				color: Color::rgb(188, 189, 34),
				width: 2.5,
			},
			label: Color::rgba(40, 44, 52, 0.9),
			label_font: "11px sans-serif",
			label_min_zoom: 0.6,
			overlay: OverlayStyle {
				background: Color::rgba(255, 255, 255, 0.95),
				border: Color::rgb(200, 204, 212),
				text: Color::rgb(30, 30, 30),
				font: "12px sans-serif",
				line_height: 16.0,
				padding: 8.0,
			},
		}
	}
}
