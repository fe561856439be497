//! Canvas rendering of the scene graph.
//!
//! Passes, back to front:
//! 1. Background (screen space)
//! 2. Links, nodes, highlight rings and labels (graph space, transformed)
//! 3. Tooltip and legend overlays (screen space)

use std::f64::consts::PI;

use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::legend::{self, LegendSwatch};
use super::scene::{NodeClass, SceneGraph, Tooltip};
use super::theme::{OverlayStyle, Theme};

/// Matches the canvas pixel size to the scene size.
pub fn sync_canvas_size(canvas: &HtmlCanvasElement, scene: &SceneGraph) {
	let (w, h) = (scene.width().max(0.0) as u32, scene.height().max(0.0) as u32);
	if canvas.width() != w {
		canvas.set_width(w);
	}
	if canvas.height() != h {
		canvas.set_height(h);
	}
}

/// Renders the complete scene to the canvas.
pub fn render(scene: &SceneGraph, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	draw_background(scene, ctx, theme);

	let transform = scene.transform();
	ctx.save();
	let _ = ctx.translate(transform.x, transform.y);
	let _ = ctx.scale(transform.k, transform.k);

	draw_links(scene, ctx, theme);
	draw_nodes(scene, ctx, theme);

	ctx.restore();

	if let Some(tooltip) = scene.tooltip() {
		draw_tooltip(scene, ctx, &theme.overlay, tooltip);
	}
	draw_legend(scene, ctx, theme);
}

fn draw_background(scene: &SceneGraph, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let (w, h) = (scene.width(), scene.height());
	match ctx.create_radial_gradient(w / 2.0, h / 2.0, 0.0, w / 2.0, h / 2.0, w.max(h) * 0.8) {
		Ok(gradient) => {
			let _ = gradient.add_color_stop(0.0, &theme.background.to_css());
			let _ = gradient.add_color_stop(1.0, &theme.background_secondary.to_css());
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
		}
		Err(_) => ctx.set_fill_style_str(&theme.background.to_css()),
	}
	ctx.fill_rect(0.0, 0.0, w, h);
}

fn draw_links(scene: &SceneGraph, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	ctx.set_stroke_style_str(&theme.link.to_css());
	ctx.set_line_width(theme.link_width / scene.transform().k);
	ctx.begin_path();
	for link in scene.links() {
		ctx.move_to(link.x1, link.y1);
		ctx.line_to(link.x2, link.y2);
	}
	ctx.stroke();
}

fn draw_nodes(scene: &SceneGraph, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let k = scene.transform().k;
	let show_labels = k >= theme.label_min_zoom;

	for node in scene.nodes() {
		let style = theme.node(node.kind);
		let base = style.color;
		let fill = if node.has_class(NodeClass::Selected) {
			base.darken(0.2)
		} else {
			base
		};

		ctx.begin_path();
		let _ = ctx.arc(node.x, node.y, style.radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&fill.to_css());
		ctx.fill();

		// Rings stack outwards in class order.
		let mut ring_radius = style.radius;
		for class in node.classes() {
			let ring = theme.ring(class);
			ring_radius += ring.width;
			ctx.begin_path();
			let _ = ctx.arc(node.x, node.y, ring_radius, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str(&ring.color.to_css());
			ctx.set_line_width(ring.width);
			ctx.stroke();
		}

		if let Some(label) = node.label.as_deref().filter(|_| show_labels) {
			ctx.set_fill_style_str(&theme.label.to_css());
			ctx.set_font(theme.label_font);
			let _ = ctx.fill_text(label, node.x + ring_radius + 4.0, node.y + 3.0);
		}
	}
}

fn text_width(ctx: &CanvasRenderingContext2d, text: &str) -> f64 {
	ctx.measure_text(text).map(|m| m.width()).unwrap_or(0.0)
}

/// Draws a box of text lines with its top-left corner at (`x`, `y`), shifted
/// to stay on the surface.
fn draw_text_box(
	scene: &SceneGraph,
	ctx: &CanvasRenderingContext2d,
	style: &OverlayStyle,
	x: f64,
	y: f64,
	lines: &[String],
) {
	ctx.set_font(style.font);
	let width = lines
		.iter()
		.map(|line| text_width(ctx, line))
		.fold(0.0, f64::max)
		+ style.padding * 2.0;
	let height = lines.len() as f64 * style.line_height + style.padding * 2.0;
	let x = x.min(scene.width() - width).max(0.0);
	let y = y.min(scene.height() - height).max(0.0);

	ctx.set_fill_style_str(&style.background.to_css());
	ctx.fill_rect(x, y, width, height);
	ctx.set_stroke_style_str(&style.border.to_css());
	ctx.set_line_width(1.0);
	ctx.stroke_rect(x, y, width, height);

	ctx.set_fill_style_str(&style.text.to_css());
	for (i, line) in lines.iter().enumerate() {
		let baseline = y + style.padding + (i as f64 + 0.75) * style.line_height;
		let _ = ctx.fill_text(line, x + style.padding, baseline);
	}
}

fn draw_tooltip(
	scene: &SceneGraph,
	ctx: &CanvasRenderingContext2d,
	style: &OverlayStyle,
	tooltip: &Tooltip,
) {
	let lines = tooltip.content.lines();
	if lines.is_empty() {
		return;
	}
	let (sx, sy) = scene.transform().apply(tooltip.x, tooltip.y);
	draw_text_box(scene, ctx, style, sx + 12.0, sy + 12.0, &lines);
}

fn draw_legend(scene: &SceneGraph, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let state = scene.legend();
	let style = &theme.overlay;
	let (tx, ty) = legend::toggle_origin(scene.width());

	ctx.set_fill_style_str(&style.background.to_css());
	ctx.fill_rect(tx, ty, legend::TOGGLE_SIZE, legend::TOGGLE_SIZE);
	ctx.set_stroke_style_str(&style.border.to_css());
	ctx.set_line_width(1.0);
	ctx.stroke_rect(tx, ty, legend::TOGGLE_SIZE, legend::TOGGLE_SIZE);
	ctx.set_fill_style_str(&style.text.to_css());
	ctx.set_font(style.font);
	let _ = ctx.fill_text(if state.open { "\u{00d7}" } else { "?" }, tx + 8.0, ty + 16.0);

	let Some((x, y, width, height)) = legend::panel_rect(scene.width(), state) else {
		return;
	};
	ctx.set_fill_style_str(&style.background.to_css());
	ctx.fill_rect(x, y, width, height);
	ctx.stroke_rect(x, y, width, height);

	for (i, entry) in legend::legend_entries(state).iter().enumerate() {
		let cy = y + legend::PADDING + (i as f64 + 0.5) * legend::ROW_HEIGHT;
		let cx = x + legend::PADDING + 8.0;
		ctx.begin_path();
		match entry.swatch {
			LegendSwatch::Kind(kind) => {
				let node = theme.node(kind);
				let _ = ctx.arc(cx, cy, node.radius.min(7.0), 0.0, 2.0 * PI);
				ctx.set_fill_style_str(&node.color.to_css());
				ctx.fill();
			}
			LegendSwatch::Class(class) => {
				let ring = theme.ring(class);
				let _ = ctx.arc(cx, cy, 6.0, 0.0, 2.0 * PI);
				ctx.set_stroke_style_str(&ring.color.to_css());
				ctx.set_line_width(ring.width);
				ctx.stroke();
			}
		}
		ctx.set_fill_style_str(&style.text.to_css());
		let _ = ctx.fill_text(entry.label, cx + 16.0, cy + 4.0);
	}
}
