use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::{KnowledgeGraphState, LABEL_OFFSET};

const BACKGROUND: &str = "#f8fafc";
const GRID_COLOR: &str = "rgba(0, 0, 0, 0.1)";
const GRID_PITCH: f64 = 20.0;
const EDGE_COLOR: &str = "rgba(203, 213, 225, 0.8)";
const LABEL_COLOR: &str = "#334155";

pub fn render(state: &KnowledgeGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	draw_grid(state, ctx);

	let (ox, oy) = state.origin();
	let (cx, cy) = state.graph_center();
	let k = state.viewport.shown().k;
	ctx.save();
	let _ = ctx.translate(ox, oy);
	let _ = ctx.scale(k, k);
	let _ = ctx.translate(-cx, -cy);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

/// Dot grid that follows the pan offset but keeps its size.
fn draw_grid(state: &KnowledgeGraphState, ctx: &CanvasRenderingContext2d) {
	let t = state.viewport.shown();
	let (start_x, start_y) = (t.x.rem_euclid(GRID_PITCH), t.y.rem_euclid(GRID_PITCH));
	ctx.set_fill_style_str(GRID_COLOR);
	let mut y = start_y;
	while y < state.height {
		let mut x = start_x;
		while x < state.width {
			ctx.fill_rect(x - 0.5, y - 0.5, 1.0, 1.0);
			x += GRID_PITCH;
		}
		y += GRID_PITCH;
	}
}

fn draw_edges(state: &KnowledgeGraphState, ctx: &CanvasRenderingContext2d) {
	let nodes = &state.layout.nodes;
	ctx.set_stroke_style_str(EDGE_COLOR);
	ctx.set_line_width(2.0);
	ctx.begin_path();
	for edge in &state.layout.edges {
		let (Some(source), Some(target)) = (nodes.get(edge.source), nodes.get(edge.target))
		else {
			continue;
		};
		ctx.move_to(source.x, source.y);
		ctx.line_to(target.x, target.y);
	}
	ctx.stroke();
}

fn draw_nodes(state: &KnowledgeGraphState, ctx: &CanvasRenderingContext2d) {
	// Hovered node last so it sits above its neighbours.
	let order = (0..state.layout.nodes.len())
		.filter(|&idx| !state.is_hovered(idx))
		.chain(state.hovered);

	for idx in order {
		let Some(node) = state.layout.nodes.get(idx) else {
			continue;
		};
		let hovered = state.is_hovered(idx);
		let radius = state.node_radius(idx, node);

		ctx.save();
		ctx.set_shadow_color("rgba(0, 0, 0, 0.1)");
		ctx.set_shadow_blur(6.0);
		ctx.set_shadow_offset_y(4.0);
		ctx.begin_path();
		let _ = ctx.arc(node.x, node.y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(node.kind.color());
		ctx.fill();
		ctx.restore();

		ctx.set_stroke_style_str("white");
		ctx.set_line_width(if hovered { 4.0 } else { 2.0 });
		ctx.stroke();

		if state.label_visible(idx, node) {
			let y = node.y + node.kind.radius() + LABEL_OFFSET;
			ctx.set_font(&format!("bold {}px sans-serif", node.kind.font_px()));
			ctx.set_text_align("center");
			ctx.set_line_join("round");
			ctx.set_line_width(4.0);
			ctx.set_stroke_style_str("white");
			let _ = ctx.stroke_text(&node.label, node.x, y);
			ctx.set_fill_style_str(LABEL_COLOR);
			let _ = ctx.fill_text(&node.label, node.x, y);
		}
	}
}
