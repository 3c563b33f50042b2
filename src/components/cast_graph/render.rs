use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::GraphState;

const BACKGROUND: &str = "#ffffff";
const LINK_COLOR: &str = "gray";
const LINK_WIDTH: f64 = 2.0;
const STROKE_COLOR: &str = "black";
const LABEL_COLOR: &str = "#555";
// Labels sit to the right of the marker.
const LABEL_DX: f64 = 12.0;
const LABEL_DY: f64 = 3.0;

/// One full frame: links, markers, labels, all styled from the current
/// highlight projection and drawn under the view transform.
pub fn render(state: &GraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_links(state, ctx);
	draw_nodes(state, ctx);
	draw_labels(state, ctx);
	ctx.restore();
}

fn draw_links(state: &GraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_stroke_style_str(LINK_COLOR);
	ctx.set_line_width(LINK_WIDTH);
	for link in &state.model.links {
		let source = &state.model.nodes[link.source];
		let target = &state.model.nodes[link.target];
		ctx.set_global_alpha(state.highlight.link_opacity(link));
		ctx.begin_path();
		ctx.move_to(source.x, source.y);
		ctx.line_to(target.x, target.y);
		ctx.stroke();
	}
	ctx.set_global_alpha(1.0);
}

fn draw_nodes(state: &GraphState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	for (idx, node) in state.model.nodes.iter().enumerate() {
		let kind = node.kind();
		ctx.set_global_alpha(state.highlight.node_opacity(idx));
		ctx.begin_path();
		let _ = ctx.arc(node.x, node.y, state.model.radius_of(kind), 0.0, 2.0 * PI);
		ctx.set_fill_style_str(state.model.color_of(kind));
		ctx.fill();
		if state.highlight.node_stroke(idx) {
			ctx.set_stroke_style_str(STROKE_COLOR);
			ctx.set_line_width(1.5 / k);
			ctx.stroke();
		}
	}
	ctx.set_global_alpha(1.0);
}

fn draw_labels(state: &GraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(LABEL_COLOR);
	ctx.set_font("10px Arial");
	for (idx, node) in state.model.nodes.iter().enumerate() {
		if !state.highlight.label_visible(idx) {
			continue;
		}
		let _ = ctx.fill_text(&node.id, node.x + LABEL_DX, node.y + LABEL_DY);
	}
}
