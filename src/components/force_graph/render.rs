use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::scene::{Backdrop, SceneElements};

const BACKDROP_CIRCLE: &str = "rgba(78, 205, 196, 0.2)";
const BACKDROP_SPOKE: &str = "rgba(78, 205, 196, 0.1)";
const LINK_OPACITY: f64 = 0.6;
const NODE_OUTLINE: &str = "#fff";
const NODE_OUTLINE_WIDTH: f64 = 2.0;
const SELECTED_RING: &str = "rgba(255, 255, 255, 0.7)";
const LABEL_FONT: &str = "bold 10px sans-serif";

/// Drawing primitives the scene needs from a 2D surface.
pub trait Painter {
	fn clear(&mut self, width: f64, height: f64);
	fn set_alpha(&mut self, alpha: f64);
	fn line(&mut self, from: (f64, f64), to: (f64, f64), color: &str, width: f64, dash: &[f64]);
	fn circle(
		&mut self,
		center: (f64, f64),
		r: f64,
		fill: Option<&str>,
		stroke: Option<(&str, f64)>,
		dash: &[f64],
	);
	fn text(&mut self, text: &str, at: (f64, f64), color: &str, font: &str);
}

impl Painter for CanvasRenderingContext2d {
	fn clear(&mut self, width: f64, height: f64) {
		self.clear_rect(0.0, 0.0, width, height);
	}

	fn set_alpha(&mut self, alpha: f64) {
		self.set_global_alpha(alpha);
	}

	fn line(&mut self, from: (f64, f64), to: (f64, f64), color: &str, width: f64, dash: &[f64]) {
		set_dash(self, dash);
		self.set_stroke_style_str(color);
		self.set_line_width(width);
		self.begin_path();
		self.move_to(from.0, from.1);
		self.line_to(to.0, to.1);
		self.stroke();
	}

	fn circle(
		&mut self,
		center: (f64, f64),
		r: f64,
		fill: Option<&str>,
		stroke: Option<(&str, f64)>,
		dash: &[f64],
	) {
		set_dash(self, dash);
		self.begin_path();
		let _ = self.arc(center.0, center.1, r, 0.0, 2.0 * PI);
		if let Some(fill) = fill {
			self.set_fill_style_str(fill);
			self.fill();
		}
		if let Some((color, width)) = stroke {
			self.set_stroke_style_str(color);
			self.set_line_width(width);
			self.stroke();
		}
	}

	fn text(&mut self, text: &str, at: (f64, f64), color: &str, font: &str) {
		self.set_fill_style_str(color);
		self.set_font(font);
		self.set_text_align("center");
		let _ = self.fill_text(text, at.0, at.1);
	}
}

fn set_dash(ctx: &CanvasRenderingContext2d, dash: &[f64]) {
	let segments = js_sys::Array::new();
	for d in dash {
		segments.push(&JsValue::from_f64(*d));
	}
	let _ = ctx.set_line_dash(&segments);
}

/// Guide circles and spokes; painted on their own layer, once.
pub fn draw_backdrop(painter: &mut impl Painter, backdrop: &Backdrop) {
	for c in &backdrop.circles {
		painter.circle((c.cx, c.cy), c.r, None, Some((BACKDROP_CIRCLE, 1.0)), &[2.0, 2.0]);
	}
	for s in &backdrop.spokes {
		painter.line((s.x1, s.y1), (s.x2, s.y2), BACKDROP_SPOKE, 1.0, &[]);
	}
}

pub fn draw_scene(
	painter: &mut impl Painter,
	scene: &SceneElements,
	selected: Option<usize>,
	width: f64,
	height: f64,
) {
	painter.clear(width, height);
	draw_links(painter, scene);
	draw_nodes(painter, scene, selected);
}

fn draw_links(painter: &mut impl Painter, scene: &SceneElements) {
	painter.set_alpha(LINK_OPACITY);
	for link in scene.links.iter().filter(|l| l.endpoints.is_some()) {
		painter.line((link.x1, link.y1), (link.x2, link.y2), &link.color, link.width, &[]);
	}
	painter.set_alpha(1.0);
}

fn draw_nodes(painter: &mut impl Painter, scene: &SceneElements, selected: Option<usize>) {
	for (idx, node) in scene.nodes.iter().enumerate() {
		let center = (node.x, node.y);
		painter.circle(
			center,
			node.radius,
			Some(node.tier.color()),
			Some((NODE_OUTLINE, NODE_OUTLINE_WIDTH)),
			&[],
		);
		if selected == Some(idx) {
			painter.circle(center, node.radius + 4.0, None, Some((SELECTED_RING, 1.5)), &[]);
		}
		painter.text(&node.label, (node.x, node.y + node.label_dy), "#fff", LABEL_FONT);
	}
}

#[cfg(test)]
pub(crate) mod tests {
	use super::*;
	use crate::components::force_graph::scene::{self, tests::sample_snapshot};

	#[derive(Clone, Debug, PartialEq)]
	pub(crate) enum Op {
		Clear,
		Alpha(f64),
		Line { width: f64, color: String },
		Circle { r: f64, fill: Option<String> },
		Text(String, (f64, f64)),
	}

	#[derive(Default)]
	pub(crate) struct RecordingPainter {
		pub ops: Vec<Op>,
	}

	impl RecordingPainter {
		pub fn count(&self, pred: impl Fn(&Op) -> bool) -> usize {
			self.ops.iter().filter(|op| pred(op)).count()
		}
	}

	impl Painter for RecordingPainter {
		fn clear(&mut self, _: f64, _: f64) {
			self.ops.push(Op::Clear);
		}

		fn set_alpha(&mut self, alpha: f64) {
			self.ops.push(Op::Alpha(alpha));
		}

		fn line(&mut self, _: (f64, f64), _: (f64, f64), color: &str, width: f64, _: &[f64]) {
			self.ops.push(Op::Line {
				width,
				color: color.into(),
			});
		}

		fn circle(
			&mut self,
			_: (f64, f64),
			r: f64,
			fill: Option<&str>,
			_: Option<(&str, f64)>,
			_: &[f64],
		) {
			self.ops.push(Op::Circle {
				r,
				fill: fill.map(Into::into),
			});
		}

		fn text(&mut self, text: &str, at: (f64, f64), _: &str, _: &str) {
			self.ops.push(Op::Text(text.into(), at));
		}
	}

	#[test]
	fn backdrop_paints_five_circles_and_twelve_spokes() {
		let mut painter = RecordingPainter::default();
		draw_backdrop(&mut painter, &Backdrop::new(400.0, 300.0));
		assert_eq!(painter.count(|op| matches!(op, Op::Circle { .. })), 5);
		assert_eq!(painter.count(|op| matches!(op, Op::Line { .. })), 12);
	}

	#[test]
	fn scene_paints_links_under_nodes() {
		let mut elements = scene::reconcile(Default::default(), &sample_snapshot());
		elements.nodes[1].y = 50.0;
		let mut painter = RecordingPainter::default();
		draw_scene(&mut painter, &elements, None, 800.0, 600.0);

		assert_eq!(painter.ops[0], Op::Clear);
		let widths: Vec<f64> = painter
			.ops
			.iter()
			.filter_map(|op| match op {
				Op::Line { width, .. } => Some(*width),
				_ => None,
			})
			.collect();
		assert_eq!(widths.len(), 2);
		assert!((widths[0] - 1.8).abs() < 1e-9);
		assert!((widths[1] - 4.6).abs() < 1e-9);

		let fills: Vec<Option<String>> = painter
			.ops
			.iter()
			.filter_map(|op| match op {
				Op::Circle { fill, .. } => Some(fill.clone()),
				_ => None,
			})
			.collect();
		assert_eq!(
			fills,
			vec![
				Some("#4ecdc4".to_string()),
				Some("#96ceb4".to_string()),
				Some("#ff6b6b".to_string()),
			]
		);
		assert!(painter.ops.contains(&Op::Text("A".into(), (0.0, 32.0))));
	}

	#[test]
	fn selection_adds_a_ring() {
		let elements = scene::reconcile(Default::default(), &sample_snapshot());
		let mut painter = RecordingPainter::default();
		draw_scene(&mut painter, &elements, Some(2), 800.0, 600.0);
		assert_eq!(painter.count(|op| matches!(op, Op::Circle { fill: None, .. })), 1);
	}
}
