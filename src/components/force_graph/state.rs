use log::debug;

use super::interaction::{DragState, GestureEnd};
use super::render::{self, Painter};
use super::scene::{self, Backdrop, SceneElements};
use super::simulation::{Simulation, SimulationParameters};
use super::types::{GraphData, GraphNode};

/// Everything the canvas needs between frames: the current snapshot, the
/// engine laying it out, the visuals bound to it and gesture state.
pub struct ForceGraphState {
	pub snapshot: GraphData,
	pub simulation: Simulation,
	pub scene: SceneElements,
	pub backdrop: Backdrop,
	pub drag: DragState,
	pub hover: Option<usize>,
	pub width: f64,
	pub height: f64,
	selected: Option<(String, Option<usize>)>,
	backdrop_painted: bool,
}

impl ForceGraphState {
	pub fn new(params: SimulationParameters, width: f64, height: f64) -> Self {
		let backdrop = Backdrop::new(params.center_x, params.center_y);
		Self {
			snapshot: GraphData::default(),
			simulation: Simulation::new(params),
			scene: SceneElements::default(),
			backdrop,
			drag: DragState::default(),
			hover: None,
			width,
			height,
			selected: None,
			backdrop_painted: false,
		}
	}

	/// Swaps in a new snapshot: visuals are rebuilt first, then the engine is
	/// reset on the node and link set bound to them.
	pub fn load_snapshot(&mut self, data: GraphData) {
		self.scene = scene::reconcile(std::mem::take(&mut self.scene), &data);
		self.drag.cancel_all(&mut self.simulation);
		self.hover = None;

		let (nodes, links) = self.scene.simulation_input();
		let offered = links.len();
		self.simulation.reset(nodes, links);
		self.scene.sync_positions(self.simulation.nodes());
		if self.simulation.links().len() < offered {
			debug!(
				"dropped {} links with unknown endpoints",
				offered - self.simulation.links().len()
			);
		}

		if let Some((id, idx)) = self.selected.as_mut() {
			*idx = self.scene.nodes.iter().position(|n| n.id == *id);
		}
		self.snapshot = data;
	}

	/// Maps a point in CSS pixels on a canvas of `rect` size into graph space.
	pub fn screen_to_graph(&self, sx: f64, sy: f64, rect: (f64, f64)) -> (f64, f64) {
		let (rw, rh) = rect;
		let kx = if rw > 0.0 { self.width / rw } else { 1.0 };
		let ky = if rh > 0.0 { self.height / rh } else { 1.0 };
		(sx * kx, sy * ky)
	}

	/// Topmost node whose circle contains the graph-space point.
	pub fn node_at_position(&self, gx: f64, gy: f64) -> Option<usize> {
		self.scene.nodes.iter().rposition(|node| {
			let (dx, dy) = (node.x - gx, node.y - gy);
			dx * dx + dy * dy <= node.radius * node.radius
		})
	}

	/// Hover hook. Returns whether the hovered node changed.
	///
	/// Only the cursor reacts to it; there is no tooltip.
	pub fn set_hover(&mut self, node: Option<usize>) -> bool {
		if self.hover == node {
			return false;
		}
		self.hover = node;
		true
	}

	pub fn pointer_down(&mut self, pointer: i32, at: (f64, f64)) -> bool {
		match self.node_at_position(at.0, at.1) {
			Some(idx) => {
				self.drag.start(&mut self.simulation, pointer, idx, at);
				true
			}
			None => false,
		}
	}

	pub fn pointer_move(&mut self, pointer: i32, at: (f64, f64)) {
		if self.drag.dragged_node(pointer).is_some() {
			self.drag.update(&mut self.simulation, pointer, at);
		} else if !self.drag.is_dragging() {
			let hovered = self.node_at_position(at.0, at.1);
			self.set_hover(hovered);
		}
	}

	/// Ends the pointer's drag. A click selects the node and returns its index.
	/// Hover is re-read at `at` once no drag remains.
	pub fn pointer_up(&mut self, pointer: i32, at: (f64, f64)) -> Option<usize> {
		let gesture = self.drag.end(&mut self.simulation, pointer);
		if !self.drag.is_dragging() {
			let hovered = self.node_at_position(at.0, at.1);
			self.set_hover(hovered);
		}
		match gesture {
			GestureEnd::Click(idx) => self.select(idx),
			GestureEnd::Dragged(_) | GestureEnd::None => None,
		}
	}

	/// Ends the pointer's drag without treating it as a click.
	pub fn pointer_cancel(&mut self, pointer: i32) {
		self.drag.end(&mut self.simulation, pointer);
	}

	pub fn select(&mut self, idx: usize) -> Option<usize> {
		let node = self.snapshot.nodes.get(idx)?;
		self.selected = Some((node.id.clone(), Some(idx)));
		Some(idx)
	}

	pub fn node(&self, idx: usize) -> Option<&GraphNode> {
		self.snapshot.nodes.get(idx)
	}

	pub fn selected_index(&self) -> Option<usize> {
		self.selected.as_ref().and_then(|(_, idx)| *idx)
	}

	/// One engine step, if it has energy left. Returns whether more are needed.
	pub fn tick(&mut self) -> bool {
		if self.simulation.is_settled() {
			return false;
		}
		let positions = self.simulation.step();
		self.scene.sync_positions(positions);
		if self.simulation.is_settled() {
			debug!(
				"simulation settled (alpha {:.4}, target {})",
				self.simulation.alpha(),
				self.simulation.alpha_target()
			);
			return false;
		}
		true
	}

	/// Paints the guide backdrop the first time only.
	pub fn paint_backdrop(&mut self, painter: &mut impl Painter) -> bool {
		if self.backdrop_painted {
			return false;
		}
		render::draw_backdrop(painter, &self.backdrop);
		self.backdrop_painted = true;
		true
	}

	pub fn paint(&self, painter: &mut impl Painter) {
		render::draw_scene(painter, &self.scene, self.selected_index(), self.width, self.height);
	}
}
