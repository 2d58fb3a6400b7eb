//! Drag and selection gestures on graph nodes.
//!
//! Each pointer drives its own drag. The engine's energy target is boosted
//! when the first drag starts and released once the last one ends.

use std::collections::HashMap;

use super::simulation::Simulation;

/// Pointer travel, in graph units, after which a press no longer counts as a click.
pub const CLICK_SLOP: f64 = 3.0;

#[derive(Clone, Debug, PartialEq)]
struct ActiveDrag {
	node: usize,
	origin: (f64, f64),
	moved: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GestureEnd {
	/// The pointer barely moved: treat the gesture as a click on `node`.
	Click(usize),
	Dragged(usize),
	/// The pointer was not dragging anything.
	None,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	active: HashMap<i32, ActiveDrag>,
}

impl DragState {
	pub fn is_dragging(&self) -> bool {
		!self.active.is_empty()
	}

	pub fn dragged_node(&self, pointer: i32) -> Option<usize> {
		self.active.get(&pointer).map(|d| d.node)
	}

	/// Idle -> Dragging. The pin starts at the node's simulated position.
	pub fn start(&mut self, sim: &mut Simulation, pointer: i32, node: usize, at: (f64, f64)) {
		let Some((x, y)) = sim.node(node).map(|n| (n.x, n.y)) else {
			return;
		};
		if self.active.is_empty() {
			let target = sim.params().drag_alpha_target;
			sim.boost_energy(target);
		}
		sim.pin(node, x, y);
		self.active.insert(
			pointer,
			ActiveDrag {
				node,
				origin: at,
				moved: false,
			},
		);
		log::debug!("drag start on node {node} (pointer {pointer})");
	}

	pub fn update(&mut self, sim: &mut Simulation, pointer: i32, at: (f64, f64)) {
		let Some(drag) = self.active.get_mut(&pointer) else {
			return;
		};
		if !drag.moved {
			let (dx, dy) = (at.0 - drag.origin.0, at.1 - drag.origin.1);
			drag.moved = dx * dx + dy * dy > CLICK_SLOP * CLICK_SLOP;
		}
		sim.pin(drag.node, at.0, at.1);
	}

	/// Dragging -> Idle. Clears the pin and, with no drags left, the energy target.
	pub fn end(&mut self, sim: &mut Simulation, pointer: i32) -> GestureEnd {
		let Some(drag) = self.active.remove(&pointer) else {
			return GestureEnd::None;
		};
		sim.unpin(drag.node);
		if self.active.is_empty() {
			sim.release_energy();
		}
		log::debug!("drag end on node {} (pointer {pointer})", drag.node);
		if drag.moved {
			GestureEnd::Dragged(drag.node)
		} else {
			GestureEnd::Click(drag.node)
		}
	}

	/// Drops every drag without touching the engine's node set.
	pub fn cancel_all(&mut self, sim: &mut Simulation) {
		if self.active.drain().count() > 0 {
			sim.release_energy();
		}
	}
}
