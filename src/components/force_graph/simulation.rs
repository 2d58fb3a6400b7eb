//! Energy-decaying force layout.
//!
//! Each step applies link, charge, centering and collision forces scaled by the
//! current energy (`alpha`), integrates velocities with friction, and moves
//! `alpha` a fixed fraction toward `alpha_target`. Once `alpha` drops under
//! `alpha_min` with a zero target the engine reports itself settled.

use std::f64::consts::PI;

use serde::Deserialize;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimulationParameters {
	pub link_distance: f64,
	pub charge_strength: f64,
	pub collision_margin: f64,
	pub velocity_decay: f64,
	pub alpha_min: f64,
	pub alpha_decay: f64,
	pub drag_alpha_target: f64,
	pub center_x: f64,
	pub center_y: f64,
}

impl Default for SimulationParameters {
	fn default() -> Self {
		let alpha_min: f64 = 0.001;
		Self {
			link_distance: 100.0,
			charge_strength: -50.0,
			collision_margin: 5.0,
			velocity_decay: 0.4,
			alpha_min,
			alpha_decay: 1.0 - alpha_min.powf(1.0 / 300.0),
			drag_alpha_target: 0.3,
			center_x: 400.0,
			center_y: 300.0,
		}
	}
}

pub const ALPHA_MAX: f64 = 1.0;

/// Minimum squared distance used by the charge force.
const CHARGE_DISTANCE_MIN2: f64 = 1.0;
const INITIAL_RADIUS: f64 = 10.0;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SimNode {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	pub radius: f64,
	pub pin: Option<(f64, f64)>,
}

impl SimNode {
	pub fn new(radius: f64) -> Self {
		Self {
			radius,
			..Self::default()
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct SimLink {
	pub source: usize,
	pub target: usize,
	/// Link weight in `[0, 1]`, scales the spring coefficient.
	pub weight: f64,
}

pub struct Simulation {
	params: SimulationParameters,
	nodes: Vec<SimNode>,
	links: Vec<SimLink>,
	/// Per-link (spring coefficient, bias toward source).
	link_terms: Vec<(f64, f64)>,
	alpha: f64,
	alpha_target: f64,
	rng: u32,
}

impl Simulation {
	pub fn new(params: SimulationParameters) -> Self {
		Self {
			params,
			nodes: Vec::new(),
			links: Vec::new(),
			link_terms: Vec::new(),
			alpha: 0.0,
			alpha_target: 0.0,
			rng: 12345,
		}
	}

	pub fn params(&self) -> &SimulationParameters {
		&self.params
	}

	/// Replaces the tracked node and link sets and re-seeds energy.
	///
	/// Nodes without a meaningful position are placed on a phyllotaxis spiral
	/// around the center. Links with an endpoint out of range are dropped.
	pub fn reset(&mut self, mut nodes: Vec<SimNode>, links: Vec<SimLink>) {
		let golden = PI * (3.0 - 5f64.sqrt());
		for (i, node) in nodes.iter_mut().enumerate() {
			if !node.x.is_finite() || !node.y.is_finite() || (node.x == 0.0 && node.y == 0.0) {
				let r = INITIAL_RADIUS * (0.5 + i as f64).sqrt();
				let a = i as f64 * golden;
				node.x = self.params.center_x + r * a.cos();
				node.y = self.params.center_y + r * a.sin();
			}
			if !node.vx.is_finite() || !node.vy.is_finite() {
				node.vx = 0.0;
				node.vy = 0.0;
			}
		}
		let n = nodes.len();
		self.links = links
			.into_iter()
			.filter(|l| l.source < n && l.target < n)
			.collect();
		self.nodes = nodes;

		let mut degree = vec![0usize; n];
		for link in &self.links {
			degree[link.source] += 1;
			degree[link.target] += 1;
		}
		self.link_terms = self
			.links
			.iter()
			.map(|l| {
				let (ds, dt) = (degree[l.source] as f64, degree[l.target] as f64);
				let strength = l.weight.clamp(0.0, 1.0) / ds.min(dt).max(1.0);
				(strength, ds / (ds + dt))
			})
			.collect();

		self.alpha = ALPHA_MAX;
	}

	pub fn nodes(&self) -> &[SimNode] {
		&self.nodes
	}

	pub fn node(&self, idx: usize) -> Option<&SimNode> {
		self.nodes.get(idx)
	}

	pub fn links(&self) -> &[SimLink] {
		&self.links
	}

	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	pub fn alpha_target(&self) -> f64 {
		self.alpha_target
	}

	pub fn is_settled(&self) -> bool {
		self.alpha < self.params.alpha_min
	}

	/// Raises the decay target and wakes the engine if it had settled.
	pub fn boost_energy(&mut self, target: f64) {
		self.alpha_target = target.clamp(0.0, ALPHA_MAX);
		if self.is_settled() {
			// alpha starts climbing toward the target on the next step
			self.alpha = self.params.alpha_min;
		}
	}

	pub fn release_energy(&mut self) {
		self.alpha_target = 0.0;
	}

	pub fn pin(&mut self, idx: usize, x: f64, y: f64) {
		if let Some(node) = self.nodes.get_mut(idx) {
			node.pin = Some((x, y));
		}
	}

	pub fn unpin(&mut self, idx: usize) {
		if let Some(node) = self.nodes.get_mut(idx) {
			node.pin = None;
		}
	}

	/// Advances one integration tick and returns the updated nodes.
	pub fn step(&mut self) -> &[SimNode] {
		self.alpha += (self.alpha_target - self.alpha) * self.params.alpha_decay;
		let alpha = self.alpha;

		self.apply_link_force(alpha);
		self.apply_charge_force(alpha);
		self.apply_collision_force();

		let keep = 1.0 - self.params.velocity_decay;
		for node in &mut self.nodes {
			match node.pin {
				Some((fx, fy)) => {
					node.x = fx;
					node.y = fy;
					node.vx = 0.0;
					node.vy = 0.0;
				}
				None => {
					node.vx *= keep;
					node.vy *= keep;
					node.x += node.vx;
					node.y += node.vy;
				}
			}
		}

		self.apply_center_force();
		&self.nodes
	}

	fn apply_link_force(&mut self, alpha: f64) {
		let distance = self.params.link_distance;
		for (i, link) in self.links.iter().enumerate() {
			let (strength, bias) = self.link_terms[i];
			let (s, t) = (&self.nodes[link.source], &self.nodes[link.target]);
			let mut dx = t.x + t.vx - s.x - s.vx;
			let mut dy = t.y + t.vy - s.y - s.vy;
			if dx == 0.0 && dy == 0.0 {
				dx = jiggle(&mut self.rng);
				dy = jiggle(&mut self.rng);
			}
			let l = (dx * dx + dy * dy).sqrt();
			let k = (l - distance) / l * alpha * strength;
			let (fx, fy) = (dx * k, dy * k);

			let target = &mut self.nodes[link.target];
			target.vx -= fx * bias;
			target.vy -= fy * bias;
			let source = &mut self.nodes[link.source];
			source.vx += fx * (1.0 - bias);
			source.vy += fy * (1.0 - bias);
		}
	}

	fn apply_charge_force(&mut self, alpha: f64) {
		let strength = self.params.charge_strength * alpha;
		let n = self.nodes.len();
		for i in 0..n {
			for j in (i + 1)..n {
				let mut dx = self.nodes[j].x - self.nodes[i].x;
				let mut dy = self.nodes[j].y - self.nodes[i].y;
				if dx == 0.0 && dy == 0.0 {
					dx = jiggle(&mut self.rng);
					dy = jiggle(&mut self.rng);
				}
				let mut l = dx * dx + dy * dy;
				if l < CHARGE_DISTANCE_MIN2 {
					l = (CHARGE_DISTANCE_MIN2 * l).sqrt();
				}
				let w = strength / l;
				self.nodes[i].vx += dx * w;
				self.nodes[i].vy += dy * w;
				self.nodes[j].vx -= dx * w;
				self.nodes[j].vy -= dy * w;
			}
		}
	}

	/// Overlapping circles push each other apart, the smaller one moving more.
	fn apply_collision_force(&mut self) {
		let margin = self.params.collision_margin;
		let n = self.nodes.len();
		for i in 0..n {
			for j in (i + 1)..n {
				let (a, b) = (&self.nodes[i], &self.nodes[j]);
				let (ri, rj) = (a.radius + margin, b.radius + margin);
				let r = ri + rj;
				let mut dx = (a.x + a.vx) - (b.x + b.vx);
				let mut dy = (a.y + a.vy) - (b.y + b.vy);
				let mut l = dx * dx + dy * dy;
				if l >= r * r {
					continue;
				}
				if dx == 0.0 {
					dx = jiggle(&mut self.rng);
					l += dx * dx;
				}
				if dy == 0.0 {
					dy = jiggle(&mut self.rng);
					l += dy * dy;
				}
				let dist = l.sqrt();
				let push = (r - dist) / dist;
				let share = (rj * rj) / (ri * ri + rj * rj);
				let (px, py) = (dx * push, dy * push);
				self.nodes[i].vx += px * share;
				self.nodes[i].vy += py * share;
				self.nodes[j].vx -= px * (1.0 - share);
				self.nodes[j].vy -= py * (1.0 - share);
			}
		}
	}

	/// Shifts every free node so the mean position sits on the center.
	fn apply_center_force(&mut self) {
		if self.nodes.is_empty() {
			return;
		}
		let n = self.nodes.len() as f64;
		let (sx, sy) = self
			.nodes
			.iter()
			.fold((0.0, 0.0), |(sx, sy), node| (sx + node.x, sy + node.y));
		let (dx, dy) = (self.params.center_x - sx / n, self.params.center_y - sy / n);
		for node in self.nodes.iter_mut().filter(|node| node.pin.is_none()) {
			node.x += dx;
			node.y += dy;
		}
	}
}

/// Tiny deterministic offset to separate coincident nodes.
fn jiggle(state: &mut u32) -> f64 {
	*state = state.wrapping_mul(1103515245).wrapping_add(12345);
	((*state & 0xFFFF) as f64 / 65536.0 - 0.5) * 1e-6
}
