//! Retained scene: the fixed backdrop plus one visual per node and link.
//!
//! [`reconcile`] rebuilds the node and link visuals wholesale from a snapshot.
//! Identity-based diffing could be added there without touching the engine.

use std::collections::HashMap;
use std::f64::consts::PI;

use super::scale::{self, NodeTier};
use super::simulation::{SimLink, SimNode};
use super::types::GraphData;

pub const GUIDE_CIRCLES: usize = 5;
pub const GUIDE_CIRCLE_STEP: f64 = 80.0;
pub const GUIDE_SPOKES: usize = 12;
pub const GUIDE_SPOKE_LENGTH: f64 = 400.0;

#[derive(Clone, Debug, PartialEq)]
pub struct GuideCircle {
	pub cx: f64,
	pub cy: f64,
	pub r: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GuideLine {
	pub x1: f64,
	pub y1: f64,
	pub x2: f64,
	pub y2: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Backdrop {
	pub circles: Vec<GuideCircle>,
	pub spokes: Vec<GuideLine>,
}

impl Backdrop {
	pub fn new(cx: f64, cy: f64) -> Self {
		let circles = (1..=GUIDE_CIRCLES)
			.rev()
			.map(|i| GuideCircle {
				cx,
				cy,
				r: i as f64 * GUIDE_CIRCLE_STEP,
			})
			.collect();
		let spokes = (0..GUIDE_SPOKES)
			.map(|i| {
				let angle = i as f64 / GUIDE_SPOKES as f64 * 2.0 * PI;
				GuideLine {
					x1: cx,
					y1: cy,
					x2: cx + angle.cos() * GUIDE_SPOKE_LENGTH,
					y2: cy + angle.sin() * GUIDE_SPOKE_LENGTH,
				}
			})
			.collect();
		Self { circles, spokes }
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct NodeVisual {
	pub id: String,
	pub label: String,
	pub radius: f64,
	pub tier: NodeTier,
	pub label_dy: f64,
	pub x: f64,
	pub y: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LinkVisual {
	/// Resolved node indices; `None` when an endpoint id is unknown.
	pub endpoints: Option<(usize, usize)>,
	pub strength: f64,
	pub width: f64,
	pub color: String,
	pub x1: f64,
	pub y1: f64,
	pub x2: f64,
	pub y2: f64,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SceneElements {
	pub nodes: Vec<NodeVisual>,
	pub links: Vec<LinkVisual>,
	/// Bumped on every reconciliation.
	pub generation: u64,
}

impl SceneElements {
	/// Engine inputs bound to these visuals, index for index.
	pub fn simulation_input(&self) -> (Vec<SimNode>, Vec<SimLink>) {
		let nodes = self.nodes.iter().map(|n| SimNode::new(n.radius)).collect();
		let links = self
			.links
			.iter()
			.filter_map(|l| {
				l.endpoints.map(|(source, target)| SimLink {
					source,
					target,
					weight: l.strength,
				})
			})
			.collect();
		(nodes, links)
	}

	/// Moves every visual to the engine's current (or pinned) positions.
	pub fn sync_positions(&mut self, positions: &[SimNode]) {
		let at = |idx: usize| {
			positions
				.get(idx)
				.map(|n| n.pin.unwrap_or((n.x, n.y)))
		};
		for (idx, node) in self.nodes.iter_mut().enumerate() {
			if let Some((x, y)) = at(idx) {
				node.x = x;
				node.y = y;
			}
		}
		for link in &mut self.links {
			let Some((s, t)) = link.endpoints else {
				continue;
			};
			if let (Some((x1, y1)), Some((x2, y2))) = (at(s), at(t)) {
				(link.x1, link.y1, link.x2, link.y2) = (x1, y1, x2, y2);
			}
		}
	}
}

/// Drops every previous visual and builds a fresh set bound to `snapshot`.
pub fn reconcile(previous: SceneElements, snapshot: &GraphData) -> SceneElements {
	let generation = previous.generation + 1;
	drop(previous);

	let mut id_to_idx = HashMap::new();
	let nodes = snapshot
		.nodes
		.iter()
		.enumerate()
		.map(|(i, node)| {
			id_to_idx.entry(node.id.as_str()).or_insert(i);
			let radius = node.radius();
			NodeVisual {
				id: node.id.clone(),
				label: node.name.clone(),
				radius,
				tier: NodeTier::classify(node.kind, node.engagement()),
				label_dy: scale::label_offset(radius),
				x: 0.0,
				y: 0.0,
			}
		})
		.collect();

	let links = snapshot
		.links
		.iter()
		.map(|link| {
			let endpoints = match (
				id_to_idx.get(link.source.as_str()),
				id_to_idx.get(link.target.as_str()),
			) {
				(Some(&s), Some(&t)) => Some((s, t)),
				_ => {
					log::debug!("link {} -> {} has an unknown endpoint", link.source, link.target);
					None
				}
			};
			LinkVisual {
				endpoints,
				strength: link.strength,
				width: scale::link_width(link.strength),
				color: scale::link_color(link.strength),
				x1: 0.0,
				y1: 0.0,
				x2: 0.0,
				y2: 0.0,
			}
		})
		.collect();

	SceneElements {
		nodes,
		links,
		generation,
	}
}

#[cfg(test)]
pub(crate) mod tests {
	use super::*;
	use crate::components::force_graph::types::{GraphLink, GraphNode, NodeKind};

	pub(crate) fn sample_snapshot() -> GraphData {
		let node = |id: &str, kind: NodeKind, score: Option<f64>| GraphNode {
			id: id.into(),
			kind,
			name: id.to_uppercase(),
			engagement_score: score,
			..GraphNode::default()
		};
		let link = |target: &str, strength: f64| GraphLink {
			source: "hub".into(),
			target: target.into(),
			strength,
		};
		GraphData {
			nodes: vec![
				node("hub", NodeKind::Center, None),
				node("a", NodeKind::Visitor, Some(10.0)),
				node("b", NodeKind::Visitor, Some(60.0)),
			],
			links: vec![link("a", 0.2), link("b", 0.9)],
		}
	}

	#[test]
	fn backdrop_geometry() {
		let backdrop = Backdrop::new(400.0, 300.0);
		assert_eq!(backdrop.circles.len(), 5);
		let radii: Vec<f64> = backdrop.circles.iter().map(|c| c.r).collect();
		assert_eq!(radii, vec![400.0, 320.0, 240.0, 160.0, 80.0]);
		assert_eq!(backdrop.spokes.len(), 12);
		for spoke in &backdrop.spokes {
			let len = ((spoke.x2 - spoke.x1).powi(2) + (spoke.y2 - spoke.y1).powi(2)).sqrt();
			assert!((len - 400.0).abs() < 1e-9);
		}
		assert!((backdrop.spokes[3].x2 - 400.0).abs() < 1e-9);
		assert!((backdrop.spokes[3].y2 - 700.0).abs() < 1e-9);
	}

	#[test]
	fn reconcile_encodes_three_node_scenario() {
		let scene = reconcile(SceneElements::default(), &sample_snapshot());
		assert_eq!(scene.nodes.len(), 3);
		assert_eq!(scene.nodes[0].tier, NodeTier::Hub);
		assert_eq!(scene.nodes[1].tier, NodeTier::Low);
		assert_eq!(scene.nodes[2].tier, NodeTier::High);
		assert!((scene.links[0].width - 1.8).abs() < 1e-9);
		assert!((scene.links[1].width - 4.6).abs() < 1e-9);
		assert_eq!(scene.links[0].endpoints, Some((0, 1)));
		assert_eq!(scene.nodes[1].label_dy, -18.0);
	}

	#[test]
	fn reconcile_replaces_everything() {
		let first = reconcile(SceneElements::default(), &sample_snapshot());
		let mut smaller = sample_snapshot();
		smaller.nodes.truncate(2);
		smaller.links.truncate(1);
		let second = reconcile(first, &smaller);
		assert_eq!(second.generation, 2);
		assert_eq!(second.nodes.len(), 2);
		assert_eq!(second.links.len(), 1);
	}

	#[test]
	fn unknown_link_endpoint_is_kept_unbound() {
		let mut snapshot = sample_snapshot();
		snapshot.links.push(GraphLink {
			source: "hub".into(),
			target: "ghost".into(),
			strength: 0.5,
		});
		let scene = reconcile(SceneElements::default(), &snapshot);
		assert_eq!(scene.links.len(), 3);
		assert_eq!(scene.links[2].endpoints, None);
		let (nodes, links) = scene.simulation_input();
		assert_eq!(nodes.len(), 3);
		assert_eq!(links.len(), 2);
	}

	#[test]
	fn sync_prefers_pin() {
		let mut scene = reconcile(SceneElements::default(), &sample_snapshot());
		let positions = vec![
			SimNode {
				x: 1.0,
				y: 2.0,
				..SimNode::default()
			},
			SimNode {
				x: 3.0,
				y: 4.0,
				pin: Some((30.0, 40.0)),
				..SimNode::default()
			},
			SimNode {
				x: 5.0,
				y: 6.0,
				..SimNode::default()
			},
		];
		scene.sync_positions(&positions);
		assert_eq!((scene.nodes[1].x, scene.nodes[1].y), (30.0, 40.0));
		let link = &scene.links[1];
		assert_eq!((link.x1, link.y1, link.x2, link.y2), (1.0, 2.0, 5.0, 6.0));
	}
}
