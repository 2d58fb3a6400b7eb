//! Visual encodings for nodes and links.

use super::types::NodeKind;

pub const HUB_COLOR: &str = "#4ecdc4";
pub const HIGH_COLOR: &str = "#ff6b6b";
pub const MEDIUM_COLOR: &str = "#45b7d1";
pub const LOW_COLOR: &str = "#96ceb4";

/// Scores strictly above this are high tier.
pub const HIGH_THRESHOLD: f64 = 50.0;
/// Scores strictly above this (and not high) are medium tier.
pub const MEDIUM_THRESHOLD: f64 = 20.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeTier {
	Hub,
	High,
	Medium,
	Low,
}

impl NodeTier {
	pub fn classify(kind: NodeKind, score: f64) -> Self {
		match kind {
			NodeKind::Center => NodeTier::Hub,
			NodeKind::Visitor if score > HIGH_THRESHOLD => NodeTier::High,
			NodeKind::Visitor if score > MEDIUM_THRESHOLD => NodeTier::Medium,
			NodeKind::Visitor => NodeTier::Low,
		}
	}

	pub fn color(self) -> &'static str {
		match self {
			NodeTier::Hub => HUB_COLOR,
			NodeTier::High => HIGH_COLOR,
			NodeTier::Medium => MEDIUM_COLOR,
			NodeTier::Low => LOW_COLOR,
		}
	}
}

pub fn link_width(strength: f64) -> f64 {
	strength * 4.0 + 1.0
}

pub fn link_alpha(strength: f64) -> f64 {
	0.3 + 0.7 * strength.clamp(0.0, 1.0)
}

pub fn link_color(strength: f64) -> String {
	format!("rgba(78, 205, 196, {})", link_alpha(strength))
}

/// Vertical label offset, measured from the node center.
pub fn label_offset(radius: f64) -> f64 {
	-radius - 8.0
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn tier_boundaries() {
		assert_eq!(NodeTier::classify(NodeKind::Visitor, 50.0), NodeTier::Medium);
		assert_eq!(NodeTier::classify(NodeKind::Visitor, 50.0001), NodeTier::High);
		assert_eq!(NodeTier::classify(NodeKind::Visitor, 20.0), NodeTier::Low);
		assert_eq!(NodeTier::classify(NodeKind::Visitor, 20.5), NodeTier::Medium);
		assert_eq!(NodeTier::classify(NodeKind::Visitor, 0.0), NodeTier::Low);
	}

	#[test]
	fn hub_ignores_score() {
		assert_eq!(NodeTier::classify(NodeKind::Center, 99.0), NodeTier::Hub);
		assert_eq!(NodeTier::Hub.color(), HUB_COLOR);
	}

	#[test]
	fn link_width_is_linear() {
		assert!((link_width(0.2) - 1.8).abs() < 1e-9);
		assert!((link_width(0.9) - 4.6).abs() < 1e-9);
		assert_eq!(link_width(0.0), 1.0);
		assert_eq!(link_width(1.0), 5.0);
	}

	#[test]
	fn link_alpha_strictly_increases() {
		let mut prev = link_alpha(0.0);
		for i in 1..=100 {
			let next = link_alpha(i as f64 / 100.0);
			assert!(next > prev);
			prev = next;
		}
		assert!((link_alpha(1.0) - 1.0).abs() < 1e-12);
		assert_eq!(link_color(0.0), "rgba(78, 205, 196, 0.3)");
	}
}
