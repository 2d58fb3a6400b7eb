//! Runtime configuration, with overrides from the page query string.

use log::warn;
use serde::Deserialize;

use crate::components::force_graph::SimulationParameters;

/// Shortest poll period accepted from the query string.
pub const MIN_POLL_INTERVAL_MS: u32 = 500;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct VizConfig {
	/// Prefix for backend paths; empty means same origin.
	pub api_base: String,
	pub width: f64,
	pub height: f64,
	pub poll_interval_ms: u32,
	/// chrono format used for first-seen timestamps.
	pub date_format: String,
	pub simulation: SimulationParameters,
}

impl Default for VizConfig {
	fn default() -> Self {
		let (width, height) = (800.0, 600.0);
		Self {
			api_base: String::new(),
			width,
			height,
			poll_interval_ms: 3000,
			date_format: "%d/%m/%Y, %H:%M:%S".into(),
			simulation: SimulationParameters {
				center_x: width / 2.0,
				center_y: height / 2.0,
				..SimulationParameters::default()
			},
		}
	}
}

impl VizConfig {
	/// Applies `api`, `poll`, `width` and `height` overrides from `lookup`.
	/// Values that fail to parse, and poll periods under the floor, are
	/// skipped. The simulation center follows the canvas size.
	pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
		if let Some(api) = lookup("api") {
			self.api_base = api.trim_end_matches('/').to_string();
		}
		match parse::<u32>(&lookup, "poll") {
			Some(poll) if poll < MIN_POLL_INTERVAL_MS => {
				warn!("ignoring poll={poll}: below {MIN_POLL_INTERVAL_MS} ms");
			}
			Some(poll) => self.poll_interval_ms = poll,
			None => {}
		}
		if let Some(width) = parse::<f64>(&lookup, "width").filter(|w| *w > 0.0) {
			self.width = width;
		}
		if let Some(height) = parse::<f64>(&lookup, "height").filter(|h| *h > 0.0) {
			self.height = height;
		}
		self.simulation.center_x = self.width / 2.0;
		self.simulation.center_y = self.height / 2.0;
		self
	}

	/// Default config overridden by the current page URL.
	pub fn from_location() -> Self {
		let search = web_sys::window()
			.and_then(|w| w.location().search().ok())
			.unwrap_or_default();
		match web_sys::UrlSearchParams::new_with_str(&search) {
			Ok(params) => Self::default().with_overrides(|key| params.get(key)),
			Err(e) => {
				warn!("ignoring query string {search:?}: {e:?}");
				Self::default()
			}
		}
	}
}

fn parse<T: std::str::FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
	let raw = lookup(key)?;
	match raw.parse() {
		Ok(v) => Some(v),
		Err(_) => {
			warn!("ignoring invalid {key}={raw:?}");
			None
		}
	}
}
