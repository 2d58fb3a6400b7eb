use leptos::prelude::*;

use crate::api::Stats;

/// Text for the four counters, copied from the backend without rounding.
#[derive(Clone, Debug, PartialEq)]
pub struct StatsDisplay {
	pub total_visitors: String,
	pub avg_engagement: String,
	pub active_now: String,
	pub total_pages: String,
}

impl Default for StatsDisplay {
	fn default() -> Self {
		Self {
			total_visitors: "0".into(),
			avg_engagement: "0".into(),
			active_now: "0".into(),
			total_pages: "0".into(),
		}
	}
}

impl From<&Stats> for StatsDisplay {
	fn from(stats: &Stats) -> Self {
		Self {
			total_visitors: stats.total_visitors.to_string(),
			avg_engagement: stats.avg_engagement.to_string(),
			active_now: stats.active_now.to_string(),
			total_pages: stats.total_pages.to_string(),
		}
	}
}

#[component]
pub fn StatsPanel(stats: RwSignal<StatsDisplay>) -> impl IntoView {
	view! {
		<div class="panel stats">
			<div class="stat">
				<span class="stat-label">"Total visitors"</span>
				<span id="total-visitors" class="stat-value">{move || stats.with(|s| s.total_visitors.clone())}</span>
			</div>
			<div class="stat">
				<span class="stat-label">"Avg. engagement"</span>
				<span id="avg-engagement" class="stat-value">{move || stats.with(|s| s.avg_engagement.clone())}</span>
			</div>
			<div class="stat">
				<span class="stat-label">"Active now"</span>
				<span id="active-now" class="stat-value">{move || stats.with(|s| s.active_now.clone())}</span>
			</div>
			<div class="stat">
				<span class="stat-label">"Total pages"</span>
				<span id="total-pages" class="stat-value">{move || stats.with(|s| s.total_pages.clone())}</span>
			</div>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::api::{STATS_PATH, decode};

	#[test]
	fn copies_fields_verbatim() {
		let stats: Stats = decode(
			STATS_PATH,
			r#"{"total_visitors": 42, "avg_engagement": 33.5, "active_now": 3, "total_pages": 7}"#,
		)
		.unwrap();
		assert_eq!(
			StatsDisplay::from(&stats),
			StatsDisplay {
				total_visitors: "42".into(),
				avg_engagement: "33.5".into(),
				active_now: "3".into(),
				total_pages: "7".into(),
			}
		);
	}

	#[test]
	fn starts_at_zero() {
		assert_eq!(StatsDisplay::default().active_now, "0");
	}
}
