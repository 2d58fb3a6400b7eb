//! Per-node detail panel.

use std::fmt::{Display, Write};

use chrono::{DateTime, Local, NaiveDateTime};
use leptos::prelude::*;

use crate::components::force_graph::{GraphData, GraphNode, NodeKind};

const DETAIL_ID_CHARS: usize = 16;

#[derive(Clone, Debug, PartialEq)]
pub struct VisitorDetail {
	pub name: String,
	pub short_id: String,
	pub engagement: String,
	/// Width of the engagement bar, in percent.
	pub fill_percent: f64,
	pub page_visits: usize,
	pub clicks: usize,
	pub time_on_site: String,
	pub device: String,
	pub browser: String,
	pub country: String,
	pub language: String,
	pub preferences: String,
	pub first_seen: String,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DetailContent {
	Hub { visitors: usize },
	Visitor(VisitorDetail),
}

/// First `chars` characters of `id` followed by an ellipsis.
pub fn truncate_id(id: &str, chars: usize) -> String {
	format!("{}...", id.chars().take(chars).collect::<String>())
}

/// Formats an ISO-8601 timestamp with `fmt`; unparseable input is returned as is.
pub fn format_timestamp(raw: &str, fmt: &str) -> String {
	if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
		return render_or(raw, dt.with_timezone(&Local).format(fmt));
	}
	match NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
		Ok(dt) => render_or(raw, dt.format(fmt)),
		Err(_) => raw.to_string(),
	}
}

// chrono reports a bad format string as a fmt error instead of at parse time
fn render_or(raw: &str, formatted: impl Display) -> String {
	let mut out = String::new();
	match write!(out, "{formatted}") {
		Ok(()) => out,
		Err(_) => raw.to_string(),
	}
}

pub fn render_details(node: &GraphNode, snapshot: &GraphData, date_format: &str) -> DetailContent {
	if node.kind == NodeKind::Center {
		return DetailContent::Hub {
			visitors: snapshot.visitor_count(),
		};
	}
	let profile = node.profile.clone().unwrap_or_default();
	let inferred = node.inferred_data.clone().unwrap_or_default();
	let score = node.engagement();
	DetailContent::Visitor(VisitorDetail {
		name: node.name.clone(),
		short_id: truncate_id(&node.id, DETAIL_ID_CHARS),
		engagement: format!("{score:.1}"),
		fill_percent: score.clamp(0.0, 100.0),
		page_visits: profile.page_visits.len(),
		clicks: profile.click_stream.len(),
		time_on_site: format!("{}s", profile.time_on_site),
		device: inferred.device_type,
		browser: inferred.browser,
		country: inferred.country,
		language: inferred.language,
		preferences: profile
			.content_preferences
			.iter()
			.flatten()
			.map(String::as_str)
			.collect::<Vec<_>>()
			.join(", "),
		first_seen: format_timestamp(&profile.first_seen, date_format),
	})
}

#[component]
fn DetailItem(label: &'static str, #[prop(into)] value: String) -> impl IntoView {
	view! {
		<div class="detail-item">
			<span class="detail-label">{label}</span>
			<span class="detail-value">{value}</span>
		</div>
	}
}

#[component]
pub fn DetailPanel(details: RwSignal<Option<DetailContent>>) -> impl IntoView {
	view! {
		<div id="node-details" class="panel node-details">
			{move || match details.get() {
				None => view! { <p class="hint">"Click a node to see its details"</p> }.into_any(),
				Some(DetailContent::Hub { visitors }) => view! {
					<div class="detail-section">
						<h4>"Central website"</h4>
						<DetailItem label="Total visitors:" value=visitors.to_string() />
						<DetailItem label="Type:" value="Central node" />
					</div>
				}
				.into_any(),
				Some(DetailContent::Visitor(d)) => view! {
					<div class="detail-section">
						<h4>{d.name}</h4>
						<DetailItem label="ID:" value=d.short_id />
						<DetailItem label="Engagement:" value=d.engagement />
						<div class="engagement-bar">
							<div class="engagement-fill" style=format!("width: {}%", d.fill_percent)></div>
						</div>
					</div>
					<div class="detail-section">
						<h4>"Behavior"</h4>
						<DetailItem label="Pages visited:" value=d.page_visits.to_string() />
						<DetailItem label="Clicks:" value=d.clicks.to_string() />
						<DetailItem label="Time on site:" value=d.time_on_site />
					</div>
					<div class="detail-section">
						<h4>"Technical"</h4>
						<DetailItem label="Device:" value=d.device />
						<DetailItem label="Browser:" value=d.browser />
						<DetailItem label="Country:" value=d.country />
						<DetailItem label="Language:" value=d.language />
					</div>
					<div class="detail-section">
						<h4>"Preferences"</h4>
						<DetailItem label="Preferred categories:" value=d.preferences />
						<DetailItem label="First visit:" value=d.first_seen />
					</div>
				}
				.into_any(),
			}}
		</div>
	}
}
