//! Backend HTTP client.
//!
//! Requests go through `window.fetch`; every response body is read as text
//! and decoded with serde so the decoding half is testable off the browser.

use log::info;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

use crate::components::force_graph::GraphData;
use crate::error::{Result, VizError};

pub const NETWORK_PATH: &str = "/api/network";
pub const STATS_PATH: &str = "/api/stats";
pub const CURRENT_VISITOR_PATH: &str = "/api/visitor/current";
pub const ADD_DEMO_PATH: &str = "/api/visitor/add-demo";
pub const CLEAR_VISITORS_PATH: &str = "/api/visitors/clear";

/// Aggregate counters. Numbers are kept as sent so they display verbatim.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Stats {
	pub total_visitors: serde_json::Number,
	pub avg_engagement: serde_json::Number,
	pub active_now: serde_json::Number,
	pub total_pages: serde_json::Number,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CurrentVisitor {
	pub id: String,
	pub engagement_score: f64,
	pub page_visits: PageVisits,
	pub time_on_site: f64,
}

/// Page visits arrive either as the visit list or as a plain count.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PageVisits {
	Count(u64),
	List(Vec<serde_json::Value>),
}

impl Default for PageVisits {
	fn default() -> Self {
		PageVisits::Count(0)
	}
}

impl PageVisits {
	pub fn count(&self) -> usize {
		match self {
			PageVisits::Count(n) => *n as usize,
			PageVisits::List(visits) => visits.len(),
		}
	}
}

#[derive(Deserialize)]
struct ErrorPayload {
	error: String,
}

pub fn decode<T: DeserializeOwned>(path: &str, body: &str) -> Result<T> {
	serde_json::from_str(body).map_err(|source| VizError::Decode {
		path: path.to_string(),
		source,
	})
}

/// An `{ "error": ... }` body becomes [`VizError::Backend`].
pub fn decode_current_visitor(body: &str) -> Result<CurrentVisitor> {
	if let Ok(ErrorPayload { error }) = serde_json::from_str(body) {
		return Err(VizError::Backend(error));
	}
	decode(CURRENT_VISITOR_PATH, body)
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ApiClient {
	base: String,
}

impl ApiClient {
	pub fn new(base: impl Into<String>) -> Self {
		Self { base: base.into() }
	}

	pub fn url(&self, path: &str) -> String {
		format!("{}{}", self.base, path)
	}

	pub async fn network(&self) -> Result<GraphData> {
		let body = self.request("GET", NETWORK_PATH).await?;
		decode(NETWORK_PATH, &body)
	}

	pub async fn stats(&self) -> Result<Stats> {
		let body = self.request("GET", STATS_PATH).await?;
		decode(STATS_PATH, &body)
	}

	pub async fn current_visitor(&self) -> Result<CurrentVisitor> {
		let body = self.request("GET", CURRENT_VISITOR_PATH).await?;
		decode_current_visitor(&body)
	}

	pub async fn add_demo_visitor(&self) -> Result<serde_json::Value> {
		let body = self.request("POST", ADD_DEMO_PATH).await?;
		let echo = decode(ADD_DEMO_PATH, &body)?;
		info!("demo visitor added: {echo}");
		Ok(echo)
	}

	pub async fn clear_visitors(&self) -> Result<serde_json::Value> {
		let body = self.request("POST", CLEAR_VISITORS_PATH).await?;
		let echo = decode(CLEAR_VISITORS_PATH, &body)?;
		info!("demo visitors cleared: {echo}");
		Ok(echo)
	}

	async fn request(&self, method: &str, path: &str) -> Result<String> {
		let window = web_sys::window().ok_or_else(|| VizError::Js("no window".into()))?;
		let init = RequestInit::new();
		init.set_method(method);
		let request = Request::new_with_str_and_init(&self.url(path), &init)?;
		request.headers().set("Accept", "application/json")?;

		let response: Response = JsFuture::from(window.fetch_with_request(&request))
			.await?
			.dyn_into()?;
		if !response.ok() {
			return Err(VizError::Status {
				path: path.to_string(),
				status: response.status(),
			});
		}
		let text = JsFuture::from(response.text()?).await?;
		Ok(text.as_string().unwrap_or_default())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn stats_keep_numbers_verbatim() {
		let stats: Stats = decode(
			STATS_PATH,
			r#"{"total_visitors": 42, "avg_engagement": 33.5, "active_now": 3, "total_pages": 7}"#,
		)
		.unwrap();
		assert_eq!(stats.total_visitors.to_string(), "42");
		assert_eq!(stats.avg_engagement.to_string(), "33.5");
		assert_eq!(stats.active_now.to_string(), "3");
		assert_eq!(stats.total_pages.to_string(), "7");
	}

	#[test]
	fn error_payload_is_a_backend_error() {
		let err = decode_current_visitor(r#"{"error": "no session"}"#).unwrap_err();
		assert!(matches!(err, VizError::Backend(ref msg) if msg == "no session"));
	}

	#[test]
	fn current_visitor_accepts_list_or_count() {
		let listed = decode_current_visitor(
			r#"{"id": "abc", "engagement_score": 12.0, "page_visits": ["/", "/x"], "time_on_site": 5}"#,
		)
		.unwrap();
		assert_eq!(listed.page_visits.count(), 2);
		let counted = decode_current_visitor(r#"{"id": "abc", "page_visits": 4}"#).unwrap();
		assert_eq!(counted.page_visits.count(), 4);
	}

	#[test]
	fn malformed_body_reports_path() {
		let err = decode::<GraphData>(NETWORK_PATH, "<html>").unwrap_err();
		assert!(err.to_string().starts_with("failed to decode /api/network"));
	}

	#[test]
	fn urls_join_base() {
		assert_eq!(ApiClient::default().url(STATS_PATH), "/api/stats");
		assert_eq!(
			ApiClient::new("http://localhost:5000").url(NETWORK_PATH),
			"http://localhost:5000/api/network"
		);
	}
}
