use serde::{Deserialize, Deserializer};

/// Radius used for the hub when the backend omits `size`.
pub const DEFAULT_HUB_SIZE: f64 = 20.0;
/// Radius used for visitors when the backend omits `size`.
pub const DEFAULT_VISITOR_SIZE: f64 = 10.0;

/// Reads `null` as the field's default instead of failing the snapshot.
fn null_as_default<'de, D, T>(de: D) -> Result<T, D::Error>
where
	D: Deserializer<'de>,
	T: Default + Deserialize<'de>,
{
	Ok(Option::<T>::deserialize(de)?.unwrap_or_default())
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
	Center,
	#[default]
	#[serde(other)]
	Visitor,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct VisitorProfile {
	#[serde(deserialize_with = "null_as_default")]
	pub page_visits: Vec<serde_json::Value>,
	#[serde(deserialize_with = "null_as_default")]
	pub click_stream: Vec<serde_json::Value>,
	#[serde(deserialize_with = "null_as_default")]
	pub time_on_site: f64,
	#[serde(deserialize_with = "null_as_default")]
	pub content_preferences: Vec<Option<String>>,
	#[serde(deserialize_with = "null_as_default")]
	pub first_seen: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct InferredData {
	#[serde(deserialize_with = "null_as_default")]
	pub device_type: String,
	#[serde(deserialize_with = "null_as_default")]
	pub browser: String,
	#[serde(deserialize_with = "null_as_default")]
	pub country: String,
	#[serde(deserialize_with = "null_as_default")]
	pub language: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct GraphNode {
	pub id: String,
	#[serde(rename = "type", default)]
	pub kind: NodeKind,
	#[serde(default, deserialize_with = "null_as_default")]
	pub name: String,
	#[serde(default)]
	pub size: Option<f64>,
	#[serde(default)]
	pub engagement_score: Option<f64>,
	#[serde(default)]
	pub profile: Option<VisitorProfile>,
	#[serde(default)]
	pub inferred_data: Option<InferredData>,
}

impl GraphNode {
	pub fn radius(&self) -> f64 {
		match (self.size, self.kind) {
			(Some(size), _) if size.is_finite() && size > 0.0 => size,
			(_, NodeKind::Center) => DEFAULT_HUB_SIZE,
			(_, NodeKind::Visitor) => DEFAULT_VISITOR_SIZE,
		}
	}

	/// Engagement with absent or negative values read as zero.
	pub fn engagement(&self) -> f64 {
		self.engagement_score.filter(|s| s.is_finite()).unwrap_or(0.0).max(0.0)
	}
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct GraphLink {
	pub source: String,
	pub target: String,
	#[serde(default, deserialize_with = "null_as_default")]
	pub strength: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct GraphData {
	#[serde(default)]
	pub nodes: Vec<GraphNode>,
	#[serde(default)]
	pub links: Vec<GraphLink>,
}

impl GraphData {
	pub fn visitor_count(&self) -> usize {
		self.nodes.len().saturating_sub(1)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn decodes_backend_snapshot() {
		let raw = r#"{
			"nodes": [
				{"id": "website", "name": "Central Site", "type": "center", "size": 30},
				{"id": "v1", "name": "Visitor_v1", "type": "visitor", "engagement_score": 12.5,
				 "profile": {"page_visits": ["/", "/about"], "click_stream": [{"x": 1}],
				             "time_on_site": 40, "content_preferences": ["tech"],
				             "first_seen": "2024-03-01T10:00:00"},
				 "inferred_data": {"device_type": "Desktop", "browser": "Firefox",
				                   "country": "ES", "language": "es"}}
			],
			"links": [{"source": "website", "target": "v1", "strength": 0.125}]
		}"#;
		let data: GraphData = serde_json::from_str(raw).unwrap();
		assert_eq!(data.nodes[0].kind, NodeKind::Center);
		assert_eq!(data.nodes[0].radius(), 30.0);
		let visitor = &data.nodes[1];
		assert_eq!(visitor.kind, NodeKind::Visitor);
		assert_eq!(visitor.profile.as_ref().unwrap().page_visits.len(), 2);
		assert_eq!(visitor.inferred_data.as_ref().unwrap().browser, "Firefox");
		assert_eq!(data.links[0].strength, 0.125);
		assert_eq!(data.visitor_count(), 1);
	}

	#[test]
	fn missing_fields_fall_back() {
		let raw = r#"{"nodes": [{"id": "a", "type": "spider"}, {"id": "hub", "type": "center"}],
		              "links": [{"source": "a", "target": "hub"}]}"#;
		let data: GraphData = serde_json::from_str(raw).unwrap();
		assert_eq!(data.nodes[0].kind, NodeKind::Visitor);
		assert_eq!(data.nodes[0].radius(), DEFAULT_VISITOR_SIZE);
		assert_eq!(data.nodes[1].radius(), DEFAULT_HUB_SIZE);
		assert_eq!(data.nodes[0].engagement(), 0.0);
		assert_eq!(data.links[0].strength, 0.0);
	}

	#[test]
	fn null_and_unexpected_fields_keep_the_snapshot() {
		let raw = r#"{
			"nodes": [
				{"id": "website", "type": "center", "name": null},
				{"id": "v1", "name": null, "engagement_score": null,
				 "profile": {"page_visits": [{"url": "/"}, "/about"], "first_seen": null,
				             "time_on_site": null, "content_preferences": ["tech", null]},
				 "inferred_data": {"browser": null, "country": "FR"}}
			],
			"links": [{"source": "website", "target": "v1", "strength": null}]
		}"#;
		let data: GraphData = serde_json::from_str(raw).unwrap();
		assert_eq!(data.nodes.len(), 2);
		let visitor = &data.nodes[1];
		assert_eq!(visitor.name, "");
		assert_eq!(visitor.engagement(), 0.0);
		let profile = visitor.profile.as_ref().unwrap();
		assert_eq!(profile.page_visits.len(), 2);
		assert_eq!(profile.first_seen, "");
		assert_eq!(profile.time_on_site, 0.0);
		assert_eq!(profile.content_preferences.len(), 2);
		let inferred = visitor.inferred_data.as_ref().unwrap();
		assert_eq!((inferred.browser.as_str(), inferred.country.as_str()), ("", "FR"));
		assert_eq!(data.links[0].strength, 0.0);
	}

	#[test]
	fn empty_snapshot_counts_no_visitors() {
		assert_eq!(GraphData::default().visitor_count(), 0);
	}
}
