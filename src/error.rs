//! Error types for backend requests.

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Error, Debug)]
pub enum VizError {
	/// A browser API rejected the call (network failure, aborted fetch, ...).
	#[error("browser error: {0}")]
	Js(String),

	/// The backend answered with a non-success status.
	#[error("{path} returned HTTP {status}")]
	Status { path: String, status: u16 },

	/// The payload was not the JSON we expected.
	#[error("failed to decode {path}: {source}")]
	Decode {
		path: String,
		#[source]
		source: serde_json::Error,
	},

	/// The backend reported an error in the payload itself.
	#[error("backend error: {0}")]
	Backend(String),
}

impl From<JsValue> for VizError {
	fn from(value: JsValue) -> Self {
		VizError::Js(
			value
				.as_string()
				.unwrap_or_else(|| format!("{value:?}")),
		)
	}
}

pub type Result<T, E = VizError> = std::result::Result<T, E>;
