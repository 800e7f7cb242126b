//! Uniform response envelope decoding and unwrap rules.

// self
use crate::{
	_prelude::*,
	error::{ApiError, DecodeError},
};

/// Uniform JSON wrapper returned by every service endpoint.
///
/// `code == 0` means success and `data` (when present) is the canonical
/// result; any other code is a business error and `data` must not be used.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
	/// Business status code; `0` means success. Responses without a code are
	/// success-shaped.
	#[serde(default)]
	pub code: i64,
	/// Optional human-readable status message.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub message: Option<String>,
	/// Endpoint-specific payload of arbitrary shape.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub data: Option<Value>,
}
impl Envelope {
	/// Decodes a non-empty response body into an envelope.
	pub fn decode(body: &[u8], status: u16) -> Result<Self, DecodeError> {
		let mut deserializer = serde_json::Deserializer::from_slice(body);

		serde_path_to_error::deserialize(&mut deserializer)
			.map_err(|source| DecodeError::InvalidJson { source, status })
	}

	/// Unwraps the envelope into its payload, surfacing non-zero codes as [`ApiError`].
	pub fn into_data(self) -> Result<Option<Value>, ApiError> {
		if self.code != 0 {
			return Err(ApiError::new(self.code, self.message));
		}

		Ok(self.data)
	}

	/// Compact JSON rendering used in diagnostics when the envelope is unusable.
	pub fn summary(&self) -> String {
		serde_json::to_string(self).unwrap_or_else(|_| format!("code {}", self.code))
	}
}
