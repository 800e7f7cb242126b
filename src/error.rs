//! Client-level error types shared across the token manager, pipeline, caches, and endpoints.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Cache-backend failure.
	#[error("{0}")]
	Cache(
		#[from]
		#[source]
		crate::cache::CacheError,
	),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Access token acquisition failure.
	#[error(transparent)]
	Auth(#[from] AuthError),
	/// Business error reported inside a response envelope.
	#[error(transparent)]
	Api(#[from] ApiError),
	/// Response body could not be decoded.
	#[error(transparent)]
	Decode(#[from] DecodeError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),
}

/// Configuration and request-construction failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Base URL cannot be parsed.
	#[error("Base URL is invalid.")]
	InvalidBaseUrl {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Request path does not resolve against the base URL.
	#[error("Request path `{path}` does not resolve against the base URL.")]
	InvalidPath {
		/// Offending path.
		path: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Request body could not be serialized to JSON.
	#[error("Request body could not be serialized.")]
	SerializeBody {
		/// Underlying serialization failure.
		#[source]
		source: serde_json::Error,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Access token acquisition failures.
#[derive(Debug, ThisError)]
pub enum AuthError {
	/// Token endpoint answered without a usable token value.
	///
	/// Covers rejected credentials and success-shaped payloads whose `data`
	/// lacks a non-empty token.
	#[error("Token endpoint did not return a token. Response: {summary}.")]
	MissingToken {
		/// Compact rendering of the offending response envelope.
		summary: String,
	},
}

/// Business error reported by the service inside the response envelope.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
#[error("Service returned code {code}: {message}.")]
pub struct ApiError {
	/// Envelope error code.
	pub code: i64,
	/// Server-provided message, `"Unknown"` when omitted.
	pub message: String,
}
impl ApiError {
	/// Builds an error from an envelope code and optional message.
	///
	/// Absent or blank messages collapse to `"Unknown"`.
	pub fn new(code: i64, message: Option<String>) -> Self {
		let message = message.filter(|m| !m.is_empty()).unwrap_or_else(|| "Unknown".into());

		Self { code, message }
	}
}

/// Failures turning response bytes into a decoded envelope or typed payload.
#[derive(Debug, ThisError)]
pub enum DecodeError {
	/// Response body is not well-formed JSON.
	#[error("Response body is not valid JSON.")]
	InvalidJson {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code of the offending response.
		status: u16,
	},
	/// Response body was empty although the status signalled a failure.
	#[error("Response body was empty with HTTP status {status}.")]
	EmptyBody {
		/// HTTP status code of the offending response.
		status: u16,
	},
	/// Envelope `data` payload does not match the expected shape.
	#[error("Envelope data payload has an unexpected shape.")]
	Payload {
		/// Underlying deserialization failure.
		#[source]
		source: serde_json::Error,
	},
	/// Envelope reported success but carried no `data` payload.
	#[error("Envelope is missing the expected data payload.")]
	MissingData,
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the service.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the service.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::error::Error as StdError;
	// self
	use super::*;
	use crate::cache::CacheError;

	#[test]
	fn cache_error_converts_into_client_error_with_source() {
		let cache_error = CacheError::Backend { message: "cache unreachable".into() };
		let client_error: Error = cache_error.clone().into();

		assert!(matches!(client_error, Error::Cache(_)));
		assert!(client_error.to_string().contains("cache unreachable"));

		let source = StdError::source(&client_error)
			.expect("Client error should expose the original cache error as its source.");

		assert_eq!(source.to_string(), cache_error.to_string());
	}

	#[test]
	fn api_error_defaults_blank_messages_to_unknown() {
		assert_eq!(ApiError::new(9_999, Some("invalid name".into())).message, "invalid name");
		assert_eq!(ApiError::new(9_999, Some(String::new())).message, "Unknown");
		assert_eq!(ApiError::new(9_999, None).message, "Unknown");
	}

	#[test]
	fn api_error_displays_code_and_message() {
		let error = ApiError::new(40_001, Some("token expired".into()));

		assert_eq!(error.to_string(), "Service returned code 40001: token expired.");
	}
}
