//! Transport primitives for authenticated service calls.
//!
//! [`Transport`] is the crate's only dependency on an HTTP stack. The
//! pipeline hands implementations a fully resolved [`OutboundRequest`] and
//! expects the raw status + body back; connection pooling, TLS, and the
//! per-request timeout all live behind this seam. Implementations must be
//! shareable (`Send + Sync`) so one transport can serve the token manager
//! and the pipeline concurrently.

// std
use std::ops::Deref;
// self
use crate::{_prelude::*, error::TransportError};
#[cfg(feature = "reqwest")] use crate::error::ConfigError;

/// HTTP verbs used by the service endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
	/// GET request carrying query parameters.
	Get,
	/// POST request carrying a JSON body.
	Post,
	/// PUT request carrying a JSON body.
	Put,
	/// DELETE request.
	Delete,
}
impl Method {
	/// Returns the canonical uppercase verb.
	pub const fn as_str(self) -> &'static str {
		match self {
			Method::Get => "GET",
			Method::Post => "POST",
			Method::Put => "PUT",
			Method::Delete => "DELETE",
		}
	}
}
impl Display for Method {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Fully resolved outbound request handed to a [`Transport`].
#[derive(Clone, Debug)]
pub struct OutboundRequest {
	/// HTTP verb.
	pub method: Method,
	/// Absolute request URL including query parameters.
	pub url: Url,
	/// Header name/value pairs attached to the request.
	pub headers: Vec<(&'static str, String)>,
	/// Serialized JSON body, when the verb carries one.
	pub body: Option<Vec<u8>>,
}

/// Raw response surfaced by a [`Transport`].
#[derive(Clone, Debug)]
pub struct RawResponse {
	/// HTTP status code.
	pub status: u16,
	/// Response body bytes.
	pub body: Vec<u8>,
}
impl RawResponse {
	/// Returns `true` when the status code is in the 2xx range.
	pub const fn is_success(&self) -> bool {
		matches!(self.status, 200..=299)
	}
}

/// Boxed future returned by [`Transport::send`].
pub type TransportFuture<'a> =
	Pin<Box<dyn Future<Output = Result<RawResponse, TransportError>> + 'a + Send>>;

/// Abstraction over HTTP transports capable of executing service calls.
///
/// Cancellation and timeouts are the implementation's concern; the pipeline
/// awaits each call as an opaque operation and imposes no deadline of its
/// own.
pub trait Transport
where
	Self: Send + Sync,
{
	/// Executes one HTTP request and returns the raw status + body.
	fn send(&self, request: OutboundRequest) -> TransportFuture<'_>;
}

#[cfg(feature = "reqwest")]
/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransport(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestTransport {
	/// Builds a transport with the provided per-request timeout.
	pub fn new(timeout: Duration) -> Result<Self, ConfigError> {
		let client = ReqwestClient::builder().timeout(timeout.unsigned_abs()).build()?;

		Ok(Self(client))
	}

	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestTransport {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestTransport {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Transport for ReqwestTransport {
	fn send(&self, request: OutboundRequest) -> TransportFuture<'_> {
		let client = self.0.clone();

		Box::pin(async move {
			let method = match request.method {
				Method::Get => reqwest::Method::GET,
				Method::Post => reqwest::Method::POST,
				Method::Put => reqwest::Method::PUT,
				Method::Delete => reqwest::Method::DELETE,
			};
			let mut builder = client.request(method, request.url);

			for (name, value) in &request.headers {
				builder = builder.header(*name, value.as_str());
			}
			if let Some(body) = request.body {
				builder = builder.body(body);
			}

			let response = builder.send().await.map_err(TransportError::from)?;
			let status = response.status().as_u16();
			let body = response.bytes().await.map_err(TransportError::from)?.to_vec();

			Ok(RawResponse { status, body })
		})
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn method_labels_are_canonical() {
		assert_eq!(Method::Get.as_str(), "GET");
		assert_eq!(Method::Post.as_str(), "POST");
		assert_eq!(Method::Put.as_str(), "PUT");
		assert_eq!(Method::Delete.as_str(), "DELETE");
	}

	#[test]
	fn success_covers_the_2xx_range() {
		assert!(RawResponse { status: 200, body: Vec::new() }.is_success());
		assert!(RawResponse { status: 204, body: Vec::new() }.is_success());
		assert!(!RawResponse { status: 199, body: Vec::new() }.is_success());
		assert!(!RawResponse { status: 302, body: Vec::new() }.is_success());
		assert!(!RawResponse { status: 502, body: Vec::new() }.is_success());
	}
}
