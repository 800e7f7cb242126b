//! The authenticated request pipeline: compose, send, retry on stale tokens, unwrap.

// crates.io
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	envelope::Envelope,
	error::{ConfigError, DecodeError},
	http::{Method, OutboundRequest, Transport},
	obs::{self, CallKind, CallOutcome, CallSpan},
	token::AccessTokenManager,
};

/// One logical API call: verb, service path, query parameters, and JSON body.
#[derive(Clone, Debug)]
pub struct ApiRequest {
	/// HTTP verb.
	pub method: Method,
	/// Service path resolved against the configured base URL.
	pub path: String,
	/// Query parameters appended to the resolved URL.
	pub query: Vec<(String, String)>,
	/// JSON body, when the verb carries one.
	pub body: Option<Value>,
}
impl ApiRequest {
	/// Creates a request without query parameters or body.
	pub fn new(method: Method, path: impl Into<String>) -> Self {
		Self { method, path: path.into(), query: Vec::new(), body: None }
	}

	/// GET request for the provided service path.
	pub fn get(path: impl Into<String>) -> Self {
		Self::new(Method::Get, path)
	}

	/// POST request carrying a JSON body.
	pub fn post(path: impl Into<String>, body: Value) -> Self {
		Self { body: Some(body), ..Self::new(Method::Post, path) }
	}

	/// PUT request carrying a JSON body.
	pub fn put(path: impl Into<String>, body: Value) -> Self {
		Self { body: Some(body), ..Self::new(Method::Put, path) }
	}

	/// DELETE request for the provided service path.
	pub fn delete(path: impl Into<String>) -> Self {
		Self::new(Method::Delete, path)
	}

	/// Appends one query parameter.
	pub fn with_query(mut self, name: impl Into<String>, value: impl Display) -> Self {
		self.query.push((name.into(), value.to_string()));

		self
	}

	/// Appends a query parameter only when a value is present.
	pub fn with_query_opt(self, name: impl Into<String>, value: Option<impl Display>) -> Self {
		match value {
			Some(value) => self.with_query(name, value),
			None => self,
		}
	}
}

/// Executes logical API calls against one identity.
///
/// Each call attaches the auth header trio, sends via the transport, retries
/// a stale-token response by forcing a refresh (bounded by the configured
/// budget), and decodes/unwraps the response envelope. Retrying re-sends the
/// same method/path/body; the service owns duplicate detection for
/// non-idempotent operations.
pub struct RequestPipeline {
	transport: Arc<dyn Transport>,
	tokens: Arc<AccessTokenManager>,
	base_url: Url,
	max_retries: u32,
	stale_token_codes: BTreeSet<i64>,
}
impl RequestPipeline {
	/// Header carrying the application identifier.
	pub const HEADER_APP_ID: &'static str = "X-Tsign-Open-App-Id";
	/// Header carrying the bearer token.
	pub const HEADER_TOKEN: &'static str = "X-Tsign-Open-Token";
	const CONTENT_TYPE_JSON: &'static str = "application/json";
	const HEADER_CONTENT_TYPE: &'static str = "Content-Type";

	/// Creates a pipeline bound to one identity and transport.
	pub fn new(
		transport: Arc<dyn Transport>,
		tokens: Arc<AccessTokenManager>,
		base_url: Url,
		max_retries: u32,
		stale_token_codes: BTreeSet<i64>,
	) -> Self {
		Self { transport, tokens, base_url, max_retries, stale_token_codes }
	}

	/// Token manager backing this pipeline.
	pub fn tokens(&self) -> &AccessTokenManager {
		&self.tokens
	}

	/// Maximum stale-token re-sends per logical call.
	pub fn max_retries(&self) -> u32 {
		self.max_retries
	}

	/// Envelope codes treated as stale-token signals.
	pub fn stale_token_codes(&self) -> &BTreeSet<i64> {
		&self.stale_token_codes
	}

	/// Executes one logical call and returns the unwrapped `data` payload.
	///
	/// `Ok(None)` means the service reported success without a payload (no
	/// `data` field, or an empty body with a success status).
	pub async fn execute(&self, request: &ApiRequest) -> Result<Option<Value>> {
		const KIND: CallKind = CallKind::Request;

		let span = CallSpan::new(KIND, "execute");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = span.instrument(self.execute_inner(request)).await;

		match &result {
			Ok(_) => obs::record_call_outcome(KIND, CallOutcome::Success),
			Err(_) => obs::record_call_outcome(KIND, CallOutcome::Failure),
		}

		result
	}

	/// Executes one logical call and deserializes the `data` payload into `T`.
	pub async fn execute_as<T>(&self, request: &ApiRequest) -> Result<T>
	where
		T: DeserializeOwned,
	{
		let data = self.execute(request).await?.ok_or(DecodeError::MissingData)?;

		serde_json::from_value(data).map_err(|source| DecodeError::Payload { source }.into())
	}

	async fn execute_inner(&self, request: &ApiRequest) -> Result<Option<Value>> {
		let mut token = self.tokens.token(false).await?;
		let mut attempt = 0;

		loop {
			let outbound = self.outbound(request, &token)?;
			let response = self.transport.send(outbound).await?;

			if response.body.is_empty() {
				if response.is_success() {
					return Ok(None);
				}

				return Err(DecodeError::EmptyBody { status: response.status }.into());
			}

			let envelope = Envelope::decode(&response.body, response.status)?;

			if self.stale_token_codes.contains(&envelope.code) && attempt < self.max_retries {
				attempt += 1;

				obs::record_call_outcome(CallKind::Request, CallOutcome::Retry);

				// The refreshed token must be in place before the re-send.
				token = self.tokens.token(true).await?;

				continue;
			}

			return envelope.into_data().map_err(Error::from);
		}
	}

	fn outbound(&self, request: &ApiRequest, token: &str) -> Result<OutboundRequest> {
		let mut url = self
			.base_url
			.join(&request.path)
			.map_err(|source| ConfigError::InvalidPath { path: request.path.clone(), source })?;

		if !request.query.is_empty() {
			url.query_pairs_mut().extend_pairs(&request.query);
		}

		let body = request
			.body
			.as_ref()
			.map(serde_json::to_vec)
			.transpose()
			.map_err(|source| ConfigError::SerializeBody { source })?;
		let headers = vec![
			(Self::HEADER_APP_ID, self.tokens.app_id().to_owned()),
			(Self::HEADER_TOKEN, token.to_owned()),
			(Self::HEADER_CONTENT_TYPE, Self::CONTENT_TYPE_JSON.to_owned()),
		];

		Ok(OutboundRequest { method: request.method, url, headers, body })
	}
}
impl Debug for RequestPipeline {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("RequestPipeline")
			.field("base_url", &self.base_url.as_str())
			.field("max_retries", &self.max_retries)
			.field("stale_token_codes", &self.stale_token_codes)
			.finish()
	}
}
