//! Access token lifecycle: cached lookup, forced refresh, and server fetches.

// self
use crate::{
	_prelude::*,
	auth::{AppSecret, Credentials},
	cache::TokenCache,
	envelope::Envelope,
	error::{AuthError, ConfigError, DecodeError},
	http::{Method, OutboundRequest, Transport},
	obs::{self, CallKind, CallOutcome, CallSpan},
};

/// Owns acquisition, caching, and forced refresh of the bearer token for one
/// application identity.
///
/// The cached value is written only here; the pipeline reads it exclusively
/// through [`AccessTokenManager::token`]. Managers sharing one cache and
/// identity converge on the same key; concurrent refreshes race with
/// last-write-wins semantics, which costs a redundant fetch but never
/// correctness, since every fetched token stays valid for its own lease.
pub struct AccessTokenManager {
	credentials: Credentials,
	cache: Arc<dyn TokenCache>,
	transport: Arc<dyn Transport>,
	base_url: Url,
	cache_key: Option<String>,
}
impl AccessTokenManager {
	/// Fixed token endpoint path.
	pub const TOKEN_ENDPOINT: &'static str = "/v1/oauth2/access_token";
	/// Lease applied to cached tokens, chosen independently of the server's
	/// own expiry to bound staleness.
	pub const TOKEN_LEASE: Duration = Duration::seconds(6_000);
	const CACHE_PREFIX: &'static str = "esign.common.access_token.";
	const TOKEN_JSON_KEY: &'static str = "token";

	/// Creates a manager for the provided identity.
	pub fn new(
		credentials: Credentials,
		cache: Arc<dyn TokenCache>,
		transport: Arc<dyn Transport>,
		base_url: Url,
	) -> Self {
		Self { credentials, cache, transport, base_url, cache_key: None }
	}

	/// Overrides the derived cache key, e.g. for multi-tenant deployments
	/// sharing one process. Must be applied before the first
	/// [`token`](Self::token) lookup, which the consuming-builder shape
	/// enforces.
	pub fn with_cache_key(mut self, key: impl Into<String>) -> Self {
		self.cache_key = Some(key.into());

		self
	}

	/// Application identifier of the owned identity.
	pub fn app_id(&self) -> &str {
		self.credentials.app_id()
	}

	/// Application secret of the owned identity.
	pub fn secret(&self) -> &AppSecret {
		self.credentials.secret()
	}

	/// Cache key for this identity: the explicit override or prefix + app id.
	pub fn cache_key(&self) -> String {
		self.cache_key
			.clone()
			.unwrap_or_else(|| format!("{}{}", Self::CACHE_PREFIX, self.app_id()))
	}

	/// Returns a valid bearer token, fetching from the server on a cache
	/// miss, an empty cached value, or when `force_refresh` is set.
	///
	/// A fetched token is cached under this identity's key for
	/// [`TOKEN_LEASE`](Self::TOKEN_LEASE) before being returned.
	pub async fn token(&self, force_refresh: bool) -> Result<String> {
		const KIND: CallKind = CallKind::Token;

		let span = CallSpan::new(KIND, "token");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = span
			.instrument(async move {
				let key = self.cache_key();
				let cached = if force_refresh {
					None
				} else {
					self.cache.get(&key).await?.filter(|value| !value.is_empty())
				};

				if let Some(cached) = cached {
					return Ok(cached);
				}

				let token = self.fetch_from_server().await?;

				self.cache.set(&key, &token, Self::TOKEN_LEASE).await?;

				Ok(token)
			})
			.await;

		match &result {
			Ok(_) => obs::record_call_outcome(KIND, CallOutcome::Success),
			Err(_) => obs::record_call_outcome(KIND, CallOutcome::Failure),
		}

		result
	}

	async fn fetch_from_server(&self) -> Result<String> {
		let mut url = self
			.base_url
			.join(Self::TOKEN_ENDPOINT)
			.map_err(|source| ConfigError::InvalidPath { path: Self::TOKEN_ENDPOINT.into(), source })?;

		url.query_pairs_mut()
			.append_pair("appId", self.credentials.app_id())
			.append_pair("secret", self.credentials.secret().expose())
			.append_pair("grantType", "client_credentials");

		let request = OutboundRequest { method: Method::Get, url, headers: Vec::new(), body: None };
		let response = self.transport.send(request).await?;

		if response.body.is_empty() {
			return Err(DecodeError::EmptyBody { status: response.status }.into());
		}

		let envelope = Envelope::decode(&response.body, response.status)?;
		let token = envelope
			.data
			.as_ref()
			.and_then(|data| data.get(Self::TOKEN_JSON_KEY))
			.and_then(Value::as_str)
			.filter(|token| !token.is_empty())
			.map(str::to_owned);

		token.ok_or_else(|| AuthError::MissingToken { summary: envelope.summary() }.into())
	}
}
impl Debug for AccessTokenManager {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AccessTokenManager")
			.field("app_id", &self.app_id())
			.field("secret", &self.secret().masked())
			.field("cache_key", &self.cache_key())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::cache::MemoryCache;

	struct NoTransport;
	impl Transport for NoTransport {
		fn send(&self, _: OutboundRequest) -> crate::http::TransportFuture<'_> {
			Box::pin(async { panic!("Transport must not be reached in cache-key tests.") })
		}
	}

	fn build_manager(cache_key: Option<&str>) -> AccessTokenManager {
		let manager = AccessTokenManager::new(
			Credentials::new("app-1", "secret-1"),
			Arc::new(MemoryCache::default()),
			Arc::new(NoTransport),
			Url::parse("https://openapi.esign.cn").expect("Base URL fixture should parse."),
		);

		match cache_key {
			Some(key) => manager.with_cache_key(key),
			None => manager,
		}
	}

	#[test]
	fn cache_key_derives_from_the_app_id() {
		assert_eq!(build_manager(None).cache_key(), "esign.common.access_token.app-1");
	}

	#[test]
	fn cache_key_override_wins() {
		assert_eq!(build_manager(Some("tenant.shared.key")).cache_key(), "tenant.shared.key");
	}

	#[test]
	fn debug_masks_the_secret() {
		let rendered = format!("{:?}", build_manager(None));

		assert!(rendered.contains("***ret-1"));
		assert!(!rendered.contains("\"secret-1\""));
	}
}
