//! Host-supplied configuration: environment selection, timeout, retry policy.

// self
use crate::{_prelude::*, auth::Credentials, error::ConfigError};

/// Production API origin.
pub const PRODUCTION_BASE_URL: &str = "https://openapi.esign.cn";
/// Sandbox API origin.
pub const SANDBOX_BASE_URL: &str = "https://smlopenapi.esign.cn";

/// Service environment selecting the API origin.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
	#[default]
	/// Live service at [`PRODUCTION_BASE_URL`].
	Production,
	/// Simulation service at [`SANDBOX_BASE_URL`].
	Sandbox,
	/// Explicit origin, e.g. a mock server in tests.
	Custom(Url),
}
impl Environment {
	/// Resolves the environment to its base URL.
	pub fn base_url(&self) -> Result<Url, ConfigError> {
		let url = match self {
			Environment::Production => PRODUCTION_BASE_URL,
			Environment::Sandbox => SANDBOX_BASE_URL,
			Environment::Custom(url) => return Ok(url.clone()),
		};

		Url::parse(url).map_err(|source| ConfigError::InvalidBaseUrl { source })
	}
}

/// Host configuration consumed by [`Client`](crate::client::Client).
///
/// Retry and staleness policy live here per client instance; nothing is
/// shared process-wide.
#[derive(Clone, Debug)]
pub struct Config {
	/// Application identity used for token acquisition and auth headers.
	pub credentials: Credentials,
	/// Service environment selecting the API origin.
	pub environment: Environment,
	/// Per-request timeout applied by the bundled transport.
	pub timeout: Duration,
	/// Maximum stale-token re-sends per logical call.
	pub max_retries: u32,
	/// Envelope codes that mark the current token as stale.
	///
	/// The authoritative list is owned by the remote service and may change;
	/// override it via [`Config::with_stale_token_codes`] when it does.
	pub stale_token_codes: BTreeSet<i64>,
	/// Explicit token cache key overriding the derived per-identity default.
	pub cache_key: Option<String>,
}
impl Config {
	/// Default per-request timeout.
	pub const DEFAULT_TIMEOUT: Duration = Duration::seconds(5);
	/// Default stale-token re-send budget.
	pub const DEFAULT_MAX_RETRIES: u32 = 2;
	/// Stale-token envelope codes recognized by the live service.
	pub const DEFAULT_STALE_TOKEN_CODES: [i64; 2] = [40_001, 42_001];

	/// Creates a production configuration with default timeout and retry policy.
	pub fn new(app_id: impl Into<String>, secret: impl Into<String>) -> Self {
		Self {
			credentials: Credentials::new(app_id, secret),
			environment: Environment::default(),
			timeout: Self::DEFAULT_TIMEOUT,
			max_retries: Self::DEFAULT_MAX_RETRIES,
			stale_token_codes: BTreeSet::from(Self::DEFAULT_STALE_TOKEN_CODES),
			cache_key: None,
		}
	}

	/// Switches to the sandbox environment.
	pub fn sandbox(mut self) -> Self {
		self.environment = Environment::Sandbox;

		self
	}

	/// Selects an explicit service origin.
	pub fn with_base_url(mut self, url: Url) -> Self {
		self.environment = Environment::Custom(url);

		self
	}

	/// Overrides the per-request timeout.
	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;

		self
	}

	/// Overrides the stale-token re-send budget.
	pub fn with_max_retries(mut self, max_retries: u32) -> Self {
		self.max_retries = max_retries;

		self
	}

	/// Replaces the stale-token code set.
	pub fn with_stale_token_codes(mut self, codes: impl IntoIterator<Item = i64>) -> Self {
		self.stale_token_codes = codes.into_iter().collect();

		self
	}

	/// Overrides the derived token cache key.
	pub fn with_cache_key(mut self, key: impl Into<String>) -> Self {
		self.cache_key = Some(key.into());

		self
	}
}
