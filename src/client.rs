//! Top-level client facade wiring configuration, cache, and transport together.

// self
use crate::{
	_prelude::*,
	cache::TokenCache,
	config::Config,
	endpoints::{AccountClient, FileClient, OrganizationClient, SignFlowClient, TemplateClient},
	http::Transport,
	pipeline::RequestPipeline,
	token::AccessTokenManager,
};
#[cfg(feature = "reqwest")]
use crate::{cache::MemoryCache, http::ReqwestTransport};

/// Entry point owning the token manager and request pipeline.
///
/// Cheap to clone; clones share the pipeline, token manager, and cache.
/// Endpoint accessors hand out thin clients borrowing the same pipeline.
#[derive(Clone, Debug)]
pub struct Client {
	pipeline: Arc<RequestPipeline>,
	tokens: Arc<AccessTokenManager>,
}
impl Client {
	/// Creates a client from caller-provided cache and transport.
	pub fn with_transport(
		config: Config,
		cache: Arc<dyn TokenCache>,
		transport: Arc<dyn Transport>,
	) -> Result<Self> {
		let base_url = config.environment.base_url()?;
		let mut tokens =
			AccessTokenManager::new(config.credentials, cache, transport.clone(), base_url.clone());

		if let Some(key) = config.cache_key {
			tokens = tokens.with_cache_key(key);
		}

		let tokens = Arc::new(tokens);
		let pipeline = Arc::new(RequestPipeline::new(
			transport,
			tokens.clone(),
			base_url,
			config.max_retries,
			config.stale_token_codes,
		));

		Ok(Self { pipeline, tokens })
	}

	/// Token manager shared by this client.
	pub fn tokens(&self) -> &AccessTokenManager {
		&self.tokens
	}

	/// Request pipeline shared by this client, for endpoints not wrapped here.
	pub fn pipeline(&self) -> &Arc<RequestPipeline> {
		&self.pipeline
	}

	/// Personal account operations.
	pub fn account(&self) -> AccountClient {
		AccountClient::new(self.pipeline.clone())
	}

	/// Organization account operations.
	pub fn organization(&self) -> OrganizationClient {
		OrganizationClient::new(self.pipeline.clone())
	}

	/// Template-backed file operations.
	pub fn file(&self) -> FileClient {
		FileClient::new(self.pipeline.clone())
	}

	/// Sign flow construction and signature field placement.
	pub fn sign_flow(&self) -> SignFlowClient {
		SignFlowClient::new(self.pipeline.clone())
	}

	/// Flow template queries.
	pub fn template(&self) -> TemplateClient {
		TemplateClient::new(self.pipeline.clone())
	}
}
#[cfg(feature = "reqwest")]
impl Client {
	/// Creates a client with an in-process memory cache and the bundled
	/// reqwest transport.
	pub fn new(config: Config) -> Result<Self> {
		Self::with_cache(config, Arc::new(MemoryCache::default()))
	}

	/// Creates a client with a caller-provided cache and the bundled reqwest
	/// transport configured with [`Config::timeout`].
	pub fn with_cache(config: Config, cache: Arc<dyn TokenCache>) -> Result<Self> {
		let transport = Arc::new(ReqwestTransport::new(config.timeout)?);

		Self::with_transport(config, cache, transport)
	}
}
