//! Shared fixtures for the integration test suite.

#![allow(dead_code)]

// std
use std::sync::Arc;
// crates.io
use httpmock::MockServer;
use time::Duration;
// self
use esign_client::{
	cache::{MemoryCache, TokenCache},
	client::Client,
	config::Config,
	http::ReqwestTransport,
	reqwest,
	url::Url,
};

/// Builds a reqwest transport that accepts the self-signed certificates
/// produced by `httpmock`.
pub fn test_reqwest_transport() -> ReqwestTransport {
	let client = reqwest::Client::builder()
		.danger_accept_invalid_certs(true)
		.danger_accept_invalid_hostnames(true)
		.build()
		.expect("Failed to build insecure Reqwest client for tests.");

	ReqwestTransport::with_client(client)
}

/// Points a configuration at the mock server.
pub fn test_config(server: &MockServer, app_id: &str, secret: &str) -> Config {
	let base_url =
		Url::parse(&server.base_url()).expect("Mock server origin should parse successfully.");

	Config::new(app_id, secret).with_base_url(base_url)
}

/// Constructs a [`Client`] backed by an in-memory cache and the insecure test
/// transport.
pub fn build_test_client(config: Config) -> (Client, Arc<MemoryCache>) {
	let cache_backend = Arc::new(MemoryCache::default());
	let cache: Arc<dyn TokenCache> = cache_backend.clone();
	let transport = Arc::new(test_reqwest_transport());
	let client =
		Client::with_transport(config, cache, transport).expect("Failed to build test client.");

	(client, cache_backend)
}

/// Seeds the derived cache key for `app_id` so calls start from a warm token.
pub async fn seed_token(cache: &MemoryCache, app_id: &str, token: &str) {
	cache
		.set(&format!("esign.common.access_token.{app_id}"), token, Duration::seconds(600))
		.await
		.expect("Seeding the token cache should succeed.");
}
