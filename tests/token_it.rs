mod common;

// crates.io
use httpmock::prelude::*;
// self
use common::{build_test_client, test_config};
use esign_client::{
	cache::TokenCache,
	error::{AuthError, Error},
};

#[tokio::test]
async fn cold_cache_fetches_caches_and_returns_the_token() {
	let server = MockServer::start_async().await;
	let (client, cache) = build_test_client(test_config(&server, "A1", "S1"));
	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/v1/oauth2/access_token")
				.query_param("appId", "A1")
				.query_param("secret", "S1")
				.query_param("grantType", "client_credentials");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"code\":0,\"data\":{\"token\":\"tok-123\",\"expiresIn\":7200}}");
		})
		.await;
	let first = client.tokens().token(false).await.expect("Cold-cache token fetch should succeed.");
	let second = client.tokens().token(false).await.expect("Warm-cache token read should succeed.");

	assert_eq!(first, "tok-123");
	assert_eq!(second, "tok-123");

	// The second call must be served from the cache.
	mock.assert_calls_async(1).await;

	let cached = cache
		.get("esign.common.access_token.A1")
		.await
		.expect("Cache read should succeed.")
		.expect("Fetched token should be cached under the derived key.");

	assert_eq!(cached, "tok-123");
}

#[tokio::test]
async fn force_refresh_always_fetches() {
	let server = MockServer::start_async().await;
	let (client, _cache) = build_test_client(test_config(&server, "A1", "S1"));
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/v1/oauth2/access_token");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"code\":0,\"data\":{\"token\":\"tok-fresh\"}}");
		})
		.await;

	client.tokens().token(false).await.expect("Initial token fetch should succeed.");
	client.tokens().token(true).await.expect("First forced refresh should succeed.");
	client.tokens().token(true).await.expect("Second forced refresh should succeed.");

	mock.assert_calls_async(3).await;
}

#[tokio::test]
async fn rejected_credentials_surface_as_an_auth_error() {
	let server = MockServer::start_async().await;
	let (client, _cache) = build_test_client(test_config(&server, "A1", "bad-secret"));
	let _mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/v1/oauth2/access_token");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"code\":1435,\"message\":\"Invalid appId or secret\"}");
		})
		.await;
	let err = client
		.tokens()
		.token(false)
		.await
		.expect_err("Rejected credentials should fail token acquisition.");

	match err {
		Error::Auth(AuthError::MissingToken { summary }) => {
			assert!(summary.contains("1435"));
			assert!(summary.contains("Invalid appId or secret"));
		},
		other => panic!("Expected an auth error, got: {other:?}"),
	}
}

#[tokio::test]
async fn empty_token_value_is_an_auth_error() {
	let server = MockServer::start_async().await;
	let (client, _cache) = build_test_client(test_config(&server, "A1", "S1"));
	let _mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/v1/oauth2/access_token");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"code\":0,\"data\":{\"token\":\"\"}}");
		})
		.await;
	let err = client
		.tokens()
		.token(false)
		.await
		.expect_err("An empty token value should fail token acquisition.");

	assert!(matches!(err, Error::Auth(AuthError::MissingToken { .. })));
}

#[tokio::test]
async fn empty_cached_value_counts_as_a_miss() {
	let server = MockServer::start_async().await;
	let (client, cache) = build_test_client(test_config(&server, "A1", "S1"));

	cache
		.set("esign.common.access_token.A1", "", time::Duration::seconds(600))
		.await
		.expect("Seeding an empty cache value should succeed.");

	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/v1/oauth2/access_token");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"code\":0,\"data\":{\"token\":\"tok-refilled\"}}");
		})
		.await;
	let token =
		client.tokens().token(false).await.expect("An empty cached value should trigger a fetch.");

	assert_eq!(token, "tok-refilled");

	mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn cache_key_override_replaces_the_derived_key() {
	let server = MockServer::start_async().await;
	let config = test_config(&server, "A1", "S1").with_cache_key("tenant.shared.token");
	let (client, cache) = build_test_client(config);
	let _mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/v1/oauth2/access_token");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"code\":0,\"data\":{\"token\":\"tok-tenant\"}}");
		})
		.await;

	client.tokens().token(false).await.expect("Token fetch should succeed.");

	let overridden = cache
		.get("tenant.shared.token")
		.await
		.expect("Cache read should succeed.")
		.expect("Token should be cached under the override key.");

	assert_eq!(overridden, "tok-tenant");
	assert_eq!(
		cache
			.get("esign.common.access_token.A1")
			.await
			.expect("Cache read should succeed."),
		None,
	);
}
