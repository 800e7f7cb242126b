//! Cache contracts and built-in backends for access token storage.

pub mod file;
pub mod memory;

pub use file::FileCache;
pub use memory::MemoryCache;

// self
use crate::_prelude::*;

/// Boxed future returned by [`TokenCache`] operations.
pub type CacheFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, CacheError>> + 'a + Send>>;

/// String key/value store with per-entry time-to-live, supplied by the host.
///
/// The backend may be shared by several processes; readers must treat every
/// returned value as possibly stale, and concurrent writers race with
/// last-write-wins semantics. No synchronization beyond the backend's own is
/// expected.
pub trait TokenCache
where
	Self: Send + Sync,
{
	/// Fetches the live value stored under `key`, if any.
	fn get<'a>(&'a self, key: &'a str) -> CacheFuture<'a, Option<String>>;

	/// Stores `value` under `key` for the provided time-to-live.
	fn set<'a>(&'a self, key: &'a str, value: &'a str, ttl: Duration) -> CacheFuture<'a, ()>;
}

/// Error type produced by [`TokenCache`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum CacheError {
	/// Serialization failures surfaced by the backend.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}

/// Value plus expiry instant stored by the built-in backends.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheSlot {
	/// Cached value.
	pub value: String,
	/// Instant after which the value is no longer served.
	pub expires_at: OffsetDateTime,
}
impl CacheSlot {
	/// Creates a slot expiring `ttl` after `now`.
	pub fn new(value: impl Into<String>, now: OffsetDateTime, ttl: Duration) -> Self {
		Self { value: value.into(), expires_at: now + ttl }
	}

	/// Returns `true` once the slot has passed its expiry instant.
	pub fn is_expired_at(&self, instant: OffsetDateTime) -> bool {
		instant >= self.expires_at
	}
}
