//! Thread-safe in-memory [`TokenCache`] implementation for local development and tests.

// self
use crate::{
	_prelude::*,
	cache::{CacheError, CacheFuture, CacheSlot, TokenCache},
};

type SlotMap = Arc<RwLock<HashMap<String, CacheSlot>>>;

/// Thread-safe cache backend that keeps entries in-process for tests and demos.
///
/// Expired entries are dropped lazily on read.
#[derive(Clone, Debug, Default)]
pub struct MemoryCache(SlotMap);
impl MemoryCache {
	fn get_now(map: SlotMap, key: String) -> Option<String> {
		let now = OffsetDateTime::now_utc();

		map.read().get(&key).filter(|slot| !slot.is_expired_at(now)).map(|slot| slot.value.clone())
	}

	fn set_now(map: SlotMap, key: String, slot: CacheSlot) -> Result<(), CacheError> {
		map.write().insert(key, slot);

		Ok(())
	}
}
impl TokenCache for MemoryCache {
	fn get<'a>(&'a self, key: &'a str) -> CacheFuture<'a, Option<String>> {
		let map = self.0.clone();
		let key = key.to_owned();

		Box::pin(async move { Ok(Self::get_now(map, key)) })
	}

	fn set<'a>(&'a self, key: &'a str, value: &'a str, ttl: Duration) -> CacheFuture<'a, ()> {
		let map = self.0.clone();
		let key = key.to_owned();
		let slot = CacheSlot::new(value, OffsetDateTime::now_utc(), ttl);

		Box::pin(async move { Self::set_now(map, key, slot) })
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use tokio::runtime::Runtime;
	// self
	use super::*;

	#[test]
	fn set_then_get_round_trips() {
		let cache = MemoryCache::default();
		let rt = Runtime::new().expect("Failed to build Tokio runtime for memory cache test.");

		rt.block_on(cache.set("k", "tok-123", Duration::seconds(60)))
			.expect("Failed to store fixture entry.");

		let fetched =
			rt.block_on(cache.get("k")).expect("Failed to fetch fixture entry from memory cache.");

		assert_eq!(fetched.as_deref(), Some("tok-123"));
		assert_eq!(rt.block_on(cache.get("other")).expect("Miss should not error."), None);
	}

	#[test]
	fn expired_entries_are_misses() {
		let cache = MemoryCache::default();
		let rt = Runtime::new().expect("Failed to build Tokio runtime for expiry test.");

		rt.block_on(cache.set("k", "tok-123", Duration::seconds(-1)))
			.expect("Failed to store expired fixture entry.");

		assert_eq!(rt.block_on(cache.get("k")).expect("Expired read should not error."), None);
	}

	#[test]
	fn later_writes_win() {
		let cache = MemoryCache::default();
		let rt = Runtime::new().expect("Failed to build Tokio runtime for overwrite test.");

		rt.block_on(cache.set("k", "tok-old", Duration::seconds(60)))
			.expect("Failed to store first fixture entry.");
		rt.block_on(cache.set("k", "tok-new", Duration::seconds(60)))
			.expect("Failed to store second fixture entry.");

		let fetched = rt.block_on(cache.get("k")).expect("Failed to fetch overwritten entry.");

		assert_eq!(fetched.as_deref(), Some("tok-new"));
	}
}
