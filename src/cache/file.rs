//! Simple file-backed [`TokenCache`] that shares tokens across process restarts.

// std
use std::{
	fs::{self, File},
	io::Write,
	path::{Path, PathBuf},
};
// self
use crate::{
	_prelude::*,
	cache::{CacheError, CacheFuture, CacheSlot, TokenCache},
};

/// Persists cache entries to a JSON file after each mutation.
///
/// Expired entries survive in the snapshot until overwritten but are never
/// served.
#[derive(Clone, Debug)]
pub struct FileCache {
	path: PathBuf,
	inner: Arc<RwLock<HashMap<String, CacheSlot>>>,
}
impl FileCache {
	/// Opens (or creates) a cache at the provided path, eagerly loading existing entries.
	pub fn open(path: impl Into<PathBuf>) -> Result<Self, CacheError> {
		let path = path.into();

		Self::ensure_parent_exists(&path)?;

		let snapshot = if path.exists() { Self::load_snapshot(&path)? } else { HashMap::new() };

		Ok(Self { path, inner: Arc::new(RwLock::new(snapshot)) })
	}

	fn load_snapshot(path: &Path) -> Result<HashMap<String, CacheSlot>, CacheError> {
		let metadata = path.metadata().map_err(|e| CacheError::Backend {
			message: format!("Failed to inspect {}: {e}", path.display()),
		})?;

		if metadata.len() == 0 {
			return Ok(HashMap::new());
		}

		let bytes = fs::read(path).map_err(|e| CacheError::Backend {
			message: format!("Failed to read {}: {e}", path.display()),
		})?;

		let entries: Vec<(String, CacheSlot)> =
			serde_json::from_slice(&bytes).map_err(|e| CacheError::Serialization {
				message: format!("Failed to parse {}: {e}", path.display()),
			})?;

		Ok(entries.into_iter().collect())
	}

	fn ensure_parent_exists(path: &Path) -> Result<(), CacheError> {
		if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
			fs::create_dir_all(parent).map_err(|e| CacheError::Backend {
				message: format!("Failed to create cache directory {}: {e}", parent.display()),
			})?;
		}
		Ok(())
	}

	fn persist_locked(&self, contents: &HashMap<String, CacheSlot>) -> Result<(), CacheError> {
		Self::ensure_parent_exists(&self.path)?;

		let snapshot: Vec<_> = contents.iter().collect();
		let serialized =
			serde_json::to_vec_pretty(&snapshot).map_err(|e| CacheError::Serialization {
				message: format!("Failed to serialize cache snapshot: {e}"),
			})?;
		let mut tmp_path = self.path.clone();

		tmp_path.set_extension("tmp");

		{
			let mut file = File::create(&tmp_path).map_err(|e| CacheError::Backend {
				message: format!("Failed to create {}: {e}", tmp_path.display()),
			})?;

			file.write_all(&serialized).map_err(|e| CacheError::Backend {
				message: format!("Failed to write {}: {e}", tmp_path.display()),
			})?;
			file.sync_all().map_err(|e| CacheError::Backend {
				message: format!("Failed to sync {}: {e}", tmp_path.display()),
			})?;
		}

		fs::rename(&tmp_path, &self.path).map_err(|e| CacheError::Backend {
			message: format!("Failed to replace {}: {e}", self.path.display()),
		})
	}
}
impl TokenCache for FileCache {
	fn get<'a>(&'a self, key: &'a str) -> CacheFuture<'a, Option<String>> {
		Box::pin(async move {
			let now = OffsetDateTime::now_utc();

			Ok(self
				.inner
				.read()
				.get(key)
				.filter(|slot| !slot.is_expired_at(now))
				.map(|slot| slot.value.clone()))
		})
	}

	fn set<'a>(&'a self, key: &'a str, value: &'a str, ttl: Duration) -> CacheFuture<'a, ()> {
		Box::pin(async move {
			let slot = CacheSlot::new(value, OffsetDateTime::now_utc(), ttl);
			let mut guard = self.inner.write();

			guard.insert(key.to_owned(), slot);
			self.persist_locked(&guard)?;

			Ok(())
		})
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::{env, process};
	// crates.io
	use tokio::runtime::Runtime;
	// self
	use super::*;

	fn temp_path() -> PathBuf {
		let unique = format!(
			"esign_client_file_cache_{}_{}.json",
			process::id(),
			OffsetDateTime::now_utc().unix_timestamp_nanos(),
		);

		env::temp_dir().join(unique)
	}

	#[test]
	fn set_and_reload_round_trip() {
		let path = temp_path();
		let cache = FileCache::open(&path).expect("Failed to open file cache snapshot.");
		let rt = Runtime::new().expect("Failed to build Tokio runtime for file cache test.");

		rt.block_on(cache.set("k", "tok-123", Duration::seconds(600)))
			.expect("Failed to save fixture entry to file cache.");
		drop(cache);

		let reopened = FileCache::open(&path).expect("Failed to reopen file cache snapshot.");
		let fetched = rt
			.block_on(reopened.get("k"))
			.expect("Failed to fetch fixture entry from file cache.")
			.expect("File cache lost entry after reopen.");

		assert_eq!(fetched, "tok-123");

		fs::remove_file(&path).unwrap_or_else(|e| {
			panic!("Failed to remove temporary file cache snapshot {}: {e}", path.display())
		});
	}

	#[test]
	fn expired_entries_are_not_served_after_reload() {
		let path = temp_path();
		let cache = FileCache::open(&path).expect("Failed to open file cache snapshot.");
		let rt = Runtime::new().expect("Failed to build Tokio runtime for expiry test.");

		rt.block_on(cache.set("k", "tok-123", Duration::seconds(-1)))
			.expect("Failed to save expired fixture entry.");
		drop(cache);

		let reopened = FileCache::open(&path).expect("Failed to reopen file cache snapshot.");

		assert_eq!(rt.block_on(reopened.get("k")).expect("Expired read should not error."), None);

		fs::remove_file(&path).unwrap_or_else(|e| {
			panic!("Failed to remove temporary file cache snapshot {}: {e}", path.display())
		});
	}
}
