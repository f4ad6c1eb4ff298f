//! Settings service with caching and validation
//!
//! # Cache lifecycle
//!
//! Each process keeps its own cache. It is primed from the store by
//! [`SettingsService::load`], refreshed by every write made through this
//! process, and an entry older than [`SETTINGS_CACHE_TTL`] is re-read from
//! the store on next access. Writes from other processes become visible here
//! within that window.

use chrono::NaiveTime;
use lru::LruCache;
use std::collections::BTreeMap;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use concierge_types::settings_adapter::SettingsAdapter;

use crate::prelude::*;

use super::form::FormErrors;
use super::types::{FrozenSettingsRegistry, SettingDefinition, SettingType, SettingValue};

/// How long a cached value is served before the store is consulted again
pub const SETTINGS_CACHE_TTL: Duration = Duration::from_secs(60);

/// Maximum number of cached settings
pub const SETTINGS_CACHE_CAPACITY: usize = 1000;

#[derive(Clone)]
struct CachedValue {
	value: SettingValue,
	fetched_at: Instant,
}

/// LRU cache for settings values with a fixed staleness window
pub struct SettingsCache {
	cache: parking_lot::Mutex<LruCache<String, CachedValue>>,
	ttl: Duration,
}

impl SettingsCache {
	pub fn new(capacity: usize, ttl: Duration) -> Self {
		let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
		Self { cache: parking_lot::Mutex::new(LruCache::new(capacity)), ttl }
	}

	/// Fresh cached value, if any. Expired entries are evicted.
	pub fn get(&self, key: &str) -> Option<SettingValue> {
		let mut cache = self.cache.lock();
		let entry = cache.get(key)?;
		if entry.fetched_at.elapsed() < self.ttl {
			return Some(entry.value.clone());
		}
		cache.pop(key);
		None
	}

	pub fn put(&self, key: impl Into<String>, value: SettingValue) {
		let mut cache = self.cache.lock();
		cache.put(key.into(), CachedValue { value, fetched_at: Instant::now() });
	}

	/// Invalidate all cached settings
	pub fn clear(&self) {
		self.cache.lock().clear();
	}

	pub fn len(&self) -> usize {
		self.cache.lock().len()
	}

	pub fn is_empty(&self) -> bool {
		self.cache.lock().is_empty()
	}
}

/// Settings service - main interface for reading and writing settings
pub struct SettingsService {
	registry: Arc<FrozenSettingsRegistry>,
	cache: SettingsCache,
	store: Arc<dyn SettingsAdapter>,
}

impl SettingsService {
	pub fn new(registry: Arc<FrozenSettingsRegistry>, store: Arc<dyn SettingsAdapter>) -> Self {
		Self::with_cache(registry, store, SETTINGS_CACHE_CAPACITY, SETTINGS_CACHE_TTL)
	}

	pub fn with_cache(
		registry: Arc<FrozenSettingsRegistry>,
		store: Arc<dyn SettingsAdapter>,
		capacity: usize,
		ttl: Duration,
	) -> Self {
		Self { registry, cache: SettingsCache::new(capacity, ttl), store }
	}

	/// Prime the cache with every registered setting
	///
	/// Persisted rows that no longer match their declared type are logged and
	/// replaced by the default.
	pub async fn load(&self) -> ClResult<()> {
		let overrides = self.store.list_settings().await?;
		let mut overridden = 0;
		for def in self.registry.list() {
			let value = match overrides.get(&def.key) {
				Some(raw) => {
					overridden += 1;
					Self::decode(def, raw)
				}
				None => def.default.clone(),
			};
			self.cache.put(def.key.clone(), value);
		}
		for key in overrides.keys().filter(|key| !self.registry.contains(key)) {
			warn!("Persisted setting '{}' is not registered, ignoring", key);
		}
		info!("Loaded {} settings ({} overridden)", self.registry.len(), overridden);
		Ok(())
	}

	fn decode(def: &SettingDefinition, raw: &serde_json::Value) -> SettingValue {
		SettingValue::from_json(raw, def.typ).unwrap_or_else(|err| {
			warn!("Persisted value of '{}' is invalid ({}), using default", def.key, err);
			def.default.clone()
		})
	}

	/// Current value: persisted override if present, else the declared default
	///
	/// Never fails. Unknown names yield an empty string; store errors are
	/// logged and answered with the default.
	pub async fn get(&self, key: &str) -> SettingValue {
		let Some(def) = self.registry.get(key) else {
			debug!("Unknown setting requested: {}", key);
			return SettingValue::zero(SettingType::Str);
		};

		if let Some(value) = self.cache.get(key) {
			return value;
		}

		let value = match self.store.read_setting(key).await {
			Ok(Some(row)) => Self::decode(def, &row.value),
			Ok(None) => def.default.clone(),
			Err(err) => {
				// Not cached, so the store is retried on next access
				warn!("Cannot read setting '{}': {}", key, err);
				return def.default.clone();
			}
		};
		self.cache.put(key, value.clone());
		value
	}

	/// Validate and persist a value, then refresh the cache
	pub async fn set(&self, key: &str, value: SettingValue) -> ClResult<()> {
		let def = self
			.registry
			.get(key)
			.ok_or_else(|| Error::ValidationError(format!("Unknown setting: {}", key)))?;

		def.validate(&value)?;

		self.store.update_setting(key, &value.to_json()).await?;
		self.cache.put(key, value);

		info!("Setting '{}' updated", key);
		Ok(())
	}

	/// Clean raw form values against the declared types and validators
	///
	/// Every field is checked; all failures are returned together.
	pub fn clean_form(
		&self,
		raw: &BTreeMap<String, serde_json::Value>,
	) -> Result<Vec<(String, SettingValue)>, FormErrors> {
		let mut errors = FormErrors::new();
		let mut cleaned = Vec::with_capacity(raw.len());

		for (key, raw_value) in raw {
			let Some(def) = self.registry.get(key) else {
				errors.add(key, format!("Unknown setting: {}", key));
				continue;
			};
			let value = match SettingValue::from_json(raw_value, def.typ) {
				Ok(value) => value,
				Err(err) => {
					errors.add(key, err.to_string());
					continue;
				}
			};
			if let Err(err) = def.validate(&value) {
				errors.add(key, err.to_string());
				continue;
			}
			cleaned.push((key.clone(), value));
		}

		if errors.is_empty() { Ok(cleaned) } else { Err(errors) }
	}

	/// Persist already cleaned values, one key at a time
	pub async fn set_many(&self, values: Vec<(String, SettingValue)>) -> ClResult<usize> {
		let count = values.len();
		for (key, value) in values {
			self.set(&key, value).await?;
		}
		Ok(count)
	}

	/// Type-safe getters for collaborators
	///
	/// A value of the wrong type (only possible for unregistered names) is
	/// logged and replaced by the zero value of the requested type.
	pub async fn get_str(&self, key: &str) -> String {
		match self.get(key).await {
			SettingValue::String(s) => s,
			v => {
				warn!("Setting '{}' is not a string, got {}", key, v.type_name());
				String::new()
			}
		}
	}

	pub async fn get_int(&self, key: &str) -> i64 {
		match self.get(key).await {
			SettingValue::Int(i) => i,
			v => {
				warn!("Setting '{}' is not an integer, got {}", key, v.type_name());
				0
			}
		}
	}

	pub async fn get_float(&self, key: &str) -> f64 {
		match self.get(key).await {
			SettingValue::Float(f) => f,
			v => {
				warn!("Setting '{}' is not a float, got {}", key, v.type_name());
				0.0
			}
		}
	}

	pub async fn get_bool(&self, key: &str) -> bool {
		match self.get(key).await {
			SettingValue::Bool(b) => b,
			v => {
				warn!("Setting '{}' is not a boolean, got {}", key, v.type_name());
				false
			}
		}
	}

	pub async fn get_time(&self, key: &str) -> NaiveTime {
		match self.get(key).await {
			SettingValue::Time(t) => t,
			v => {
				warn!("Setting '{}' is not a time, got {}", key, v.type_name());
				NaiveTime::default()
			}
		}
	}

	/// Get reference to registry (for listing all settings)
	pub fn registry(&self) -> &Arc<FrozenSettingsRegistry> {
		&self.registry
	}

	pub fn cache(&self) -> &SettingsCache {
		&self.cache
	}
}


// vim: ts=4
