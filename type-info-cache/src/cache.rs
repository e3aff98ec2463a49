use crate::error::ConfigError;
use crate::info::{Descriptor, TypeInfo};
use crate::key::TypeInfoKey;
use crate::options::CacheConfig;
use crate::stats::{CacheStats, StatsCounters};
use crate::token::Token;
use ahash::RandomState;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::fmt;
use std::sync::Arc;

/// Thread-safe interning table from (base type, ordered traits) to a single
/// canonical descriptor.
///
/// For every distinct key at most one descriptor is ever published, and once
/// published it is never replaced or removed, so callers may compare results
/// with [`Arc::ptr_eq`] instead of comparing trait lists. The descriptor for
/// "no base type, no traits" is built up front and kept outside the table.
///
/// Lookups only take a shard read lock. A miss builds the new descriptor
/// before locking anything for writing and then offers it to the table; if
/// another thread published the same key first, the speculative descriptor is
/// dropped and the published one is returned instead.
pub struct TypeInfoCache<D = TypeInfo> {
  entries: DashMap<TypeInfoKey, Arc<D>, RandomState>,
  empty: Arc<D>,
  stats: StatsCounters,
  config: CacheConfig,
}

impl<D: Descriptor> TypeInfoCache<D> {
  pub fn new() -> Self {
    Self::build(CacheConfig::default())
  }

  pub fn with_config(config: CacheConfig) -> Result<Self, ConfigError> {
    config.validate()?;
    Ok(Self::build(config))
  }

  fn build(config: CacheConfig) -> Self {
    let hasher = RandomState::new();
    let entries = match config.shard_amount {
      Some(shard_amount) => DashMap::with_capacity_and_hasher_and_shard_amount(
        config.initial_capacity,
        hasher,
        shard_amount,
      ),
      None => DashMap::with_capacity_and_hasher(config.initial_capacity, hasher),
    };
    tracing::debug!(
      target: "type_info_cache",
      initial_capacity = config.initial_capacity,
      shard_amount = ?config.shard_amount,
      "created type info cache"
    );
    Self {
      entries,
      empty: Arc::new(D::empty()),
      stats: StatsCounters::default(),
      config,
    }
  }

  /// Returns the canonical descriptor for `base_type` with `traits` applied
  /// in the given order, creating it if this is the first request.
  pub fn find_or_create(&self, base_type: &Token, traits: Vec<Token>) -> Arc<D> {
    let key = TypeInfoKey::new(base_type, &traits);
    if key.is_empty() {
      self.stats.record_empty_hit();
      tracing::trace!(target: "type_info_cache::empty", "empty key");
      return self.empty.clone();
    }

    if let Some(found) = self.lookup(&key) {
      return found;
    }

    let speculative = Arc::new(D::construct(base_type, traits));
    self.insert(key, speculative)
  }

  /// The descriptor for "no base type, no traits".
  pub fn empty_type_info(&self) -> Arc<D> {
    self.empty.clone()
  }

  /// Like [`find_or_create`](Self::find_or_create) but never constructs.
  /// Probing an absent combination leaves no trace: keys are not interned,
  /// and the call does not count towards [`stats`](Self::stats).
  pub fn find(&self, base_type: &Token, traits: &[Token]) -> Option<Arc<D>> {
    let key = TypeInfoKey::new(base_type, traits);
    if key.is_empty() {
      return Some(self.empty.clone());
    }
    self.get(&key)
  }

  /// Looks `key` up in the table only; the empty descriptor is not stored
  /// there, so the empty key yields `None`.
  pub fn get(&self, key: &TypeInfoKey) -> Option<Arc<D>> {
    self.entries.get(key).map(|entry| entry.value().clone())
  }

  pub fn contains(&self, key: &TypeInfoKey) -> bool {
    self.entries.contains_key(key)
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn keys(&self) -> Vec<TypeInfoKey> {
    let mut keys: Vec<_> = self.entries.iter().map(|entry| entry.key().clone()).collect();
    keys.sort();
    keys
  }

  /// Snapshot of every published entry, sorted by key.
  pub fn entries(&self) -> Vec<(TypeInfoKey, Arc<D>)> {
    let mut entries: Vec<_> = self
      .entries
      .iter()
      .map(|entry| (entry.key().clone(), entry.value().clone()))
      .collect();
    entries.sort_by(|a, b| a.0.cmp(&b.0));
    entries
  }

  pub fn stats(&self) -> CacheStats {
    self.stats.snapshot()
  }

  pub fn config(&self) -> CacheConfig {
    self.config
  }

  fn lookup(&self, key: &TypeInfoKey) -> Option<Arc<D>> {
    let found = self.get(key);
    if found.is_some() {
      self.stats.record_hit();
    } else {
      self.stats.record_miss();
    }
    tracing::trace!(
      target: "type_info_cache::lookup",
      key = %key,
      cache_hit = found.is_some()
    );
    found
  }

  /// Publishes `speculative` under `key` unless an entry already exists.
  /// Returns whichever descriptor ends up in the table.
  fn insert(&self, key: TypeInfoKey, speculative: Arc<D>) -> Arc<D> {
    match self.entries.entry(key) {
      Entry::Occupied(entry) => {
        let canonical = entry.get().clone();
        tracing::trace!(target: "type_info_cache::insert", key = %entry.key(), won = false);
        // Release the shard lock before running the loser's destructor.
        drop(entry);
        drop(speculative);
        self.stats.record_discard();
        canonical
      }
      Entry::Vacant(entry) => {
        tracing::trace!(target: "type_info_cache::insert", key = %entry.key(), won = true);
        let canonical = entry.insert(speculative).value().clone();
        self.stats.record_insertion();
        canonical
      }
    }
  }
}

impl<D: Descriptor> Default for TypeInfoCache<D> {
  fn default() -> Self {
    Self::new()
  }
}

impl<D> fmt::Debug for TypeInfoCache<D> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("TypeInfoCache")
      .field("len", &self.entries.len())
      .field("stats", &self.stats.snapshot())
      .field("config", &self.config)
      .finish_non_exhaustive()
  }
}
