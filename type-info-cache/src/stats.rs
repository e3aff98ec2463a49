use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for calls to
/// [`TypeInfoCache::find_or_create`](crate::TypeInfoCache::find_or_create).
///
/// Every miss constructs exactly one descriptor, which is then either
/// inserted or discarded, so `misses == insertions + discarded`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
  pub hits: u64,
  pub misses: u64,
  pub insertions: u64,
  /// Speculative descriptors dropped because another thread inserted first.
  pub discarded: u64,
  /// Requests answered by the empty descriptor without touching the table.
  pub empty_hits: u64,
}

impl CacheStats {
  pub fn merge(&mut self, other: &CacheStats) {
    self.hits += other.hits;
    self.misses += other.misses;
    self.insertions += other.insertions;
    self.discarded += other.discarded;
    self.empty_hits += other.empty_hits;
  }

  pub fn hit_rate(&self) -> f64 {
    let total = self.hits + self.misses;
    if total == 0 {
      0.0
    } else {
      self.hits as f64 / total as f64
    }
  }
}

#[derive(Debug, Default)]
pub(crate) struct StatsCounters {
  hits: AtomicU64,
  misses: AtomicU64,
  insertions: AtomicU64,
  discarded: AtomicU64,
  empty_hits: AtomicU64,
}

impl StatsCounters {
  pub(crate) fn record_hit(&self) {
    self.hits.fetch_add(1, Ordering::Relaxed);
  }

  pub(crate) fn record_miss(&self) {
    self.misses.fetch_add(1, Ordering::Relaxed);
  }

  pub(crate) fn record_insertion(&self) {
    self.insertions.fetch_add(1, Ordering::Relaxed);
  }

  pub(crate) fn record_discard(&self) {
    self.discarded.fetch_add(1, Ordering::Relaxed);
  }

  pub(crate) fn record_empty_hit(&self) {
    self.empty_hits.fetch_add(1, Ordering::Relaxed);
  }

  pub(crate) fn snapshot(&self) -> CacheStats {
    CacheStats {
      hits: self.hits.load(Ordering::Relaxed),
      misses: self.misses.load(Ordering::Relaxed),
      insertions: self.insertions.load(Ordering::Relaxed),
      discarded: self.discarded.load(Ordering::Relaxed),
      empty_hits: self.empty_hits.load(Ordering::Relaxed),
    }
  }
}
