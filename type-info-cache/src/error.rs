/// Errors produced while building a [`TypeInfoCache`](crate::TypeInfoCache)
/// from a [`CacheConfig`](crate::CacheConfig).
///
/// Lookups and inserts never fail; configuration is the only fallible
/// surface.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
  /// The map is split into shards selected by hash bits, so the shard count
  /// has to be a power of two greater than one.
  #[error("shard amount must be a power of two greater than one, got {0}")]
  InvalidShardAmount(usize),
}
