use crate::error::ConfigError;
use serde::Deserialize;
use serde::Serialize;

/// Sizing options for a [`TypeInfoCache`](crate::TypeInfoCache).
///
/// Neither field changes which descriptor a lookup returns; they only affect
/// allocation up front and how finely the table is locked.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CacheConfig {
  /// Number of entries to reserve room for on construction.
  pub initial_capacity: usize,
  /// Number of independently locked shards. `None` lets the map pick one
  /// from the available parallelism.
  pub shard_amount: Option<usize>,
}

impl CacheConfig {
  pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
    self.initial_capacity = initial_capacity;
    self
  }

  pub fn with_shard_amount(mut self, shard_amount: usize) -> Self {
    self.shard_amount = Some(shard_amount);
    self
  }

  pub fn validate(&self) -> Result<(), ConfigError> {
    match self.shard_amount {
      Some(amount) if amount <= 1 || !amount.is_power_of_two() => {
        Err(ConfigError::InvalidShardAmount(amount))
      }
      _ => Ok(()),
    }
  }
}
