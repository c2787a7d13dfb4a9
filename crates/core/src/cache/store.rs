//! The storage seam shared by the strategies and the lifecycle handlers.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::stored::StoredResponse;
use crate::Error;

/// The three partitions a worker version owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum PartitionKind {
    /// Build artifacts, filled at install and by cache-first.
    Static,
    /// Everything revalidated in the background.
    Dynamic,
    /// External API responses, filled by network-first.
    Api,
}

impl PartitionKind {
    pub const ALL: [PartitionKind; 3] = [PartitionKind::Static, PartitionKind::Dynamic, PartitionKind::Api];

    pub fn as_str(&self) -> &'static str {
        match self {
            PartitionKind::Static => "static",
            PartitionKind::Dynamic => "dynamic",
            PartitionKind::Api => "api",
        }
    }
}

/// Maps partition kinds to their versioned storage names.
///
/// With version `v1` the names are `static-v1`, `dynamic-v1` and `api-v1`.
/// An empty version yields the bare kind names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionNames {
    version: String,
}

impl PartitionNames {
    pub fn new(version: impl Into<String>) -> Self {
        Self { version: version.into() }
    }

    pub fn name(&self, kind: PartitionKind) -> String {
        if self.version.is_empty() {
            kind.as_str().to_string()
        } else {
            format!("{}-{}", kind.as_str(), self.version)
        }
    }

    pub fn all(&self) -> Vec<String> {
        PartitionKind::ALL.iter().map(|kind| self.name(*kind)).collect()
    }

    /// Whether `name` belongs to the current version.
    pub fn is_current(&self, name: &str) -> bool {
        PartitionKind::ALL.iter().any(|kind| self.name(*kind) == name)
    }
}

/// Key-value storage of response snapshots, grouped into named partitions.
///
/// Writes replace a whole entry at once; concurrent writers to the same key
/// are last-write-wins.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Create the partition if it does not exist.
    async fn open(&self, partition: &str) -> Result<(), Error>;

    /// Look up the entry stored under `url`.
    async fn get(&self, partition: &str, url: &str) -> Result<Option<StoredResponse>, Error>;

    /// Store `entry` under its URL, creating the partition on first write.
    async fn put(&self, partition: &str, entry: StoredResponse) -> Result<(), Error>;

    /// Remove one entry. Returns whether it existed.
    async fn delete(&self, partition: &str, url: &str) -> Result<bool, Error>;

    /// Names of all existing partitions, sorted.
    async fn partitions(&self) -> Result<Vec<String>, Error>;

    /// Drop a partition with all of its entries. Returns whether it existed.
    async fn delete_partition(&self, partition: &str) -> Result<bool, Error>;
}
