//! In-memory partition store.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::store::CacheStore;
use super::stored::StoredResponse;
use crate::Error;

/// Partitions kept in process memory.
///
/// Nothing survives a restart. Used by tests and when the configured
/// database path is `:memory:`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    partitions: RwLock<BTreeMap<String, HashMap<String, StoredResponse>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries in a partition, zero if it does not exist.
    pub async fn len(&self, partition: &str) -> usize {
        self.partitions.read().await.get(partition).map(HashMap::len).unwrap_or(0)
    }

    /// Whether `url` is stored in any partition.
    pub async fn contains_anywhere(&self, url: &str) -> bool {
        self.partitions.read().await.values().any(|entries| entries.contains_key(url))
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn open(&self, partition: &str) -> Result<(), Error> {
        self.partitions.write().await.entry(partition.to_string()).or_default();
        Ok(())
    }

    async fn get(&self, partition: &str, url: &str) -> Result<Option<StoredResponse>, Error> {
        let partitions = self.partitions.read().await;
        Ok(partitions.get(partition).and_then(|entries| entries.get(url)).cloned())
    }

    async fn put(&self, partition: &str, entry: StoredResponse) -> Result<(), Error> {
        let mut partitions = self.partitions.write().await;
        partitions
            .entry(partition.to_string())
            .or_default()
            .insert(entry.url.clone(), entry);
        Ok(())
    }

    async fn delete(&self, partition: &str, url: &str) -> Result<bool, Error> {
        let mut partitions = self.partitions.write().await;
        Ok(partitions
            .get_mut(partition)
            .map(|entries| entries.remove(url).is_some())
            .unwrap_or(false))
    }

    async fn partitions(&self) -> Result<Vec<String>, Error> {
        Ok(self.partitions.read().await.keys().cloned().collect())
    }

    async fn delete_partition(&self, partition: &str) -> Result<bool, Error> {
        Ok(self.partitions.write().await.remove(partition).is_some())
    }
}
