use crate::application::ports::key_value_store::entry_size;
use crate::application::ports::{KeyValueStore, StorageError};
use crate::domain::value_objects::StorageKey;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// 容量上限付きのインメモリストア
///
/// テストとデータベースを使わない構成で利用する。
#[derive(Clone)]
pub struct MemoryKeyValueStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
    quota_bytes: u64,
}

impl MemoryKeyValueStore {
    pub fn new(quota_bytes: u64) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            quota_bytes,
        }
    }

    pub fn quota_bytes(&self) -> u64 {
        self.quota_bytes
    }

    fn total_bytes(entries: &HashMap<String, String>, excluding: Option<&str>) -> u64 {
        entries
            .iter()
            .filter(|(key, _)| Some(key.as_str()) != excluding)
            .map(|(key, value)| entry_size(key, value))
            .sum()
    }
}

#[async_trait]
impl KeyValueStore for MemoryKeyValueStore {
    async fn get(&self, key: &StorageKey) -> Result<Option<String>, StorageError> {
        let entries = self.entries.read().await;
        Ok(entries.get(key.as_str()).cloned())
    }

    async fn set(&self, key: &StorageKey, value: String) -> Result<(), StorageError> {
        let mut entries = self.entries.write().await;
        let required =
            Self::total_bytes(&entries, Some(key.as_str())) + entry_size(key.as_str(), &value);
        if required > self.quota_bytes {
            return Err(StorageError::QuotaExceeded {
                required,
                quota: self.quota_bytes,
            });
        }
        entries.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &StorageKey) -> Result<(), StorageError> {
        let mut entries = self.entries.write().await;
        entries.remove(key.as_str());
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        let mut entries = self.entries.write().await;
        entries.clear();
        Ok(())
    }

    async fn entries(&self) -> Result<Vec<(StorageKey, String)>, StorageError> {
        let entries = self.entries.read().await;
        let mut pairs = Vec::with_capacity(entries.len());
        for (key, value) in entries.iter() {
            let key = StorageKey::new(key.as_str()).map_err(StorageError::Backend)?;
            pairs.push((key, value.clone()));
        }
        pairs.sort_by(|a, b| a.0.as_str().cmp(b.0.as_str()));
        Ok(pairs)
    }

    async fn usage_bytes(&self) -> Result<u64, StorageError> {
        let entries = self.entries.read().await;
        Ok(Self::total_bytes(&entries, None))
    }

    async fn replace_all(&self, replacement: Vec<(StorageKey, String)>) -> Result<(), StorageError> {
        let required: u64 = replacement
            .iter()
            .map(|(key, value)| entry_size(key.as_str(), value))
            .sum();
        if required > self.quota_bytes {
            return Err(StorageError::QuotaExceeded {
                required,
                quota: self.quota_bytes,
            });
        }

        let mut entries = self.entries.write().await;
        entries.clear();
        for (key, value) in replacement {
            entries.insert(key.to_string(), value);
        }
        Ok(())
    }
}
