use crate::application::ports::KeyValueStore;
use crate::domain::constants::{DATA_VERSION, DATA_VERSION_KEY, SYNC_STATUS_KEY};
use crate::domain::entities::{StorageSnapshot, StorageUsage, SyncStatusRecord};
use crate::domain::value_objects::StorageKey;
use crate::shared::AppError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// キーバリューストア上の JSON 永続化レイヤー。
///
/// 読み込み側は決して失敗しない: 欠損・破損した値は既定値にフォールバックし、
/// 破損はログに残す。書き込み側は容量超過を [`AppError::StorageFull`] として返す。
pub struct PersistenceService {
    store: Arc<dyn KeyValueStore>,
}

impl PersistenceService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// データバージョンと同期ステータスが未保存なら初期値を書き込む。
    pub async fn initialize(&self, platform_online: bool) -> Result<(), AppError> {
        let version_key = well_known_key(DATA_VERSION_KEY);
        if self.store.get(&version_key).await?.is_none() {
            self.save(&version_key, &DATA_VERSION).await?;
            tracing::info!(version = DATA_VERSION, "Initialized data version");
        }

        let status_key = well_known_key(SYNC_STATUS_KEY);
        if self.store.get(&status_key).await?.is_none() {
            self.save(&status_key, &SyncStatusRecord::initial(platform_online))
                .await?;
        }

        Ok(())
    }

    pub async fn save<T>(&self, key: &StorageKey, value: &T) -> Result<(), AppError>
    where
        T: Serialize + Sync + ?Sized,
    {
        let serialized = serde_json::to_string(value).map_err(|e| {
            AppError::SerializationError(format!("Failed to serialize value for {key}: {e}"))
        })?;

        match self.store.set(key, serialized).await {
            Ok(()) => Ok(()),
            Err(err) => {
                let err = AppError::from(err);
                if err.is_storage_full() {
                    tracing::warn!(key = %key, "Storage quota exceeded; write rejected");
                } else {
                    tracing::error!(key = %key, error = %err, "Failed to write storage entry");
                }
                Err(err)
            }
        }
    }

    pub async fn load<T>(&self, key: &StorageKey, default: T) -> T
    where
        T: DeserializeOwned + Send,
    {
        let raw = match self.store.get(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return default,
            Err(err) => {
                tracing::error!(key = %key, error = %err, "Failed to read storage entry");
                return default;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(key = %key, error = %err, "Corrupt storage entry; using default");
                default
            }
        }
    }

    pub async fn remove(&self, key: &StorageKey) -> Result<(), AppError> {
        self.store.remove(key).await?;
        Ok(())
    }

    pub async fn clear(&self) -> Result<(), AppError> {
        self.store.clear().await?;
        tracing::info!("Cleared all storage entries");
        Ok(())
    }

    pub async fn export_all(&self) -> Result<StorageSnapshot, AppError> {
        let mut entries = BTreeMap::new();
        for (key, raw) in self.store.entries().await? {
            match serde_json::from_str::<Value>(&raw) {
                Ok(value) => {
                    entries.insert(key.to_string(), value);
                }
                Err(err) => {
                    tracing::warn!(key = %key, error = %err, "Skipping corrupt entry during export");
                }
            }
        }

        let version = self
            .load(&well_known_key(DATA_VERSION_KEY), DATA_VERSION.to_string())
            .await;
        Ok(StorageSnapshot::new(version, entries))
    }

    /// スナップショットでストア全体を上書きする（マージではない）。
    pub async fn import_all(&self, snapshot: StorageSnapshot) -> Result<usize, AppError> {
        let mut entries = Vec::with_capacity(snapshot.entries.len());
        for (key, value) in snapshot.entries {
            let key = StorageKey::new(key).map_err(AppError::ImportFormatInvalid)?;
            let raw = serde_json::to_string(&value)?;
            entries.push((key, raw));
        }

        let count = entries.len();
        self.store.replace_all(entries).await?;
        tracing::info!(entries = count, version = %snapshot.version, "Imported storage snapshot");
        Ok(count)
    }

    /// JSON 文字列を検証してからインポートする。解析に失敗した場合は既存データに触れない。
    pub async fn import_json(&self, json: &str) -> Result<usize, AppError> {
        let snapshot: StorageSnapshot = serde_json::from_str(json)
            .map_err(|e| AppError::ImportFormatInvalid(e.to_string()))?;
        self.import_all(snapshot).await
    }

    pub async fn usage_estimate(&self) -> Result<StorageUsage, AppError> {
        let bytes = self.store.usage_bytes().await?;
        Ok(StorageUsage::from_bytes(bytes))
    }
}

pub(crate) fn well_known_key(key: &'static str) -> StorageKey {
    StorageKey::from_static(key)
}
