use crate::application::ports::ConnectivitySource;
use crate::application::services::persistence_service::{PersistenceService, well_known_key};
use crate::domain::constants::SYNC_STATUS_KEY;
use crate::domain::entities::{SyncStatusPatch, SyncStatusRecord};
use crate::domain::value_objects::StorageKey;
use crate::shared::AppError;
use std::sync::Arc;
use tokio::sync::Mutex;

/// UI のインジケーター向けに最後の接続状態と同期時刻を保持する。
pub struct SyncStatusService {
    persistence: Arc<PersistenceService>,
    connectivity: Arc<dyn ConnectivitySource>,
    key: StorageKey,
    write_lock: Mutex<()>,
}

impl SyncStatusService {
    pub fn new(
        persistence: Arc<PersistenceService>,
        connectivity: Arc<dyn ConnectivitySource>,
    ) -> Self {
        Self {
            persistence,
            connectivity,
            key: well_known_key(SYNC_STATUS_KEY),
            write_lock: Mutex::new(()),
        }
    }

    pub async fn get(&self) -> SyncStatusRecord {
        let fallback = SyncStatusRecord::initial(self.connectivity.is_online());
        self.persistence.load(&self.key, fallback).await
    }

    /// 既存レコードにパッチをマージして保存し、マージ後のレコードを返す。
    pub async fn set(&self, patch: SyncStatusPatch) -> Result<SyncStatusRecord, AppError> {
        let _guard = self.write_lock.lock().await;
        let mut record = self.get().await;
        record.apply(&patch);
        self.persistence.save(&self.key, &record).await?;
        Ok(record)
    }
}
