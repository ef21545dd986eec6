use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use dairyhub_lib::application::ports::{ConnectivityNotice, ConnectivityNotifier};
use dairyhub_lib::application::services::PersistenceService;
use dairyhub_lib::domain::entities::QueuedActionDraft;
use dairyhub_lib::domain::value_objects::{EntityType, OfflineActionType, OfflinePayload};
use dairyhub_lib::infrastructure::database::ConnectionPool;
use dairyhub_lib::infrastructure::storage::SqliteKeyValueStore;
use dairyhub_lib::shared::{AppConfig, AppError};
use dairyhub_lib::state::AppState;
use serde_json::Value;
use tokio::sync::mpsc;

/// 接続通知をチャネルに流すだけの通知先
pub struct RecordingNotifier {
    tx: mpsc::UnboundedSender<ConnectivityNotice>,
}

impl RecordingNotifier {
    pub fn channel() -> (Arc<Self>, mpsc::UnboundedReceiver<ConnectivityNotice>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Arc::new(Self { tx }), rx)
    }
}

#[async_trait]
impl ConnectivityNotifier for RecordingNotifier {
    async fn notify(&self, notice: &ConnectivityNotice) -> Result<(), AppError> {
        self.tx
            .send(notice.clone())
            .map_err(|err| AppError::Internal(err.to_string()))
    }
}

pub fn test_config(data_dir: &Path) -> AppConfig {
    let mut config = AppConfig::default();
    config.storage.data_dir = data_dir.display().to_string();
    config.database.url = format!("sqlite://{}/dairyhub.db?mode=rwc", data_dir.display());
    config.sync.probe_enabled = false;
    config
}

pub async fn in_memory_state(
    online: bool,
) -> (AppState, mpsc::UnboundedReceiver<ConnectivityNotice>) {
    let (notifier, rx) = RecordingNotifier::channel();
    let state = AppState::in_memory(AppConfig::default(), notifier, online)
        .await
        .expect("in-memory state");
    (state, rx)
}

pub async fn sqlite_persistence(quota_bytes: u64) -> PersistenceService {
    let pool = ConnectionPool::from_memory().await.expect("in-memory sqlite");
    pool.migrate().await.expect("migrations");
    PersistenceService::new(Arc::new(SqliteKeyValueStore::new(pool, quota_bytes)))
}

pub fn draft(kind: &str, entity: &str, data: Value) -> QueuedActionDraft {
    QueuedActionDraft::new(
        OfflineActionType::new(kind.into()).expect("action type"),
        EntityType::new(entity.into()).expect("entity type"),
        OfflinePayload::new(data),
    )
}
