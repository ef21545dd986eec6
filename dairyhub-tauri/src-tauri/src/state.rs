use crate::application::ports::{ActionProcessor, ConnectivityNotifier, KeyValueStore};
use crate::application::services::{
    BackupService, ConnectivityObserver, ObserverHandle, OfflineQueueService, PersistenceService,
    SyncService, SyncStatusService,
};
use crate::infrastructure::backup::FileBackupTransport;
use crate::infrastructure::connectivity::probe::ProbeHandle;
use crate::infrastructure::connectivity::{
    ConnectivityMonitor, ReachabilityProbe, TracingConnectivityNotifier,
};
use crate::infrastructure::database::ConnectionPool;
use crate::infrastructure::offline::LoggingActionProcessor;
use crate::infrastructure::storage::{MemoryKeyValueStore, SqliteKeyValueStore};
use crate::presentation::handlers::{BackupHandler, OfflineHandler, StorageHandler, SystemHandler};
use crate::shared::{AppConfig, AppError};
use std::sync::Arc;
use tokio::sync::Mutex;

/// アプリケーション全体の状態を管理する構造体
///
/// 各サービスは起動時に一度だけ生成し、`Arc` で共有する。
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub db_pool: Option<ConnectionPool>,
    pub persistence: Arc<PersistenceService>,
    pub connectivity: Arc<ConnectivityMonitor>,
    pub queue_service: Arc<OfflineQueueService>,
    pub status_service: Arc<SyncStatusService>,
    pub sync_service: Arc<SyncService>,
    pub backup_service: Arc<BackupService>,
    pub observer: Arc<ConnectivityObserver>,
    // ハンドラー
    pub storage_handler: Arc<StorageHandler>,
    pub offline_handler: Arc<OfflineHandler>,
    pub backup_handler: Arc<BackupHandler>,
    pub system_handler: Arc<SystemHandler>,
    background: Arc<Mutex<BackgroundTasks>>,
}

#[derive(Default)]
struct BackgroundTasks {
    observer: Option<ObserverHandle>,
    probe: Option<ProbeHandle>,
}

impl AppState {
    /// SQLite ストアで初期化する
    pub async fn initialize(
        config: AppConfig,
        notifier: Arc<dyn ConnectivityNotifier>,
        platform_online: bool,
    ) -> Result<Self, AppError> {
        config.validate().map_err(AppError::ConfigurationError)?;

        // データディレクトリの作成
        tokio::fs::create_dir_all(&config.storage.data_dir).await?;

        let pool = ConnectionPool::new(&config.database.url, config.database.max_connections).await?;
        pool.migrate().await?;
        tracing::info!(url = %config.database.url, "Database ready");

        let store: Arc<dyn KeyValueStore> = Arc::new(SqliteKeyValueStore::new(
            pool.clone(),
            config.storage.quota_bytes,
        ));
        Self::assemble(config, store, Some(pool), notifier, platform_online).await
    }

    /// ウィンドウを持たない構成向け。SQLite ストアを使い、接続通知はログに出す。
    pub async fn headless(config: AppConfig, platform_online: bool) -> Result<Self, AppError> {
        Self::initialize(
            config,
            Arc::new(TracingConnectivityNotifier),
            platform_online,
        )
        .await
    }

    /// インメモリストアで初期化する（テストやデータベースを使わない構成向け）
    pub async fn in_memory(
        config: AppConfig,
        notifier: Arc<dyn ConnectivityNotifier>,
        platform_online: bool,
    ) -> Result<Self, AppError> {
        config.validate().map_err(AppError::ConfigurationError)?;
        let store: Arc<dyn KeyValueStore> =
            Arc::new(MemoryKeyValueStore::new(config.storage.quota_bytes));
        Self::assemble(config, store, None, notifier, platform_online).await
    }

    async fn assemble(
        config: AppConfig,
        store: Arc<dyn KeyValueStore>,
        db_pool: Option<ConnectionPool>,
        notifier: Arc<dyn ConnectivityNotifier>,
        platform_online: bool,
    ) -> Result<Self, AppError> {
        let persistence = Arc::new(PersistenceService::new(store));
        persistence.initialize(platform_online).await?;

        let connectivity = Arc::new(ConnectivityMonitor::new(platform_online));
        let processor: Arc<dyn ActionProcessor> = Arc::new(LoggingActionProcessor);

        let queue_service = Arc::new(OfflineQueueService::new(persistence.clone(), processor));
        let status_service = Arc::new(SyncStatusService::new(
            persistence.clone(),
            connectivity.clone(),
        ));
        let sync_service = Arc::new(SyncService::new(
            queue_service.clone(),
            status_service.clone(),
            connectivity.clone(),
        ));
        let backup_service = Arc::new(BackupService::new(
            persistence.clone(),
            Arc::new(FileBackupTransport::new()),
        ));
        let observer = Arc::new(ConnectivityObserver::new(
            connectivity.clone(),
            sync_service.clone(),
            notifier,
            config.sync.auto_sync,
        ));

        let storage_handler = Arc::new(StorageHandler::new(persistence.clone()));
        let offline_handler = Arc::new(OfflineHandler::new(
            queue_service.clone(),
            sync_service.clone(),
            connectivity.clone(),
        ));
        let backup_handler = Arc::new(BackupHandler::new(backup_service.clone()));
        let system_handler = Arc::new(SystemHandler::new(config.clone(), connectivity.clone()));

        Ok(Self {
            config,
            db_pool,
            persistence,
            connectivity,
            queue_service,
            status_service,
            sync_service,
            backup_service,
            observer,
            storage_handler,
            offline_handler,
            backup_handler,
            system_handler,
            background: Arc::new(Mutex::new(BackgroundTasks::default())),
        })
    }

    /// 接続オブザーバーと（有効なら）到達性プローブを起動する。二重起動はしない。
    pub async fn start_background_tasks(&self) {
        let mut tasks = self.background.lock().await;

        if tasks.observer.is_none() {
            tasks.observer = Some(self.observer.start());
        }

        if self.config.sync.probe_enabled && tasks.probe.is_none() {
            let probe = ReachabilityProbe::from_config(self.connectivity.clone(), &self.config.sync);
            tasks.probe = Some(probe.spawn());
            tracing::info!(
                address = %self.config.sync.probe_address,
                interval_secs = self.config.sync.probe_interval_secs,
                "Reachability probe started"
            );
        }
    }

    pub async fn shutdown(&self) {
        let (observer, probe) = {
            let mut tasks = self.background.lock().await;
            (tasks.observer.take(), tasks.probe.take())
        };

        if let Some(probe) = probe {
            probe.stop().await;
        }
        if let Some(observer) = observer {
            observer.stop().await;
        }
        if let Some(pool) = &self.db_pool {
            pool.close().await;
        }
        tracing::info!("Application state shut down");
    }
}
