use crate::application::ports::ConnectivitySource;
use crate::application::services::offline_queue_service::OfflineQueueService;
use crate::application::services::sync_status_service::SyncStatusService;
use crate::domain::entities::{DrainReport, SyncStatusPatch, SyncStatusRecord};
use crate::infrastructure::offline::metrics;
use crate::shared::error::AppError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncTrigger {
    Manual,
    Reconnect,
}

impl SyncTrigger {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncTrigger::Manual => "manual",
            SyncTrigger::Reconnect => "reconnect",
        }
    }
}

/// キューのドレインと同期ステータスの更新をまとめて行う。
///
/// 手動同期とオンライン復帰時の自動同期は同じ [`SyncService::run_cycle`] を通る。
pub struct SyncService {
    queue: Arc<OfflineQueueService>,
    status: Arc<SyncStatusService>,
    connectivity: Arc<dyn ConnectivitySource>,
}

impl SyncService {
    pub fn new(
        queue: Arc<OfflineQueueService>,
        status: Arc<SyncStatusService>,
        connectivity: Arc<dyn ConnectivitySource>,
    ) -> Self {
        Self {
            queue,
            status,
            connectivity,
        }
    }

    /// ユーザー操作による同期。オフラインなら何も変更せずに [`AppError::NotOnline`] を返す。
    pub async fn synchronize(&self) -> Result<DrainReport, AppError> {
        if !self.connectivity.is_online() {
            tracing::info!(target: "offline::sync", "Synchronize requested while offline");
            return Err(AppError::NotOnline);
        }

        self.run_cycle(SyncTrigger::Manual).await
    }

    pub async fn run_cycle(&self, trigger: SyncTrigger) -> Result<DrainReport, AppError> {
        let attempt_at = Utc::now();
        if let Err(err) = self
            .status
            .set(SyncStatusPatch::attempt(true, attempt_at))
            .await
        {
            tracing::warn!(
                target: "offline::sync",
                error = %err,
                "Failed to record sync attempt; draining anyway"
            );
        }

        let result = self.queue.drain().await;
        metrics::record_drain(trigger, &result);

        match &result {
            Ok(report) => {
                if let Err(err) = self
                    .status
                    .set(SyncStatusPatch::succeeded(Utc::now()))
                    .await
                {
                    tracing::warn!(
                        target: "offline::sync",
                        error = %err,
                        "Failed to record successful sync"
                    );
                }
                tracing::info!(
                    target: "offline::sync",
                    trigger = trigger.as_str(),
                    processed = report.processed,
                    failed = report.failed,
                    remaining = report.remaining,
                    "Sync cycle completed"
                );
            }
            Err(err) => {
                tracing::error!(
                    target: "offline::sync",
                    trigger = trigger.as_str(),
                    error = %err,
                    "Sync cycle failed"
                );
            }
        }

        result
    }

    /// オフラインへの遷移を記録する。`lastSuccessfulSync` には触れない。
    pub async fn record_offline(&self, at: DateTime<Utc>) -> Result<SyncStatusRecord, AppError> {
        self.status.set(SyncStatusPatch::attempt(false, at)).await
    }

    /// ドレインせずにオンライン復帰だけを記録する。同期は試みていないので
    /// `lastSyncAttempt` は更新しない。
    pub async fn record_online(&self) -> Result<SyncStatusRecord, AppError> {
        self.status.set(SyncStatusPatch::connectivity(true)).await
    }

    pub async fn status(&self) -> SyncStatusRecord {
        self.status.get().await
    }

    pub fn is_online(&self) -> bool {
        self.connectivity.is_online()
    }
}
