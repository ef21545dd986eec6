use crate::application::services::{OfflineQueueService, SyncService};
use crate::domain::entities::{QueuedAction, QueuedActionDraft, SyncStatusRecord};
use crate::domain::value_objects::{
    ConnectivityState, EntityType, OfflineActionType, OfflinePayload,
};
use crate::infrastructure::connectivity::ConnectivityMonitor;
use crate::infrastructure::offline::metrics::{self, SyncMetricsSnapshot};
use crate::presentation::dto::Validate;
use crate::presentation::dto::offline::{
    DrainQueueResponse, EnqueueActionRequest, ReportConnectivityRequest,
    ReportConnectivityResponse, SynchronizeResponse,
};
use crate::shared::AppError;
use std::sync::Arc;

pub struct OfflineHandler {
    queue: Arc<OfflineQueueService>,
    sync: Arc<SyncService>,
    monitor: Arc<ConnectivityMonitor>,
}

impl OfflineHandler {
    pub fn new(
        queue: Arc<OfflineQueueService>,
        sync: Arc<SyncService>,
        monitor: Arc<ConnectivityMonitor>,
    ) -> Self {
        Self {
            queue,
            sync,
            monitor,
        }
    }

    pub async fn enqueue(&self, request: EnqueueActionRequest) -> Result<QueuedAction, AppError> {
        request.validate().map_err(AppError::ValidationError)?;

        let draft = QueuedActionDraft::new(
            OfflineActionType::new(request.action_type).map_err(AppError::InvalidInput)?,
            EntityType::new(request.entity).map_err(AppError::InvalidInput)?,
            OfflinePayload::new(request.data),
        );
        self.queue.enqueue(draft).await
    }

    pub async fn list(&self) -> Result<Vec<QueuedAction>, AppError> {
        Ok(self.queue.peek_all().await)
    }

    pub async fn drain(&self) -> Result<DrainQueueResponse, AppError> {
        let report = self.queue.drain().await?;
        Ok(DrainQueueResponse { report })
    }

    pub async fn clear(&self) -> Result<(), AppError> {
        self.queue.clear().await
    }

    pub async fn sync_status(&self) -> Result<SyncStatusRecord, AppError> {
        Ok(self.sync.status().await)
    }

    pub async fn synchronize(&self) -> Result<SynchronizeResponse, AppError> {
        let report = self.sync.synchronize().await?;
        let status = self.sync.status().await;
        Ok(SynchronizeResponse {
            success: report.is_clean(),
            report,
            status,
        })
    }

    /// UI の `online`/`offline` イベントを受け取る。遷移の処理はオブザーバー側で非同期に行う。
    pub fn report_connectivity(
        &self,
        request: ReportConnectivityRequest,
    ) -> Result<ReportConnectivityResponse, AppError> {
        request.validate().map_err(AppError::ValidationError)?;
        let state = ConnectivityState::from_online(request.online);
        let changed = self.monitor.report(state);
        Ok(ReportConnectivityResponse { state, changed })
    }

    pub fn sync_metrics(&self) -> Result<SyncMetricsSnapshot, AppError> {
        Ok(metrics::snapshot())
    }
}
