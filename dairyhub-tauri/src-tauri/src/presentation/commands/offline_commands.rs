use crate::domain::entities::{QueuedAction, SyncStatusRecord};
use crate::infrastructure::offline::metrics::SyncMetricsSnapshot;
use crate::presentation::dto::ApiResponse;
use crate::presentation::dto::offline::{
    DrainQueueResponse, EnqueueActionRequest, ReportConnectivityRequest,
    ReportConnectivityResponse, SynchronizeResponse,
};
use crate::shared::AppError;
use crate::state::AppState;
use tauri::State;

/// オフラインアクションをキューに追加
#[tauri::command]
pub async fn enqueue_offline_action(
    state: State<'_, AppState>,
    request: EnqueueActionRequest,
) -> Result<ApiResponse<QueuedAction>, AppError> {
    let result = state.offline_handler.enqueue(request).await;
    Ok(ApiResponse::from_result(result))
}

/// キューの内容を取得
#[tauri::command]
pub async fn list_offline_actions(
    state: State<'_, AppState>,
) -> Result<ApiResponse<Vec<QueuedAction>>, AppError> {
    let result = state.offline_handler.list().await;
    Ok(ApiResponse::from_result(result))
}

/// キューを即座にドレイン
#[tauri::command]
pub async fn drain_offline_actions(
    state: State<'_, AppState>,
) -> Result<ApiResponse<DrainQueueResponse>, AppError> {
    let result = state.offline_handler.drain().await;
    Ok(ApiResponse::from_result(result))
}

#[tauri::command]
pub async fn clear_offline_actions(
    state: State<'_, AppState>,
) -> Result<ApiResponse<()>, AppError> {
    let result = state.offline_handler.clear().await;
    Ok(ApiResponse::from_result(result))
}

/// 同期ステータスを取得
#[tauri::command]
pub async fn get_sync_status(
    state: State<'_, AppState>,
) -> Result<ApiResponse<SyncStatusRecord>, AppError> {
    let result = state.offline_handler.sync_status().await;
    Ok(ApiResponse::from_result(result))
}

/// 手動同期
#[tauri::command]
pub async fn synchronize(
    state: State<'_, AppState>,
) -> Result<ApiResponse<SynchronizeResponse>, AppError> {
    let result = state.offline_handler.synchronize().await;
    Ok(ApiResponse::from_result(result))
}

/// ブラウザの online/offline イベントを反映
#[tauri::command]
pub async fn report_connectivity(
    state: State<'_, AppState>,
    request: ReportConnectivityRequest,
) -> Result<ApiResponse<ReportConnectivityResponse>, AppError> {
    let result = state.offline_handler.report_connectivity(request);
    Ok(ApiResponse::from_result(result))
}

#[tauri::command]
pub async fn get_sync_metrics(
    state: State<'_, AppState>,
) -> Result<ApiResponse<SyncMetricsSnapshot>, AppError> {
    let result = state.offline_handler.sync_metrics();
    Ok(ApiResponse::from_result(result))
}
