use crate::domain::entities::{StorageSnapshot, StorageUsage};
use crate::presentation::dto::ApiResponse;
use crate::presentation::dto::storage::{
    ImportStorageRequest, ImportStorageResponse, LoadValueRequest, RemoveValueRequest,
    SaveValueRequest,
};
use crate::shared::AppError;
use crate::state::AppState;
use serde_json::Value;
use tauri::State;

/// キーに JSON 値を保存
#[tauri::command]
pub async fn storage_save(
    state: State<'_, AppState>,
    request: SaveValueRequest,
) -> Result<ApiResponse<()>, AppError> {
    let result = state.storage_handler.save(request).await;
    Ok(ApiResponse::from_result(result))
}

/// キーの値を取得（未保存・破損時は既定値）
#[tauri::command]
pub async fn storage_load(
    state: State<'_, AppState>,
    request: LoadValueRequest,
) -> Result<ApiResponse<Value>, AppError> {
    let result = state.storage_handler.load(request).await;
    Ok(ApiResponse::from_result(result))
}

#[tauri::command]
pub async fn storage_remove(
    state: State<'_, AppState>,
    request: RemoveValueRequest,
) -> Result<ApiResponse<()>, AppError> {
    let result = state.storage_handler.remove(request).await;
    Ok(ApiResponse::from_result(result))
}

#[tauri::command]
pub async fn storage_clear(state: State<'_, AppState>) -> Result<ApiResponse<()>, AppError> {
    let result = state.storage_handler.clear().await;
    Ok(ApiResponse::from_result(result))
}

/// ストア全体をスナップショットとして取得
#[tauri::command]
pub async fn storage_export(
    state: State<'_, AppState>,
) -> Result<ApiResponse<StorageSnapshot>, AppError> {
    let result = state.storage_handler.export().await;
    Ok(ApiResponse::from_result(result))
}

/// JSON スナップショットでストア全体を置き換え
#[tauri::command]
pub async fn storage_import(
    state: State<'_, AppState>,
    request: ImportStorageRequest,
) -> Result<ApiResponse<ImportStorageResponse>, AppError> {
    let result = state.storage_handler.import(request).await;
    Ok(ApiResponse::from_result(result))
}

#[tauri::command]
pub async fn storage_usage(
    state: State<'_, AppState>,
) -> Result<ApiResponse<StorageUsage>, AppError> {
    let result = state.storage_handler.usage().await;
    Ok(ApiResponse::from_result(result))
}
