use crate::application::ports::BackupOutcome;
use crate::presentation::dto::ApiResponse;
use crate::presentation::dto::backup::BackupFileRequest;
use crate::shared::AppError;
use crate::state::AppState;
use tauri::State;

/// バックアップファイルを書き出し
#[tauri::command]
pub async fn export_backup(
    state: State<'_, AppState>,
    request: BackupFileRequest,
) -> Result<ApiResponse<BackupOutcome<usize>>, AppError> {
    let result = state.backup_handler.export_backup(request).await;
    Ok(ApiResponse::from_result(result))
}

/// バックアップファイルから復元
#[tauri::command]
pub async fn import_backup(
    state: State<'_, AppState>,
    request: BackupFileRequest,
) -> Result<ApiResponse<BackupOutcome<usize>>, AppError> {
    let result = state.backup_handler.import_backup(request).await;
    Ok(ApiResponse::from_result(result))
}
