use crate::presentation::dto::ApiResponse;
use crate::presentation::dto::system::{AppInfoResponse, OpenExternalUrlRequest};
use crate::shared::AppError;
use crate::state::AppState;
use tauri::{AppHandle, State};
use tauri_plugin_opener::OpenerExt;

/// アプリとシステムの情報を取得
#[tauri::command]
pub fn get_app_info(state: State<'_, AppState>) -> Result<ApiResponse<AppInfoResponse>, AppError> {
    Ok(ApiResponse::success(state.system_handler.app_info()))
}

/// 外部ブラウザ/メーラーで URL を開く
#[tauri::command]
pub fn open_external_url(
    app: AppHandle,
    state: State<'_, AppState>,
    request: OpenExternalUrlRequest,
) -> Result<ApiResponse<()>, AppError> {
    let result = state
        .system_handler
        .checked_external_url(request)
        .and_then(|url| {
            app.opener()
                .open_url(url, None::<&str>)
                .map_err(|err| AppError::Internal(format!("Failed to open URL: {err}")))
        });
    Ok(ApiResponse::from_result(result))
}
