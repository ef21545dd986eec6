use crate::application::ports::{ConnectivityNotice, ConnectivityNotifier};
use crate::shared::AppError;
use async_trait::async_trait;
use tauri::{AppHandle, Emitter};

pub const CONNECTIVITY_EVENT: &str = "connectivity://changed";

#[derive(Clone)]
pub struct IpcConnectivityNotifier {
    app_handle: AppHandle,
}

impl IpcConnectivityNotifier {
    pub fn new(app_handle: &AppHandle) -> Self {
        Self {
            app_handle: app_handle.clone(),
        }
    }
}

#[async_trait]
impl ConnectivityNotifier for IpcConnectivityNotifier {
    async fn notify(&self, notice: &ConnectivityNotice) -> Result<(), AppError> {
        self.app_handle
            .emit(CONNECTIVITY_EVENT, notice.clone())
            .map_err(|err| {
                AppError::Internal(format!("Failed to emit connectivity event: {err}"))
            })
    }
}
