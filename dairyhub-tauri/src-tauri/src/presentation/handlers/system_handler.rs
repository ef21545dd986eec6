use crate::application::ports::ConnectivitySource;
use crate::presentation::dto::Validate;
use crate::presentation::dto::system::{AppInfoResponse, OpenExternalUrlRequest};
use crate::shared::{AppConfig, AppError};
use std::sync::Arc;

pub struct SystemHandler {
    config: AppConfig,
    connectivity: Arc<dyn ConnectivitySource>,
}

impl SystemHandler {
    pub fn new(config: AppConfig, connectivity: Arc<dyn ConnectivitySource>) -> Self {
        Self {
            config,
            connectivity,
        }
    }

    pub fn app_info(&self) -> AppInfoResponse {
        AppInfoResponse {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            os: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
            data_dir: self.config.storage.data_dir.clone(),
            storage_quota_bytes: self.config.storage.quota_bytes,
            auto_sync: self.config.sync.auto_sync,
            is_online: self.connectivity.is_online(),
        }
    }

    /// 外部ブラウザで開く前に URL を検証し、正規化した値を返す
    pub fn checked_external_url(&self, request: OpenExternalUrlRequest) -> Result<String, AppError> {
        request.validate().map_err(AppError::ValidationError)?;
        Ok(request.url.trim().to_string())
    }
}
