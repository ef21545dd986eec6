use crate::application::ports::BackupOutcome;
use crate::application::services::BackupService;
use crate::presentation::dto::Validate;
use crate::presentation::dto::backup::BackupFileRequest;
use crate::shared::AppError;
use std::sync::Arc;

pub struct BackupHandler {
    backup: Arc<BackupService>,
}

impl BackupHandler {
    pub fn new(backup: Arc<BackupService>) -> Self {
        Self { backup }
    }

    pub async fn export_backup(
        &self,
        request: BackupFileRequest,
    ) -> Result<BackupOutcome<usize>, AppError> {
        request.validate().map_err(AppError::ValidationError)?;
        Ok(self.backup.export_backup(request.into_path()).await)
    }

    pub async fn import_backup(
        &self,
        request: BackupFileRequest,
    ) -> Result<BackupOutcome<usize>, AppError> {
        request.validate().map_err(AppError::ValidationError)?;
        Ok(self.backup.import_backup(request.into_path()).await)
    }
}
