use crate::application::ports::{BackupOutcome, BackupTransport};
use crate::shared::AppError;
use async_trait::async_trait;
use std::path::PathBuf;

/// UI のファイルダイアログで選ばれたパスに読み書きする。
#[derive(Debug, Default, Clone, Copy)]
pub struct FileBackupTransport;

impl FileBackupTransport {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl BackupTransport for FileBackupTransport {
    async fn save_blob(&self, target: Option<PathBuf>, blob: &[u8]) -> BackupOutcome<()> {
        let Some(path) = target else {
            return BackupOutcome::Cancelled;
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if let Err(err) = tokio::fs::create_dir_all(parent).await {
                return BackupOutcome::failed(&AppError::from(err));
            }
        }

        match tokio::fs::write(&path, blob).await {
            Ok(()) => BackupOutcome::Saved {
                location: path.display().to_string(),
                value: (),
            },
            Err(err) => {
                tracing::warn!(
                    target: "offline::backup",
                    path = %path.display(),
                    error = %err,
                    "Failed to write backup file"
                );
                BackupOutcome::failed(&AppError::from(err))
            }
        }
    }

    async fn load_blob(&self, source: Option<PathBuf>) -> BackupOutcome<Vec<u8>> {
        let Some(path) = source else {
            return BackupOutcome::Cancelled;
        };

        match tokio::fs::read(&path).await {
            Ok(blob) => BackupOutcome::Saved {
                location: path.display().to_string(),
                value: blob,
            },
            Err(err) => {
                tracing::warn!(
                    target: "offline::backup",
                    path = %path.display(),
                    error = %err,
                    "Failed to read backup file"
                );
                BackupOutcome::failed(&AppError::from(err))
            }
        }
    }
}
