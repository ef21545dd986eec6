use crate::application::ports::{BackupOutcome, BackupTransport};
use crate::application::services::persistence_service::PersistenceService;
use crate::shared::AppError;
use std::path::PathBuf;
use std::sync::Arc;

/// ストア全体を JSON ファイルへ書き出し、またはファイルから復元する。
///
/// 成功時の値は書き出し/読み込んだエントリ数。
pub struct BackupService {
    persistence: Arc<PersistenceService>,
    transport: Arc<dyn BackupTransport>,
}

impl BackupService {
    pub fn new(persistence: Arc<PersistenceService>, transport: Arc<dyn BackupTransport>) -> Self {
        Self {
            persistence,
            transport,
        }
    }

    pub async fn export_backup(&self, target: Option<PathBuf>) -> BackupOutcome<usize> {
        let snapshot = match self.persistence.export_all().await {
            Ok(snapshot) => snapshot,
            Err(err) => {
                tracing::error!(target: "offline::backup", error = %err, "Failed to export storage");
                return BackupOutcome::failed(&err);
            }
        };

        let blob = match serde_json::to_vec_pretty(&snapshot) {
            Ok(blob) => blob,
            Err(err) => return BackupOutcome::failed(&AppError::from(err)),
        };

        let entries = snapshot.len();
        match self.transport.save_blob(target, &blob).await {
            BackupOutcome::Saved { location, .. } => {
                tracing::info!(
                    target: "offline::backup",
                    location = %location,
                    entries,
                    "Exported backup"
                );
                BackupOutcome::Saved {
                    location,
                    value: entries,
                }
            }
            BackupOutcome::Cancelled => BackupOutcome::Cancelled,
            BackupOutcome::Failed { message } => {
                tracing::warn!(target: "offline::backup", reason = %message, "Backup export failed");
                BackupOutcome::Failed { message }
            }
        }
    }

    /// 読み込んだ JSON が不正な場合は既存データに触れずに `Failed` を返す。
    pub async fn import_backup(&self, source: Option<PathBuf>) -> BackupOutcome<usize> {
        let (location, blob) = match self.transport.load_blob(source).await {
            BackupOutcome::Saved { location, value } => (location, value),
            BackupOutcome::Cancelled => return BackupOutcome::Cancelled,
            BackupOutcome::Failed { message } => return BackupOutcome::Failed { message },
        };

        let text = match String::from_utf8(blob) {
            Ok(text) => text,
            Err(err) => {
                return BackupOutcome::failed(&AppError::ImportFormatInvalid(err.to_string()));
            }
        };

        match self.persistence.import_json(&text).await {
            Ok(entries) => {
                tracing::info!(
                    target: "offline::backup",
                    location = %location,
                    entries,
                    "Imported backup"
                );
                BackupOutcome::Saved {
                    location,
                    value: entries,
                }
            }
            Err(err) => {
                tracing::warn!(
                    target: "offline::backup",
                    location = %location,
                    error = %err,
                    "Backup import rejected"
                );
                BackupOutcome::failed(&err)
            }
        }
    }
}
