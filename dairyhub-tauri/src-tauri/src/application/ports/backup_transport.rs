use crate::shared::AppError;
use async_trait::async_trait;
use serde::Serialize;
use std::path::PathBuf;

/// デスクトップシェル経由のファイル保存/読み込みの結果。
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BackupOutcome<T> {
    Saved { location: String, value: T },
    Cancelled,
    Failed { message: String },
}

impl<T> BackupOutcome<T> {
    pub fn is_saved(&self) -> bool {
        matches!(self, BackupOutcome::Saved { .. })
    }

    pub fn failed(err: &AppError) -> Self {
        BackupOutcome::Failed {
            message: err.user_message(),
        }
    }
}

/// バックアップ blob の保存先。`None` はユーザーがダイアログをキャンセルしたことを表す。
#[async_trait]
pub trait BackupTransport: Send + Sync {
    async fn save_blob(&self, target: Option<PathBuf>, blob: &[u8]) -> BackupOutcome<()>;
    async fn load_blob(&self, source: Option<PathBuf>) -> BackupOutcome<Vec<u8>>;
}
