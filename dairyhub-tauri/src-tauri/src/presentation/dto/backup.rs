use crate::presentation::dto::Validate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `path` が `None` のときはダイアログがキャンセルされたものとして扱う
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupFileRequest {
    #[serde(default)]
    pub path: Option<String>,
}

impl BackupFileRequest {
    pub fn into_path(self) -> Option<PathBuf> {
        self.path.map(PathBuf::from)
    }
}

impl Validate for BackupFileRequest {
    fn validate(&self) -> Result<(), String> {
        if let Some(path) = &self.path {
            if path.trim().is_empty() {
                return Err("Backup path cannot be blank".to_string());
            }
        }
        Ok(())
    }
}
