use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SyncStatusRecord {
    pub is_online: bool,
    pub last_sync_attempt: Option<DateTime<Utc>>,
    pub last_successful_sync: Option<DateTime<Utc>>,
}

impl SyncStatusRecord {
    pub fn initial(is_online: bool) -> Self {
        Self {
            is_online,
            last_sync_attempt: None,
            last_successful_sync: None,
        }
    }

    /// パッチを適用する。`None` のフィールドは既存値を保持する。
    pub fn apply(&mut self, patch: &SyncStatusPatch) {
        if let Some(is_online) = patch.is_online {
            self.is_online = is_online;
        }
        if let Some(attempt) = patch.last_sync_attempt {
            self.last_sync_attempt = Some(attempt);
        }
        if let Some(success) = patch.last_successful_sync {
            self.last_successful_sync = Some(success);
        }
    }
}

/// 同期ステータスの部分更新。
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SyncStatusPatch {
    pub is_online: Option<bool>,
    pub last_sync_attempt: Option<DateTime<Utc>>,
    pub last_successful_sync: Option<DateTime<Utc>>,
}

impl SyncStatusPatch {
    pub fn attempt(is_online: bool, at: DateTime<Utc>) -> Self {
        Self {
            is_online: Some(is_online),
            last_sync_attempt: Some(at),
            last_successful_sync: None,
        }
    }

    /// 接続状態だけを更新する。同期を試みていないので時刻には触れない。
    pub fn connectivity(is_online: bool) -> Self {
        Self {
            is_online: Some(is_online),
            ..Self::default()
        }
    }

    pub fn succeeded(at: DateTime<Utc>) -> Self {
        Self {
            last_successful_sync: Some(at),
            ..Self::default()
        }
    }
}
