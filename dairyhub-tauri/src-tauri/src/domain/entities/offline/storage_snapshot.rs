use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// バックアップファイルに書き出すストア全体のスナップショット。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StorageSnapshot {
    pub version: String,
    pub exported_at: DateTime<Utc>,
    pub entries: BTreeMap<String, Value>,
}

impl StorageSnapshot {
    pub fn new(version: impl Into<String>, entries: BTreeMap<String, Value>) -> Self {
        Self {
            version: version.into(),
            exported_at: Utc::now(),
            entries,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StorageUsage {
    pub bytes: u64,
    pub kilobytes: f64,
}

impl StorageUsage {
    pub fn from_bytes(bytes: u64) -> Self {
        let kilobytes = ((bytes as f64 / 1024.0) * 100.0).round() / 100.0;
        Self { bytes, kilobytes }
    }
}
