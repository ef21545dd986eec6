use serde::{Deserialize, Serialize};

/// キューのドレイン 1 回分の結果。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct DrainReport {
    pub processed: u32,
    pub failed: u32,
    pub remaining: u32,
}

impl DrainReport {
    pub fn new(processed: u32, failed: u32, remaining: u32) -> Self {
        Self {
            processed,
            failed,
            remaining,
        }
    }

    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }
}
