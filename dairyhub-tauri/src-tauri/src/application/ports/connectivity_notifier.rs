use crate::domain::value_objects::ConnectivityState;
use crate::shared::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConnectivityNotice {
    pub state: ConnectivityState,
    pub message: String,
    pub changed_at: DateTime<Utc>,
}

impl ConnectivityNotice {
    pub fn for_state(state: ConnectivityState, changed_at: DateTime<Utc>) -> Self {
        let message = match state {
            ConnectivityState::Online => "Back online. Syncing pending changes.",
            ConnectivityState::Offline => "You are offline. Changes will be queued.",
        };
        Self {
            state,
            message: message.to_string(),
            changed_at,
        }
    }
}

/// 接続状態の変化をユーザーに知らせる。通知の失敗は同期処理に影響しない。
#[async_trait]
pub trait ConnectivityNotifier: Send + Sync {
    async fn notify(&self, notice: &ConnectivityNotice) -> Result<(), AppError>;
}
