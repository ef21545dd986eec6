use crate::domain::value_objects::{
    EntityType, OfflineActionType, OfflinePayload, QueuedActionId,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// オフライン中に発行されたミューテーションの記録。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueuedAction {
    pub id: QueuedActionId,
    #[serde(rename = "type")]
    pub action_type: OfflineActionType,
    pub entity: EntityType,
    pub data: OfflinePayload,
    pub timestamp: DateTime<Utc>,
}

impl QueuedAction {
    pub fn from_draft(draft: QueuedActionDraft, now: DateTime<Utc>) -> Self {
        Self {
            id: QueuedActionId::generate(now),
            action_type: draft.action_type,
            entity: draft.entity,
            data: draft.data,
            timestamp: now,
        }
    }
}

/// `enqueue` に渡す、ID とタイムスタンプが未確定のアクション。
#[derive(Debug, Clone, PartialEq)]
pub struct QueuedActionDraft {
    pub action_type: OfflineActionType,
    pub entity: EntityType,
    pub data: OfflinePayload,
}

impl QueuedActionDraft {
    pub fn new(action_type: OfflineActionType, entity: EntityType, data: OfflinePayload) -> Self {
        Self {
            action_type,
            entity,
            data,
        }
    }
}
