use crate::domain::entities::{DrainReport, SyncStatusRecord};
use crate::domain::value_objects::ConnectivityState;
use crate::presentation::dto::Validate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnqueueActionRequest {
    #[serde(rename = "type")]
    pub action_type: String,
    pub entity: String,
    #[serde(default)]
    pub data: Value,
}

impl Validate for EnqueueActionRequest {
    fn validate(&self) -> Result<(), String> {
        if self.action_type.trim().is_empty() {
            return Err("Action type is required".to_string());
        }
        if self.entity.trim().is_empty() {
            return Err("Entity is required".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrainQueueResponse {
    pub report: DrainReport,
}

/// 手動同期の結果。`success` は失敗したアクションがなかったかどうか。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SynchronizeResponse {
    pub success: bool,
    pub report: DrainReport,
    pub status: SyncStatusRecord,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportConnectivityRequest {
    pub online: bool,
}

impl Validate for ReportConnectivityRequest {
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportConnectivityResponse {
    pub state: ConnectivityState,
    pub changed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn enqueue_request_uses_type_field() {
        let request: EnqueueActionRequest = serde_json::from_value(json!({
            "type": "CREATE",
            "entity": "customer",
            "data": { "name": "A" }
        }))
        .unwrap();
        assert_eq!(request.action_type, "CREATE");
        assert!(request.validate().is_ok());

        let blank = EnqueueActionRequest {
            action_type: " ".into(),
            entity: "customer".into(),
            data: Value::Null,
        };
        assert!(blank.validate().is_err());
    }
}
