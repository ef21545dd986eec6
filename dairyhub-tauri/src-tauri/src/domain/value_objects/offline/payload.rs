use serde::{Deserialize, Serialize};
use serde_json::Value;

/// キューに積まれたミューテーションの中身。解釈はアクションを処理する側に任せる。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(transparent)]
pub struct OfflinePayload(Value);

impl OfflinePayload {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn from_json_str(json: &str) -> Result<Self, String> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| format!("Invalid JSON payload: {e}"))?;
        Ok(Self::new(value))
    }

    pub fn as_json(&self) -> &Value {
        &self.0
    }

    pub fn into_inner(self) -> Value {
        self.0
    }
}

impl From<Value> for OfflinePayload {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl From<OfflinePayload> for Value {
    fn from(payload: OfflinePayload) -> Self {
        payload.0
    }
}
