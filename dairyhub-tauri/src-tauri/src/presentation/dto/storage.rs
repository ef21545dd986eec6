use crate::presentation::dto::Validate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

const MAX_KEY_LEN: usize = 256;

fn validate_key(key: &str) -> Result<(), String> {
    if key.is_empty() {
        return Err("Key is required".to_string());
    }
    if key.len() > MAX_KEY_LEN {
        return Err(format!("Key is too long (max {MAX_KEY_LEN} bytes)"));
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveValueRequest {
    pub key: String,
    pub value: Value,
}

impl Validate for SaveValueRequest {
    fn validate(&self) -> Result<(), String> {
        validate_key(&self.key)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadValueRequest {
    pub key: String,
    #[serde(default)]
    pub default_value: Option<Value>,
}

impl Validate for LoadValueRequest {
    fn validate(&self) -> Result<(), String> {
        validate_key(&self.key)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveValueRequest {
    pub key: String,
}

impl Validate for RemoveValueRequest {
    fn validate(&self) -> Result<(), String> {
        validate_key(&self.key)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportStorageRequest {
    pub json: String,
}

impl Validate for ImportStorageRequest {
    fn validate(&self) -> Result<(), String> {
        if self.json.trim().is_empty() {
            return Err("Backup JSON is required".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportStorageResponse {
    pub imported_entries: usize,
}
