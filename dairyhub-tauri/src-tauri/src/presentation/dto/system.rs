use crate::presentation::dto::Validate;
use serde::{Deserialize, Serialize};

const ALLOWED_SCHEMES: [&str; 3] = ["https://", "http://", "mailto:"];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppInfoResponse {
    pub name: String,
    pub version: String,
    pub os: String,
    pub arch: String,
    pub data_dir: String,
    pub storage_quota_bytes: u64,
    pub auto_sync: bool,
    pub is_online: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenExternalUrlRequest {
    pub url: String,
}

impl Validate for OpenExternalUrlRequest {
    fn validate(&self) -> Result<(), String> {
        let url = self.url.trim();
        if url.is_empty() {
            return Err("URL is required".to_string());
        }
        if !ALLOWED_SCHEMES
            .iter()
            .any(|scheme| url.to_ascii_lowercase().starts_with(scheme))
        {
            return Err("Only http, https and mailto links can be opened".to_string());
        }
        Ok(())
    }
}
