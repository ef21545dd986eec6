// DTOモジュール
pub mod backup;
pub mod offline;
pub mod storage;
pub mod system;

// 共通のレスポンス型
use crate::shared::AppError;
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
    pub error_code: Option<String>,
    pub error_details: Option<serde_json::Value>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            error_code: None,
            error_details: None,
        }
    }

    pub fn from_app_error(error: AppError) -> Self {
        let error_details = match &error {
            AppError::StorageFull(detail) | AppError::ImportFormatInvalid(detail) => {
                Some(json!({ "reason": detail }))
            }
            _ => None,
        };

        Self {
            success: false,
            data: None,
            error: Some(error.user_message()),
            error_code: Some(error.code().to_string()),
            error_details,
        }
    }

    pub fn from_result(result: crate::shared::Result<T>) -> Self {
        match result {
            Ok(data) => Self::success(data),
            Err(err) => Self::from_app_error(err),
        }
    }
}

// バリデーショントレイト
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}
