use serde::{Serialize, Serializer};
use std::fmt;

use crate::application::ports::StorageError;

#[derive(Debug)]
pub enum AppError {
    /// ストレージ容量超過で書き込みが拒否された。
    StorageFull(String),
    /// オフライン中に同期が要求された。
    NotOnline,
    /// インポートされたバックアップが解析できない。
    ImportFormatInvalid(String),
    Storage(String),
    Database(String),
    Io(String),
    InvalidInput(String),
    ValidationError(String),
    ConfigurationError(String),
    SerializationError(String),
    Internal(String),
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            AppError::StorageFull(_) => "STORAGE_FULL",
            AppError::NotOnline => "NOT_ONLINE",
            AppError::ImportFormatInvalid(_) => "IMPORT_FORMAT_INVALID",
            AppError::Storage(_) => "STORAGE_ERROR",
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Io(_) => "IO_ERROR",
            AppError::InvalidInput(_) => "INVALID_INPUT",
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::ConfigurationError(_) => "CONFIGURATION_ERROR",
            AppError::SerializationError(_) => "SERIALIZATION_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// UI にそのまま表示できるメッセージ。
    pub fn user_message(&self) -> String {
        match self {
            AppError::StorageFull(_) => {
                "Local storage is full. Export a backup and remove old data.".to_string()
            }
            AppError::NotOnline => "You are offline. Connect to the network to sync.".to_string(),
            AppError::ImportFormatInvalid(_) => {
                "The selected file is not a valid backup. Nothing was changed.".to_string()
            }
            AppError::InvalidInput(msg) | AppError::ValidationError(msg) => msg.clone(),
            other => other.to_string(),
        }
    }

    pub fn is_storage_full(&self) -> bool {
        matches!(self, AppError::StorageFull(_))
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::StorageFull(msg) => write!(f, "Storage full: {}", msg),
            AppError::NotOnline => write!(f, "Not online"),
            AppError::ImportFormatInvalid(msg) => write!(f, "Invalid import format: {}", msg),
            AppError::Storage(msg) => write!(f, "Storage error: {}", msg),
            AppError::Database(msg) => write!(f, "Database error: {}", msg),
            AppError::Io(msg) => write!(f, "IO error: {}", msg),
            AppError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            AppError::ConfigurationError(msg) => write!(f, "Configuration error: {}", msg),
            AppError::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

// Tauri コマンドの戻り値として返すため
impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::QuotaExceeded { .. } => AppError::StorageFull(err.to_string()),
            StorageError::Backend(msg) => AppError::Storage(msg),
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Database(err.to_string())
    }
}

impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        AppError::Database(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::SerializationError(err.to_string())
    }
}

impl From<String> for AppError {
    fn from(err: String) -> Self {
        AppError::Internal(err)
    }
}

impl From<&str> for AppError {
    fn from(err: &str) -> Self {
        AppError::Internal(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
