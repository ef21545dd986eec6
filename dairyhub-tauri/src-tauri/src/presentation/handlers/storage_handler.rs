use crate::application::services::PersistenceService;
use crate::domain::constants::{OFFLINE_QUEUE_KEY, SYNC_STATUS_KEY};
use crate::domain::entities::{StorageSnapshot, StorageUsage};
use crate::domain::value_objects::StorageKey;
use crate::presentation::dto::Validate;
use crate::presentation::dto::storage::{
    ImportStorageRequest, ImportStorageResponse, LoadValueRequest, RemoveValueRequest,
    SaveValueRequest,
};
use crate::shared::AppError;
use serde_json::Value;
use std::sync::Arc;

/// キューと同期ステータスのキーは専用サービス経由でのみ書き換える
const RESERVED_KEYS: [&str; 2] = [OFFLINE_QUEUE_KEY, SYNC_STATUS_KEY];

pub struct StorageHandler {
    persistence: Arc<PersistenceService>,
}

impl StorageHandler {
    pub fn new(persistence: Arc<PersistenceService>) -> Self {
        Self { persistence }
    }

    pub async fn save(&self, request: SaveValueRequest) -> Result<(), AppError> {
        request.validate().map_err(AppError::ValidationError)?;
        let key = writable_key(request.key)?;
        self.persistence.save(&key, &request.value).await
    }

    pub async fn load(&self, request: LoadValueRequest) -> Result<Value, AppError> {
        request.validate().map_err(AppError::ValidationError)?;
        let key = parse_key(request.key)?;
        let default = request.default_value.unwrap_or(Value::Null);
        Ok(self.persistence.load(&key, default).await)
    }

    pub async fn remove(&self, request: RemoveValueRequest) -> Result<(), AppError> {
        request.validate().map_err(AppError::ValidationError)?;
        let key = writable_key(request.key)?;
        self.persistence.remove(&key).await
    }

    pub async fn clear(&self) -> Result<(), AppError> {
        self.persistence.clear().await
    }

    pub async fn export(&self) -> Result<StorageSnapshot, AppError> {
        self.persistence.export_all().await
    }

    pub async fn import(
        &self,
        request: ImportStorageRequest,
    ) -> Result<ImportStorageResponse, AppError> {
        request.validate().map_err(AppError::ValidationError)?;
        let imported_entries = self.persistence.import_json(&request.json).await?;
        Ok(ImportStorageResponse { imported_entries })
    }

    pub async fn usage(&self) -> Result<StorageUsage, AppError> {
        self.persistence.usage_estimate().await
    }
}

fn parse_key(raw: String) -> Result<StorageKey, AppError> {
    StorageKey::new(raw).map_err(AppError::InvalidInput)
}

fn writable_key(raw: String) -> Result<StorageKey, AppError> {
    if RESERVED_KEYS.contains(&raw.as_str()) {
        return Err(AppError::InvalidInput(format!(
            "Key '{raw}' is managed by the offline queue and cannot be written directly"
        )));
    }
    parse_key(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::MemoryKeyValueStore;
    use serde_json::json;

    fn handler(quota: u64) -> StorageHandler {
        let store = Arc::new(MemoryKeyValueStore::new(quota));
        StorageHandler::new(Arc::new(PersistenceService::new(store)))
    }

    #[tokio::test]
    async fn save_load_remove_through_handler() {
        let handler = handler(1024 * 1024);
        handler
            .save(SaveValueRequest {
                key: "products".into(),
                value: json!([{ "sku": "MILK-1L", "price": 1.25 }]),
            })
            .await
            .unwrap();

        let loaded = handler
            .load(LoadValueRequest {
                key: "products".into(),
                default_value: None,
            })
            .await
            .unwrap();
        assert_eq!(loaded, json!([{ "sku": "MILK-1L", "price": 1.25 }]));

        handler
            .remove(RemoveValueRequest {
                key: "products".into(),
            })
            .await
            .unwrap();
        let loaded = handler
            .load(LoadValueRequest {
                key: "products".into(),
                default_value: Some(json!([])),
            })
            .await
            .unwrap();
        assert_eq!(loaded, json!([]));
    }

    #[tokio::test]
    async fn reserved_keys_are_rejected() {
        let handler = handler(1024 * 1024);
        let err = handler
            .save(SaveValueRequest {
                key: OFFLINE_QUEUE_KEY.into(),
                value: json!([]),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));

        let err = handler
            .remove(RemoveValueRequest {
                key: SYNC_STATUS_KEY.into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn quota_exceeded_surfaces_as_storage_full() {
        let handler = handler(64);
        let err = handler
            .save(SaveValueRequest {
                key: "notes".into(),
                value: json!("x".repeat(128)),
            })
            .await
            .unwrap_err();
        assert!(err.is_storage_full());
        assert_eq!(err.code(), "STORAGE_FULL");
    }

    #[tokio::test]
    async fn import_reports_entry_count() {
        let handler = handler(1024 * 1024);
        let response = handler
            .import(ImportStorageRequest {
                json: r#"{"version":"1.0","exportedAt":"2026-01-01T00:00:00Z","entries":{"a":1,"b":"two"}}"#
                    .into(),
            })
            .await
            .unwrap();
        assert_eq!(response.imported_entries, 2);
        assert_eq!(handler.usage().await.unwrap().bytes, 1 + 1 + 1 + 5);
    }
}
