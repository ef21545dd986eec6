mod common;

use common::offline_support::{draft, in_memory_state, sqlite_persistence, test_config, RecordingNotifier};
use dairyhub_lib::application::ports::BackupOutcome;
use dairyhub_lib::domain::constants::{DATA_VERSION, DATA_VERSION_KEY, OFFLINE_QUEUE_KEY};
use dairyhub_lib::domain::entities::QueuedAction;
use dairyhub_lib::domain::value_objects::StorageKey;
use dairyhub_lib::presentation::dto::backup::BackupFileRequest;
use dairyhub_lib::presentation::dto::storage::SaveValueRequest;
use dairyhub_lib::state::AppState;
use serde_json::{json, Value};
use tempfile::tempdir;

fn key(value: &str) -> StorageKey {
    StorageKey::new(value).unwrap()
}

#[tokio::test]
async fn sqlite_round_trip_and_corrupt_fallback() {
    let persistence = sqlite_persistence(1024 * 1024).await;
    persistence.initialize(true).await.unwrap();

    let version: String = persistence.load(&key(DATA_VERSION_KEY), String::new()).await;
    assert_eq!(version, DATA_VERSION);

    let invoices = json!([{ "number": "INV-001", "total": 42.5, "lines": [] }]);
    persistence.save(&key("invoices"), &invoices).await.unwrap();
    let loaded: Value = persistence.load(&key("invoices"), Value::Null).await;
    assert_eq!(loaded, invoices);

    // 型が合わない値は既定値にフォールバックする
    let wrong_shape: Vec<QueuedAction> = persistence.load(&key("invoices"), Vec::new()).await;
    assert!(wrong_shape.is_empty());
}

#[tokio::test]
async fn sqlite_quota_rejects_write_and_keeps_previous_value() {
    let persistence = sqlite_persistence(512).await;
    persistence.save(&key("notes"), &"short").await.unwrap();

    let err = persistence
        .save(&key("notes"), &"x".repeat(1024))
        .await
        .unwrap_err();
    assert!(err.is_storage_full());

    let notes: String = persistence.load(&key("notes"), String::new()).await;
    assert_eq!(notes, "short");
}

#[tokio::test]
async fn export_clear_import_restores_everything() {
    let persistence = sqlite_persistence(1024 * 1024).await;
    persistence.initialize(false).await.unwrap();
    persistence
        .save(&key("customers"), &json!([{ "name": "A" }, { "name": "B" }]))
        .await
        .unwrap();

    let snapshot = persistence.export_all().await.unwrap();
    let json = serde_json::to_string(&snapshot).unwrap();

    persistence.clear().await.unwrap();
    assert_eq!(persistence.usage_estimate().await.unwrap().bytes, 0);

    let err = persistence.import_json("[1, 2, 3]").await.unwrap_err();
    assert_eq!(err.code(), "IMPORT_FORMAT_INVALID");
    assert_eq!(persistence.usage_estimate().await.unwrap().bytes, 0);

    let imported = persistence.import_json(&json).await.unwrap();
    assert_eq!(imported, snapshot.len());
    assert_eq!(persistence.export_all().await.unwrap().entries, snapshot.entries);
}

#[tokio::test]
async fn quota_exceeded_enqueue_leaves_queue_untouched() {
    let (notifier, _rx) = RecordingNotifier::channel();
    let mut config = dairyhub_lib::shared::AppConfig::default();
    config.storage.quota_bytes = 600;
    let state = AppState::in_memory(config, notifier, false).await.unwrap();

    state
        .queue_service
        .enqueue(draft("CREATE", "customer", json!({ "name": "A" })))
        .await
        .unwrap();
    let before = state.queue_service.peek_all().await;

    let err = state
        .queue_service
        .enqueue(draft("CREATE", "customer", json!({ "notes": "z".repeat(1024) })))
        .await
        .unwrap_err();
    assert!(err.is_storage_full());
    assert_eq!(state.queue_service.peek_all().await, before);
}

#[tokio::test]
async fn file_backup_round_trip_through_app_state() {
    let dir = tempdir().unwrap();
    let (notifier, _rx) = RecordingNotifier::channel();
    let state = AppState::initialize(test_config(dir.path()), notifier, true)
        .await
        .unwrap();

    state
        .storage_handler
        .save(SaveValueRequest {
            key: "routes".into(),
            value: json!(["north", "south"]),
        })
        .await
        .unwrap();
    state
        .queue_service
        .enqueue(draft("UPDATE", "route", json!({ "id": 7 })))
        .await
        .unwrap();

    let backup_path = dir.path().join("exports").join("backup.json");
    let request = BackupFileRequest {
        path: Some(backup_path.display().to_string()),
    };
    let outcome = state
        .backup_handler
        .export_backup(request.clone())
        .await
        .unwrap();
    assert!(outcome.is_saved());

    state.storage_handler.clear().await.unwrap();
    assert!(state.queue_service.is_empty().await);

    let outcome = state.backup_handler.import_backup(request).await.unwrap();
    assert!(outcome.is_saved());

    let routes: Value = state.persistence.load(&key("routes"), Value::Null).await;
    assert_eq!(routes, json!(["north", "south"]));
    let queue: Vec<QueuedAction> = state.persistence.load(&key(OFFLINE_QUEUE_KEY), Vec::new()).await;
    assert_eq!(queue.len(), 1);

    let cancelled = state
        .backup_handler
        .export_backup(BackupFileRequest::default())
        .await
        .unwrap();
    assert_eq!(cancelled, BackupOutcome::Cancelled);

    state.shutdown().await;
}

#[tokio::test]
async fn in_memory_state_initializes_status_record() {
    let (state, _rx) = in_memory_state(false).await;
    let status = state.status_service.get().await;
    assert!(!status.is_online);
    assert!(status.last_sync_attempt.is_none());
}
