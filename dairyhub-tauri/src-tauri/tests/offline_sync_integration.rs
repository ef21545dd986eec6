mod common;

use std::time::Duration;

use chrono::Utc;
use common::offline_support::{draft, in_memory_state};
use dairyhub_lib::application::services::SyncTrigger;
use dairyhub_lib::domain::entities::DrainReport;
use dairyhub_lib::domain::value_objects::ConnectivityState;
use dairyhub_lib::infrastructure::offline::metrics;
use dairyhub_lib::presentation::dto::offline::{EnqueueActionRequest, ReportConnectivityRequest};
use dairyhub_lib::shared::AppError;
use serde_json::json;
use tokio::time::timeout;

#[tokio::test]
async fn offline_edits_are_replayed_when_connectivity_returns() {
    let (state, mut notices) = in_memory_state(false).await;
    state.start_background_tasks().await;

    let before = Utc::now();
    for (kind, name) in [("CREATE", "A"), ("UPDATE", "B"), ("DELETE", "C")] {
        state
            .offline_handler
            .enqueue(EnqueueActionRequest {
                action_type: kind.into(),
                entity: "customer".into(),
                data: json!({ "name": name }),
            })
            .await
            .unwrap();
    }

    let queued = state.queue_service.peek_all().await;
    let kinds: Vec<&str> = queued.iter().map(|a| a.action_type.as_str()).collect();
    assert_eq!(kinds, vec!["CREATE", "UPDATE", "DELETE"]);
    assert!(queued.iter().all(|a| a.timestamp >= before));

    // メトリクスはプロセス全体で共有されるので差分で見る（並行テスト分を含みうる）
    let metrics_before = metrics::snapshot();
    let response = state
        .offline_handler
        .report_connectivity(ReportConnectivityRequest { online: true })
        .unwrap();
    assert!(response.changed);

    let notice = timeout(Duration::from_secs(5), notices.recv())
        .await
        .expect("notice in time")
        .expect("notifier alive");
    assert_eq!(notice.state, ConnectivityState::Online);

    assert!(state.queue_service.is_empty().await);
    let metrics_after = metrics::snapshot();
    assert!(metrics_after.actions_processed - metrics_before.actions_processed >= 3);
    assert_eq!(metrics_after.actions_failed, metrics_before.actions_failed);
    assert!(metrics_after.total_success > metrics_before.total_success);

    let status = state.status_service.get().await;
    assert!(status.is_online);
    assert!(status.last_successful_sync.unwrap() >= before);

    state.shutdown().await;
}

#[tokio::test]
async fn synchronize_offline_has_no_side_effects() {
    let (state, _notices) = in_memory_state(false).await;
    state
        .queue_service
        .enqueue(draft("CREATE", "delivery", json!({ "litres": 12 })))
        .await
        .unwrap();

    let queue_before = state.queue_service.peek_all().await;
    let status_before = state.status_service.get().await;

    let err = state.sync_service.synchronize().await.unwrap_err();
    assert!(matches!(err, AppError::NotOnline));
    assert_eq!(state.queue_service.peek_all().await, queue_before);
    assert_eq!(state.status_service.get().await, status_before);
}

#[tokio::test]
async fn going_offline_keeps_last_successful_sync() {
    let (state, mut notices) = in_memory_state(true).await;
    state.start_background_tasks().await;

    let report = state.sync_service.synchronize().await.unwrap();
    assert_eq!(report, DrainReport::default());
    let last_success = state.status_service.get().await.last_successful_sync;
    assert!(last_success.is_some());

    state.connectivity.report(ConnectivityState::Offline);
    let notice = timeout(Duration::from_secs(5), notices.recv())
        .await
        .expect("notice in time")
        .expect("notifier alive");
    assert_eq!(notice.state, ConnectivityState::Offline);

    let status = state.status_service.get().await;
    assert!(!status.is_online);
    assert_eq!(status.last_successful_sync, last_success);

    state.shutdown().await;
}

#[tokio::test]
async fn drain_on_empty_queue_is_a_no_op() {
    let (state, _notices) = in_memory_state(true).await;
    let first = state.queue_service.drain().await.unwrap();
    let second = state.queue_service.drain().await.unwrap();
    assert_eq!(first, DrainReport::default());
    assert_eq!(second, DrainReport::default());
}

#[tokio::test]
async fn reconnect_cycle_reports_each_replayed_action() {
    let (state, _notices) = in_memory_state(true).await;
    for (kind, name) in [("CREATE", "A"), ("UPDATE", "B"), ("DELETE", "C")] {
        state
            .queue_service
            .enqueue(draft(kind, "customer", json!({ "name": name })))
            .await
            .unwrap();
    }

    let report = state
        .sync_service
        .run_cycle(SyncTrigger::Reconnect)
        .await
        .unwrap();
    assert_eq!(report, DrainReport::new(3, 0, 0));
    assert!(state.queue_service.is_empty().await);
}
