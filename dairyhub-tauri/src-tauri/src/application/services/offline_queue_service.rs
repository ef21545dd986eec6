use crate::application::ports::ActionProcessor;
use crate::application::services::persistence_service::{PersistenceService, well_known_key};
use crate::domain::constants::OFFLINE_QUEUE_KEY;
use crate::domain::entities::{DrainReport, QueuedAction, QueuedActionDraft};
use crate::domain::value_objects::{QueuedActionId, StorageKey};
use crate::shared::AppError;
use chrono::Utc;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Mutex;

/// オフライン中のミューテーションを FIFO で保持するキュー。
///
/// キューのストレージキーに書き込むのはこのサービスだけ。読み込みから書き戻しまでは
/// `queue_lock` で保護し、ドレイン同士は `drain_gate` で直列化する。
pub struct OfflineQueueService {
    persistence: Arc<PersistenceService>,
    processor: Arc<dyn ActionProcessor>,
    key: StorageKey,
    queue_lock: Mutex<()>,
    drain_gate: Mutex<()>,
}

impl OfflineQueueService {
    pub fn new(persistence: Arc<PersistenceService>, processor: Arc<dyn ActionProcessor>) -> Self {
        Self {
            persistence,
            processor,
            key: well_known_key(OFFLINE_QUEUE_KEY),
            queue_lock: Mutex::new(()),
            drain_gate: Mutex::new(()),
        }
    }

    /// ID とタイムスタンプを付与してキュー末尾に追加し、即座に永続化する。
    pub async fn enqueue(&self, draft: QueuedActionDraft) -> Result<QueuedAction, AppError> {
        let _guard = self.queue_lock.lock().await;
        let mut queue = self.read_queue().await;

        let mut action = QueuedAction::from_draft(draft, Utc::now());
        while queue.iter().any(|queued| queued.id == action.id) {
            action.id = QueuedActionId::generate(action.timestamp);
        }

        queue.push(action.clone());
        self.persistence.save(&self.key, &queue).await?;

        tracing::debug!(
            target: "offline::queue",
            action_id = %action.id,
            action_type = %action.action_type,
            entity = %action.entity,
            pending = queue.len(),
            "Queued offline action"
        );
        Ok(action)
    }

    pub async fn peek_all(&self) -> Vec<QueuedAction> {
        self.read_queue().await
    }

    pub async fn len(&self) -> usize {
        self.read_queue().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// 開始時点のスナップショットを順番に処理し、成功したものだけを取り除く。
    ///
    /// 失敗したアクションは残し、次回のドレインで再試行する。ドレイン中に追加された
    /// アクションはこのパスでは処理せず、そのままキューに残る。
    pub async fn drain(&self) -> Result<DrainReport, AppError> {
        let _drain = self.drain_gate.lock().await;

        let snapshot = {
            let _guard = self.queue_lock.lock().await;
            self.read_queue().await
        };

        if snapshot.is_empty() {
            return Ok(DrainReport::default());
        }

        let mut succeeded = HashSet::with_capacity(snapshot.len());
        let mut failed = 0u32;

        for action in &snapshot {
            match self.processor.process(action).await {
                Ok(()) => {
                    succeeded.insert(action.id.clone());
                }
                Err(err) => {
                    failed += 1;
                    tracing::warn!(
                        target: "offline::queue",
                        action_id = %action.id,
                        action_type = %action.action_type,
                        entity = %action.entity,
                        error = %err,
                        "Failed to process queued action; keeping it for the next drain"
                    );
                }
            }
        }

        let remaining = {
            let _guard = self.queue_lock.lock().await;
            let retained: Vec<QueuedAction> = self
                .read_queue()
                .await
                .into_iter()
                .filter(|action| !succeeded.contains(&action.id))
                .collect();
            self.persistence.save(&self.key, &retained).await?;
            retained.len()
        };

        let report = DrainReport::new(succeeded.len() as u32, failed, remaining as u32);
        tracing::info!(
            target: "offline::queue",
            processed = report.processed,
            failed = report.failed,
            remaining = report.remaining,
            "Drained offline queue"
        );
        Ok(report)
    }

    pub async fn clear(&self) -> Result<(), AppError> {
        let _guard = self.queue_lock.lock().await;
        self.persistence
            .save(&self.key, &Vec::<QueuedAction>::new())
            .await?;
        tracing::info!(target: "offline::queue", "Cleared offline queue");
        Ok(())
    }

    async fn read_queue(&self) -> Vec<QueuedAction> {
        self.persistence.load(&self.key, Vec::new()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{EntityType, OfflineActionType, OfflinePayload};
    use crate::infrastructure::offline::LoggingActionProcessor;
    use crate::infrastructure::storage::MemoryKeyValueStore;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;

    /// `entity` が "poison" のアクションだけ失敗させる
    struct PoisonAwareProcessor {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ActionProcessor for PoisonAwareProcessor {
        async fn process(&self, action: &QueuedAction) -> Result<(), AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if action.entity.as_str() == "poison" {
                return Err(AppError::Internal("backend rejected action".into()));
            }
            Ok(())
        }
    }

    struct GatedProcessor {
        started: Notify,
        release: Notify,
    }

    #[async_trait]
    impl ActionProcessor for GatedProcessor {
        async fn process(&self, _action: &QueuedAction) -> Result<(), AppError> {
            self.started.notify_one();
            self.release.notified().await;
            Ok(())
        }
    }

    fn queue_with(processor: Arc<dyn ActionProcessor>, quota: u64) -> OfflineQueueService {
        let store = Arc::new(MemoryKeyValueStore::new(quota));
        let persistence = Arc::new(PersistenceService::new(store));
        OfflineQueueService::new(persistence, processor)
    }

    fn draft(kind: &str, entity: &str, name: &str) -> QueuedActionDraft {
        QueuedActionDraft::new(
            OfflineActionType::new(kind.into()).unwrap(),
            EntityType::new(entity.into()).unwrap(),
            OfflinePayload::new(json!({ "name": name })),
        )
    }

    #[tokio::test]
    async fn peek_all_preserves_enqueue_order_with_unique_ids() {
        let queue = queue_with(Arc::new(LoggingActionProcessor), 1024 * 1024);

        let mut expected = Vec::new();
        for i in 0..25 {
            let action = queue
                .enqueue(draft("UPDATE", "order", &format!("order-{i}")))
                .await
                .unwrap();
            expected.push(action);
        }

        let pending = queue.peek_all().await;
        assert_eq!(pending, expected);

        let ids: HashSet<_> = pending.iter().map(|a| a.id.clone()).collect();
        assert_eq!(ids.len(), 25);
    }

    #[tokio::test]
    async fn drain_on_empty_queue_reports_zero() {
        let queue = queue_with(Arc::new(LoggingActionProcessor), 1024);

        let report = queue.drain().await.unwrap();
        assert_eq!(report, DrainReport::default());

        let report = queue.drain().await.unwrap();
        assert_eq!(report, DrainReport::default());
        assert!(queue.is_empty().await);
    }

    #[tokio::test]
    async fn drain_retains_only_failed_actions() {
        let processor = Arc::new(PoisonAwareProcessor {
            calls: AtomicUsize::new(0),
        });
        let queue = queue_with(processor.clone(), 1024 * 1024);

        queue.enqueue(draft("CREATE", "customer", "A")).await.unwrap();
        let poison = queue.enqueue(draft("UPDATE", "poison", "B")).await.unwrap();
        queue.enqueue(draft("DELETE", "customer", "C")).await.unwrap();

        let report = queue.drain().await.unwrap();
        assert_eq!(report, DrainReport::new(2, 1, 1));
        assert!(!report.is_clean());
        assert_eq!(queue.peek_all().await, vec![poison.clone()]);

        // 失敗したアクションは次のドレインでも先頭に残る
        let report = queue.drain().await.unwrap();
        assert_eq!(report, DrainReport::new(0, 1, 1));
        assert_eq!(queue.peek_all().await, vec![poison]);
        assert_eq!(processor.calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn actions_enqueued_during_drain_wait_for_next_pass() {
        let processor = Arc::new(GatedProcessor {
            started: Notify::new(),
            release: Notify::new(),
        });
        let queue = Arc::new(queue_with(processor.clone(), 1024 * 1024));
        queue.enqueue(draft("CREATE", "customer", "A")).await.unwrap();

        let draining = {
            let queue = Arc::clone(&queue);
            tokio::spawn(async move { queue.drain().await })
        };

        processor.started.notified().await;
        let late = queue.enqueue(draft("CREATE", "customer", "late")).await.unwrap();
        processor.release.notify_one();

        let report = draining.await.unwrap().unwrap();
        assert_eq!(report, DrainReport::new(1, 0, 1));
        assert_eq!(queue.peek_all().await, vec![late]);
    }

    #[tokio::test]
    async fn enqueue_reports_storage_full_and_keeps_queue() {
        let queue = queue_with(Arc::new(LoggingActionProcessor), 400);
        let kept = queue.enqueue(draft("CREATE", "customer", "A")).await.unwrap();

        let err = queue
            .enqueue(draft("CREATE", "customer", &"x".repeat(1024)))
            .await
            .unwrap_err();
        assert!(err.is_storage_full());
        assert_eq!(queue.peek_all().await, vec![kept]);
    }

    #[tokio::test]
    async fn clear_empties_queue() {
        let queue = queue_with(Arc::new(LoggingActionProcessor), 1024 * 1024);
        queue.enqueue(draft("CREATE", "customer", "A")).await.unwrap();
        queue.enqueue(draft("CREATE", "customer", "B")).await.unwrap();

        queue.clear().await.unwrap();
        assert!(queue.is_empty().await);
        assert_eq!(queue.drain().await.unwrap(), DrainReport::default());
    }
}
