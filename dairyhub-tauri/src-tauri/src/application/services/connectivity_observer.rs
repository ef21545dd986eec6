use crate::application::ports::{ConnectivityNotice, ConnectivityNotifier, ConnectivitySource};
use crate::application::services::sync_service::{SyncService, SyncTrigger};
use crate::domain::value_objects::ConnectivityState;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::{broadcast, oneshot};
use tokio::task::JoinHandle;

/// 接続状態の遷移を購読し、オンライン復帰時にキューをドレインする。
pub struct ConnectivityObserver {
    connectivity: Arc<dyn ConnectivitySource>,
    sync: Arc<SyncService>,
    notifier: Arc<dyn ConnectivityNotifier>,
    auto_sync: bool,
}

impl ConnectivityObserver {
    pub fn new(
        connectivity: Arc<dyn ConnectivitySource>,
        sync: Arc<SyncService>,
        notifier: Arc<dyn ConnectivityNotifier>,
        auto_sync: bool,
    ) -> Self {
        Self {
            connectivity,
            sync,
            notifier,
            auto_sync,
        }
    }

    /// 購読を開始する。返されたハンドルを drop すると購読は止まる。
    ///
    /// tokio ランタイム上で呼び出す必要がある。
    pub fn start(self: &Arc<Self>) -> ObserverHandle {
        let mut receiver = self.connectivity.subscribe();
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();
        let observer = Arc::clone(self);

        let task = tokio::spawn(async move {
            tracing::debug!(target: "offline::connectivity", "Connectivity observer started");
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    received = receiver.recv() => match received {
                        Ok(state) => observer.handle_transition(state).await,
                        Err(broadcast::error::RecvError::Lagged(skipped)) => {
                            tracing::warn!(
                                target: "offline::connectivity",
                                skipped,
                                "Connectivity observer lagged; resyncing with current state"
                            );
                            let state = observer.connectivity.current();
                            observer.handle_transition(state).await;
                        }
                        Err(broadcast::error::RecvError::Closed) => break,
                    }
                }
            }
            tracing::debug!(target: "offline::connectivity", "Connectivity observer stopped");
        });

        ObserverHandle {
            shutdown: Some(shutdown_tx),
            task: Some(task),
        }
    }

    /// 1 回分の遷移を処理する。エラーはログに残して握りつぶす。
    pub async fn handle_transition(&self, state: ConnectivityState) {
        let changed_at = Utc::now();
        tracing::info!(
            target: "offline::connectivity",
            state = state.as_str(),
            "Connectivity changed"
        );

        match state {
            ConnectivityState::Online => {
                if self.auto_sync {
                    // 結果のログは run_cycle 側で出している
                    let _ = self.sync.run_cycle(SyncTrigger::Reconnect).await;
                } else if let Err(err) = self.sync.record_online().await {
                    tracing::warn!(
                        target: "offline::connectivity",
                        error = %err,
                        "Failed to record online transition"
                    );
                }
            }
            ConnectivityState::Offline => {
                if let Err(err) = self.sync.record_offline(changed_at).await {
                    tracing::warn!(
                        target: "offline::connectivity",
                        error = %err,
                        "Failed to record offline transition"
                    );
                }
            }
        }

        let notice = ConnectivityNotice::for_state(state, changed_at);
        if let Err(err) = self.notifier.notify(&notice).await {
            tracing::warn!(
                target: "offline::connectivity",
                error = %err,
                "Failed to deliver connectivity notice"
            );
        }
    }
}

/// 購読タスクのハンドル。
pub struct ObserverHandle {
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl ObserverHandle {
    pub fn is_running(&self) -> bool {
        self.task
            .as_ref()
            .map(|task| !task.is_finished())
            .unwrap_or(false)
    }

    /// 購読を止め、処理中の遷移が終わるまで待つ。
    pub async fn stop(mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(task) = self.task.take() {
            if let Err(err) = task.await {
                tracing::warn!(
                    target: "offline::connectivity",
                    error = %err,
                    "Connectivity observer task ended abnormally"
                );
            }
        }
    }
}

impl Drop for ObserverHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
