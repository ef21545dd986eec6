use crate::domain::value_objects::ConnectivityState;
use crate::infrastructure::connectivity::ConnectivityMonitor;
use crate::shared::config::SyncConfig;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{interval, timeout, MissedTickBehavior};

/// 一定間隔で TCP 接続を試し、結果を [`ConnectivityMonitor`] に報告する。
pub struct ReachabilityProbe {
    monitor: Arc<ConnectivityMonitor>,
    address: String,
    period: Duration,
    connect_timeout: Duration,
}

impl ReachabilityProbe {
    pub fn new(
        monitor: Arc<ConnectivityMonitor>,
        address: impl Into<String>,
        period: Duration,
        connect_timeout: Duration,
    ) -> Self {
        Self {
            monitor,
            address: address.into(),
            period,
            connect_timeout,
        }
    }

    pub fn from_config(monitor: Arc<ConnectivityMonitor>, config: &SyncConfig) -> Self {
        Self::new(
            monitor,
            config.probe_address.clone(),
            Duration::from_secs(config.probe_interval_secs),
            Duration::from_millis(config.probe_timeout_ms),
        )
    }

    /// 1 回だけ到達性を確認して報告する
    pub async fn probe_once(&self) -> ConnectivityState {
        let reachable = matches!(
            timeout(self.connect_timeout, TcpStream::connect(self.address.as_str())).await,
            Ok(Ok(_))
        );
        let state = ConnectivityState::from_online(reachable);
        if self.monitor.report(state) {
            tracing::info!(
                target: "offline::connectivity",
                address = %self.address,
                state = state.as_str(),
                "Reachability changed"
            );
        }
        state
    }

    pub fn spawn(self) -> ProbeHandle {
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            let mut ticker = interval(self.period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    _ = ticker.tick() => {
                        self.probe_once().await;
                    }
                }
            }
        });

        ProbeHandle {
            shutdown: Some(shutdown_tx),
            task: Some(task),
        }
    }
}

pub struct ProbeHandle {
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl ProbeHandle {
    pub async fn stop(mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for ProbeHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
