use crate::application::ports::ConnectivitySource;
use crate::domain::value_objects::ConnectivityState;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::broadcast;

const CHANNEL_CAPACITY: usize = 16;

/// 最後に観測した接続状態を保持し、変化したときだけ購読者に配信する。
///
/// UI からの `online`/`offline` 通知と [`super::ReachabilityProbe`] の両方が
/// `report` を呼ぶ。
pub struct ConnectivityMonitor {
    online: AtomicBool,
    sender: broadcast::Sender<ConnectivityState>,
}

impl ConnectivityMonitor {
    pub fn new(initially_online: bool) -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            online: AtomicBool::new(initially_online),
            sender,
        }
    }

    /// 状態を更新する。変化があった場合は `true` を返す。
    pub fn report(&self, state: ConnectivityState) -> bool {
        let online = state.is_online();
        let previous = self.online.swap(online, Ordering::SeqCst);
        if previous == online {
            return false;
        }

        tracing::debug!(
            target: "offline::connectivity",
            state = state.as_str(),
            subscribers = self.sender.receiver_count(),
            "Connectivity state reported"
        );
        // 購読者がいない場合の送信エラーは無視する
        let _ = self.sender.send(state);
        true
    }
}

impl ConnectivitySource for ConnectivityMonitor {
    fn is_online(&self) -> bool {
        self.online.load(Ordering::SeqCst)
    }

    fn subscribe(&self) -> broadcast::Receiver<ConnectivityState> {
        self.sender.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn emits_only_on_change() {
        let monitor = ConnectivityMonitor::new(false);
        let mut rx = monitor.subscribe();

        assert!(!monitor.report(ConnectivityState::Offline));
        assert!(monitor.report(ConnectivityState::Online));
        assert!(!monitor.report(ConnectivityState::Online));
        assert!(monitor.report(ConnectivityState::Offline));

        assert_eq!(rx.recv().await.unwrap(), ConnectivityState::Online);
        assert_eq!(rx.recv().await.unwrap(), ConnectivityState::Offline);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn report_without_subscribers_updates_state() {
        let monitor = ConnectivityMonitor::new(true);
        monitor.report(ConnectivityState::Offline);
        assert!(!monitor.is_online());
        assert_eq!(monitor.current(), ConnectivityState::Offline);
    }
}
