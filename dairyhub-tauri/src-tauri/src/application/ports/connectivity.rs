use crate::domain::value_objects::ConnectivityState;
use tokio::sync::broadcast;

/// プラットフォームのオンライン/オフライン通知。
pub trait ConnectivitySource: Send + Sync {
    fn is_online(&self) -> bool;

    fn current(&self) -> ConnectivityState {
        ConnectivityState::from_online(self.is_online())
    }

    /// 状態が変化したときだけ通知を受け取る。
    fn subscribe(&self) -> broadcast::Receiver<ConnectivityState>;
}
