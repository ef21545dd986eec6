use crate::application::ports::{ConnectivityNotice, ConnectivityNotifier};
use crate::shared::AppError;
use async_trait::async_trait;

/// ウィンドウを持たない構成向け。通知をログに出すだけ。
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingConnectivityNotifier;

#[async_trait]
impl ConnectivityNotifier for TracingConnectivityNotifier {
    async fn notify(&self, notice: &ConnectivityNotice) -> Result<(), AppError> {
        tracing::info!(
            target: "offline::connectivity",
            state = notice.state.as_str(),
            changed_at = %notice.changed_at,
            "{}",
            notice.message
        );
        Ok(())
    }
}
