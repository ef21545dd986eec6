use crate::application::ports::ActionProcessor;
use crate::domain::entities::QueuedAction;
use crate::shared::AppError;
use async_trait::async_trait;

/// サーバー同期プロトコルを持たない構成の既定プロセッサ。
///
/// ローカルストアが正本なので、キューのアクションは記録するだけで成功扱いにする。
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingActionProcessor;

#[async_trait]
impl ActionProcessor for LoggingActionProcessor {
    async fn process(&self, action: &QueuedAction) -> Result<(), AppError> {
        tracing::info!(
            target: "offline::queue",
            action_id = %action.id,
            action_type = %action.action_type,
            entity = %action.entity,
            queued_at = %action.timestamp,
            "Processed queued action"
        );
        Ok(())
    }
}
