use crate::domain::entities::QueuedAction;
use crate::shared::AppError;
use async_trait::async_trait;

/// キューから取り出したアクションを適用する。
///
/// `Err` を返したアクションはキューに残り、次回のドレインで再度処理される。
#[async_trait]
pub trait ActionProcessor: Send + Sync {
    async fn process(&self, action: &QueuedAction) -> Result<(), AppError>;
}
