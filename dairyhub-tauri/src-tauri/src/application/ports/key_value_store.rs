use crate::domain::value_objects::StorageKey;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("quota exceeded: {required} bytes required, {quota} bytes allowed")]
    QuotaExceeded { required: u64, quota: u64 },

    #[error("storage backend error: {0}")]
    Backend(String),
}

/// 文字列キー・文字列値のローカルストア。
///
/// 書き込みは容量上限を確認してから行い、上限を超える場合は既存値を変更せずに
/// [`StorageError::QuotaExceeded`] を返す。
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &StorageKey) -> Result<Option<String>, StorageError>;
    async fn set(&self, key: &StorageKey, value: String) -> Result<(), StorageError>;
    async fn remove(&self, key: &StorageKey) -> Result<(), StorageError>;
    async fn clear(&self) -> Result<(), StorageError>;
    async fn entries(&self) -> Result<Vec<(StorageKey, String)>, StorageError>;
    /// キー長と値長の合計（バイト）。
    async fn usage_bytes(&self) -> Result<u64, StorageError>;
    /// 全エントリを置き換える。容量超過の場合は何も変更しない。
    async fn replace_all(&self, entries: Vec<(StorageKey, String)>) -> Result<(), StorageError>;
}

pub(crate) fn entry_size(key: &str, value: &str) -> u64 {
    (key.len() + value.len()) as u64
}
