use crate::application::ports::key_value_store::entry_size;
use crate::application::ports::{KeyValueStore, StorageError};
use crate::domain::value_objects::StorageKey;
use crate::infrastructure::database::ConnectionPool;
use crate::shared::metrics::current_unix_ms;
use async_trait::async_trait;
use sqlx::Row;
use std::sync::Arc;
use tokio::sync::Mutex;

const USAGE_SQL: &str = r#"
    SELECT COALESCE(SUM(length(CAST(key AS BLOB)) + length(CAST(value AS BLOB))), 0) AS bytes
    FROM kv_store
"#;

const USAGE_EXCLUDING_SQL: &str = r#"
    SELECT COALESCE(SUM(length(CAST(key AS BLOB)) + length(CAST(value AS BLOB))), 0) AS bytes
    FROM kv_store
    WHERE key != ?1
"#;

const UPSERT_SQL: &str = r#"
    INSERT INTO kv_store (key, value, updated_at)
    VALUES (?1, ?2, ?3)
    ON CONFLICT(key) DO UPDATE SET
        value = excluded.value,
        updated_at = excluded.updated_at
"#;

/// `kv_store` テーブルに保存する容量上限付きストア
///
/// 書き込みは `write_lock` で直列化する。SQLite の deferred トランザクションは
/// 読み取りから書き込みへの昇格が競合すると busy handler を待たずに
/// `SQLITE_BUSY` を返すため、容量チェックと書き込みを同じロックの中で行う。
#[derive(Clone)]
pub struct SqliteKeyValueStore {
    pool: ConnectionPool,
    quota_bytes: u64,
    write_lock: Arc<Mutex<()>>,
}

impl SqliteKeyValueStore {
    pub fn new(pool: ConnectionPool, quota_bytes: u64) -> Self {
        Self {
            pool,
            quota_bytes,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    fn ensure_within_quota(&self, required: u64) -> Result<(), StorageError> {
        if required > self.quota_bytes {
            return Err(StorageError::QuotaExceeded {
                required,
                quota: self.quota_bytes,
            });
        }
        Ok(())
    }
}

fn backend(err: sqlx::Error) -> StorageError {
    StorageError::Backend(err.to_string())
}

#[async_trait]
impl KeyValueStore for SqliteKeyValueStore {
    async fn get(&self, key: &StorageKey) -> Result<Option<String>, StorageError> {
        let row = sqlx::query("SELECT value FROM kv_store WHERE key = ?1")
            .bind(key.as_str())
            .fetch_optional(self.pool.get_pool())
            .await
            .map_err(backend)?;

        row.map(|row| row.try_get::<String, _>("value"))
            .transpose()
            .map_err(backend)
    }

    async fn set(&self, key: &StorageKey, value: String) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut tx = self.pool.get_pool().begin().await.map_err(backend)?;

        let others: i64 = sqlx::query_scalar(USAGE_EXCLUDING_SQL)
            .bind(key.as_str())
            .fetch_one(&mut *tx)
            .await
            .map_err(backend)?;
        let required = others.max(0) as u64 + entry_size(key.as_str(), &value);
        // 上限超過時は tx を drop してロールバックする
        self.ensure_within_quota(required)?;

        sqlx::query(UPSERT_SQL)
            .bind(key.as_str())
            .bind(&value)
            .bind(current_unix_ms() as i64)
            .execute(&mut *tx)
            .await
            .map_err(backend)?;

        tx.commit().await.map_err(backend)
    }

    async fn remove(&self, key: &StorageKey) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        sqlx::query("DELETE FROM kv_store WHERE key = ?1")
            .bind(key.as_str())
            .execute(self.pool.get_pool())
            .await
            .map_err(backend)?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        sqlx::query("DELETE FROM kv_store")
            .execute(self.pool.get_pool())
            .await
            .map_err(backend)?;
        Ok(())
    }

    async fn entries(&self) -> Result<Vec<(StorageKey, String)>, StorageError> {
        let rows = sqlx::query("SELECT key, value FROM kv_store ORDER BY key")
            .fetch_all(self.pool.get_pool())
            .await
            .map_err(backend)?;

        rows.into_iter()
            .map(|row| {
                let key: String = row.try_get("key").map_err(backend)?;
                let value: String = row.try_get("value").map_err(backend)?;
                let key = StorageKey::new(key).map_err(StorageError::Backend)?;
                Ok((key, value))
            })
            .collect()
    }

    async fn usage_bytes(&self) -> Result<u64, StorageError> {
        let bytes: i64 = sqlx::query_scalar(USAGE_SQL)
            .fetch_one(self.pool.get_pool())
            .await
            .map_err(backend)?;
        Ok(bytes.max(0) as u64)
    }

    async fn replace_all(&self, entries: Vec<(StorageKey, String)>) -> Result<(), StorageError> {
        let required: u64 = entries
            .iter()
            .map(|(key, value)| entry_size(key.as_str(), value))
            .sum();
        self.ensure_within_quota(required)?;

        let _guard = self.write_lock.lock().await;
        let mut tx = self.pool.get_pool().begin().await.map_err(backend)?;
        sqlx::query("DELETE FROM kv_store")
            .execute(&mut *tx)
            .await
            .map_err(backend)?;

        let now = current_unix_ms() as i64;
        for (key, value) in &entries {
            sqlx::query(UPSERT_SQL)
                .bind(key.as_str())
                .bind(value)
                .bind(now)
                .execute(&mut *tx)
                .await
                .map_err(backend)?;
        }

        tx.commit().await.map_err(backend)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn store(quota: u64) -> SqliteKeyValueStore {
        let pool = ConnectionPool::from_memory().await.unwrap();
        pool.migrate().await.unwrap();
        SqliteKeyValueStore::new(pool, quota)
    }

    fn key(value: &str) -> StorageKey {
        StorageKey::new(value).unwrap()
    }

    #[tokio::test]
    async fn set_get_remove() {
        let store = store(1024).await;
        store.set(&key("route"), "\"north\"".into()).await.unwrap();
        assert_eq!(
            store.get(&key("route")).await.unwrap().as_deref(),
            Some("\"north\"")
        );

        store.set(&key("route"), "\"south\"".into()).await.unwrap();
        assert_eq!(
            store.get(&key("route")).await.unwrap().as_deref(),
            Some("\"south\"")
        );

        store.remove(&key("route")).await.unwrap();
        store.remove(&key("route")).await.unwrap();
        assert!(store.get(&key("route")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn quota_counts_bytes_not_chars() {
        let store = store(8).await;
        // "é" は UTF-8 で 2 バイト
        store.set(&key("k"), "ééé".into()).await.unwrap();
        assert_eq!(store.usage_bytes().await.unwrap(), 7);

        let err = store.set(&key("j"), "éé".into()).await.unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { required: 12, quota: 8 }));
        assert!(store.get(&key("j")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn entries_and_replace_all() {
        let store = store(1024).await;
        store.set(&key("b"), "2".into()).await.unwrap();
        store.set(&key("a"), "1".into()).await.unwrap();

        let entries = store.entries().await.unwrap();
        let keys: Vec<&str> = entries.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["a", "b"]);

        store
            .replace_all(vec![(key("c"), "3".into())])
            .await
            .unwrap();
        let entries = store.entries().await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].0.as_str(), "c");

        store.clear().await.unwrap();
        assert_eq!(store.usage_bytes().await.unwrap(), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_sets_on_file_pool_never_report_busy() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}", dir.path().join("kv.db").display());
        let pool = ConnectionPool::new(&url, 5).await.unwrap();
        pool.migrate().await.unwrap();
        let store = SqliteKeyValueStore::new(pool.clone(), 1024 * 1024);

        let mut tasks = Vec::new();
        for i in 0..200 {
            let store = store.clone();
            tasks.push(tokio::spawn(async move {
                let key = StorageKey::new(format!("herd-{}", i % 20)).unwrap();
                store.set(&key, format!("{{\"round\":{i}}}")).await
            }));
        }

        let mut errors = Vec::new();
        for task in tasks {
            if let Err(err) = task.await.unwrap() {
                errors.push(err.to_string());
            }
        }
        assert!(errors.is_empty(), "write errors: {:?}", errors);
        assert_eq!(store.entries().await.unwrap().len(), 20);

        pool.close().await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_sets_respect_shared_quota() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}", dir.path().join("kv.db").display());
        let pool = ConnectionPool::new(&url, 5).await.unwrap();
        pool.migrate().await.unwrap();
        // 1 エントリ 10 バイト ("k-NN" + 6 バイト) なので 5 件までしか入らない
        let store = SqliteKeyValueStore::new(pool.clone(), 50);

        let mut tasks = Vec::new();
        for i in 0..20 {
            let store = store.clone();
            tasks.push(tokio::spawn(async move {
                let key = StorageKey::new(format!("k-{:02}", i)).unwrap();
                store.set(&key, "\"abcd\"".into()).await
            }));
        }

        let mut stored = 0;
        for task in tasks {
            match task.await.unwrap() {
                Ok(()) => stored += 1,
                Err(err) => assert!(matches!(err, StorageError::QuotaExceeded { .. }), "{err}"),
            }
        }
        assert_eq!(stored, 5);
        assert!(store.usage_bytes().await.unwrap() <= 50);

        pool.close().await;
    }
}
