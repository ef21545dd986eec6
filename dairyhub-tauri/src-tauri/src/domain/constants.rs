/// オフラインキューを保持するストレージキー。`OfflineQueueService` 以外は書き込まない。
pub const OFFLINE_QUEUE_KEY: &str = "offlineQueue";

/// 同期ステータスレコードのストレージキー。
pub const SYNC_STATUS_KEY: &str = "syncStatus";

/// データバージョンタグのストレージキー。
pub const DATA_VERSION_KEY: &str = "dataVersion";

/// 現在のデータスキーマバージョン。マイグレーション判定にはまだ使用していない。
pub const DATA_VERSION: &str = "1.0";
