pub mod drain_report;
pub mod queued_action;
pub mod storage_snapshot;
pub mod sync_status_record;

pub use drain_report::DrainReport;
pub use queued_action::{QueuedAction, QueuedActionDraft};
pub use storage_snapshot::{StorageSnapshot, StorageUsage};
pub use sync_status_record::{SyncStatusPatch, SyncStatusRecord};
