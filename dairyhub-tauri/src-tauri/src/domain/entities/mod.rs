pub mod offline;

pub use offline::{
    DrainReport, QueuedAction, QueuedActionDraft, StorageSnapshot, StorageUsage, SyncStatusPatch,
    SyncStatusRecord,
};
