#![allow(unused_imports)]

pub mod constants;
pub mod entities;
pub mod value_objects;

pub use constants::{DATA_VERSION, DATA_VERSION_KEY, OFFLINE_QUEUE_KEY, SYNC_STATUS_KEY};
pub use entities::{
    DrainReport, QueuedAction, QueuedActionDraft, StorageSnapshot, StorageUsage, SyncStatusPatch,
    SyncStatusRecord,
};
pub use value_objects::{
    ConnectivityState, EntityType, OfflineActionType, OfflinePayload, QueuedActionId, StorageKey,
};
