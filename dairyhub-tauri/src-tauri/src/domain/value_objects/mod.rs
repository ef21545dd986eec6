pub mod offline;

pub use offline::{
    ConnectivityState, EntityType, OfflineActionType, OfflinePayload, QueuedActionId, StorageKey,
};
