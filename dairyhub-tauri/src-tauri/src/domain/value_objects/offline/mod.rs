mod action_id;
mod action_type;
mod connectivity;
mod entity_type;
mod payload;
mod storage_key;

pub use action_id::QueuedActionId;
pub use action_type::OfflineActionType;
pub use connectivity::ConnectivityState;
pub use entity_type::EntityType;
pub use payload::OfflinePayload;
pub use storage_key::StorageKey;
