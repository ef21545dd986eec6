pub mod backup_service;
pub mod connectivity_observer;
pub mod offline_queue_service;
pub mod persistence_service;
pub mod sync_service;
pub mod sync_status_service;

pub use backup_service::BackupService;
pub use connectivity_observer::{ConnectivityObserver, ObserverHandle};
pub use offline_queue_service::OfflineQueueService;
pub use persistence_service::PersistenceService;
pub use sync_service::{SyncService, SyncTrigger};
pub use sync_status_service::SyncStatusService;
