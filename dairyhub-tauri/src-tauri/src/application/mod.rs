pub mod ports;
pub mod services;

pub use services::{
    BackupService, ConnectivityObserver, OfflineQueueService, PersistenceService,
    SyncService, SyncStatusService,
};
