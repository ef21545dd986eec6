pub mod backup_handler;
pub mod offline_handler;
pub mod storage_handler;
pub mod system_handler;

pub use backup_handler::BackupHandler;
pub use offline_handler::OfflineHandler;
pub use storage_handler::StorageHandler;
pub use system_handler::SystemHandler;
