pub mod action_processor;
pub mod backup_transport;
pub mod connectivity;
pub mod connectivity_notifier;
pub mod key_value_store;

pub use action_processor::ActionProcessor;
pub use backup_transport::{BackupOutcome, BackupTransport};
pub use connectivity::ConnectivitySource;
pub use connectivity_notifier::{ConnectivityNotice, ConnectivityNotifier};
pub use key_value_store::{KeyValueStore, StorageError};
