pub mod connectivity_notifier;

pub use connectivity_notifier::IpcConnectivityNotifier;
