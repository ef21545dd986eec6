pub mod monitor;
pub mod notifier;
pub mod probe;

pub use monitor::ConnectivityMonitor;
pub use notifier::TracingConnectivityNotifier;
pub use probe::ReachabilityProbe;
