pub mod metrics;
pub mod processor;

pub use processor::LoggingActionProcessor;
