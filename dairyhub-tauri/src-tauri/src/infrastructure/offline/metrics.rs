use crate::application::services::SyncTrigger;
use crate::domain::entities::DrainReport;
use crate::shared::AppError;
use crate::shared::metrics::{current_unix_ms, timestamp_to_option};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{LazyLock, Mutex};

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DrainOutcomeStatus {
    Success,
    Failure,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SyncMetricsSnapshot {
    pub total_success: u64,
    pub total_failure: u64,
    pub consecutive_failure: u64,
    pub actions_processed: u64,
    pub actions_failed: u64,
    pub last_success_ms: Option<u64>,
    pub last_failure_ms: Option<u64>,
    pub last_outcome: Option<DrainOutcomeStatus>,
    pub last_trigger: Option<SyncTrigger>,
    pub last_remaining: Option<u32>,
    pub last_error: Option<String>,
}

#[derive(Default, Clone)]
struct LastDrainMetadata {
    last_outcome: Option<DrainOutcomeStatus>,
    trigger: Option<SyncTrigger>,
    remaining: Option<u32>,
    error: Option<String>,
}

struct SyncMetrics {
    success: AtomicU64,
    failure: AtomicU64,
    consecutive_failure: AtomicU64,
    actions_processed: AtomicU64,
    actions_failed: AtomicU64,
    last_success_ms: AtomicU64,
    last_failure_ms: AtomicU64,
    metadata: Mutex<LastDrainMetadata>,
}

impl SyncMetrics {
    fn new() -> Self {
        Self {
            success: AtomicU64::new(0),
            failure: AtomicU64::new(0),
            consecutive_failure: AtomicU64::new(0),
            actions_processed: AtomicU64::new(0),
            actions_failed: AtomicU64::new(0),
            last_success_ms: AtomicU64::new(0),
            last_failure_ms: AtomicU64::new(0),
            metadata: Mutex::new(LastDrainMetadata::default()),
        }
    }

    fn record(&self, trigger: SyncTrigger, result: &Result<DrainReport, AppError>) {
        let status = match result {
            Ok(report) => {
                self.success.fetch_add(1, Ordering::Relaxed);
                self.last_success_ms
                    .store(current_unix_ms(), Ordering::Relaxed);
                self.consecutive_failure.store(0, Ordering::Relaxed);
                self.actions_processed
                    .fetch_add(u64::from(report.processed), Ordering::Relaxed);
                self.actions_failed
                    .fetch_add(u64::from(report.failed), Ordering::Relaxed);
                DrainOutcomeStatus::Success
            }
            Err(_) => {
                self.failure.fetch_add(1, Ordering::Relaxed);
                self.last_failure_ms
                    .store(current_unix_ms(), Ordering::Relaxed);
                self.consecutive_failure.fetch_add(1, Ordering::Relaxed);
                DrainOutcomeStatus::Failure
            }
        };

        if let Ok(mut guard) = self.metadata.lock() {
            guard.last_outcome = Some(status);
            guard.trigger = Some(trigger);
            guard.remaining = result.as_ref().ok().map(|report| report.remaining);
            guard.error = result.as_ref().err().map(|err| err.to_string());
        }
    }

    fn snapshot(&self) -> SyncMetricsSnapshot {
        let metadata = self
            .metadata
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_else(|_| LastDrainMetadata::default());

        SyncMetricsSnapshot {
            total_success: self.success.load(Ordering::Relaxed),
            total_failure: self.failure.load(Ordering::Relaxed),
            consecutive_failure: self.consecutive_failure.load(Ordering::Relaxed),
            actions_processed: self.actions_processed.load(Ordering::Relaxed),
            actions_failed: self.actions_failed.load(Ordering::Relaxed),
            last_success_ms: timestamp_to_option(self.last_success_ms.load(Ordering::Relaxed)),
            last_failure_ms: timestamp_to_option(self.last_failure_ms.load(Ordering::Relaxed)),
            last_outcome: metadata.last_outcome,
            last_trigger: metadata.trigger,
            last_remaining: metadata.remaining,
            last_error: metadata.error,
        }
    }
}

static SYNC_METRICS: LazyLock<SyncMetrics> = LazyLock::new(SyncMetrics::new);

pub fn record_drain(
    trigger: SyncTrigger,
    result: &Result<DrainReport, AppError>,
) -> SyncMetricsSnapshot {
    SYNC_METRICS.record(trigger, result);
    SYNC_METRICS.snapshot()
}

pub fn snapshot() -> SyncMetricsSnapshot {
    SYNC_METRICS.snapshot()
}
