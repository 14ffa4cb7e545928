//! Per-attempt observability hook.
//!
//! The pipeline reports every adapter call as an [`AttemptEvent`] to an
//! observer handed in at construction. Nothing inside the adapters writes
//! diagnostics about outcomes; that is the observer's job.

use crate::error::Absent;
use crate::types::SourceKind;
use std::time::Duration;

/// How one adapter call ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    Found,
    Absent(Absent),
}

impl AttemptOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, AttemptOutcome::Found)
    }
}

/// One adapter call as seen by the pipeline.
#[derive(Debug, Clone)]
pub struct AttemptEvent {
    pub source: SourceKind,
    pub isbn: String,
    pub outcome: AttemptOutcome,
    pub latency: Duration,
}

/// Receives attempt events. Must not block.
pub trait AttemptObserver: Send + Sync {
    fn on_attempt(&self, event: &AttemptEvent);
}

/// Writes one structured `tracing` event per attempt.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl AttemptObserver for TracingObserver {
    fn on_attempt(&self, event: &AttemptEvent) {
        let latency_ms = event.latency.as_millis() as u64;
        match &event.outcome {
            AttemptOutcome::Found => tracing::info!(
                source = %event.source,
                isbn = %event.isbn,
                latency_ms,
                "source matched"
            ),
            AttemptOutcome::Absent(reason) => tracing::debug!(
                source = %event.source,
                isbn = %event.isbn,
                latency_ms,
                %reason,
                "source had no match"
            ),
        }
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl AttemptObserver for NoopObserver {
    fn on_attempt(&self, _event: &AttemptEvent) {}
}
