//! Module: obs
//! Responsibility: the metrics sink boundary.
//! Registry dispatch MUST NOT reach into any metrics backend directly; all
//! instrumentation flows through `MetricsEvent` and `MetricsSink`.

use std::sync::atomic::{AtomicU64, Ordering};

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug)]
pub enum MetricsEvent {
    IndexDelta {
        index: &'static str,
        adds: u64,
        removes: u64,
    },
}

///
/// MetricsSink
///

pub trait MetricsSink: Send + Sync {
    fn record(&self, event: MetricsEvent);
}

///
/// NullSink
///

#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl MetricsSink for NullSink {
    fn record(&self, _event: MetricsEvent) {}
}

///
/// CountingSink
///
/// Accumulates delta totals across all indexes. Test and diagnostics aid.
///

#[derive(Debug, Default)]
pub struct CountingSink {
    adds: AtomicU64,
    removes: AtomicU64,
}

impl CountingSink {
    #[must_use]
    pub fn adds(&self) -> u64 {
        self.adds.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn removes(&self) -> u64 {
        self.removes.load(Ordering::Relaxed)
    }
}

impl MetricsSink for CountingSink {
    fn record(&self, event: MetricsEvent) {
        let MetricsEvent::IndexDelta { adds, removes, .. } = event;
        self.adds.fetch_add(adds, Ordering::Relaxed);
        self.removes.fetch_add(removes, Ordering::Relaxed);
    }
}
