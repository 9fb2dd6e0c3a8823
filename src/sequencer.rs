use std::fmt;
use std::sync::Arc;

use crate::contracts::{Clock, DriftObserver, TimestampSequencer};
use crate::metrics::SequencerMetrics;
use crate::sync::{AtomicI64, Ordering};

/// Lock-free sequencer that turns an arbitrary clock into strictly
/// increasing timestamps.
///
/// When the clock reads at or behind the last issued value, the next value
/// is synthesized as `last + 1` instead of waiting for the clock. Once the
/// clock overtakes the synthesized run, issued values track it again.
///
/// # Example
///
/// ```
/// use monostamp::{clock, Monostamp, TimestampSequencer};
///
/// let stamps = Monostamp::new(clock::unix_nano, 0);
/// let a = stamps.next();
/// let b = stamps.next();
/// assert!(b > a);
/// ```
pub struct Monostamp {
    clock: Box<dyn Clock>,
    last_issued: AtomicI64,
    on_drift: Option<Arc<dyn DriftObserver>>,
    metrics: Option<Arc<SequencerMetrics>>,
}

impl Monostamp {
    /// Creates a sequencer whose first timestamp will exceed `start_ts`.
    pub fn new<C>(clock: C, start_ts: i64) -> Self
    where
        C: Clock + 'static,
    {
        Self {
            clock: Box::new(clock),
            last_issued: AtomicI64::new(start_ts),
            on_drift: None,
            metrics: None,
        }
    }

    /// Creates a sequencer that reports every drift event to `observer`.
    pub fn with_observer<C, O>(clock: C, start_ts: i64, observer: O) -> Self
    where
        C: Clock + 'static,
        O: DriftObserver + 'static,
    {
        Self::new(clock, start_ts).with_drift_observer(observer)
    }

    pub fn with_drift_observer<O>(self, observer: O) -> Self
    where
        O: DriftObserver + 'static,
    {
        self.with_shared_drift_observer(Arc::new(observer))
    }

    /// Attaches an observer that is also held elsewhere, typically an
    /// `Arc<DriftReporter>` shared by several sequencers.
    pub fn with_shared_drift_observer(mut self, observer: Arc<dyn DriftObserver>) -> Self {
        self.on_drift = Some(observer);
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<SequencerMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    #[inline]
    fn synthesize(&self, last: i64, raw: i64) -> i64 {
        let synthesized = last.wrapping_add(1);
        tracing::trace!(synthesized, raw, "clock did not advance, synthesizing");
        if let Some(ref metrics) = self.metrics {
            metrics.record_drift(synthesized, raw);
        }
        if let Some(ref observer) = self.on_drift {
            observer.on_drift(synthesized, raw);
        }
        synthesized
    }
}

impl TimestampSequencer for Monostamp {
    fn next(&self) -> i64 {
        loop {
            let last = self.last_issued.load(Ordering::Acquire);
            let raw = self.clock.now();
            let ts = if raw <= last {
                self.synthesize(last, raw)
            } else {
                raw
            };

            // A failed exchange means another caller issued past `last`;
            // start over with a fresh floor and a fresh clock reading.
            match self
                .last_issued
                .compare_exchange(last, ts, Ordering::AcqRel, Ordering::Acquire)
            {
                Ok(_) => {
                    if let Some(ref metrics) = self.metrics {
                        metrics.record_issued();
                    }
                    return ts;
                }
                Err(_) => {
                    if let Some(ref metrics) = self.metrics {
                        metrics.record_cas_retry();
                    }
                }
            }
        }
    }

    fn last_issued(&self) -> i64 {
        self.last_issued.load(Ordering::Acquire)
    }
}

impl fmt::Debug for Monostamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Monostamp")
            .field("last_issued", &self.last_issued.load(Ordering::Relaxed))
            .field("observes_drift", &self.on_drift.is_some())
            .field("records_metrics", &self.metrics.is_some())
            .finish()
    }
}
