use std::fmt;
use std::sync::Arc;

use crate::contracts::DriftObserver;
use crate::metrics::ReporterMetrics;
use crate::sync::{AtomicI64, Ordering};

/// Rate-limited gate in front of a drift callback.
///
/// A report reaches the callback only if `synthesized - raw >= threshold`
/// and at least `interval` raw-clock units have passed since the last
/// delivered report. Concurrent reports race for the window with a single
/// compare-and-swap; losers are dropped, not retried.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use monostamp::{clock, DriftReporter, Monostamp, TimestampSequencer};
///
/// let reporter = Arc::new(DriftReporter::new(1_000_000, 1_000_000_000, |s: i64, r: i64| {
///     eprintln!("clock lags issued timestamps by {}ns", s - r);
/// }));
/// let stamps = Monostamp::new(clock::unix_nano, 0).with_shared_drift_observer(reporter);
/// stamps.next();
/// ```
pub struct DriftReporter {
    threshold: i64,
    interval: i64,
    last_reported: AtomicI64,
    callback: Box<dyn DriftObserver>,
    metrics: Option<Arc<ReporterMetrics>>,
}

impl DriftReporter {
    /// Creates a reporter whose window mark starts at 0.
    pub fn new<F>(threshold: i64, interval: i64, callback: F) -> Self
    where
        F: DriftObserver + 'static,
    {
        Self {
            threshold,
            interval,
            last_reported: AtomicI64::new(0),
            callback: Box::new(callback),
            metrics: None,
        }
    }

    /// Seeds the window mark. Useful when the raw clock starts near or
    /// below 0, where the default mark would hold back the first report.
    pub fn with_initial_mark(self, mark: i64) -> Self {
        self.last_reported.store(mark, Ordering::Release);
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<ReporterMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Offers a `(synthesized, raw)` pair to the gate.
    pub fn report(&self, synthesized: i64, raw: i64) {
        if synthesized.saturating_sub(raw) < self.threshold {
            if let Some(ref metrics) = self.metrics {
                metrics.record_below_threshold();
            }
            return;
        }

        let prev_mark = self.last_reported.load(Ordering::Acquire);
        if raw < prev_mark.saturating_add(self.interval) {
            if let Some(ref metrics) = self.metrics {
                metrics.record_suppressed_by_interval();
            }
            return;
        }

        if self
            .last_reported
            .compare_exchange(prev_mark, raw, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            if let Some(ref metrics) = self.metrics {
                metrics.record_lost_race();
            }
            return;
        }

        tracing::debug!(
            synthesized,
            raw,
            drift = synthesized.saturating_sub(raw),
            "drift report delivered"
        );
        if let Some(ref metrics) = self.metrics {
            metrics.record_report();
        }
        self.callback.on_drift(synthesized, raw);
    }

    /// Raw clock value of the last delivered report, or the initial mark.
    pub fn last_reported(&self) -> i64 {
        self.last_reported.load(Ordering::Acquire)
    }

    pub fn threshold(&self) -> i64 {
        self.threshold
    }

    pub fn interval(&self) -> i64 {
        self.interval
    }
}

impl DriftObserver for DriftReporter {
    #[inline]
    fn on_drift(&self, synthesized: i64, raw: i64) {
        self.report(synthesized, raw)
    }
}

impl fmt::Debug for DriftReporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DriftReporter")
            .field("threshold", &self.threshold)
            .field("interval", &self.interval)
            .field("last_reported", &self.last_reported.load(Ordering::Relaxed))
            .finish()
    }
}

#[cfg(all(test, not(loom)))]
mod tests {
    use std::sync::atomic::{AtomicI64 as StdAtomicI64, AtomicUsize, Ordering as StdOrdering};

    use super::*;
    use crate::contracts::TimestampSequencer;
    use crate::Monostamp;

    /// Reporter whose callback stores the last delivered drift, or -1.
    fn recording_reporter(threshold: i64, interval: i64) -> (DriftReporter, Arc<StdAtomicI64>) {
        let drift = Arc::new(StdAtomicI64::new(-1));
        let seen = Arc::clone(&drift);
        let reporter = DriftReporter::new(threshold, interval, move |s: i64, r: i64| {
            seen.store(s.wrapping_sub(r), StdOrdering::Relaxed);
        });
        (reporter, drift)
    }

    fn take(drift: &StdAtomicI64) -> i64 {
        drift.swap(-1, StdOrdering::Relaxed)
    }

    #[test]
    fn reports_only_real_drift() {
        let (reporter, drift) = recording_reporter(1, 1);

        reporter.report(1, 1);
        assert_eq!(take(&drift), -1);

        reporter.report(5, 1);
        assert_eq!(take(&drift), 4);

        reporter.report(6, 6);
        assert_eq!(take(&drift), -1);
    }

    #[test]
    fn threshold_filters_small_gaps() {
        let (reporter, drift) = recording_reporter(2, 1);

        reporter.report(1, 1);
        assert_eq!(take(&drift), -1);

        reporter.report(5, 1);
        assert_eq!(take(&drift), 4);

        reporter.report(7, 6);
        assert_eq!(take(&drift), -1);
    }

    #[test]
    fn threshold_is_inclusive() {
        let (reporter, drift) = recording_reporter(3, 1);
        reporter.report(4, 2);
        assert_eq!(take(&drift), -1);
        reporter.report(5, 2);
        assert_eq!(take(&drift), 3);
    }

    #[test]
    fn interval_spaces_reports() {
        let (reporter, drift) = recording_reporter(1, 2);

        reporter.report(10, 10);
        assert_eq!(take(&drift), -1);

        reporter.report(15, 11);
        assert_eq!(take(&drift), 4);

        reporter.report(16, 12);
        assert_eq!(take(&drift), -1);

        // 13 == 11 + 2: the window boundary itself fires
        reporter.report(17, 13);
        assert_eq!(take(&drift), 4);
    }

    #[test]
    fn suppressed_reports_do_not_move_the_mark() {
        let (reporter, drift) = recording_reporter(1, 10);

        reporter.report(30, 20);
        assert_eq!(take(&drift), 10);
        assert_eq!(reporter.last_reported(), 20);

        reporter.report(40, 29);
        assert_eq!(take(&drift), -1);
        assert_eq!(reporter.last_reported(), 20);

        reporter.report(40, 30);
        assert_eq!(take(&drift), 10);
        assert_eq!(reporter.last_reported(), 30);
    }

    #[test]
    fn default_mark_holds_back_early_raw_values() {
        let (reporter, drift) = recording_reporter(1, 5);
        reporter.report(10, 4);
        assert_eq!(take(&drift), -1);
        assert_eq!(reporter.last_reported(), 0);
    }

    #[test]
    fn initial_mark_seeds_the_window() {
        let (reporter, drift) = recording_reporter(1, 5);
        let reporter = reporter.with_initial_mark(i64::MIN);
        reporter.report(10, -1_000);
        assert_eq!(take(&drift), 1_010);
        assert_eq!(reporter.last_reported(), -1_000);
    }

    #[test]
    fn extreme_values_do_not_overflow() {
        let (reporter, drift) = recording_reporter(1, i64::MAX);
        reporter.report(i64::MAX, i64::MIN);
        assert_eq!(take(&drift), -1);

        let (reporter, drift) = recording_reporter(i64::MIN, 0);
        reporter.report(i64::MIN, i64::MAX);
        assert_eq!(take(&drift), 1);
    }

    #[test]
    fn accessors_expose_configuration() {
        let reporter = DriftReporter::new(3, 7, |_: i64, _: i64| {});
        assert_eq!(reporter.threshold(), 3);
        assert_eq!(reporter.interval(), 7);
        assert_eq!(reporter.last_reported(), 0);
    }

    #[test]
    fn metrics_count_each_gate_outcome() {
        let metrics = Arc::new(ReporterMetrics::default());
        let reporter =
            DriftReporter::new(2, 5, |_: i64, _: i64| {}).with_metrics(Arc::clone(&metrics));

        reporter.report(1, 1); // below threshold
        reporter.report(10, 2); // 2 < 0 + 5
        reporter.report(10, 5); // delivered
        reporter.report(12, 6); // 6 < 5 + 5

        assert_eq!(metrics.below_threshold_total.load(StdOrdering::Relaxed), 1);
        assert_eq!(
            metrics
                .suppressed_by_interval_total
                .load(StdOrdering::Relaxed),
            2
        );
        assert_eq!(metrics.reports_total.load(StdOrdering::Relaxed), 1);
        assert_eq!(metrics.lost_race_total.load(StdOrdering::Relaxed), 0);
    }

    #[test]
    fn plugs_into_sequencer_as_observer() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counted = Arc::clone(&calls);
        let reporter = DriftReporter::new(1, 1, move |_: i64, _: i64| {
            counted.fetch_add(1, StdOrdering::Relaxed);
        });
        // A frozen clock at 10: every call after the first drifts.
        let stamps = Monostamp::with_observer(|| 10i64, 0, reporter);

        for _ in 0..5 {
            stamps.next();
        }

        // Raw stays at 10, so only the first drift event opens a window.
        assert_eq!(calls.load(StdOrdering::Relaxed), 1);
        assert_eq!(stamps.last_issued(), 14);
    }
}
