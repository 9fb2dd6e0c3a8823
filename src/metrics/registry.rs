//! Metrics registry for the sequencer and the drift reporter.
//!
//! Everything here is a relaxed atomic counter so that recording never adds
//! ordering constraints to the hot path it observes.

use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::Histogram;

/// Central registry for all monostamp metrics.
#[derive(Default)]
pub struct MetricsRegistry {
    /// Timestamp issuance and drift events
    pub sequencer: Arc<SequencerMetrics>,
    /// Drift reporter gate outcomes
    pub reporter: Arc<ReporterMetrics>,
}

impl MetricsRegistry {
    pub fn new() -> Self {
        Self {
            sequencer: Arc::new(SequencerMetrics::default()),
            reporter: Arc::new(ReporterMetrics::default()),
        }
    }

    /// Formats all metrics in Prometheus exposition format.
    pub fn format_prometheus(&self) -> String {
        let mut output = String::with_capacity(4096);
        output.push_str(&self.sequencer.format_prometheus());
        output.push_str(&self.reporter.format_prometheus());
        output
    }
}

fn write_counter(output: &mut String, name: &str, help: &str, value: u64) {
    let _ = writeln!(output, "# HELP {} {}", name, help);
    let _ = writeln!(output, "# TYPE {} counter", name);
    let _ = writeln!(output, "{} {}", name, value);
    output.push('\n');
}

/// Metrics recorded by [`Monostamp`](crate::Monostamp).
#[derive(Default)]
pub struct SequencerMetrics {
    /// Timestamps successfully issued
    pub issued_total: AtomicU64,
    /// Times the raw clock was at or behind the last issued value
    pub drift_events_total: AtomicU64,
    /// Compare-and-swap attempts lost to a concurrent caller
    pub cas_retries_total: AtomicU64,
    /// Distribution of `synthesized - raw` on drift events
    pub drift_gap: Histogram,
}

impl SequencerMetrics {
    #[inline]
    pub fn record_issued(&self) {
        self.issued_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a drift event and the gap between synthesized and raw values.
    #[inline]
    pub fn record_drift(&self, synthesized: i64, raw: i64) {
        self.drift_events_total.fetch_add(1, Ordering::Relaxed);
        let gap = synthesized.saturating_sub(raw);
        self.drift_gap.observe(u64::try_from(gap).unwrap_or(0));
    }

    #[inline]
    pub fn record_cas_retry(&self) {
        self.cas_retries_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn format_prometheus(&self) -> String {
        let mut output = String::with_capacity(2048);

        write_counter(
            &mut output,
            "monostamp_issued_total",
            "Timestamps issued by the sequencer",
            self.issued_total.load(Ordering::Relaxed),
        );
        write_counter(
            &mut output,
            "monostamp_drift_events_total",
            "Raw clock readings at or behind the last issued timestamp",
            self.drift_events_total.load(Ordering::Relaxed),
        );
        write_counter(
            &mut output,
            "monostamp_cas_retries_total",
            "Sequencer compare-and-swap attempts lost to concurrent callers",
            self.cas_retries_total.load(Ordering::Relaxed),
        );

        output.push_str(&self.drift_gap.format_prometheus(
            "monostamp_drift_gap",
            "Synthesized minus raw timestamp on drift events, in clock units",
        ));
        output.push('\n');

        output
    }
}

/// Metrics recorded by [`DriftReporter`](crate::DriftReporter).
#[derive(Default)]
pub struct ReporterMetrics {
    /// Reports that won the window and invoked the callback
    pub reports_total: AtomicU64,
    /// Reports whose gap was under the threshold
    pub below_threshold_total: AtomicU64,
    /// Reports that arrived before the interval elapsed
    pub suppressed_by_interval_total: AtomicU64,
    /// Reports that passed both gates but lost the mark update
    pub lost_race_total: AtomicU64,
}

impl ReporterMetrics {
    #[inline]
    pub fn record_report(&self) {
        self.reports_total.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_below_threshold(&self) {
        self.below_threshold_total.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_suppressed_by_interval(&self) {
        self.suppressed_by_interval_total
            .fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_lost_race(&self) {
        self.lost_race_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn format_prometheus(&self) -> String {
        let mut output = String::with_capacity(1024);

        write_counter(
            &mut output,
            "monostamp_drift_reports_total",
            "Drift reports delivered to the callback",
            self.reports_total.load(Ordering::Relaxed),
        );
        write_counter(
            &mut output,
            "monostamp_drift_below_threshold_total",
            "Drift reports dropped because the gap was under the threshold",
            self.below_threshold_total.load(Ordering::Relaxed),
        );
        write_counter(
            &mut output,
            "monostamp_drift_suppressed_by_interval_total",
            "Drift reports dropped because the reporting interval had not elapsed",
            self.suppressed_by_interval_total.load(Ordering::Relaxed),
        );
        write_counter(
            &mut output,
            "monostamp_drift_lost_race_total",
            "Drift reports dropped after losing a concurrent mark update",
            self.lost_race_total.load(Ordering::Relaxed),
        );

        output
    }
}
