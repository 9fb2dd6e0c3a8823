//! Environment-driven configuration.

use crate::clock::ClockUnit;
use crate::contracts::DriftObserver;
use crate::{DriftReporter, Monostamp};

/// Settings for a sequencer, its drift reporter, and the demo workload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StampConfig {
    /// Resolution of the system clock the sequencer reads.
    pub clock_unit: ClockUnit,
    /// Floor the first issued timestamp must exceed.
    pub start_ts: i64,
    /// Minimum `synthesized - raw` gap worth reporting, in clock units.
    pub drift_threshold: i64,
    /// Minimum spacing between reports, in clock units.
    pub report_interval: i64,
    /// Worker threads the demo binary spawns.
    pub threads: usize,
    /// Timestamps each demo worker issues.
    pub per_thread: usize,
}

impl Default for StampConfig {
    fn default() -> Self {
        let clock_unit = ClockUnit::default();
        Self {
            clock_unit,
            start_ts: 0,
            drift_threshold: 1,
            report_interval: clock_unit.per_second(),
            threads: 4,
            per_thread: 100_000,
        }
    }
}

impl StampConfig {
    /// Creates a StampConfig from environment variables.
    ///
    /// Environment variables:
    /// - `MONOSTAMP_CLOCK_UNIT`: s, ms, us or ns (default: ns)
    /// - `MONOSTAMP_START_TS`: initial floor (default: 0)
    /// - `MONOSTAMP_DRIFT_THRESHOLD`: minimum reported gap in clock units (default: 1)
    /// - `MONOSTAMP_REPORT_INTERVAL_SECS`: seconds between drift reports (default: 1)
    /// - `MONOSTAMP_THREADS`: demo worker threads (default: 4)
    /// - `MONOSTAMP_PER_THREAD`: timestamps per demo worker (default: 100000)
    ///
    /// Unparseable values fall back to defaults.
    pub fn from_env() -> Self {
        let default = Self::default();

        let clock_unit = match std::env::var("MONOSTAMP_CLOCK_UNIT") {
            Ok(raw) => raw.parse().unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Ignoring MONOSTAMP_CLOCK_UNIT");
                default.clock_unit
            }),
            Err(_) => default.clock_unit,
        };

        let interval_secs: i64 = std::env::var("MONOSTAMP_REPORT_INTERVAL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|secs| *secs >= 0)
            .unwrap_or(1);

        Self {
            clock_unit,
            start_ts: std::env::var("MONOSTAMP_START_TS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.start_ts),
            drift_threshold: std::env::var("MONOSTAMP_DRIFT_THRESHOLD")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.drift_threshold),
            report_interval: interval_secs.saturating_mul(clock_unit.per_second()),
            threads: std::env::var("MONOSTAMP_THREADS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(default.threads),
            per_thread: std::env::var("MONOSTAMP_PER_THREAD")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.per_thread),
        }
    }

    /// Builds a sequencer reading the configured system clock.
    pub fn sequencer(&self) -> Monostamp {
        Monostamp::new(self.clock_unit, self.start_ts)
    }

    /// Builds a drift reporter with the configured threshold and interval.
    pub fn reporter<F>(&self, callback: F) -> DriftReporter
    where
        F: DriftObserver + 'static,
    {
        DriftReporter::new(self.drift_threshold, self.report_interval, callback)
    }
}
