use std::collections::HashSet;
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use tracing_subscriber::EnvFilter;

use monostamp::metrics::MetricsRegistry;
use monostamp::{MonostampError, StampConfig, TimestampSequencer};

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Logs go to stderr so stdout carries only the metrics exposition.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("monostamp=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let config = StampConfig::from_env();
    tracing::info!(
        clock_unit = %config.clock_unit,
        start_ts = config.start_ts,
        drift_threshold = config.drift_threshold,
        report_interval = config.report_interval,
        threads = config.threads,
        per_thread = config.per_thread,
        "monostamp starting"
    );

    let registry = MetricsRegistry::new();

    let unit = config.clock_unit;
    let reporter = config
        .reporter(move |synthesized: i64, raw: i64| {
            tracing::warn!(
                synthesized,
                raw,
                drift = synthesized.saturating_sub(raw),
                unit = %unit,
                "Issued timestamps are running ahead of the clock"
            );
        })
        .with_metrics(Arc::clone(&registry.reporter));

    let stamps = Arc::new(
        config
            .sequencer()
            .with_shared_drift_observer(Arc::new(reporter))
            .with_metrics(Arc::clone(&registry.sequencer)),
    );

    let started = Instant::now();
    let handles: Vec<_> = (0..config.threads)
        .map(|_| {
            let stamps = Arc::clone(&stamps);
            let count = config.per_thread;
            thread::spawn(move || (0..count).map(|_| stamps.next()).collect::<Vec<i64>>())
        })
        .collect();

    let mut seen = HashSet::with_capacity(config.threads.saturating_mul(config.per_thread));
    for handle in handles {
        let issued = handle.join().map_err(|_| "worker thread panicked")?;

        if let Some(pair) = issued.windows(2).find(|pair| pair[1] <= pair[0]) {
            return Err(MonostampError::OutOfOrder {
                prev: pair[0],
                next: pair[1],
            }
            .into());
        }
        for ts in issued {
            if !seen.insert(ts) {
                return Err(MonostampError::DuplicateTimestamp(ts).into());
            }
        }
    }

    tracing::info!(
        issued = seen.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        last_issued = stamps.last_issued(),
        "All timestamps unique and ordered per thread"
    );

    print!("{}", registry.format_prometheus());

    Ok(())
}
