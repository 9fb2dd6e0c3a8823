//! Exhaustive interleaving checks.
//!
//! RUSTFLAGS="--cfg loom" cargo test --test loom_tests --release
#![cfg(loom)]

use loom::sync::atomic::{AtomicUsize, Ordering};
use loom::sync::Arc;
use loom::thread;

use monostamp::{DriftReporter, Monostamp, TimestampSequencer};

#[test]
fn frozen_clock_callers_get_distinct_consecutive_values() {
    loom::model(|| {
        let stamps = Arc::new(Monostamp::new(|| 0i64, 0));

        let other = Arc::clone(&stamps);
        let handle = thread::spawn(move || other.next());

        let mine = stamps.next();
        let theirs = handle.join().unwrap();

        let mut issued = vec![mine, theirs];
        issued.sort_unstable();
        assert_eq!(issued, vec![1, 2]);
        assert_eq!(stamps.last_issued(), 2);
    });
}

#[test]
fn racing_reports_in_one_window_deliver_once() {
    loom::model(|| {
        let calls = Arc::new(AtomicUsize::new(0));
        let counted = Arc::clone(&calls);
        let reporter = Arc::new(DriftReporter::new(1, 100, move |_: i64, _: i64| {
            counted.fetch_add(1, Ordering::Relaxed);
        }));

        let other = Arc::clone(&reporter);
        let handle = thread::spawn(move || other.report(160, 150));

        reporter.report(170, 140);
        handle.join().unwrap();

        assert_eq!(calls.load(Ordering::Relaxed), 1);
        let mark = reporter.last_reported();
        assert!(mark == 140 || mark == 150);
    });
}
