#![no_main]

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use libfuzzer_sys::fuzz_target;
use monostamp::DriftReporter;

fuzz_target!(|data: &[u8]| {
    // Arbitrary threshold, interval and report pairs, including extremes.
    let words: Vec<i64> = data
        .chunks_exact(8)
        .map(|chunk| i64::from_le_bytes(chunk.try_into().unwrap()))
        .collect();
    if words.len() < 4 {
        return;
    }

    let last_delivered = Arc::new(AtomicI64::new(i64::MIN));
    let seen = Arc::clone(&last_delivered);
    let reporter = DriftReporter::new(words[0], words[1], move |_: i64, raw: i64| {
        seen.store(raw, Ordering::Relaxed);
    });

    // Should never panic, and the mark only changes on delivery.
    for pair in words[2..].chunks_exact(2) {
        let before = reporter.last_reported();
        reporter.report(pair[0], pair[1]);
        let after = reporter.last_reported();
        if after != before {
            assert_eq!(after, pair[1]);
            assert_eq!(last_delivered.load(Ordering::Relaxed), pair[1]);
        }
    }
});
