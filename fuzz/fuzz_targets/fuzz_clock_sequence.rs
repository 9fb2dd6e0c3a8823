#![no_main]

use std::sync::atomic::{AtomicUsize, Ordering};

use libfuzzer_sys::fuzz_target;
use monostamp::{Monostamp, TimestampSequencer};

fuzz_target!(|data: &[u8]| {
    // First 8 bytes seed the floor, the rest become raw clock readings.
    if data.len() < 16 {
        return;
    }
    let (head, tail) = data.split_at(8);
    let start = i64::from_le_bytes(head.try_into().unwrap()) >> 2;
    let readings: Vec<i64> = tail
        .chunks_exact(8)
        .map(|chunk| i64::from_le_bytes(chunk.try_into().unwrap()) >> 2)
        .collect();
    if readings.is_empty() {
        return;
    }

    let calls = readings.len();
    let idx = AtomicUsize::new(0);
    let stamps = Monostamp::new(
        move || readings[idx.fetch_add(1, Ordering::Relaxed) % readings.len()],
        start,
    );

    // Must never panic, and must never go backward, whatever the clock says.
    let mut prev = start;
    for _ in 0..calls {
        let next = stamps.next();
        assert!(next > prev, "{} issued after {}", next, prev);
        prev = next;
    }
});
