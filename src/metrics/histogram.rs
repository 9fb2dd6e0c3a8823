//! Thread-safe histogram for drift gaps.
//!
//! Buckets are in raw clock units (whatever the sequencer's clock returns),
//! spaced roughly logarithmically so the same layout is useful for a
//! seconds clock and a nanoseconds clock alike.

use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};

/// Number of finite buckets.
pub const BUCKET_COUNT: usize = 12;

/// Fixed upper bounds, in raw clock units.
pub const DRIFT_BUCKETS: [u64; BUCKET_COUNT] = [
    1,
    2,
    5,
    10,
    25,
    50,
    100,
    250,
    1_000,
    10_000,
    100_000,
    1_000_000,
];

/// Lock-free cumulative histogram.
///
/// # Example
///
/// ```
/// use monostamp::metrics::Histogram;
///
/// let histogram = Histogram::new();
/// histogram.observe(3); // synthesized value ran 3 units ahead of the clock
///
/// let (sum, count, buckets) = histogram.snapshot();
/// assert_eq!(count, 1);
/// assert_eq!(sum, 3);
/// assert_eq!(buckets[2], 1); // le="5"
/// ```
pub struct Histogram {
    sum: AtomicU64,
    count: AtomicU64,
    /// Cumulative: each bucket includes every smaller one.
    buckets: [AtomicU64; BUCKET_COUNT],
}

impl Default for Histogram {
    fn default() -> Self {
        Self::new()
    }
}

impl Histogram {
    /// Creates a new empty histogram.
    #[allow(clippy::declare_interior_mutable_const)]
    pub fn new() -> Self {
        const ZERO: AtomicU64 = AtomicU64::new(0);
        Self {
            sum: AtomicU64::new(0),
            count: AtomicU64::new(0),
            buckets: [ZERO; BUCKET_COUNT],
        }
    }

    /// Records one observation.
    ///
    /// Uses `Ordering::Relaxed`; metrics are not part of the ordering contract.
    #[inline]
    pub fn observe(&self, value: u64) {
        self.sum.fetch_add(value, Ordering::Relaxed);
        self.count.fetch_add(1, Ordering::Relaxed);

        for (i, &boundary) in DRIFT_BUCKETS.iter().enumerate() {
            if value <= boundary {
                self.buckets[i].fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    /// Returns `(sum, count, cumulative_bucket_counts)`.
    pub fn snapshot(&self) -> (u64, u64, [u64; BUCKET_COUNT]) {
        let sum = self.sum.load(Ordering::Relaxed);
        let count = self.count.load(Ordering::Relaxed);

        let mut buckets = [0u64; BUCKET_COUNT];
        for (i, bucket) in self.buckets.iter().enumerate() {
            buckets[i] = bucket.load(Ordering::Relaxed);
        }

        (sum, count, buckets)
    }

    #[inline]
    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn sum(&self) -> u64 {
        self.sum.load(Ordering::Relaxed)
    }

    /// Formats the histogram in Prometheus exposition format.
    ///
    /// # Arguments
    /// * `name` - The metric name (e.g., "monostamp_drift_gap")
    /// * `help` - The help text for the metric
    pub fn format_prometheus(&self, name: &str, help: &str) -> String {
        let (sum, count, buckets) = self.snapshot();

        let mut output = String::with_capacity(1024);

        let _ = writeln!(output, "# HELP {} {}", name, help);
        let _ = writeln!(output, "# TYPE {} histogram", name);

        for (i, &boundary) in DRIFT_BUCKETS.iter().enumerate() {
            let _ = writeln!(
                output,
                "{}_bucket{{le=\"{}\"}} {}",
                name, boundary, buckets[i]
            );
        }

        let _ = writeln!(output, "{}_bucket{{le=\"+Inf\"}} {}", name, count);
        let _ = writeln!(output, "{}_sum {}", name, sum);
        let _ = writeln!(output, "{}_count {}", name, count);

        output
    }
}
