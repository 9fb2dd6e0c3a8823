/// Receives `(synthesized, raw)` pairs whenever a raw clock reading failed
/// to advance past the last issued timestamp.
///
/// Called synchronously on the issuing thread with no locks held, so
/// implementations may be re-entered concurrently.
pub trait DriftObserver: Send + Sync {
    fn on_drift(&self, synthesized: i64, raw: i64);
}

impl<F> DriftObserver for F
where
    F: Fn(i64, i64) + Send + Sync,
{
    #[inline]
    fn on_drift(&self, synthesized: i64, raw: i64) {
        self(synthesized, raw)
    }
}
