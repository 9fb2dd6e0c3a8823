/// Issues strictly increasing timestamps.
///
/// # Invariants
/// - `ts[n+1] > ts[n]` for every pair of successful calls, across all threads
/// - Never fails: a stalled or reversed clock is absorbed by synthesis
/// - Lock-free in the hot path
pub trait TimestampSequencer: Send + Sync {
    /// Returns the next timestamp.
    /// Each call MUST return a value greater than any previous call.
    fn next(&self) -> i64;

    /// Returns the last issued timestamp (or the floor) without advancing.
    fn last_issued(&self) -> i64;
}
