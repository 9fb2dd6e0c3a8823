/// Source of raw time readings.
///
/// Readings are in whatever unit the owner chose and may go backward,
/// stall, or repeat. Implementations must be safe to call from many
/// threads at once.
pub trait Clock: Send + Sync {
    /// Returns the current raw reading.
    fn now(&self) -> i64;
}

impl<F> Clock for F
where
    F: Fn() -> i64 + Send + Sync,
{
    #[inline]
    fn now(&self) -> i64 {
        self()
    }
}
