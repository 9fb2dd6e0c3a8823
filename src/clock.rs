//! Raw system clock readings at fixed resolutions.
//!
//! Each helper is a plain `fn() -> i64` and can be handed straight to
//! [`Monostamp::new`](crate::Monostamp::new) as its clock. None of them is
//! monotonic; that is the sequencer's job.

use std::fmt;
use std::str::FromStr;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::contracts::{Clock, ConfigError};

/// Signed offset of `now` from the Unix epoch, converted by `to_units`.
/// Pre-epoch instants come back negative. Out-of-range values saturate.
#[inline]
fn since_epoch(to_units: fn(Duration) -> u128) -> i64 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(after) => i64::try_from(to_units(after)).unwrap_or(i64::MAX),
        Err(e) => i64::try_from(to_units(e.duration()))
            .map(|v| -v)
            .unwrap_or(i64::MIN),
    }
}

/// Seconds since the Unix epoch.
pub fn unix() -> i64 {
    since_epoch(|d| u128::from(d.as_secs()))
}

/// Milliseconds since the Unix epoch.
pub fn unix_milli() -> i64 {
    since_epoch(|d| d.as_millis())
}

/// Microseconds since the Unix epoch.
pub fn unix_micro() -> i64 {
    since_epoch(|d| d.as_micros())
}

/// Nanoseconds since the Unix epoch.
pub fn unix_nano() -> i64 {
    since_epoch(|d| d.as_nanos())
}

/// Resolution of a raw system clock, selectable at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClockUnit {
    Seconds,
    Millis,
    Micros,
    #[default]
    Nanos,
}

impl ClockUnit {
    /// Reads the system clock in this unit.
    #[inline]
    pub fn read(self) -> i64 {
        match self {
            ClockUnit::Seconds => unix(),
            ClockUnit::Millis => unix_milli(),
            ClockUnit::Micros => unix_micro(),
            ClockUnit::Nanos => unix_nano(),
        }
    }

    /// Number of units in one second.
    pub fn per_second(self) -> i64 {
        match self {
            ClockUnit::Seconds => 1,
            ClockUnit::Millis => 1_000,
            ClockUnit::Micros => 1_000_000,
            ClockUnit::Nanos => 1_000_000_000,
        }
    }

    /// Short suffix used in logs and metric labels.
    pub fn as_str(self) -> &'static str {
        match self {
            ClockUnit::Seconds => "s",
            ClockUnit::Millis => "ms",
            ClockUnit::Micros => "us",
            ClockUnit::Nanos => "ns",
        }
    }
}

impl Clock for ClockUnit {
    #[inline]
    fn now(&self) -> i64 {
        self.read()
    }
}

impl fmt::Display for ClockUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClockUnit {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "s" | "sec" | "secs" | "seconds" => Ok(ClockUnit::Seconds),
            "ms" | "millis" | "milliseconds" => Ok(ClockUnit::Millis),
            "us" | "micros" | "microseconds" => Ok(ClockUnit::Micros),
            "ns" | "nanos" | "nanoseconds" => Ok(ClockUnit::Nanos),
            _ => Err(ConfigError::InvalidClockUnit(s.to_string())),
        }
    }
}
