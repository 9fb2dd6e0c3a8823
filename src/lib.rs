//! Strictly increasing timestamps over clocks that stall, repeat, or run
//! backward, plus a rate-limited reporter for the drift this causes.
//!
//! Both primitives are lock-free: each holds a single atomic and advances
//! it with compare-and-swap.

pub mod clock;
pub mod config;
pub mod contracts;
pub mod drift;
pub mod metrics;
pub mod sequencer;
mod sync;

pub use clock::ClockUnit;
pub use config::StampConfig;
pub use contracts::{Clock, ConfigError, DriftObserver, MonostampError, TimestampSequencer};
pub use drift::DriftReporter;
pub use sequencer::Monostamp;
