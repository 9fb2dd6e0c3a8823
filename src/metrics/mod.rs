//! Observability metrics for monostamp.
//!
//! Optional: a sequencer or reporter without attached metrics records
//! nothing. All metrics use lock-free atomics.

pub mod histogram;
pub mod registry;

pub use histogram::Histogram;
pub use registry::{MetricsRegistry, ReporterMetrics, SequencerMetrics};
