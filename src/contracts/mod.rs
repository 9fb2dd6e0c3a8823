pub mod clock;
pub mod drift;
pub mod error;
pub mod sequence;

pub use clock::Clock;
pub use drift::DriftObserver;
pub use error::{ConfigError, MonostampError};
pub use sequence::TimestampSequencer;
