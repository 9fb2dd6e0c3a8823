use thiserror::Error;

#[derive(Error, Debug)]
pub enum MonostampError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Duplicate timestamp issued: {0}")]
    DuplicateTimestamp(i64),

    #[error("Timestamp out of order: {next} issued after {prev}")]
    OutOfOrder { prev: i64, next: i64 },
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid clock unit: {0} (expected one of s, ms, us, ns)")]
    InvalidClockUnit(String),
}
