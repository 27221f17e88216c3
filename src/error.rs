//! Error types for agreement scoring and study configuration

use thiserror::Error;

/// Errors that can occur while scoring agreement or comparing distributions
#[derive(Debug, Error)]
pub enum AgreementError {
    /// Sequences or score vectors that must be aligned are not.
    ///
    /// This is a programming or configuration error, never a data condition.
    #[error("Misaligned inputs: {0}")]
    MisalignedInputs(String),

    /// A ratio statistic had a zero denominator (e.g. an empty valid subset)
    #[error("Undefined statistic: {0}")]
    UndefinedStatistic(String),

    /// A corpus or method was requested that the study does not carry
    #[error("Unknown source: {0}")]
    UnknownSource(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors raised while loading or validating a study file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid study: {0}")]
    Invalid(String),
}

/// Result type for agreement operations
pub type AgreementResult<T> = Result<T, AgreementError>;

impl AgreementError {
    pub(crate) fn length_mismatch(what: &str, expected: usize, found: usize) -> Self {
        Self::MisalignedInputs(format!(
            "{}: expected length {}, found {}",
            what, expected, found
        ))
    }
}
