use thiserror::Error;

use crate::domain::error::DomainError;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Malformed request: empty catalog, treatment fraction outside (0, 1),
    /// or a partition with an empty side.
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    /// Groups too small to analyze, or a standard error that cannot be formed.
    #[error("insufficient data: {reason}")]
    InsufficientData { reason: String },
}

impl Error {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            reason: reason.into(),
        }
    }

    pub(crate) fn insufficient(reason: impl Into<String>) -> Self {
        Self::InsufficientData {
            reason: reason.into(),
        }
    }

    /// True when the caller sent a malformed request (400-style), false when
    /// the request was well-formed but the data cannot support it (422-style).
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        match self {
            Self::Config(_) | Self::InvalidConfiguration { .. } => true,
            Self::Domain(err) => !matches!(err, DomainError::EmptyGroup { .. }),
            Self::InsufficientData { .. } => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
