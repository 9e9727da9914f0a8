use thiserror::Error;

use crate::domain::error::BoundsError;

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

/// Failures reported by the vehicle feed transport.
///
/// Cloneable so that a single failed refresh can be handed to every caller
/// that was waiting on it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("feed returned HTTP {status}: {url}")]
    Status { status: u16, url: String },

    #[error("feed request failed: {0}")]
    Request(String),

    #[error("failed to decode feed response: {0}")]
    Decode(String),

    #[error("invalid feed URL: {0}")]
    Url(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return Self::Decode(err.to_string());
        }
        match err.status() {
            Some(status) => Self::Status {
                status: status.as_u16(),
                url: err.url().map(ToString::to_string).unwrap_or_default(),
            },
            None => Self::Request(err.to_string()),
        }
    }
}

impl From<url::ParseError> for TransportError {
    fn from(err: url::ParseError) -> Self {
        Self::Url(err.to_string())
    }
}

/// What kind of lookup came back empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundKind {
    Vehicle,
    Trip,
}

impl std::fmt::Display for NotFoundKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Vehicle => f.write_str("vehicle"),
            Self::Trip => f.write_str("trip"),
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("{kind} not found: {id}")]
    NotFound { kind: NotFoundKind, id: String },

    #[error(transparent)]
    InvalidArgument(#[from] BoundsError),

    #[error("upstream feed unavailable: {0}")]
    Upstream(#[from] TransportError),

    #[error("internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// HTTP-style status code a caller can map this error onto.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::InvalidArgument(_) => 400,
            Self::Upstream(_) => 502,
            Self::Internal(_) | Self::Config(_) | Self::Json(_) | Self::Io(_) => 500,
        }
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
