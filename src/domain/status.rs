//! Outcome of the most recent refresh attempt.

use crate::error::TransportError;

/// Payload of a successful refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuccessStatus {
    /// Watermark reported by the feed for the merged batch.
    pub last_update: i64,
    /// Wall-clock millis when the refresh completed.
    pub timestamp: i64,
}

/// Result of the last refresh, shared by every query until the next one.
///
/// `last_update` survives failures so staleness and `since` cursors keep
/// working while the feed is down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshStatus {
    Success {
        last_update: i64,
        timestamp: i64,
    },
    Error {
        error: TransportError,
        last_update: i64,
        timestamp: i64,
    },
}

impl RefreshStatus {
    #[must_use]
    pub const fn last_update(&self) -> i64 {
        match self {
            Self::Success { last_update, .. } | Self::Error { last_update, .. } => *last_update,
        }
    }

    #[must_use]
    pub const fn timestamp(&self) -> i64 {
        match self {
            Self::Success { timestamp, .. } | Self::Error { timestamp, .. } => *timestamp,
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    /// Split into the success payload or the carried transport error.
    pub fn into_result(self) -> Result<SuccessStatus, TransportError> {
        match self {
            Self::Success {
                last_update,
                timestamp,
            } => Ok(SuccessStatus {
                last_update,
                timestamp,
            }),
            Self::Error { error, .. } => Err(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_cover_both_variants() {
        let ok = RefreshStatus::Success {
            last_update: 10,
            timestamp: 20,
        };
        let err = RefreshStatus::Error {
            error: TransportError::Request("boom".into()),
            last_update: 10,
            timestamp: 30,
        };
        assert_eq!(ok.last_update(), err.last_update());
        assert_eq!(err.timestamp(), 30);
        assert!(ok.is_success());
        assert!(err.is_error());
    }

    #[test]
    fn into_result_preserves_error() {
        let err = RefreshStatus::Error {
            error: TransportError::Status {
                status: 503,
                url: "http://feed".into(),
            },
            last_update: 0,
            timestamp: 1,
        };
        assert_eq!(
            err.into_result(),
            Err(TransportError::Status {
                status: 503,
                url: "http://feed".into()
            })
        );
    }
}
