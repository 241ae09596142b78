//! Domain error types.
//!
//! These errors describe why a piece of upstream data could not be
//! interpreted. None of them is fatal: callers skip the offending item and
//! carry on with the most conservative reading.

use super::TimeError;

/// Why a single schedule clause was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClauseError {
    /// No `": "` between the days and the times
    #[error("missing ': ' between days and times")]
    MissingSeparator,

    /// A day code outside `L,M,X,J,V,S,D`
    #[error("unknown day code '{0}'")]
    UnknownDay(String),

    /// More than two day codes, e.g. "L-M-X"
    #[error("invalid day range '{0}'")]
    InvalidDayRange(String),

    /// Times not written as "start-end"
    #[error("invalid time range '{0}'")]
    InvalidTimeRange(String),

    /// A clock time that is not a valid HH:MM
    #[error(transparent)]
    InvalidTime(#[from] TimeError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ClauseError::MissingSeparator;
        assert_eq!(err.to_string(), "missing ': ' between days and times");

        let err = ClauseError::UnknownDay("Z".into());
        assert_eq!(err.to_string(), "unknown day code 'Z'");

        let err = ClauseError::InvalidDayRange("L-M-X".into());
        assert_eq!(err.to_string(), "invalid day range 'L-M-X'");

        let err = ClauseError::InvalidTimeRange("08:00".into());
        assert_eq!(err.to_string(), "invalid time range '08:00'");
    }

    #[test]
    fn time_error_is_transparent() {
        let time_err = crate::domain::MinuteOfDay::parse_hhmm("25:00").unwrap_err();
        let err = ClauseError::from(time_err.clone());
        assert_eq!(err.to_string(), time_err.to_string());
    }
}
