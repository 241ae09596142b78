//! Time-of-day handling for station opening hours.
//!
//! The fuel price API writes clock times as "HH:MM" strings. Opening hours
//! are weekly and carry no date, so times are kept as minutes after
//! midnight and paired with a weekday to form an [`Instant`].

use chrono::{DateTime, Datelike, Local, NaiveDateTime, TimeZone, Timelike};
use std::fmt;

use super::WeekDay;

/// Minutes in one day.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A clock time expressed as minutes after midnight, in `0..1440`.
///
/// # Examples
///
/// ```
/// use fuel_server::domain::MinuteOfDay;
///
/// let t = MinuteOfDay::parse_hhmm("14:30").unwrap();
/// assert_eq!(t.minutes(), 14 * 60 + 30);
/// assert_eq!(t.to_string(), "14:30");
///
/// // Single-digit hours are accepted, as the upstream data sometimes has them
/// assert_eq!(MinuteOfDay::parse_hhmm("7:05").unwrap().to_string(), "07:05");
///
/// assert!(MinuteOfDay::parse_hhmm("1430").is_err());
/// assert!(MinuteOfDay::parse_hhmm("25:00").is_err());
/// assert!(MinuteOfDay::parse_hhmm("12:60").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MinuteOfDay(u16);

impl MinuteOfDay {
    /// 00:00.
    pub const MIDNIGHT: MinuteOfDay = MinuteOfDay(0);

    /// 23:59, the last minute of the day.
    pub const LAST: MinuteOfDay = MinuteOfDay(MINUTES_PER_DAY - 1);

    /// Create from a minute count, if it lies within one day.
    pub fn new(minutes: u16) -> Option<Self> {
        (minutes < MINUTES_PER_DAY).then_some(Self(minutes))
    }

    /// Create from hour and minute components.
    pub fn from_hm(hour: u16, minute: u16) -> Option<Self> {
        if hour > 23 || minute > 59 {
            return None;
        }
        Some(Self(hour * 60 + minute))
    }

    /// Parse a time from "HH:MM" (or "H:MM") format.
    ///
    /// Surrounding whitespace is ignored. Hours must be 0-23 and minutes
    /// exactly two digits in 0-59.
    pub fn parse_hhmm(s: &str) -> Result<Self, TimeError> {
        let (hours, minutes) = s
            .trim()
            .split_once(':')
            .ok_or_else(|| TimeError::new("expected HH:MM format"))?;

        if hours.is_empty() || hours.len() > 2 {
            return Err(TimeError::new("hour must be one or two digits"));
        }
        let hour = parse_digits(hours.as_bytes())
            .ok_or_else(|| TimeError::new("invalid hour digits"))?;
        if hour > 23 {
            return Err(TimeError::new("hour must be 0-23"));
        }

        if minutes.len() != 2 {
            return Err(TimeError::new("minute must be two digits"));
        }
        let minute = parse_digits(minutes.as_bytes())
            .ok_or_else(|| TimeError::new("invalid minute digits"))?;
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }

        Ok(Self(hour * 60 + minute))
    }

    /// Minutes after midnight.
    pub fn minutes(self) -> u16 {
        self.0
    }

    /// Returns the hour (0-23).
    pub fn hour(self) -> u16 {
        self.0 / 60
    }

    /// Returns the minute (0-59).
    pub fn minute(self) -> u16 {
        self.0 % 60
    }

    /// Whether this time lies in the cyclic range `start..=end`.
    ///
    /// An `end` earlier than `start` wraps past midnight, so `22:00-06:00`
    /// covers late evening and early morning. Equal bounds cover the
    /// whole day.
    pub fn is_within(self, start: MinuteOfDay, end: MinuteOfDay) -> bool {
        if start == end {
            true
        } else if start < end {
            start <= self && self <= end
        } else {
            self >= start || self <= end
        }
    }
}

impl fmt::Debug for MinuteOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MinuteOfDay({:02}:{:02})", self.hour(), self.minute())
    }
}

impl fmt::Display for MinuteOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// Parse a short run of ASCII digits.
fn parse_digits(bytes: &[u8]) -> Option<u16> {
    bytes.iter().try_fold(0u16, |acc, &b| {
        let digit = (b as char).to_digit(10)?;
        Some(acc * 10 + digit as u16)
    })
}

/// A point in the week: weekday plus minute of day.
///
/// This is the only notion of "now" the opening-hours engine needs. It is
/// built from wall-clock time with no timezone conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Instant {
    pub weekday: WeekDay,
    pub time: MinuteOfDay,
}

impl Instant {
    /// Create an instant from its parts.
    pub fn new(weekday: WeekDay, time: MinuteOfDay) -> Self {
        Self { weekday, time }
    }

    /// The current local time.
    pub fn now() -> Self {
        Self::from_datetime(&Local::now())
    }

    /// Take the weekday and minute from a date-time in any timezone.
    ///
    /// The date-time's own offset is used as-is; seconds are dropped.
    pub fn from_datetime<Tz: TimeZone>(dt: &DateTime<Tz>) -> Self {
        Self::from_naive(&dt.naive_local())
    }

    /// Take the weekday and minute from a naive date-time.
    pub fn from_naive(dt: &NaiveDateTime) -> Self {
        let minutes = (dt.hour() * 60 + dt.minute()) as u16;
        Self {
            weekday: dt.weekday().into(),
            time: MinuteOfDay(minutes),
        }
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.weekday, self.time)
    }
}
