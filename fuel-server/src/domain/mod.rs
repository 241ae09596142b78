//! Domain types for the fuel station finder.
//!
//! This module holds the opening-hours engine (weekdays, times, schedules)
//! and the validated types for the data the fuel price API returns. Types
//! that wrap identifiers check them at construction time; the schedule
//! parser instead degrades gracefully, because upstream opening hours are
//! free text of varying quality.

mod area;
mod error;
mod fuel;
mod schedule;
mod station;
mod time;
mod weekday;

pub use area::{InvalidAreaId, Municipality, MunicipalityId, Province, ProvinceId};
pub use error::ClauseError;
pub use fuel::FuelType;
pub use schedule::{ALWAYS_OPEN_MARKER, Schedule, WeeklyRule};
pub use station::{
    ADDRESS_FIELD, BRAND_FIELD, ID_FIELD, LOCALITY_FIELD, MUNICIPALITY_FIELD, POSTCODE_FIELD,
    PROVINCE_FIELD, SCHEDULE_FIELD, StationRecord,
};
pub use time::{Instant, MINUTES_PER_DAY, MinuteOfDay, TimeError};
pub use weekday::WeekDay;
