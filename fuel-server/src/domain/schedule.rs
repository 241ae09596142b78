//! Weekly opening hours: parsing and "is it open now?" evaluation.
//!
//! Stations publish their hours in a compact notation, one string per
//! station:
//!
//! ```text
//! L-V: 08:00-22:00;S-D: 10:00-14:00
//! ```
//!
//! Each `;`-separated clause pairs a day range with a time range. Either
//! range may wrap: `V-L` runs Friday to Monday over the weekend, and
//! `22:00-06:00` runs overnight. The literal `L-D: 24H` means open around
//! the clock every day.
//!
//! Upstream data quality varies, so parsing never fails as a whole. A clause
//! that cannot be read is logged and skipped; the rest of the schedule still
//! applies. A schedule with no readable clauses is never open.

use tracing::debug;

use super::error::ClauseError;
use super::{Instant, MinuteOfDay, WeekDay};

/// Marker for stations open all day, every day.
pub const ALWAYS_OPEN_MARKER: &str = "L-D: 24H";

/// Time part of a clause meaning the whole day, as in `"S: 24H"`.
const FULL_DAY: &str = "24H";

/// Closing time written as midnight at the end of the day, as in
/// `"06:00-24:00"`. Only valid as an end bound.
const END_OF_DAY: &str = "24:00";

/// One "days: times" clause.
///
/// The day range and time range are each cyclic and independent. A rule
/// matches an instant when the weekday falls in the day range AND the
/// minute falls in the time range, both bounds inclusive. A time range
/// whose start equals its end covers the whole day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeeklyRule {
    pub start_day: WeekDay,
    pub end_day: WeekDay,
    pub start: MinuteOfDay,
    pub end: MinuteOfDay,
}

impl WeeklyRule {
    /// Create a rule from its bounds.
    pub fn new(start_day: WeekDay, end_day: WeekDay, start: MinuteOfDay, end: MinuteOfDay) -> Self {
        Self {
            start_day,
            end_day,
            start,
            end,
        }
    }

    /// Parse one clause, e.g. `"L-V: 08:00-22:00"` or `"S: 10:00-14:00"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use fuel_server::domain::{WeekDay, WeeklyRule};
    ///
    /// let rule = WeeklyRule::parse_clause("V-L: 22:00-06:00").unwrap();
    /// assert_eq!(rule.start_day, WeekDay::Friday);
    /// assert_eq!(rule.end_day, WeekDay::Monday);
    /// assert_eq!(rule.start.to_string(), "22:00");
    ///
    /// assert!(WeeklyRule::parse_clause("Z-L: 10:00-18:00").is_err());
    /// ```
    pub fn parse_clause(clause: &str) -> Result<Self, ClauseError> {
        let (days, times) = clause
            .trim()
            .split_once(": ")
            .ok_or(ClauseError::MissingSeparator)?;

        let (start_day, end_day) = parse_day_range(days)?;
        let (start, end) = parse_time_range(times)?;

        Ok(Self::new(start_day, end_day, start, end))
    }

    /// Whether this rule covers the given instant.
    pub fn matches(&self, at: Instant) -> bool {
        at.weekday.is_within(self.start_day, self.end_day)
            && at.time.is_within(self.start, self.end)
    }
}

/// Parse "L" or "L-V" into inclusive start and end days.
fn parse_day_range(days: &str) -> Result<(WeekDay, WeekDay), ClauseError> {
    let codes: Vec<&str> = days.split('-').collect();
    let lookup = |code: &str| {
        WeekDay::from_code(code).ok_or_else(|| ClauseError::UnknownDay(code.trim().to_string()))
    };

    match codes.as_slice() {
        [single] => {
            let day = lookup(*single)?;
            Ok((day, day))
        }
        [start, end] => Ok((lookup(*start)?, lookup(*end)?)),
        _ => Err(ClauseError::InvalidDayRange(days.trim().to_string())),
    }
}

/// Parse "HH:MM-HH:MM" (or "24H") into inclusive start and end times.
fn parse_time_range(times: &str) -> Result<(MinuteOfDay, MinuteOfDay), ClauseError> {
    let times = times.trim();
    if times.eq_ignore_ascii_case(FULL_DAY) {
        return Ok((MinuteOfDay::MIDNIGHT, MinuteOfDay::LAST));
    }

    let (start, end) = times
        .split_once('-')
        .ok_or_else(|| ClauseError::InvalidTimeRange(times.to_string()))?;

    let start = MinuteOfDay::parse_hhmm(start)?;
    let end = match end.trim() {
        END_OF_DAY => MinuteOfDay::LAST,
        end => MinuteOfDay::parse_hhmm(end)?,
    };

    Ok((start, end))
}

/// A station's parsed weekly opening hours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Schedule {
    /// Open around the clock, every day.
    AlwaysOpen,
    /// Open whenever any rule matches. Rules keep their source order.
    Rules(Vec<WeeklyRule>),
}

impl Schedule {
    /// Parse a raw schedule string.
    ///
    /// Never fails: malformed clauses are skipped, and an empty or entirely
    /// malformed string gives a schedule that is never open.
    ///
    /// # Examples
    ///
    /// ```
    /// use fuel_server::domain::{Instant, MinuteOfDay, Schedule, WeekDay};
    ///
    /// let schedule = Schedule::parse("L-V: 08:00-22:00;S-D: 10:00-14:00");
    /// let at = |day, hhmm| Instant::new(day, MinuteOfDay::parse_hhmm(hhmm).unwrap());
    ///
    /// assert!(schedule.is_open(at(WeekDay::Saturday, "11:00")));
    /// assert!(!schedule.is_open(at(WeekDay::Saturday, "15:00")));
    /// assert!(schedule.is_open(at(WeekDay::Wednesday, "21:00")));
    ///
    /// assert!(Schedule::parse("L-D: 24H").is_always_open());
    /// assert!(Schedule::parse("").rules().is_empty());
    /// ```
    pub fn parse(raw: &str) -> Self {
        if raw.contains(ALWAYS_OPEN_MARKER) {
            return Schedule::AlwaysOpen;
        }

        let rules = raw
            .split(';')
            .filter(|clause| !clause.trim().is_empty())
            .filter_map(|clause| match WeeklyRule::parse_clause(clause) {
                Ok(rule) => Some(rule),
                Err(error) => {
                    debug!(clause, %error, "skipping malformed schedule clause");
                    None
                }
            })
            .collect();

        Schedule::Rules(rules)
    }

    /// Whether the schedule is open at the given instant.
    pub fn is_open(&self, at: Instant) -> bool {
        match self {
            Schedule::AlwaysOpen => true,
            Schedule::Rules(rules) => rules.iter().any(|rule| rule.matches(at)),
        }
    }

    /// Whether this is the around-the-clock schedule.
    pub fn is_always_open(&self) -> bool {
        matches!(self, Schedule::AlwaysOpen)
    }

    /// The parsed rules. Empty for [`Schedule::AlwaysOpen`].
    pub fn rules(&self) -> &[WeeklyRule] {
        match self {
            Schedule::AlwaysOpen => &[],
            Schedule::Rules(rules) => rules,
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_day() -> impl Strategy<Value = WeekDay> {
        (0u8..7).prop_map(|i| WeekDay::from_index(i).unwrap())
    }

    fn arb_time() -> impl Strategy<Value = MinuteOfDay> {
        (0u16..1440).prop_map(|m| MinuteOfDay::new(m).unwrap())
    }

    fn arb_instant() -> impl Strategy<Value = Instant> {
        (arb_day(), arb_time()).prop_map(|(d, t)| Instant::new(d, t))
    }

    fn clause(start_day: WeekDay, end_day: WeekDay, start: MinuteOfDay, end: MinuteOfDay) -> String {
        format!("{start_day}-{end_day}: {start}-{end}")
    }

    proptest! {
        /// Parsing never panics, whatever the input
        #[test]
        fn parse_never_panics(raw in ".{0,64}") {
            let _ = Schedule::parse(&raw);
        }

        /// Clause-shaped noise never panics either
        #[test]
        fn parse_clause_noise_never_panics(raw in "[LMXJVSDZ0-9:; -]{0,40}") {
            let _ = Schedule::parse(&raw);
        }

        /// The all-week marker opens every instant, wherever it appears
        #[test]
        fn marker_always_open(prefix in "[^;]{0,10}", at in arb_instant()) {
            let raw = format!("{prefix};L-D: 24H");
            prop_assert!(Schedule::parse(&raw).is_open(at));
        }

        /// Single-day clauses with start before end are open exactly on
        /// that day between the bounds
        #[test]
        fn single_day_clause_exact(
            day in arb_day(),
            a in arb_time(),
            b in arb_time(),
            at in arb_instant(),
        ) {
            prop_assume!(a < b);
            let schedule = Schedule::parse(&format!("{day}: {a}-{b}"));
            let expected = at.weekday == day && a <= at.time && at.time <= b;
            prop_assert_eq!(schedule.is_open(at), expected);
        }

        /// Formatted rules parse back to the same rule
        #[test]
        fn formatted_clause_parses(
            sd in arb_day(), ed in arb_day(), s in arb_time(), e in arb_time(),
        ) {
            let rule = WeeklyRule::parse_clause(&clause(sd, ed, s, e)).unwrap();
            prop_assert_eq!(rule, WeeklyRule::new(sd, ed, s, e));
        }

        /// A schedule is open iff some clause alone is open
        #[test]
        fn clauses_combine_with_or(
            rules in prop::collection::vec((arb_day(), arb_day(), arb_time(), arb_time()), 0..5),
            at in arb_instant(),
        ) {
            let clauses: Vec<String> = rules
                .iter()
                .map(|&(sd, ed, s, e)| clause(sd, ed, s, e))
                .collect();
            let combined = Schedule::parse(&clauses.join(";"));
            let any = clauses.iter().any(|c| Schedule::parse(c).is_open(at));
            prop_assert_eq!(combined.is_open(at), any);
        }

        /// Day containment ignores the time range and vice versa
        #[test]
        fn day_and_time_tests_are_independent(
            sd in arb_day(), ed in arb_day(), s in arb_time(), e in arb_time(),
            at in arb_instant(),
        ) {
            let rule = WeeklyRule::new(sd, ed, s, e);
            let expected = at.weekday.is_within(sd, ed) && at.time.is_within(s, e);
            prop_assert_eq!(rule.matches(at), expected);
        }
    }
}
