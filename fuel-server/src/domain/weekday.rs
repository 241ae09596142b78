//! Day-of-week type with the Spanish single-letter codes used by the
//! Ministry fuel price API.

use std::fmt;

/// A day of the week, numbered from Sunday (0) to Saturday (6).
///
/// The upstream schedule notation writes days as single letters:
/// `L` (lunes), `M` (martes), `X` (miércoles), `J` (jueves),
/// `V` (viernes), `S` (sábado), `D` (domingo).
///
/// # Examples
///
/// ```
/// use fuel_server::domain::WeekDay;
///
/// assert_eq!(WeekDay::from_code("X"), Some(WeekDay::Wednesday));
/// assert_eq!(WeekDay::Sunday.index(), 0);
/// assert_eq!(WeekDay::Saturday.code(), 'S');
///
/// // Only the seven upper-case codes are recognised
/// assert!(WeekDay::from_code("Z").is_none());
/// assert!(WeekDay::from_code("l").is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WeekDay {
    Sunday = 0,
    Monday = 1,
    Tuesday = 2,
    Wednesday = 3,
    Thursday = 4,
    Friday = 5,
    Saturday = 6,
}

impl WeekDay {
    /// All days, Sunday first.
    pub const ALL: [WeekDay; 7] = [
        WeekDay::Sunday,
        WeekDay::Monday,
        WeekDay::Tuesday,
        WeekDay::Wednesday,
        WeekDay::Thursday,
        WeekDay::Friday,
        WeekDay::Saturday,
    ];

    /// Look up a day from its single-letter code.
    ///
    /// Surrounding whitespace is ignored.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "L" => Some(WeekDay::Monday),
            "M" => Some(WeekDay::Tuesday),
            "X" => Some(WeekDay::Wednesday),
            "J" => Some(WeekDay::Thursday),
            "V" => Some(WeekDay::Friday),
            "S" => Some(WeekDay::Saturday),
            "D" => Some(WeekDay::Sunday),
            _ => None,
        }
    }

    /// The single-letter code for this day.
    pub fn code(self) -> char {
        match self {
            WeekDay::Monday => 'L',
            WeekDay::Tuesday => 'M',
            WeekDay::Wednesday => 'X',
            WeekDay::Thursday => 'J',
            WeekDay::Friday => 'V',
            WeekDay::Saturday => 'S',
            WeekDay::Sunday => 'D',
        }
    }

    /// Index within the week, Sunday = 0.
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Day for a Sunday-based index, if in range.
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// Whether this day lies in the cyclic range `start..=end`.
    ///
    /// When `end` comes before `start` the range wraps over the end of the
    /// week, so `V-L` covers Friday, Saturday, Sunday and Monday.
    pub fn is_within(self, start: WeekDay, end: WeekDay) -> bool {
        if start <= end {
            start <= self && self <= end
        } else {
            self >= start || self <= end
        }
    }
}

impl From<chrono::Weekday> for WeekDay {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => WeekDay::Monday,
            chrono::Weekday::Tue => WeekDay::Tuesday,
            chrono::Weekday::Wed => WeekDay::Wednesday,
            chrono::Weekday::Thu => WeekDay::Thursday,
            chrono::Weekday::Fri => WeekDay::Friday,
            chrono::Weekday::Sat => WeekDay::Saturday,
            chrono::Weekday::Sun => WeekDay::Sunday,
        }
    }
}

impl fmt::Display for WeekDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_map_monday_to_sunday() {
        let codes = ["L", "M", "X", "J", "V", "S", "D"];
        let expected = [
            WeekDay::Monday,
            WeekDay::Tuesday,
            WeekDay::Wednesday,
            WeekDay::Thursday,
            WeekDay::Friday,
            WeekDay::Saturday,
            WeekDay::Sunday,
        ];
        for (code, day) in codes.iter().zip(expected) {
            assert_eq!(WeekDay::from_code(code), Some(day));
        }
    }

    #[test]
    fn code_trims_whitespace() {
        assert_eq!(WeekDay::from_code(" V "), Some(WeekDay::Friday));
    }

    #[test]
    fn unknown_codes_rejected() {
        assert!(WeekDay::from_code("").is_none());
        assert!(WeekDay::from_code("Z").is_none());
        assert!(WeekDay::from_code("LM").is_none());
        assert!(WeekDay::from_code("d").is_none());
    }

    #[test]
    fn sunday_is_zero() {
        assert_eq!(WeekDay::Sunday.index(), 0);
        assert_eq!(WeekDay::Monday.index(), 1);
        assert_eq!(WeekDay::Saturday.index(), 6);
        assert_eq!(WeekDay::from_index(0), Some(WeekDay::Sunday));
        assert_eq!(WeekDay::from_index(7), None);
    }

    #[test]
    fn from_chrono() {
        assert_eq!(WeekDay::from(chrono::Weekday::Sun), WeekDay::Sunday);
        assert_eq!(WeekDay::from(chrono::Weekday::Wed), WeekDay::Wednesday);
    }

    #[test]
    fn straight_range() {
        // L-V
        assert!(WeekDay::Monday.is_within(WeekDay::Monday, WeekDay::Friday));
        assert!(WeekDay::Wednesday.is_within(WeekDay::Monday, WeekDay::Friday));
        assert!(WeekDay::Friday.is_within(WeekDay::Monday, WeekDay::Friday));
        assert!(!WeekDay::Saturday.is_within(WeekDay::Monday, WeekDay::Friday));
        assert!(!WeekDay::Sunday.is_within(WeekDay::Monday, WeekDay::Friday));
    }

    #[test]
    fn wrapping_range() {
        // V-L crosses the end of the week
        for day in [
            WeekDay::Friday,
            WeekDay::Saturday,
            WeekDay::Sunday,
            WeekDay::Monday,
        ] {
            assert!(day.is_within(WeekDay::Friday, WeekDay::Monday), "{day:?}");
        }
        for day in [WeekDay::Tuesday, WeekDay::Wednesday, WeekDay::Thursday] {
            assert!(!day.is_within(WeekDay::Friday, WeekDay::Monday), "{day:?}");
        }
    }

    #[test]
    fn monday_to_sunday_covers_whole_week() {
        // L-D is written Monday first but Sunday is index 0, so it wraps.
        for day in WeekDay::ALL {
            assert!(day.is_within(WeekDay::Monday, WeekDay::Sunday));
        }
    }

    #[test]
    fn single_day_range() {
        assert!(WeekDay::Thursday.is_within(WeekDay::Thursday, WeekDay::Thursday));
        assert!(!WeekDay::Friday.is_within(WeekDay::Thursday, WeekDay::Thursday));
    }
}
