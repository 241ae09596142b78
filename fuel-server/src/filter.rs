//! Station filtering.
//!
//! Narrows a station list down to the ones a user can actually use: those
//! selling the chosen fuel and, optionally, open right now. The filter is a
//! pure function of its inputs; "now" is passed in by the caller.

use crate::domain::{Instant, StationRecord};

/// Criteria for narrowing a station list.
///
/// Both predicates are optional and combine with AND. A filter with
/// neither keeps every station.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StationFilter {
    /// Price field a station must have filled in.
    pub fuel: Option<String>,
    /// Keep only stations open at the evaluation instant.
    pub open_now: bool,
}

impl StationFilter {
    /// A filter that keeps everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Require a non-empty price for the given fuel key.
    ///
    /// An empty key is the same as no fuel requirement.
    pub fn with_fuel(mut self, fuel_key: impl Into<String>) -> Self {
        let key = fuel_key.into();
        self.fuel = (!key.is_empty()).then_some(key);
        self
    }

    /// Require the station to be open at the evaluation instant.
    pub fn with_open_now(mut self, open_now: bool) -> Self {
        self.open_now = open_now;
        self
    }

    /// Whether a single station passes the filter at `now`.
    pub fn matches(&self, station: &StationRecord, now: Instant) -> bool {
        let has_fuel = self
            .fuel
            .as_deref()
            .is_none_or(|key| station.has_fuel(key));

        // Only parse the schedule when it matters
        has_fuel && (!self.open_now || station.is_open(now))
    }

    /// Keep the stations that pass, in their original order.
    ///
    /// # Examples
    ///
    /// ```
    /// use fuel_server::domain::{Instant, MinuteOfDay, StationRecord, WeekDay};
    /// use fuel_server::filter::StationFilter;
    ///
    /// let stations = vec![
    ///     StationRecord::new()
    ///         .with_field("Horario", "L-V: 08:00-22:00")
    ///         .with_field("Precio Gasoleo A", "1,459"),
    ///     StationRecord::new()
    ///         .with_field("Horario", "L-D: 24H")
    ///         .with_field("Precio Gasoleo A", ""),
    /// ];
    /// let sunday_noon = Instant::new(WeekDay::Sunday, MinuteOfDay::from_hm(12, 0).unwrap());
    ///
    /// let diesel = StationFilter::new().with_fuel("Precio Gasoleo A");
    /// assert_eq!(diesel.apply(&stations, sunday_noon).len(), 1);
    ///
    /// let open = StationFilter::new().with_open_now(true);
    /// assert_eq!(open.apply(&stations, sunday_noon), vec![&stations[1]]);
    /// ```
    pub fn apply<'a>(&self, stations: &'a [StationRecord], now: Instant) -> Vec<&'a StationRecord> {
        stations
            .iter()
            .filter(|station| self.matches(station, now))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FuelType, MinuteOfDay, SCHEDULE_FIELD, WeekDay};

    const DIESEL: &str = "Precio Gasoleo A";

    fn at(day: WeekDay, h: u16, m: u16) -> Instant {
        Instant::new(day, MinuteOfDay::from_hm(h, m).unwrap())
    }

    fn station(schedule: &str, diesel: Option<&str>) -> StationRecord {
        let record = StationRecord::new().with_field(SCHEDULE_FIELD, schedule);
        match diesel {
            Some(price) => record.with_field(DIESEL, price),
            None => record,
        }
    }

    #[test]
    fn no_predicates_keeps_everything() {
        let stations = vec![station("", None), station("garbage", Some(""))];
        let kept = StationFilter::new().apply(&stations, at(WeekDay::Monday, 3, 0));
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn empty_input() {
        let filter = StationFilter::new().with_fuel(DIESEL).with_open_now(true);
        assert!(filter.apply(&[], at(WeekDay::Monday, 12, 0)).is_empty());
    }

    #[test]
    fn empty_fuel_key_is_no_requirement() {
        let filter = StationFilter::new().with_fuel("");
        assert_eq!(filter.fuel, None);
        assert!(filter.matches(&station("", None), at(WeekDay::Monday, 12, 0)));
    }

    #[test]
    fn empty_price_is_excluded() {
        let stations = vec![
            station("L-D: 24H", Some("")),
            station("L-D: 24H", Some("1,399")),
            station("L-D: 24H", None),
        ];
        let kept = StationFilter::new()
            .with_fuel(DIESEL)
            .apply(&stations, at(WeekDay::Monday, 12, 0));
        assert_eq!(kept, vec![&stations[1]]);
    }

    #[test]
    fn open_now_uses_schedule() {
        let stations = vec![
            station("L-V: 08:00-22:00;S-D: 10:00-14:00", None),
            station("L: 22:00-06:00", None),
            station("", None),
        ];
        let filter = StationFilter::new().with_open_now(true);

        assert_eq!(
            filter.apply(&stations, at(WeekDay::Saturday, 11, 0)),
            vec![&stations[0]]
        );
        assert_eq!(
            filter.apply(&stations, at(WeekDay::Monday, 23, 0)),
            vec![&stations[1]]
        );
        assert_eq!(
            filter.apply(&stations, at(WeekDay::Monday, 21, 0)),
            vec![&stations[0]]
        );
        assert!(filter.apply(&stations, at(WeekDay::Saturday, 15, 0)).is_empty());
    }

    #[test]
    fn predicates_combine_with_and() {
        let open_with_diesel = station("L-D: 24H", Some("1,459"));
        let open_without = station("L-D: 24H", None);
        let closed_with_diesel = station("S: 09:00-10:00", Some("1,459"));
        let stations = vec![open_with_diesel, open_without, closed_with_diesel];

        let filter = StationFilter::new()
            .with_fuel(FuelType::DieselA.key())
            .with_open_now(true);
        let kept = filter.apply(&stations, at(WeekDay::Wednesday, 12, 0));
        assert_eq!(kept, vec![&stations[0]]);
    }

    #[test]
    fn open_now_false_ignores_schedule() {
        let filter = StationFilter::new().with_open_now(false);
        assert!(filter.matches(&station("", None), at(WeekDay::Sunday, 4, 0)));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::{MinuteOfDay, SCHEDULE_FIELD, WeekDay};
    use proptest::prelude::*;

    const DIESEL: &str = "Precio Gasoleo A";

    fn arb_instant() -> impl Strategy<Value = Instant> {
        (0u8..7, 0u16..1440).prop_map(|(d, m)| {
            Instant::new(WeekDay::from_index(d).unwrap(), MinuteOfDay::new(m).unwrap())
        })
    }

    fn arb_station() -> impl Strategy<Value = StationRecord> {
        (
            prop_oneof![
                Just("L-D: 24H".to_string()),
                Just(String::new()),
                "[LMXJVSD](-[LMXJVSD])?: [0-2][0-9]:[0-5][0-9]-[0-2][0-9]:[0-5][0-9]",
            ],
            prop::option::of(prop_oneof![Just(String::new()), "[0-9],[0-9]{3}"]),
            "[A-Z]{2,8}",
        )
            .prop_map(|(schedule, diesel, brand)| {
                let record = StationRecord::new()
                    .with_field(SCHEDULE_FIELD, schedule)
                    .with_field("Rótulo", brand);
                match diesel {
                    Some(price) => record.with_field(DIESEL, price),
                    None => record,
                }
            })
    }

    fn arb_filter() -> impl Strategy<Value = StationFilter> {
        (any::<bool>(), any::<bool>()).prop_map(|(fuel, open)| {
            let filter = StationFilter::new().with_open_now(open);
            if fuel { filter.with_fuel(DIESEL) } else { filter }
        })
    }

    proptest! {
        /// Without predicates the output is the input
        #[test]
        fn no_predicates_is_identity(
            stations in prop::collection::vec(arb_station(), 0..20),
            now in arb_instant(),
        ) {
            let kept = StationFilter::new().apply(&stations, now);
            prop_assert_eq!(kept, stations.iter().collect::<Vec<_>>());
        }

        /// Output is an order-preserving subsequence of the input
        #[test]
        fn output_is_subsequence(
            stations in prop::collection::vec(arb_station(), 0..20),
            filter in arb_filter(),
            now in arb_instant(),
        ) {
            let kept = filter.apply(&stations, now);
            let mut rest = stations.iter();
            for station in kept {
                prop_assert!(rest.any(|s| std::ptr::eq(s, station)));
            }
        }

        /// Every kept station passes and every dropped station fails
        #[test]
        fn kept_iff_matches(
            stations in prop::collection::vec(arb_station(), 0..20),
            filter in arb_filter(),
            now in arb_instant(),
        ) {
            let kept = filter.apply(&stations, now);
            let expected = stations.iter().filter(|s| filter.matches(s, now)).count();
            prop_assert_eq!(kept.len(), expected);
            for station in kept {
                prop_assert!(filter.matches(station, now));
            }
        }

        /// Fuel-filtered results all have a price
        #[test]
        fn fuel_filter_requires_price(
            stations in prop::collection::vec(arb_station(), 0..20),
            now in arb_instant(),
        ) {
            let kept = StationFilter::new().with_fuel(DIESEL).apply(&stations, now);
            for station in kept {
                prop_assert!(station.price(DIESEL).is_some());
            }
        }
    }
}
