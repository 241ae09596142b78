//! Askama templates for the web frontend.

use askama::Template;

use crate::domain::{FuelType, Instant, Municipality, Province, StationRecord};

/// Shown in place of a missing price.
pub const NO_PRICE: &str = "N/A";

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Home page with the search form.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub provinces: Vec<OptionView>,
    pub municipalities: Vec<OptionView>,
    pub fuels: Vec<OptionView>,
    pub open_now: bool,
    /// Rendered station list of a submitted search
    pub results: Option<String>,
    /// Why a submitted search failed
    pub error: Option<String>,
}

// ============================================================================
// Fragment Templates (AJAX responses, no base.html)
// ============================================================================

/// Station list fragment (search results).
#[derive(Template)]
#[template(path = "station_list.html")]
pub struct StationListTemplate {
    pub stations: Vec<StationView>,
    /// Display name of the selected fuel, if any
    pub fuel_label: Option<String>,
    /// When opening hours were evaluated, e.g. "V 21:45"
    pub evaluated_at: String,
}

impl StationListTemplate {
    /// Heading for the price line, e.g. "Fuel Price (Diesel A)".
    pub fn price_heading(&self) -> String {
        match &self.fuel_label {
            Some(label) => format!("Fuel Price ({label})"),
            None => "Fuel Price".to_string(),
        }
    }
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// One `<option>` of a select.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionView {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl OptionView {
    pub fn from_province(province: &Province, selected: Option<&str>) -> Self {
        Self::new(province.id.as_str(), &province.name, selected)
    }

    pub fn from_municipality(municipality: &Municipality, selected: Option<&str>) -> Self {
        Self::new(municipality.id.as_str(), &municipality.name, selected)
    }

    pub fn from_fuel(fuel: FuelType, selected: Option<&str>) -> Self {
        Self::new(fuel.key(), fuel.label(), selected)
    }

    fn new(value: &str, label: &str, selected: Option<&str>) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
            selected: selected == Some(value),
        }
    }
}

/// Station view model for templates.
#[derive(Debug, Clone)]
pub struct StationView {
    pub brand: String,
    pub address: String,
    pub price: String,
    pub schedule: String,
    pub is_open: bool,
}

impl StationView {
    /// Create from a station record, evaluated at `now`.
    ///
    /// The address line joins street, municipality and province, skipping
    /// whichever are missing.
    pub fn from_record(record: &StationRecord, fuel: Option<FuelType>, now: Instant) -> Self {
        let address = [record.address(), record.municipality(), record.province()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(", ");

        Self {
            brand: record.brand().unwrap_or_default().to_string(),
            address,
            price: fuel
                .and_then(|f| record.price(f.key()))
                .unwrap_or(NO_PRICE)
                .to_string(),
            schedule: record.schedule_raw().to_string(),
            is_open: record.is_open(now),
        }
    }

    /// Badge text for the open/closed state.
    pub fn status(&self) -> &'static str {
        if self.is_open { "Open" } else { "Closed" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MinuteOfDay, ProvinceId, WeekDay};

    fn at(weekday: WeekDay, hour: u16, minute: u16) -> Instant {
        Instant::new(weekday, MinuteOfDay::from_hm(hour, minute).unwrap())
    }

    fn repsol() -> StationRecord {
        StationRecord::new()
            .with_field("Rótulo", "REPSOL")
            .with_field("Dirección", "AVENIDA DE AMERICA, 12")
            .with_field("Municipio", "Madrid")
            .with_field("Provincia", "MADRID")
            .with_field("Horario", "L-S: 07:00-22:00")
            .with_field("Precio Gasoleo A", "1,459")
    }

    #[test]
    fn station_view_with_price() {
        let view = StationView::from_record(
            &repsol(),
            Some(FuelType::DieselA),
            at(WeekDay::Monday, 9, 0),
        );

        assert_eq!(view.brand, "REPSOL");
        assert_eq!(view.address, "AVENIDA DE AMERICA, 12, Madrid, MADRID");
        assert_eq!(view.price, "1,459");
        assert_eq!(view.schedule, "L-S: 07:00-22:00");
        assert!(view.is_open);
        assert_eq!(view.status(), "Open");
    }

    #[test]
    fn station_view_without_price() {
        let view = StationView::from_record(
            &repsol(),
            Some(FuelType::DieselPremium),
            at(WeekDay::Sunday, 9, 0),
        );

        assert_eq!(view.price, NO_PRICE);
        assert!(!view.is_open);
        assert_eq!(view.status(), "Closed");

        let view = StationView::from_record(&repsol(), None, at(WeekDay::Sunday, 9, 0));
        assert_eq!(view.price, NO_PRICE);
    }

    #[test]
    fn station_view_skips_missing_address_parts() {
        let record = StationRecord::new()
            .with_field("Dirección", "CTRA. N-III KM 14")
            .with_field("Provincia", "MADRID");
        let view = StationView::from_record(&record, None, at(WeekDay::Monday, 9, 0));

        assert_eq!(view.address, "CTRA. N-III KM 14, MADRID");
        assert_eq!(view.brand, "");
    }

    #[test]
    fn option_selection() {
        let madrid = Province {
            id: ProvinceId::parse("28").unwrap(),
            name: "MADRID".to_string(),
        };

        assert!(OptionView::from_province(&madrid, Some("28")).selected);
        assert!(!OptionView::from_province(&madrid, Some("46")).selected);
        assert!(!OptionView::from_province(&madrid, None).selected);

        let fuel = OptionView::from_fuel(FuelType::Gasoline98E5, Some("Precio Gasolina 98 E5"));
        assert_eq!(fuel.label, "Gasoline 98 E5");
        assert!(fuel.selected);
    }

    #[test]
    fn render_station_list() {
        let template = StationListTemplate {
            stations: vec![StationView::from_record(
                &repsol(),
                Some(FuelType::DieselA),
                at(WeekDay::Friday, 23, 0),
            )],
            fuel_label: Some("Diesel A".to_string()),
            evaluated_at: "V 23:00".to_string(),
        };

        let html = template.render().unwrap();
        assert!(html.contains("REPSOL"));
        assert!(html.contains("Fuel Price (Diesel A)"));
        assert!(html.contains("1,459"));
        assert!(html.contains("Closed"));
    }

    #[test]
    fn render_empty_station_list() {
        let template = StationListTemplate {
            stations: vec![],
            fuel_label: None,
            evaluated_at: "L 09:00".to_string(),
        };

        let html = template.render().unwrap();
        assert!(html.contains("No stations found."));
    }

    #[test]
    fn render_index() {
        let template = IndexTemplate {
            provinces: vec![OptionView::from_province(
                &Province {
                    id: ProvinceId::parse("28").unwrap(),
                    name: "MADRID".to_string(),
                },
                Some("28"),
            )],
            municipalities: vec![],
            fuels: FuelType::ALL
                .into_iter()
                .map(|f| OptionView::from_fuel(f, None))
                .collect(),
            open_now: true,
            results: None,
            error: None,
        };

        let html = template.render().unwrap();
        assert!(html.contains("MADRID"));
        assert!(html.contains("Precio Gasoleo Premium"));
        assert!(html.contains("Diesel Premium"));
        assert!(html.contains(r#"<p id="form-error" class="error" hidden></p>"#));
    }

    #[test]
    fn render_index_with_results() {
        let results = StationListTemplate {
            stations: vec![],
            fuel_label: None,
            evaluated_at: "L 09:00".to_string(),
        }
        .render()
        .unwrap();

        let template = IndexTemplate {
            provinces: vec![],
            municipalities: vec![],
            fuels: vec![],
            open_now: false,
            results: Some(results),
            error: Some("Please select a province.".to_string()),
        };

        let html = template.render().unwrap();
        assert!(html.contains(r#"<p class="evaluated-at">Opening hours checked at L 09:00.</p>"#));
        assert!(html.contains(r#"<p id="form-error" class="error">Please select a province.</p>"#));
    }
}
