//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{FuelType, Instant, StationRecord};

/// Request to list stations.
///
/// Also the query string of the index page, where every field is optional
/// and pre-selects the form.
#[derive(Debug, Default, Deserialize)]
pub struct StationSearchRequest {
    /// Province id, e.g. "28". Required.
    pub province: Option<String>,

    /// Municipality id, e.g. "4354". Narrows the search when present.
    pub municipality: Option<String>,

    /// Price field name of the wanted fuel, e.g. "Precio Gasoleo A"
    pub fuel: Option<String>,

    /// Checkbox value; "on", "true" or "1" restricts to open stations
    pub open: Option<String>,
}

/// A station in search results.
#[derive(Debug, Serialize)]
pub struct StationResult {
    /// Ministry station id ("IDEESS")
    pub id: Option<String>,

    /// Brand shown on the forecourt sign
    pub brand: Option<String>,

    pub address: Option<String>,
    pub municipality: Option<String>,
    pub province: Option<String>,

    /// Price of the selected fuel as the API formats it ("1,459")
    pub price: Option<String>,

    /// Raw opening hours text
    pub schedule: String,

    /// Whether the station is open at the search instant
    pub is_open: bool,
}

impl StationResult {
    /// Create from a station record, evaluated at `now`.
    pub fn from_record(record: &StationRecord, fuel: Option<FuelType>, now: Instant) -> Self {
        Self {
            id: record.id().map(str::to_string),
            brand: record.brand().map(str::to_string),
            address: record.address().map(str::to_string),
            municipality: record.municipality().map(str::to_string),
            province: record.province().map(str::to_string),
            price: fuel
                .and_then(|f| record.price(f.key()))
                .map(str::to_string),
            schedule: record.schedule_raw().to_string(),
            is_open: record.is_open(now),
        }
    }
}

/// Response for a station search.
#[derive(Debug, Serialize)]
pub struct StationSearchResponse {
    /// The area searched, e.g. "province 28"
    pub scope: String,

    /// Price field filtered on, if any
    pub fuel: Option<String>,

    /// Whether only open stations were kept
    pub open_now: bool,

    /// The instant opening hours were evaluated at, e.g. "V 21:45"
    pub evaluated_at: String,

    /// Matching stations, in API order
    pub stations: Vec<StationResult>,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Interpret an HTML checkbox value.
///
/// Browsers send "on" for a ticked box with no explicit value; API callers
/// tend to send "true" or "1". Anything else, including absence, is false.
pub fn parse_flag(value: Option<&str>) -> bool {
    value.is_some_and(|v| {
        let v = v.trim();
        ["on", "true", "1"]
            .iter()
            .any(|accepted| v.eq_ignore_ascii_case(accepted))
    })
}

/// Treat an empty or whitespace-only form field as absent.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
