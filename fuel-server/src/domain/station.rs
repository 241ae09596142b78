//! Station records as returned by the fuel price API.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use super::{Instant, Schedule};

/// Field holding the opening hours string.
pub const SCHEDULE_FIELD: &str = "Horario";
/// Field holding the brand shown on the canopy.
pub const BRAND_FIELD: &str = "Rótulo";
/// Field holding the street address.
pub const ADDRESS_FIELD: &str = "Dirección";
/// Field holding the locality (town or district) name.
pub const LOCALITY_FIELD: &str = "Localidad";
/// Field holding the municipality name.
pub const MUNICIPALITY_FIELD: &str = "Municipio";
/// Field holding the province name.
pub const PROVINCE_FIELD: &str = "Provincia";
/// Field holding the postcode.
pub const POSTCODE_FIELD: &str = "C.P.";
/// Field holding the station's own id.
pub const ID_FIELD: &str = "IDEESS";

/// One station from the API, kept as an opaque map of field name to value.
///
/// The API sends every field as a string (prices use a decimal comma, e.g.
/// `"1,459"`). Other scalar values are stringified on the way in and
/// `null` fields are dropped, so lookups only ever see text.
///
/// A fuel is unavailable at a station when its price field is missing or
/// empty; both cases look the same through [`StationRecord::price`].
///
/// # Examples
///
/// ```
/// use fuel_server::domain::StationRecord;
///
/// let station: StationRecord = serde_json::from_str(r#"{
///     "Rótulo": "REPSOL",
///     "Horario": "L-D: 24H",
///     "Precio Gasoleo A": "1,459",
///     "Precio Gasolina 98 E5": ""
/// }"#).unwrap();
///
/// assert_eq!(station.brand(), Some("REPSOL"));
/// assert_eq!(station.price("Precio Gasoleo A"), Some("1,459"));
/// assert_eq!(station.price("Precio Gasolina 98 E5"), None);
/// assert_eq!(station.price("Precio Hidrogeno"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct StationRecord {
    fields: BTreeMap<String, String>,
}

impl StationRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, replacing any previous value.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Raw value of a field, if present.
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Value of a field, treating an empty string as absent.
    pub fn non_empty(&self, key: &str) -> Option<&str> {
        self.field(key).filter(|v| !v.is_empty())
    }

    /// All fields, ordered by name.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Price for a fuel key, or `None` when the station doesn't sell it.
    pub fn price(&self, fuel_key: &str) -> Option<&str> {
        self.non_empty(fuel_key)
    }

    /// Whether the station sells the fuel with the given key.
    pub fn has_fuel(&self, fuel_key: &str) -> bool {
        self.price(fuel_key).is_some()
    }

    /// The raw opening hours string; empty when the field is missing.
    pub fn schedule_raw(&self) -> &str {
        self.field(SCHEDULE_FIELD).unwrap_or_default()
    }

    /// Parse the opening hours.
    pub fn schedule(&self) -> Schedule {
        Schedule::parse(self.schedule_raw())
    }

    /// Whether the station is open at the given instant.
    pub fn is_open(&self, at: Instant) -> bool {
        self.schedule().is_open(at)
    }

    pub fn id(&self) -> Option<&str> {
        self.non_empty(ID_FIELD)
    }

    pub fn brand(&self) -> Option<&str> {
        self.non_empty(BRAND_FIELD)
    }

    pub fn address(&self) -> Option<&str> {
        self.non_empty(ADDRESS_FIELD)
    }

    pub fn locality(&self) -> Option<&str> {
        self.non_empty(LOCALITY_FIELD)
    }

    pub fn municipality(&self) -> Option<&str> {
        self.non_empty(MUNICIPALITY_FIELD)
    }

    pub fn province(&self) -> Option<&str> {
        self.non_empty(PROVINCE_FIELD)
    }

    pub fn postcode(&self) -> Option<&str> {
        self.non_empty(POSTCODE_FIELD)
    }
}

impl From<Map<String, Value>> for StationRecord {
    fn from(map: Map<String, Value>) -> Self {
        let fields = map
            .into_iter()
            .filter_map(|(key, value)| {
                let text = match value {
                    Value::Null => return None,
                    Value::String(s) => s,
                    other => other.to_string(),
                };
                Some((key, text))
            })
            .collect();
        Self { fields }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for StationRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl Serialize for StationRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}
