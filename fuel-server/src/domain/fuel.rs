//! The fuel types a user can filter by.

use std::fmt;

/// A fuel type offered in the search form.
///
/// Each fuel corresponds to a price field in the station records returned
/// by the API. A station sells the fuel when that field is present and
/// non-empty.
///
/// # Examples
///
/// ```
/// use fuel_server::domain::FuelType;
///
/// let diesel = FuelType::from_key("Precio Gasoleo A").unwrap();
/// assert_eq!(diesel, FuelType::DieselA);
/// assert_eq!(diesel.label(), "Diesel A");
/// assert!(FuelType::from_key("Precio Hidrogeno").is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FuelType {
    Gasoline95E5,
    Gasoline98E5,
    DieselA,
    DieselPremium,
}

impl FuelType {
    /// All fuel types, in the order the form lists them.
    pub const ALL: [FuelType; 4] = [
        FuelType::Gasoline95E5,
        FuelType::Gasoline98E5,
        FuelType::DieselA,
        FuelType::DieselPremium,
    ];

    /// The station record field holding this fuel's price.
    pub fn key(self) -> &'static str {
        match self {
            FuelType::Gasoline95E5 => "Precio Gasolina 95 E5",
            FuelType::Gasoline98E5 => "Precio Gasolina 98 E5",
            FuelType::DieselA => "Precio Gasoleo A",
            FuelType::DieselPremium => "Precio Gasoleo Premium",
        }
    }

    /// Human-readable name.
    pub fn label(self) -> &'static str {
        match self {
            FuelType::Gasoline95E5 => "Gasoline 95 E5",
            FuelType::Gasoline98E5 => "Gasoline 98 E5",
            FuelType::DieselA => "Diesel A",
            FuelType::DieselPremium => "Diesel Premium",
        }
    }

    /// Look up a fuel type by its record field name.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|fuel| fuel.key() == key)
    }
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
