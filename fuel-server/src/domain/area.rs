//! Province and municipality identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an invalid province or municipality id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind} id: {reason}")]
pub struct InvalidAreaId {
    kind: &'static str,
    reason: &'static str,
}

/// Longest id the Ministry API hands out (municipality ids run to 4 digits).
const MAX_ID_LEN: usize = 5;

fn validate(s: &str, kind: &'static str) -> Result<(), InvalidAreaId> {
    if s.is_empty() || s.len() > MAX_ID_LEN {
        return Err(InvalidAreaId {
            kind,
            reason: "must be 1 to 5 characters",
        });
    }

    if !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(InvalidAreaId {
            kind,
            reason: "must be ASCII digits",
        });
    }

    Ok(())
}

/// A province id as used by the fuel price API, e.g. `"28"` for Madrid.
///
/// Ids are short strings of ASCII digits. Leading zeros are significant
/// (`"01"` is Araba/Álava), so the id is kept as text.
///
/// # Examples
///
/// ```
/// use fuel_server::domain::ProvinceId;
///
/// let madrid = ProvinceId::parse("28").unwrap();
/// assert_eq!(madrid.as_str(), "28");
///
/// assert!(ProvinceId::parse("").is_err());
/// assert!(ProvinceId::parse("2B").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProvinceId(String);

impl ProvinceId {
    /// Parse a province id. The input must be 1-5 ASCII digits.
    pub fn parse(s: &str) -> Result<Self, InvalidAreaId> {
        validate(s, "province")?;
        Ok(Self(s.to_string()))
    }

    /// Parse after trimming surrounding whitespace.
    pub fn parse_normalized(s: &str) -> Result<Self, InvalidAreaId> {
        Self::parse(s.trim())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ProvinceId {
    type Error = InvalidAreaId;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        validate(&s, "province")?;
        Ok(Self(s))
    }
}

impl From<ProvinceId> for String {
    fn from(id: ProvinceId) -> Self {
        id.0
    }
}

impl fmt::Debug for ProvinceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProvinceId({})", self.0)
    }
}

impl fmt::Display for ProvinceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A municipality id as used by the fuel price API, e.g. `"4354"`.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MunicipalityId(String);

impl MunicipalityId {
    /// Parse a municipality id. The input must be 1-5 ASCII digits.
    pub fn parse(s: &str) -> Result<Self, InvalidAreaId> {
        validate(s, "municipality")?;
        Ok(Self(s.to_string()))
    }

    /// Parse after trimming surrounding whitespace.
    pub fn parse_normalized(s: &str) -> Result<Self, InvalidAreaId> {
        Self::parse(s.trim())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for MunicipalityId {
    type Error = InvalidAreaId;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        validate(&s, "municipality")?;
        Ok(Self(s))
    }
}

impl From<MunicipalityId> for String {
    fn from(id: MunicipalityId) -> Self {
        id.0
    }
}

impl fmt::Debug for MunicipalityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MunicipalityId({})", self.0)
    }
}

impl fmt::Display for MunicipalityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A province with its display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Province {
    pub id: ProvinceId,
    pub name: String,
}

/// A municipality with its display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Municipality {
    pub id: MunicipalityId,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_ids() {
        assert!(ProvinceId::parse("01").is_ok());
        assert!(ProvinceId::parse("52").is_ok());
        assert!(MunicipalityId::parse("4354").is_ok());
        assert!(MunicipalityId::parse("7").is_ok());
    }

    #[test]
    fn leading_zeros_kept() {
        assert_eq!(ProvinceId::parse("01").unwrap().as_str(), "01");
        assert_ne!(ProvinceId::parse("01").unwrap(), ProvinceId::parse("1").unwrap());
    }

    #[test]
    fn reject_invalid_ids() {
        assert!(ProvinceId::parse("").is_err());
        assert!(ProvinceId::parse("2B").is_err());
        assert!(ProvinceId::parse(" 28").is_err());
        assert!(MunicipalityId::parse("123456").is_err());
        assert!(MunicipalityId::parse("-1").is_err());
    }

    #[test]
    fn normalized_trims() {
        assert_eq!(
            ProvinceId::parse_normalized(" 28 ").unwrap(),
            ProvinceId::parse("28").unwrap()
        );
    }

    #[test]
    fn error_names_the_kind() {
        let err = MunicipalityId::parse("x").unwrap_err();
        assert_eq!(err.to_string(), "invalid municipality id: must be ASCII digits");
    }

    #[test]
    fn display_and_debug() {
        let id = ProvinceId::parse("28").unwrap();
        assert_eq!(id.to_string(), "28");
        assert_eq!(format!("{:?}", id), "ProvinceId(28)");
    }

    #[test]
    fn serde_validates() {
        let id: ProvinceId = serde_json::from_str("\"46\"").unwrap();
        assert_eq!(id.as_str(), "46");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"46\"");
        assert!(serde_json::from_str::<ProvinceId>("\"Valencia\"").is_err());
    }
}
