//! Wire types for the fuel price API.
//!
//! These mirror the JSON the Ministry service returns, field names and
//! all (including the `IDPovincia` typo). Conversion to domain types drops
//! entries whose ids don't validate.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{Municipality, MunicipalityId, Province, ProvinceId, StationRecord};

/// Value of `ResultadoConsulta` on success.
pub const RESULT_OK: &str = "OK";

/// One entry of `/Listados/Provincias/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvinceDto {
    #[serde(rename = "IDPovincia")]
    pub id: String,

    #[serde(rename = "Provincia")]
    pub name: String,
}

impl ProvinceDto {
    /// Convert to the domain type, or `None` if the id is malformed.
    pub fn into_domain(self) -> Option<Province> {
        match ProvinceId::parse_normalized(&self.id) {
            Ok(id) => Some(Province {
                id,
                name: self.name,
            }),
            Err(e) => {
                debug!(id = %self.id, error = %e, "dropping province with bad id");
                None
            }
        }
    }
}

/// One entry of `/Listados/MunicipiosPorProvincia/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MunicipalityDto {
    #[serde(rename = "IDMunicipio")]
    pub id: String,

    #[serde(rename = "Municipio")]
    pub name: String,
}

impl MunicipalityDto {
    /// Convert to the domain type, or `None` if the id is malformed.
    pub fn into_domain(self) -> Option<Municipality> {
        match MunicipalityId::parse_normalized(&self.id) {
            Ok(id) => Some(Municipality {
                id,
                name: self.name,
            }),
            Err(e) => {
                debug!(id = %self.id, error = %e, "dropping municipality with bad id");
                None
            }
        }
    }
}

/// Response body of the `/EstacionesTerrestres/...` endpoints.
///
/// The snapshot date and note the API sends alongside are not kept.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StationListResponse {
    /// The stations. Missing means none.
    #[serde(rename = "ListaEESSPrecio", default)]
    pub stations: Vec<StationRecord>,

    /// "OK" on success
    #[serde(rename = "ResultadoConsulta", default)]
    pub result: Option<String>,
}

impl StationListResponse {
    /// Whether the API reported success. A missing result field counts as
    /// success.
    pub fn is_ok(&self) -> bool {
        self.result
            .as_deref()
            .is_none_or(|r| r.trim().eq_ignore_ascii_case(RESULT_OK))
    }
}

/// Convert province DTOs, dropping malformed entries.
pub fn provinces_from_dtos(dtos: Vec<ProvinceDto>) -> Vec<Province> {
    dtos.into_iter().filter_map(ProvinceDto::into_domain).collect()
}

/// Convert municipality DTOs, dropping malformed entries.
pub fn municipalities_from_dtos(dtos: Vec<MunicipalityDto>) -> Vec<Municipality> {
    dtos.into_iter()
        .filter_map(MunicipalityDto::into_domain)
        .collect()
}
