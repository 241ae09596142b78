//! Where station data comes from.
//!
//! The web layer only talks to a [`DataSource`]: the live API client, its
//! cached wrapper, or the file-backed mock all implement it. Everything a
//! source returns is already deserialized; filtering happens afterwards.

use std::fmt;

use futures::future::BoxFuture;

use crate::domain::{Municipality, MunicipalityId, Province, ProvinceId, StationRecord};
use crate::minetur::MineturError;

/// Which stations to list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StationScope {
    /// Every station in a province.
    Province(ProvinceId),
    /// Every station in one municipality.
    Municipality(MunicipalityId),
}

impl StationScope {
    /// Pick the narrowest scope from a form selection.
    ///
    /// A selected municipality wins over its province.
    pub fn from_selection(province: ProvinceId, municipality: Option<MunicipalityId>) -> Self {
        match municipality {
            Some(m) => StationScope::Municipality(m),
            None => StationScope::Province(province),
        }
    }
}

impl fmt::Display for StationScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StationScope::Province(id) => write!(f, "province {id}"),
            StationScope::Municipality(id) => write!(f, "municipality {id}"),
        }
    }
}

/// A provider of provinces, municipalities and station lists.
///
/// Methods return boxed futures so the trait can be used as
/// `Arc<dyn DataSource>`.
pub trait DataSource: Send + Sync {
    /// All provinces.
    fn list_provinces(&self) -> BoxFuture<'_, Result<Vec<Province>, MineturError>>;

    /// Municipalities within a province.
    fn list_municipalities<'a>(
        &'a self,
        province: &'a ProvinceId,
    ) -> BoxFuture<'a, Result<Vec<Municipality>, MineturError>>;

    /// Stations within a province or municipality, in API order.
    fn list_stations<'a>(
        &'a self,
        scope: &'a StationScope,
    ) -> BoxFuture<'a, Result<Vec<StationRecord>, MineturError>>;
}
