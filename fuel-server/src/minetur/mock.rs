//! Mock fuel price source for running without network access.
//!
//! Loads listings and station lists from JSON files in the same shape the
//! real API returns, and serves them as if they were live responses.
//!
//! Expected file names:
//!
//! - `provinces.json`: the `/Listados/Provincias/` array
//! - `municipalities_{province}.json`: a `/Listados/MunicipiosPorProvincia/` array
//! - `stations_province_{province}.json`: a `FiltroProvincia` response
//! - `stations_municipality_{municipality}.json`: a `FiltroMunicipio` response

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;

use crate::domain::{Municipality, MunicipalityId, Province, ProvinceId, StationRecord};
use crate::source::{DataSource, StationScope};

use super::error::MineturError;
use super::types::{
    MunicipalityDto, ProvinceDto, StationListResponse, municipalities_from_dtos,
    provinces_from_dtos,
};

const PROVINCES_FILE: &str = "provinces.json";
const MUNICIPALITIES_PREFIX: &str = "municipalities_";
const PROVINCE_STATIONS_PREFIX: &str = "stations_province_";
const MUNICIPALITY_STATIONS_PREFIX: &str = "stations_municipality_";

#[derive(Debug, Clone, Default)]
struct MockData {
    provinces: Vec<Province>,
    municipalities: HashMap<ProvinceId, Vec<Municipality>>,
    stations: HashMap<StationScope, Vec<StationRecord>>,
}

/// Mock data source that serves fixtures from a directory.
///
/// This is useful for development and tests without hitting the real API.
#[derive(Clone)]
pub struct MockMineturClient {
    data: Arc<RwLock<MockData>>,
}

impl MockMineturClient {
    /// Create a new mock source by loading JSON files from a directory.
    ///
    /// Fails if the directory can't be read, any recognised file fails to
    /// parse, or `provinces.json` is missing.
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, MineturError> {
        let data = load_dir(data_dir.as_ref())?;
        Ok(Self {
            data: Arc::new(RwLock::new(data)),
        })
    }

    /// Get all provinces.
    pub async fn get_provinces(&self) -> Result<Vec<Province>, MineturError> {
        let data = self.data.read().await;
        Ok(data.provinces.clone())
    }

    /// Get the municipalities of a province.
    pub async fn get_municipalities(
        &self,
        province: &ProvinceId,
    ) -> Result<Vec<Municipality>, MineturError> {
        let data = self.data.read().await;
        data.municipalities
            .get(province)
            .cloned()
            .ok_or_else(|| MineturError::Mock {
                message: format!("no mock municipalities for province {province}"),
            })
    }

    /// Get the stations in a scope.
    pub async fn get_stations(
        &self,
        scope: &StationScope,
    ) -> Result<Vec<StationRecord>, MineturError> {
        let data = self.data.read().await;
        data.stations
            .get(scope)
            .cloned()
            .ok_or_else(|| MineturError::Mock {
                message: format!("no mock stations for {scope}"),
            })
    }

    /// Reload fixtures from disk (useful for development).
    pub async fn reload(&self, data_dir: impl AsRef<Path>) -> Result<(), MineturError> {
        let fresh = load_dir(data_dir.as_ref())?;
        let mut data = self.data.write().await;
        *data = fresh;
        Ok(())
    }
}

impl DataSource for MockMineturClient {
    fn list_provinces(&self) -> BoxFuture<'_, Result<Vec<Province>, MineturError>> {
        self.get_provinces().boxed()
    }

    fn list_municipalities<'a>(
        &'a self,
        province: &'a ProvinceId,
    ) -> BoxFuture<'a, Result<Vec<Municipality>, MineturError>> {
        self.get_municipalities(province).boxed()
    }

    fn list_stations<'a>(
        &'a self,
        scope: &'a StationScope,
    ) -> BoxFuture<'a, Result<Vec<StationRecord>, MineturError>> {
        self.get_stations(scope).boxed()
    }
}

fn mock_error(message: String) -> MineturError {
    MineturError::Mock { message }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, MineturError> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| mock_error(format!("failed to read {}: {}", path.display(), e)))?;
    serde_json::from_str(&json)
        .map_err(|e| mock_error(format!("failed to parse {}: {}", path.display(), e)))
}

fn load_dir(data_dir: &Path) -> Result<MockData, MineturError> {
    let entries = std::fs::read_dir(data_dir).map_err(|e| {
        mock_error(format!(
            "failed to read mock data directory {}: {}",
            data_dir.display(),
            e
        ))
    })?;

    let mut data = MockData::default();
    let mut saw_provinces = false;

    for entry in entries {
        let entry =
            entry.map_err(|e| mock_error(format!("failed to read directory entry: {}", e)))?;

        let path: PathBuf = entry.path();
        if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
            continue;
        }

        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };

        if path.file_name().and_then(|s| s.to_str()) == Some(PROVINCES_FILE) {
            let dtos: Vec<ProvinceDto> = read_json(&path)?;
            data.provinces = provinces_from_dtos(dtos);
            saw_provinces = true;
        } else if let Some(id) = stem.strip_prefix(MUNICIPALITIES_PREFIX) {
            let province = ProvinceId::parse(id)
                .map_err(|e| mock_error(format!("bad file name {}: {}", path.display(), e)))?;
            let dtos: Vec<MunicipalityDto> = read_json(&path)?;
            data.municipalities
                .insert(province, municipalities_from_dtos(dtos));
        } else if let Some(id) = stem.strip_prefix(PROVINCE_STATIONS_PREFIX) {
            let province = ProvinceId::parse(id)
                .map_err(|e| mock_error(format!("bad file name {}: {}", path.display(), e)))?;
            let response: StationListResponse = read_json(&path)?;
            data.stations
                .insert(StationScope::Province(province), response.stations);
        } else if let Some(id) = stem.strip_prefix(MUNICIPALITY_STATIONS_PREFIX) {
            let municipality = MunicipalityId::parse(id)
                .map_err(|e| mock_error(format!("bad file name {}: {}", path.display(), e)))?;
            let response: StationListResponse = read_json(&path)?;
            data.stations
                .insert(StationScope::Municipality(municipality), response.stations);
        }
    }

    if !saw_provinces {
        return Err(mock_error(format!(
            "no {} found in {}",
            PROVINCES_FILE,
            data_dir.display()
        )));
    }

    Ok(data)
}
