//! Fuel price API HTTP client.
//!
//! Provides async methods for the Ministry's "Precios Carburantes" REST
//! service: province and municipality listings, and station lists by
//! province or municipality. The service is public, so no credentials are
//! needed.

use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use tokio::sync::Semaphore;
use tracing::debug;

use crate::domain::{Municipality, Province, ProvinceId, StationRecord};
use crate::source::{DataSource, StationScope};

use super::error::MineturError;
use super::types::{
    MunicipalityDto, ProvinceDto, StationListResponse, municipalities_from_dtos,
    provinces_from_dtos,
};

/// Default base URL for the fuel price API.
pub const DEFAULT_BASE_URL: &str =
    "https://sedeaplicaciones.minetur.gob.es/ServiciosRESTCarburantes/PreciosCarburantes";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 4;

/// How much of an unparseable body to keep for diagnostics.
const BODY_EXCERPT_CHARS: usize = 500;

/// Configuration for the fuel price API client.
#[derive(Debug, Clone)]
pub struct MineturConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl MineturConfig {
    /// Create a config pointing at the production API.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for MineturConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Fuel price API client.
///
/// Uses a semaphore to limit concurrent requests to the public service.
#[derive(Debug, Clone)]
pub struct MineturClient {
    http: reqwest::Client,
    base_url: String,
    semaphore: Arc<Semaphore>,
}

impl MineturClient {
    /// Create a new client with the given configuration.
    pub fn new(config: MineturConfig) -> Result<Self, MineturError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
        })
    }

    /// Build the full URL for an API path.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET a path and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, MineturError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| MineturError::Api {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let url = self.url(path);
        debug!(%url, "fetching from fuel price API");

        let response = self.http.get(&url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(MineturError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MineturError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| MineturError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(BODY_EXCERPT_CHARS).collect()),
        })
    }

    /// Fetch all provinces.
    pub async fn fetch_provinces(&self) -> Result<Vec<Province>, MineturError> {
        let dtos: Vec<ProvinceDto> = self.get_json(&provinces_path()).await?;
        Ok(provinces_from_dtos(dtos))
    }

    /// Fetch the municipalities of a province.
    pub async fn fetch_municipalities(
        &self,
        province: &ProvinceId,
    ) -> Result<Vec<Municipality>, MineturError> {
        let dtos: Vec<MunicipalityDto> = self.get_json(&municipalities_path(province)).await?;
        Ok(municipalities_from_dtos(dtos))
    }

    /// Fetch the stations in a province or municipality.
    pub async fn fetch_stations(
        &self,
        scope: &StationScope,
    ) -> Result<Vec<StationRecord>, MineturError> {
        let response: StationListResponse = self.get_json(&stations_path(scope)).await?;

        if !response.is_ok() {
            return Err(MineturError::Rejected(response.result.unwrap_or_default()));
        }

        debug!(%scope, count = response.stations.len(), "fetched stations");
        Ok(response.stations)
    }
}

fn provinces_path() -> String {
    "/Listados/Provincias/".to_string()
}

fn municipalities_path(province: &ProvinceId) -> String {
    format!("/Listados/MunicipiosPorProvincia/{}", province.as_str())
}

fn stations_path(scope: &StationScope) -> String {
    match scope {
        StationScope::Province(id) => {
            format!("/EstacionesTerrestres/FiltroProvincia/{}", id.as_str())
        }
        StationScope::Municipality(id) => {
            format!("/EstacionesTerrestres/FiltroMunicipio/{}", id.as_str())
        }
    }
}

impl DataSource for MineturClient {
    fn list_provinces(&self) -> BoxFuture<'_, Result<Vec<Province>, MineturError>> {
        self.fetch_provinces().boxed()
    }

    fn list_municipalities<'a>(
        &'a self,
        province: &'a ProvinceId,
    ) -> BoxFuture<'a, Result<Vec<Municipality>, MineturError>> {
        self.fetch_municipalities(province).boxed()
    }

    fn list_stations<'a>(
        &'a self,
        scope: &'a StationScope,
    ) -> BoxFuture<'a, Result<Vec<StationRecord>, MineturError>> {
        self.fetch_stations(scope).boxed()
    }
}
