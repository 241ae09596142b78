//! Caching layer for fuel price API listings.
//!
//! Province and municipality lists change rarely and are fetched on every
//! page load, so they are held in memory for a while. Station lists carry
//! live prices and are always fetched fresh.

use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use futures::future::BoxFuture;
use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::domain::{Municipality, Province, ProvinceId, StationRecord};
use crate::minetur::{MineturClient, MineturError};
use crate::source::{DataSource, StationScope};

/// Cached province list entry.
type ProvinceEntry = Arc<Vec<Province>>;

/// Cached municipality list entry.
type MunicipalityEntry = Arc<Vec<Municipality>>;

/// Configuration for the listing cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached listings.
    pub ttl: Duration,

    /// Maximum number of cached municipality lists (one per province).
    pub max_capacity: u64,
}

impl CacheConfig {
    /// Set a custom TTL.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60 * 60),
            // Spain has 52 provinces
            max_capacity: 64,
        }
    }
}

/// In-memory cache for listings.
pub struct ListingCache {
    /// The province list, under the unit key.
    provinces: MokaCache<(), ProvinceEntry>,

    /// Municipality lists keyed by province.
    municipalities: MokaCache<ProvinceId, MunicipalityEntry>,
}

impl ListingCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let provinces = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(1)
            .build();

        let municipalities = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self {
            provinces,
            municipalities,
        }
    }

    /// Get the cached province list.
    pub async fn get_provinces(&self) -> Option<ProvinceEntry> {
        self.provinces.get(&()).await
    }

    /// Store the province list.
    pub async fn insert_provinces(&self, entry: ProvinceEntry) {
        self.provinces.insert((), entry).await;
    }

    /// Get a cached municipality list.
    pub async fn get_municipalities(&self, province: &ProvinceId) -> Option<MunicipalityEntry> {
        self.municipalities.get(province).await
    }

    /// Store a municipality list.
    pub async fn insert_municipalities(&self, province: ProvinceId, entry: MunicipalityEntry) {
        self.municipalities.insert(province, entry).await;
    }
}

/// Fuel price API client with listing caching.
///
/// Wraps a `MineturClient`; province and municipality lists come from the
/// cache when fresh, station lists always go to the API.
pub struct CachedMineturClient {
    client: MineturClient,
    cache: ListingCache,
}

impl CachedMineturClient {
    /// Create a new cached client.
    pub fn new(client: MineturClient, cache_config: &CacheConfig) -> Self {
        Self {
            client,
            cache: ListingCache::new(cache_config),
        }
    }

    /// Get all provinces, using the cache if available.
    pub async fn get_provinces(&self) -> Result<ProvinceEntry, MineturError> {
        if let Some(cached) = self.cache.get_provinces().await {
            return Ok(cached);
        }

        debug!("province list cache miss");
        let entry = Arc::new(self.client.fetch_provinces().await?);
        self.cache.insert_provinces(entry.clone()).await;

        Ok(entry)
    }

    /// Get the municipalities of a province, using the cache if available.
    pub async fn get_municipalities(
        &self,
        province: &ProvinceId,
    ) -> Result<MunicipalityEntry, MineturError> {
        if let Some(cached) = self.cache.get_municipalities(province).await {
            return Ok(cached);
        }

        debug!(%province, "municipality list cache miss");
        let entry = Arc::new(self.client.fetch_municipalities(province).await?);
        self.cache
            .insert_municipalities(province.clone(), entry.clone())
            .await;

        Ok(entry)
    }
}

impl DataSource for CachedMineturClient {
    fn list_provinces(&self) -> BoxFuture<'_, Result<Vec<Province>, MineturError>> {
        async move { Ok(self.get_provinces().await?.as_ref().clone()) }.boxed()
    }

    fn list_municipalities<'a>(
        &'a self,
        province: &'a ProvinceId,
    ) -> BoxFuture<'a, Result<Vec<Municipality>, MineturError>> {
        async move { Ok(self.get_municipalities(province).await?.as_ref().clone()) }.boxed()
    }

    fn list_stations<'a>(
        &'a self,
        scope: &'a StationScope,
    ) -> BoxFuture<'a, Result<Vec<StationRecord>, MineturError>> {
        self.client.fetch_stations(scope).boxed()
    }
}
