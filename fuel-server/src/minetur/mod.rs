//! Client for the Spanish Ministry fuel price API.
//!
//! This module provides an HTTP client for the public "Precios Carburantes"
//! REST service, which lists every fuel station in Spain with its current
//! prices and opening hours.
//!
//! Key characteristics of the service:
//! - No authentication; responses are JSON with Spanish field names
//! - Prices are strings with a decimal comma (e.g. "1,459")
//! - An empty price string means the station doesn't sell that fuel
//! - Opening hours are free text in the `Horario` field

mod client;
mod error;
mod mock;
mod types;

pub use client::{DEFAULT_BASE_URL, MineturClient, MineturConfig};
pub use error::MineturError;
pub use mock::MockMineturClient;
pub use types::{MunicipalityDto, ProvinceDto, RESULT_OK, StationListResponse};
