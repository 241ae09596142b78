//! HTTP route handlers.

use askama::Template;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use tower_http::services::ServeDir;
use tracing::{error, warn};

use crate::domain::{
    FuelType, Instant, Municipality, MunicipalityId, Province, ProvinceId, StationRecord,
};
use crate::filter::StationFilter;
use crate::minetur::MineturError;
use crate::source::StationScope;

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Shown when a search has no province.
pub const MISSING_PROVINCE: &str = "Please select a province.";

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/api/provinces", get(list_provinces))
        .route("/api/provinces/:id/municipalities", get(list_municipalities))
        .route("/stations", get(search_stations))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Index page with search form.
///
/// A `province` in the query fills the municipality select. Failing to
/// fetch municipalities leaves it empty rather than failing the page.
///
/// A submitted form (any `province` parameter, even blank) also runs the
/// search and renders the results below the form, so the page works
/// without JavaScript. Search errors are shown on the page.
async fn index_page(
    State(state): State<AppState>,
    Query(query): Query<StationSearchRequest>,
) -> Result<Html<String>, AppError> {
    let selected_province = non_blank(query.province.as_deref());
    let selected_municipality = non_blank(query.municipality.as_deref());
    let selected_fuel = non_blank(query.fuel.as_deref());

    let provinces = state.source.list_provinces().await?;

    let municipalities = match selected_province.map(ProvinceId::parse) {
        Some(Ok(province)) => match state.source.list_municipalities(&province).await {
            Ok(municipalities) => municipalities,
            Err(e) => {
                warn!(%province, error = %e, "failed to list municipalities for index page");
                Vec::new()
            }
        },
        _ => Vec::new(),
    };

    let (results, error) = if query.province.is_some() {
        match search_results(&state, &query).await {
            Ok(html) => (Some(html), None),
            Err(e) => {
                warn!(error = %e.message(), "index page search failed");
                (None, Some(e.message().to_string()))
            }
        }
    } else {
        (None, None)
    };

    let template = IndexTemplate {
        provinces: provinces
            .iter()
            .map(|p| OptionView::from_province(p, selected_province))
            .collect(),
        municipalities: municipalities
            .iter()
            .map(|m| OptionView::from_municipality(m, selected_municipality))
            .collect(),
        fuels: FuelType::ALL
            .into_iter()
            .map(|f| OptionView::from_fuel(f, selected_fuel))
            .collect(),
        open_now: parse_flag(query.open.as_deref()),
        results,
        error,
    };

    let html = template.render().map_err(|e| AppError::Internal {
        message: format!("Template error: {}", e),
    })?;

    Ok(Html(html))
}

/// Run a search from the index form and render the station list fragment.
async fn search_results(state: &AppState, req: &StationSearchRequest) -> Result<String, AppError> {
    let search = StationSearch::parse(req)?;
    let now = Instant::now();
    let stations = find_stations(state, &search, now).await?;

    render_station_list(&stations, search.fuel, now)
}

/// Render the station list fragment.
fn render_station_list(
    stations: &[StationRecord],
    fuel: Option<FuelType>,
    now: Instant,
) -> Result<String, AppError> {
    let template = StationListTemplate {
        stations: stations
            .iter()
            .map(|s| StationView::from_record(s, fuel, now))
            .collect(),
        fuel_label: fuel.map(|f| f.label().to_string()),
        evaluated_at: now.to_string(),
    };

    template.render().map_err(|e| AppError::Internal {
        message: format!("Template error: {}", e),
    })
}

/// List all provinces.
async fn list_provinces(State(state): State<AppState>) -> Result<Json<Vec<Province>>, AppError> {
    Ok(Json(state.source.list_provinces().await?))
}

/// List the municipalities of a province.
async fn list_municipalities(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Municipality>>, AppError> {
    let province = ProvinceId::parse_normalized(&id).map_err(|_| AppError::BadRequest {
        message: format!("Invalid province id: {}", id),
    })?;

    Ok(Json(state.source.list_municipalities(&province).await?))
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// A validated station search.
#[derive(Debug, Clone, PartialEq, Eq)]
struct StationSearch {
    scope: StationScope,
    fuel: Option<FuelType>,
    open_now: bool,
}

impl StationSearch {
    /// Validate the raw query.
    ///
    /// Blank selections count as absent. The province is required even
    /// when a municipality is given, matching the form.
    fn parse(req: &StationSearchRequest) -> Result<Self, AppError> {
        let province = non_blank(req.province.as_deref()).ok_or_else(|| AppError::BadRequest {
            message: MISSING_PROVINCE.to_string(),
        })?;
        let province = ProvinceId::parse(province).map_err(|_| AppError::BadRequest {
            message: format!("Invalid province id: {}", province),
        })?;

        let municipality = non_blank(req.municipality.as_deref())
            .map(|m| {
                MunicipalityId::parse(m).map_err(|_| AppError::BadRequest {
                    message: format!("Invalid municipality id: {}", m),
                })
            })
            .transpose()?;

        let fuel = non_blank(req.fuel.as_deref())
            .map(|key| {
                FuelType::from_key(key).ok_or_else(|| AppError::BadRequest {
                    message: format!("Unknown fuel type: {}", key),
                })
            })
            .transpose()?;

        Ok(Self {
            scope: StationScope::from_selection(province, municipality),
            fuel,
            open_now: parse_flag(req.open.as_deref()),
        })
    }

    fn filter(&self) -> StationFilter {
        let filter = StationFilter::new().with_open_now(self.open_now);
        match self.fuel {
            Some(fuel) => filter.with_fuel(fuel.key()),
            None => filter,
        }
    }
}

/// Fetch and filter the stations for a search at `now`.
async fn find_stations(
    state: &AppState,
    search: &StationSearch,
    now: Instant,
) -> Result<Vec<StationRecord>, AppError> {
    let stations = state.source.list_stations(&search.scope).await?;
    let filter = search.filter();

    Ok(filter.apply(&stations, now).into_iter().cloned().collect())
}

/// Search for stations in a province or municipality.
async fn search_stations(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(req): Query<StationSearchRequest>,
) -> Result<Response, AppError> {
    let search = StationSearch::parse(&req)?;
    let now = Instant::now();

    let stations = find_stations(&state, &search, now).await?;

    // Return HTML or JSON based on Accept header
    if accepts_html(&headers) {
        let html = render_station_list(&stations, search.fuel, now)?;
        Ok(Html(html).into_response())
    } else {
        let results = stations
            .iter()
            .map(|s| StationResult::from_record(s, search.fuel, now))
            .collect();

        Ok(Json(StationSearchResponse {
            scope: search.scope.to_string(),
            fuel: search.fuel.map(|f| f.key().to_string()),
            open_now: search.open_now,
            evaluated_at: now.to_string(),
            stations: results,
        })
        .into_response())
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Upstream { message: String },
    Internal { message: String },
}

impl AppError {
    /// The message shown to the user.
    pub fn message(&self) -> &str {
        match self {
            AppError::BadRequest { message }
            | AppError::Upstream { message }
            | AppError::Internal { message } => message,
        }
    }
}

impl From<MineturError> for AppError {
    fn from(e: MineturError) -> Self {
        if e.is_upstream() {
            AppError::Upstream {
                message: e.to_string(),
            }
        } else {
            AppError::Internal {
                message: e.to_string(),
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Upstream { message } => (StatusCode::BAD_GATEWAY, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
