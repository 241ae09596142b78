use tracing::info;
use tracing_subscriber::EnvFilter;

use fuel_server::cache::CachedMineturClient;
use fuel_server::config::ServerConfig;
use fuel_server::minetur::{MineturClient, MockMineturClient};
use fuel_server::web::{AppState, create_router};

const DEFAULT_LOG_FILTER: &str = "fuel_server=info,tower_http=info";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = ServerConfig::from_env();

    // Pick the data source
    let state = match &config.mock_data_dir {
        Some(dir) => {
            info!(dir = %dir.display(), "serving mock fuel price data");
            AppState::new(MockMineturClient::new(dir)?)
        }
        None => {
            info!(base_url = %config.api_base_url, "using live fuel price API");
            let client = MineturClient::new(config.minetur_config())?;
            AppState::new(CachedMineturClient::new(client, &config.cache_config()))
        }
    };

    let app = create_router(state, &config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    let addr = listener.local_addr()?;
    info!("Fuel Station Finder listening on http://{addr}");
    info!("API endpoints:");
    info!("  GET  /health                              - Health check");
    info!("  GET  /api/provinces                       - List provinces");
    info!("  GET  /api/provinces/:id/municipalities    - List municipalities");
    info!("  GET  /stations?province=&municipality=&fuel=&open=  - Search stations");

    axum::serve(listener, app).await?;
    Ok(())
}
