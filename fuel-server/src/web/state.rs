//! Application state for the web layer.

use std::sync::Arc;

use crate::source::DataSource;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Where provinces, municipalities and stations come from
    pub source: Arc<dyn DataSource>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(source: impl DataSource + 'static) -> Self {
        Self {
            source: Arc::new(source),
        }
    }
}
