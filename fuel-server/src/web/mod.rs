//! Web layer for the fuel station finder.
//!
//! Provides the search page, JSON listings for the form's selects, and the
//! filtered station search.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
pub use templates::*;
