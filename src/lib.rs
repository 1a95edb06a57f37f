pub mod config;
pub mod docs;
pub mod dtos;
pub mod error;
pub mod events;
pub mod handlers;
pub mod logging;
pub mod models;
pub mod routes;
pub mod server;
pub mod state;
pub mod store;
pub mod validation;

use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

/// Full application: routes, CORS and request tracing.
pub fn build_app(state: AppState) -> Router {
    routes::create_router()
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
