pub mod products;

use axum::{routing::get, Router};
use crate::docs::swagger_ui;
use crate::handlers::health::health_check;
use crate::state::AppState;

pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(products::routes())
        .route("/api/health", get(health_check))
        .merge(swagger_ui())
}
