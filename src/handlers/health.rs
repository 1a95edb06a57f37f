use axum::Json;
use tracing::info;

use crate::dtos::health::HealthResponse;

// The store is deliberately not consulted; this is a liveness probe only.
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Utility",
    responses((status = 200, description = "API is healthy", body = HealthResponse))
)]
pub async fn health_check() -> Json<HealthResponse> {
    info!("Health check endpoint hit");
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
