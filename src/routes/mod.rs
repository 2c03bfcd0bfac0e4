pub mod ticket_routes;

use axum::{routing::get, Json, Router};
use serde_json::json;

use crate::middleware::cors::cors_middleware;
use crate::state::AppState;

/// Armar el router completo de la aplicación
pub fn create_app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_endpoint))
        .nest("/api/tickets", ticket_routes::create_ticket_router())
        .layer(cors_middleware())
        .with_state(state)
}

/// Health check del servicio
async fn health_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "service": "taller-tickets",
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
