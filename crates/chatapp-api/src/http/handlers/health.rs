//! Health check endpoint.

use axum::Json;
use axum::extract::State;

use crate::state::AppState;

/// GET /api/health - Liveness plus a database reachability probe (no auth).
pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    let database = match state.db_pool.ping().await {
        Ok(()) => "ok",
        Err(e) => {
            tracing::warn!(error = %e, "health check: database unreachable");
            "unavailable"
        }
    };

    let status = if database == "ok" { "ok" } else { "degraded" };

    Json(serde_json::json!({
        "status": status,
        "service": "Chat Application API",
        "version": env!("CARGO_PKG_VERSION"),
        "database": database,
        "active_sessions": state.auth_service.sessions().len(),
    }))
}
