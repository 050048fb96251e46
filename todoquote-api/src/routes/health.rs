/// Health check endpoint
///
/// Reports whether the server runs, whether the database answers and how
/// busy the connection pool is.
///
/// # Endpoint
///
/// ```text
/// GET /health
/// ```
///
/// # Response
///
/// ```json
/// {
///   "error": false,
///   "status": "healthy",
///   "version": "0.1.0",
///   "database": "connected",
///   "connections": { "active": 1, "idle": 4 }
/// }
/// ```

use crate::{app::AppState, error::ApiResult, response::ApiResponse};
use axum::extract::State;
use serde::Serialize;
use todoquote_shared::db::pool::{get_pool_stats, health_check as database_health_check};

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "healthy" or "degraded"
    pub status: String,

    /// Application version
    pub version: String,

    /// "connected" or "disconnected"
    pub database: String,

    pub connections: ConnectionStats,
}

#[derive(Debug, Serialize)]
pub struct ConnectionStats {
    pub active: usize,
    pub idle: usize,
}

/// Health check handler
///
/// Always answers 200; a broken database shows up as `"degraded"`.
pub async fn health_check(State(state): State<AppState>) -> ApiResult<ApiResponse<HealthResponse>> {
    let connected = match database_health_check(&state.db).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Database health check failed");
            false
        }
    };

    let stats = get_pool_stats(&state.db);

    Ok(ApiResponse::ok(HealthResponse {
        status: if connected { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: if connected { "connected" } else { "disconnected" }.to_string(),
        connections: ConnectionStats {
            active: stats.active_connections,
            idle: stats.idle_connections,
        },
    }))
}
