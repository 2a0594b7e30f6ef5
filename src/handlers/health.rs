//! Health check handlers

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::{db, state::AppState};

/// Health check response, including upstream dependency status
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// "connected" or "unreachable"
    pub database: String,
}

fn health_response(database_ok: bool) -> HealthResponse {
    HealthResponse {
        status: if database_ok { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: if database_ok {
            "connected"
        } else {
            "unreachable"
        }
        .to_string(),
    }
}

/// Health check endpoint; pings the database rather than only reporting
/// that the process is up
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let database_ok = db::ping(state.db()).await.is_ok();
    Json(health_response(database_ok))
}

/// Health routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_healthy_when_database_reachable() {
        let response = health_response(true);
        assert_eq!(response.status, "healthy");
        assert_eq!(response.database, "connected");
    }

    #[test]
    fn test_degraded_when_database_unreachable() {
        let response = health_response(false);
        assert_eq!(response.status, "degraded");
        assert_eq!(response.database, "unreachable");
    }
}
