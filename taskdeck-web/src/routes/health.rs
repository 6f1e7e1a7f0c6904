/// Health check endpoint
///
/// `GET /health` reports whether the service and its database are up:
///
/// ```json
/// {"status": "healthy", "version": "0.1.0", "database": "connected"}
/// ```
///
/// The database probe goes through the same health check the pool runs at
/// startup. A failed probe degrades the report but still answers 200; load
/// balancers that need a hard signal can inspect the body.

use crate::app::AppState;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use taskdeck_shared::db::pool;

/// Health report for the service and its dependencies
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall service status: "healthy" or "degraded"
    pub status: String,

    /// Application version
    pub version: String,

    /// Database status: "connected" or "disconnected"
    pub database: String,
}

impl HealthResponse {
    fn report(database_up: bool) -> Self {
        Self {
            status: if database_up { "healthy" } else { "degraded" }.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            database: if database_up {
                "connected"
            } else {
                "disconnected"
            }
            .to_string(),
        }
    }
}

/// Health check handler
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let database_up = pool::health_check(&state.db).await.is_ok();

    if !database_up {
        tracing::warn!("health probe: database unreachable");
    }

    Json(HealthResponse::report(database_up))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_healthy_when_database_up() {
        let report = HealthResponse::report(true);
        assert_eq!(report.status, "healthy");
        assert_eq!(report.database, "connected");
    }

    #[test]
    fn test_report_degraded_when_database_down() {
        let report = HealthResponse::report(false);
        assert_eq!(report.status, "degraded");
        assert_eq!(report.database, "disconnected");
    }
}
