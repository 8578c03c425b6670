use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::server::app::AxumAppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    storage: StorageHealth,
}

#[derive(Serialize)]
pub struct StorageHealth {
    status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Health check endpoint
///
/// Probes the user store for liveness. Returns 200 OK when the probe
/// answers within 5 seconds, 503 Service Unavailable otherwise.
pub async fn health_handler(
    State(state): State<AxumAppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let storage = match tokio::time::timeout(
        std::time::Duration::from_secs(5),
        state.server_deps.users.ping(),
    )
    .await
    {
        Ok(Ok(())) => StorageHealth {
            status: "ok".to_string(),
            error: None,
        },
        Ok(Err(e)) => StorageHealth {
            status: "error".to_string(),
            error: Some(format!("Probe failed: {}", e)),
        },
        Err(_) => StorageHealth {
            status: "error".to_string(),
            error: Some("Probe timeout (>5s)".to_string()),
        },
    };

    let is_healthy = storage.status == "ok";

    let status_code = if is_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let overall_status = if is_healthy { "healthy" } else { "unhealthy" };

    (
        status_code,
        Json(HealthResponse {
            status: overall_status.to_string(),
            storage,
        }),
    )
}
