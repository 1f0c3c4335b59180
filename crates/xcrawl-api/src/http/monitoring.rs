//! Health probes.

use axum::Json;

/// Liveness probe (Kubernetes).
///
/// GET /livez
pub async fn liveness_probe() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "alive"
    }))
}

#[cfg(test)]
#[path = "monitoring_tests.rs"]
mod tests;
