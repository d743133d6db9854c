use crate::consts::SERVICE_NAME;
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Liveness payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Always `ok` while the process is serving
    pub status: String,
    pub name: String,
    /// Crate version of the running binary
    pub version: String,
}

impl HealthResponse {
    fn current() -> Self {
        Self {
            status: "ok".into(),
            name: SERVICE_NAME.into(),
            version: env!("CARGO_PKG_VERSION").into(),
        }
    }
}

/// Liveness probe. Does not contact the upstream model.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::current())
}
