//! Health check handler

use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use crate::interfaces::http::common::ApiResponse;

/// Service liveness info
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthDto {
    pub status: String,
    pub version: String,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is up", body = ApiResponse<HealthDto>)
    )
)]
pub async fn health_check() -> Json<ApiResponse<HealthDto>> {
    Json(ApiResponse::success(HealthDto {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}
