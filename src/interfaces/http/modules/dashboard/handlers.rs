//! Occupancy dashboard HTTP handlers

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use crate::application::services::DashboardService;
use crate::interfaces::http::common::{domain_error, ApiResponse};

/// Application state for dashboard handlers.
#[derive(Clone)]
pub struct DashboardAppState {
    pub dashboard: Arc<DashboardService>,
}

/// Aggregate counts shown on the admin dashboard
#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardSummaryDto {
    pub rooms_available: u64,
    pub rooms_occupied: u64,
    pub rooms_maintenance: u64,
    pub reservations_pending: u64,
    pub reservations_confirmed: u64,
    pub current_stays: u64,
    pub arrivals_next_week: u64,
}

#[utoipa::path(
    get,
    path = "/api/v1/dashboard/summary",
    tag = "Dashboard",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Aggregate occupancy counts", body = ApiResponse<DashboardSummaryDto>),
        (status = 403, description = "Admins only")
    )
)]
pub async fn dashboard_summary(
    State(state): State<DashboardAppState>,
) -> Result<Json<ApiResponse<DashboardSummaryDto>>, (StatusCode, Json<ApiResponse<DashboardSummaryDto>>)>
{
    match state.dashboard.summary().await {
        Ok(s) => Ok(Json(ApiResponse::success(DashboardSummaryDto {
            rooms_available: s.rooms_available,
            rooms_occupied: s.rooms_occupied,
            rooms_maintenance: s.rooms_maintenance,
            reservations_pending: s.reservations_pending,
            reservations_confirmed: s.reservations_confirmed,
            current_stays: s.current_stays,
            arrivals_next_week: s.arrivals_next_week,
        }))),
        Err(e) => Err(domain_error(e)),
    }
}
