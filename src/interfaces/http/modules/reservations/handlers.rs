//! Reservation HTTP handlers

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use chrono::{DateTime, Utc};

use crate::application::services::BookingService;
use crate::auth::AuthenticatedUser;
use crate::domain::reservation::{ReservationFilter, ReservationStatus};
use crate::interfaces::http::common::{domain_error, ApiResponse, PaginatedResponse};

use super::dto::*;

/// Application state for reservation handlers.
#[derive(Clone)]
pub struct ReservationAppState {
    pub booking: Arc<BookingService>,
}

type ApiResult<T> = Result<Json<ApiResponse<T>>, (StatusCode, Json<ApiResponse<T>>)>;

fn bad_request<T>(message: impl Into<String>) -> (StatusCode, Json<ApiResponse<T>>) {
    (StatusCode::BAD_REQUEST, Json(ApiResponse::error(message)))
}

fn parse_instant<T>(
    value: &str,
    field: &str,
) -> Result<DateTime<Utc>, (StatusCode, Json<ApiResponse<T>>)> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| bad_request(format!("Invalid {}: {}", field, e)))
}

#[utoipa::path(
    post,
    path = "/api/v1/reservations",
    tag = "Reservations",
    security(("bearer_auth" = [])),
    request_body = CreateReservationRequest,
    responses(
        (status = 200, description = "Created reservation", body = ApiResponse<ReservationDto>),
        (status = 400, description = "Invalid date range"),
        (status = 404, description = "Room not found"),
        (status = 409, description = "Room not available for the requested range")
    )
)]
pub async fn create_reservation(
    State(state): State<ReservationAppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateReservationRequest>,
) -> ApiResult<ReservationDto> {
    let check_in = parse_instant(&request.check_in, "check_in")?;
    let check_out = parse_instant(&request.check_out, "check_out")?;

    match state
        .booking
        .create_reservation(&user.actor(), request.room_id, check_in, check_out)
        .await
    {
        Ok(r) => Ok(Json(ApiResponse::success(r.into()))),
        Err(e) => Err(domain_error(e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/reservations",
    tag = "Reservations",
    security(("bearer_auth" = [])),
    params(ReservationListQuery),
    responses(
        (status = 200, description = "Page of reservations", body = ApiResponse<PaginatedResponse<ReservationDto>>)
    )
)]
pub async fn list_reservations(
    State(state): State<ReservationAppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<ReservationListQuery>,
) -> ApiResult<PaginatedResponse<ReservationDto>> {
    let status = match query.status.as_deref() {
        None => None,
        Some(s) => Some(
            ReservationStatus::try_from_str(s)
                .ok_or_else(|| bad_request(format!("Unknown status: {}", s)))?,
        ),
    };
    let from = match &query.from {
        None => None,
        Some(v) => Some(parse_instant(v, "from")?),
    };
    let to = match &query.to {
        None => None,
        Some(v) => Some(parse_instant(v, "to")?),
    };

    let filter = ReservationFilter {
        status,
        room_id: query.room_id,
        user_id: query.user_id,
        from,
        to,
    };

    match state
        .booking
        .list_reservations(&user.actor(), filter, query.page, query.limit)
        .await
    {
        Ok(page) => Ok(Json(ApiResponse::success(PaginatedResponse::from_result(
            page,
            ReservationDto::from,
        )))),
        Err(e) => Err(domain_error(e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/reservations/{reservation_id}",
    tag = "Reservations",
    security(("bearer_auth" = [])),
    params(("reservation_id" = i32, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation details", body = ApiResponse<ReservationDto>),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_reservation(
    State(state): State<ReservationAppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(reservation_id): Path<i32>,
) -> ApiResult<ReservationDto> {
    match state
        .booking
        .get_reservation(&user.actor(), reservation_id)
        .await
    {
        Ok(r) => Ok(Json(ApiResponse::success(r.into()))),
        Err(e) => Err(domain_error(e)),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/reservations/{reservation_id}/confirm",
    tag = "Reservations",
    security(("bearer_auth" = [])),
    params(("reservation_id" = i32, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Confirmed reservation", body = ApiResponse<ReservationDto>),
        (status = 404, description = "Not found"),
        (status = 409, description = "Not confirmable from its current status")
    )
)]
pub async fn confirm_reservation(
    State(state): State<ReservationAppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(reservation_id): Path<i32>,
) -> ApiResult<ReservationDto> {
    match state.booking.confirm(&user.actor(), reservation_id).await {
        Ok(r) => Ok(Json(ApiResponse::success(r.into()))),
        Err(e) => Err(domain_error(e)),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/reservations/{reservation_id}/check-in",
    tag = "Reservations",
    security(("bearer_auth" = [])),
    params(("reservation_id" = i32, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Checked-in reservation", body = ApiResponse<ReservationDto>),
        (status = 404, description = "Not found"),
        (status = 409, description = "Not checkable-in from its current status")
    )
)]
pub async fn check_in_reservation(
    State(state): State<ReservationAppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(reservation_id): Path<i32>,
) -> ApiResult<ReservationDto> {
    match state.booking.check_in(&user.actor(), reservation_id).await {
        Ok(r) => Ok(Json(ApiResponse::success(r.into()))),
        Err(e) => Err(domain_error(e)),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/reservations/{reservation_id}/check-out",
    tag = "Reservations",
    security(("bearer_auth" = [])),
    params(("reservation_id" = i32, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Checked-out reservation", body = ApiResponse<ReservationDto>),
        (status = 404, description = "Not found"),
        (status = 409, description = "Not checkable-out from its current status")
    )
)]
pub async fn check_out_reservation(
    State(state): State<ReservationAppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(reservation_id): Path<i32>,
) -> ApiResult<ReservationDto> {
    match state.booking.check_out(&user.actor(), reservation_id).await {
        Ok(r) => Ok(Json(ApiResponse::success(r.into()))),
        Err(e) => Err(domain_error(e)),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/reservations/{reservation_id}/cancel",
    tag = "Reservations",
    security(("bearer_auth" = [])),
    params(("reservation_id" = i32, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Cancelled reservation", body = ApiResponse<ReservationDto>),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Not found"),
        (status = 409, description = "Already terminal")
    )
)]
pub async fn cancel_reservation(
    State(state): State<ReservationAppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(reservation_id): Path<i32>,
) -> ApiResult<ReservationDto> {
    match state.booking.cancel(&user.actor(), reservation_id).await {
        Ok(r) => Ok(Json(ApiResponse::success(r.into()))),
        Err(e) => Err(domain_error(e)),
    }
}
