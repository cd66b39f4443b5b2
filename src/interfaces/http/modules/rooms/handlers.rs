//! Room catalog HTTP handlers
//!
//! Listings and availability probes are open to any authenticated user;
//! catalog mutations are admin-only.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use chrono::{DateTime, Utc};

use crate::application::services::{BookingService, RoomService};
use crate::auth::AuthenticatedUser;
use crate::domain::room::{RoomDraft, RoomFilter, RoomStatus};
use crate::interfaces::http::common::{
    domain_error, ApiResponse, EmptyData, PaginatedResponse, ValidatedJson,
};

use super::dto::*;

/// Application state for room handlers.
#[derive(Clone)]
pub struct RoomAppState {
    pub rooms: Arc<RoomService>,
    pub booking: Arc<BookingService>,
}

type ApiResult<T> = Result<Json<ApiResponse<T>>, (StatusCode, Json<ApiResponse<T>>)>;

fn bad_request<T>(message: impl Into<String>) -> (StatusCode, Json<ApiResponse<T>>) {
    (StatusCode::BAD_REQUEST, Json(ApiResponse::error(message)))
}

fn require_admin<T>(user: &AuthenticatedUser) -> Result<(), (StatusCode, Json<ApiResponse<T>>)> {
    if user.is_admin() {
        Ok(())
    } else {
        Err((
            StatusCode::FORBIDDEN,
            Json(ApiResponse::error("Insufficient permissions")),
        ))
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/rooms",
    tag = "Rooms",
    security(("bearer_auth" = [])),
    request_body = CreateRoomRequest,
    responses(
        (status = 200, description = "Created room", body = ApiResponse<RoomDto>),
        (status = 403, description = "Admins only"),
        (status = 409, description = "Room number already exists")
    )
)]
pub async fn create_room(
    State(state): State<RoomAppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<CreateRoomRequest>,
) -> ApiResult<RoomDto> {
    require_admin(&user)?;

    let draft = RoomDraft {
        number: request.number,
        room_type: request.room_type,
        price_cents: request.price_cents,
        status: RoomStatus::Available,
    };
    match state.rooms.create_room(draft).await {
        Ok(room) => Ok(Json(ApiResponse::success(room.into()))),
        Err(e) => Err(domain_error(e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/rooms",
    tag = "Rooms",
    security(("bearer_auth" = [])),
    params(RoomListQuery),
    responses(
        (status = 200, description = "Page of rooms", body = ApiResponse<PaginatedResponse<RoomDto>>)
    )
)]
pub async fn list_rooms(
    State(state): State<RoomAppState>,
    Query(query): Query<RoomListQuery>,
) -> ApiResult<PaginatedResponse<RoomDto>> {
    let status = match query.status.as_deref() {
        None => None,
        Some(s) => Some(
            RoomStatus::try_from_str(s)
                .ok_or_else(|| bad_request(format!("Unknown status: {}", s)))?,
        ),
    };

    let filter = RoomFilter {
        status,
        room_type: query.room_type,
    };

    match state.rooms.list_rooms(filter, query.page, query.limit).await {
        Ok(page) => Ok(Json(ApiResponse::success(PaginatedResponse::from_result(
            page,
            RoomDto::from,
        )))),
        Err(e) => Err(domain_error(e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/rooms/{room_id}",
    tag = "Rooms",
    security(("bearer_auth" = [])),
    params(("room_id" = i32, Path, description = "Room ID")),
    responses(
        (status = 200, description = "Room details", body = ApiResponse<RoomDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_room(
    State(state): State<RoomAppState>,
    Path(room_id): Path<i32>,
) -> ApiResult<RoomDto> {
    match state.rooms.get_room(room_id).await {
        Ok(room) => Ok(Json(ApiResponse::success(room.into()))),
        Err(e) => Err(domain_error(e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/rooms/{room_id}/availability",
    tag = "Rooms",
    security(("bearer_auth" = [])),
    params(
        ("room_id" = i32, Path, description = "Room ID"),
        AvailabilityQuery
    ),
    responses(
        (status = 200, description = "Availability for the requested range", body = ApiResponse<AvailabilityDto>),
        (status = 400, description = "Invalid date range"),
        (status = 404, description = "Room not found")
    )
)]
pub async fn check_availability(
    State(state): State<RoomAppState>,
    Path(room_id): Path<i32>,
    Query(query): Query<AvailabilityQuery>,
) -> ApiResult<AvailabilityDto> {
    let check_in = parse_instant(&query.check_in, "check_in")?;
    let check_out = parse_instant(&query.check_out, "check_out")?;

    match state
        .booking
        .is_room_available(room_id, check_in, check_out)
        .await
    {
        Ok(available) => Ok(Json(ApiResponse::success(AvailabilityDto {
            room_id,
            check_in: check_in.to_rfc3339(),
            check_out: check_out.to_rfc3339(),
            available,
        }))),
        Err(e) => Err(domain_error(e)),
    }
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
    put,
    path = "/api/v1/rooms/{room_id}",
    tag = "Rooms",
    security(("bearer_auth" = [])),
    params(("room_id" = i32, Path, description = "Room ID")),
    request_body = UpdateRoomRequest,
    responses(
        (status = 200, description = "Updated room", body = ApiResponse<RoomDto>),
        (status = 403, description = "Admins only"),
        (status = 404, description = "Not found"),
        (status = 409, description = "Room number already exists")
    )
)]
pub async fn update_room(
    State(state): State<RoomAppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(room_id): Path<i32>,
    ValidatedJson(request): ValidatedJson<UpdateRoomRequest>,
) -> ApiResult<RoomDto> {
    require_admin(&user)?;

    match state
        .rooms
        .update_room(
            room_id,
            request.number,
            request.room_type,
            request.price_cents,
        )
        .await
    {
        Ok(room) => Ok(Json(ApiResponse::success(room.into()))),
        Err(e) => Err(domain_error(e)),
    }
}

#[utoipa::path(
    patch,
    path = "/api/v1/rooms/{room_id}/status",
    tag = "Rooms",
    security(("bearer_auth" = [])),
    params(("room_id" = i32, Path, description = "Room ID")),
    request_body = UpdateRoomStatusRequest,
    responses(
        (status = 200, description = "Updated room", body = ApiResponse<RoomDto>),
        (status = 400, description = "Unknown status"),
        (status = 403, description = "Admins only"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_room_status(
    State(state): State<RoomAppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(room_id): Path<i32>,
    Json(request): Json<UpdateRoomStatusRequest>,
) -> ApiResult<RoomDto> {
    require_admin(&user)?;

    let status = RoomStatus::try_from_str(&request.status)
        .ok_or_else(|| bad_request(format!("Unknown status: {}", request.status)))?;

    match state.rooms.set_room_status(room_id, status).await {
        Ok(room) => Ok(Json(ApiResponse::success(room.into()))),
        Err(e) => Err(domain_error(e)),
    }
}

#[utoipa::path(
    delete,
    path = "/api/v1/rooms/{room_id}",
    tag = "Rooms",
    security(("bearer_auth" = [])),
    params(("room_id" = i32, Path, description = "Room ID")),
    responses(
        (status = 200, description = "Room deleted", body = ApiResponse<EmptyData>),
        (status = 403, description = "Admins only"),
        (status = 404, description = "Not found"),
        (status = 409, description = "Room still has live reservations")
    )
)]
pub async fn delete_room(
    State(state): State<RoomAppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(room_id): Path<i32>,
) -> ApiResult<EmptyData> {
    require_admin(&user)?;

    match state.rooms.delete_room(room_id).await {
        Ok(()) => Ok(Json(ApiResponse::success(EmptyData {}))),
        Err(e) => Err(domain_error(e)),
    }
}
