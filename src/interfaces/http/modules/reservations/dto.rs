//! Reservation DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::reservation::Reservation;

/// Request to create a new reservation
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateReservationRequest {
    /// Room ID to book
    pub room_id: i32,
    /// Check-in instant (ISO 8601)
    pub check_in: String,
    /// Check-out instant (ISO 8601), must be after check-in
    pub check_out: String,
}

/// Reservation details in API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct ReservationDto {
    pub id: i32,
    pub user_id: String,
    pub room_id: i32,
    pub check_in: String,
    pub check_out: String,
    pub status: String,
    pub created_at: String,
}

impl From<Reservation> for ReservationDto {
    fn from(r: Reservation) -> Self {
        Self {
            id: r.id,
            user_id: r.user_id,
            room_id: r.room_id,
            check_in: r.check_in.to_rfc3339(),
            check_out: r.check_out.to_rfc3339(),
            status: r.status.as_str().to_string(),
            created_at: r.created_at.to_rfc3339(),
        }
    }
}

/// Query parameters for reservation listings
#[derive(Debug, Deserialize, ToSchema, utoipa::IntoParams)]
pub struct ReservationListQuery {
    /// Page number (1-based)
    #[serde(default = "default_page")]
    pub page: u64,
    /// Page size (1-100)
    #[serde(default = "default_limit")]
    pub limit: u64,
    /// Status equality filter, e.g. "Pending"
    pub status: Option<String>,
    /// Room ID equality filter
    pub room_id: Option<i32>,
    /// Owner ID filter (admins only; ignored for guests)
    pub user_id: Option<String>,
    /// Date containment: check_in >= from (ISO 8601)
    pub from: Option<String>,
    /// Date containment: check_out <= to (ISO 8601)
    pub to: Option<String>,
}

fn default_page() -> u64 {
    1
}

fn default_limit() -> u64 {
    20
}
