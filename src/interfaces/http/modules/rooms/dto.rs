//! Room DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::room::Room;

/// Request to create a new room
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[schema(example = json!({
    "number": "204",
    "room_type": "double",
    "price_cents": 14900
}))]
pub struct CreateRoomRequest {
    /// Guest-facing room number (unique)
    #[validate(length(min = 1, max = 20))]
    pub number: String,
    /// Room category, e.g. "single", "double", "suite"
    #[validate(length(min = 1, max = 50))]
    pub room_type: String,
    /// Nightly rate in minor currency units
    #[validate(range(min = 0))]
    pub price_cents: i64,
}

/// Request to update an existing room
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateRoomRequest {
    #[validate(length(min = 1, max = 20))]
    pub number: String,
    #[validate(length(min = 1, max = 50))]
    pub room_type: String,
    #[validate(range(min = 0))]
    pub price_cents: i64,
}

/// Request to change a room's allocation status
#[derive(Debug, Deserialize, ToSchema)]
#[schema(example = json!({ "status": "Maintenance" }))]
pub struct UpdateRoomStatusRequest {
    /// "Available", "Occupied" or "Maintenance"
    pub status: String,
}

/// Room details in API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct RoomDto {
    pub id: i32,
    pub number: String,
    pub room_type: String,
    pub price_cents: i64,
    pub status: String,
    pub created_at: String,
}

impl From<Room> for RoomDto {
    fn from(r: Room) -> Self {
        Self {
            id: r.id,
            number: r.number,
            room_type: r.room_type,
            price_cents: r.price_cents,
            status: r.status.as_str().to_string(),
            created_at: r.created_at.to_rfc3339(),
        }
    }
}

/// Query parameters for room listings
#[derive(Debug, Deserialize, ToSchema, utoipa::IntoParams)]
pub struct RoomListQuery {
    /// Page number (1-based)
    #[serde(default = "default_page")]
    pub page: u64,
    /// Page size (1-100)
    #[serde(default = "default_limit")]
    pub limit: u64,
    /// Status equality filter, e.g. "Available"
    pub status: Option<String>,
    /// Room type equality filter
    pub room_type: Option<String>,
}

fn default_page() -> u64 {
    1
}

fn default_limit() -> u64 {
    20
}

/// Query parameters for an availability probe
#[derive(Debug, Deserialize, ToSchema, utoipa::IntoParams)]
pub struct AvailabilityQuery {
    /// Candidate check-in instant (ISO 8601)
    pub check_in: String,
    /// Candidate check-out instant (ISO 8601)
    pub check_out: String,
}

/// Availability probe result
#[derive(Debug, Serialize, ToSchema)]
pub struct AvailabilityDto {
    pub room_id: i32,
    pub check_in: String,
    pub check_out: String,
    pub available: bool,
}
