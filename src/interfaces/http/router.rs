//! API Router with Swagger UI

use std::sync::Arc;

use axum::{
    extract::FromRef,
    middleware,
    routing::{get, patch, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::services::{BookingService, DashboardService, RoomService};
use crate::auth::{admin_middleware, auth_middleware, AuthState, JwtConfig};
use crate::domain::RepositoryProvider;
use crate::interfaces::http::common::{ApiResponse, EmptyData, PaginatedResponse};
use crate::interfaces::http::modules::auth::AuthHandlerState;
use crate::interfaces::http::modules::dashboard::DashboardAppState;
use crate::interfaces::http::modules::reservations::ReservationAppState;
use crate::interfaces::http::modules::rooms::RoomAppState;
use crate::interfaces::http::modules::{auth, dashboard, health, reservations, rooms};

/// Unified state for all API routes. Axum extracts the specific handler
/// state via `FromRef`.
#[derive(Clone)]
pub struct ApiState {
    pub repos: Arc<dyn RepositoryProvider>,
    pub booking: Arc<BookingService>,
    pub rooms: Arc<RoomService>,
    pub dashboard: Arc<DashboardService>,
    pub auth: AuthState,
}

// -- FromRef implementations so each handler keeps its own State<T> extractor --

impl FromRef<ApiState> for ReservationAppState {
    fn from_ref(s: &ApiState) -> Self {
        ReservationAppState {
            booking: Arc::clone(&s.booking),
        }
    }
}

impl FromRef<ApiState> for RoomAppState {
    fn from_ref(s: &ApiState) -> Self {
        RoomAppState {
            rooms: Arc::clone(&s.rooms),
            booking: Arc::clone(&s.booking),
        }
    }
}

impl FromRef<ApiState> for DashboardAppState {
    fn from_ref(s: &ApiState) -> Self {
        DashboardAppState {
            dashboard: Arc::clone(&s.dashboard),
        }
    }
}

impl FromRef<ApiState> for AuthHandlerState {
    fn from_ref(s: &ApiState) -> Self {
        AuthHandlerState {
            repos: Arc::clone(&s.repos),
            jwt_config: s.auth.jwt_config.clone(),
        }
    }
}

impl FromRef<ApiState> for AuthState {
    fn from_ref(s: &ApiState) -> Self {
        s.auth.clone()
    }
}

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::handlers::health_check,
        // Auth
        auth::handlers::login,
        auth::handlers::register,
        auth::handlers::get_current_user,
        auth::handlers::change_password,
        // Rooms
        rooms::handlers::create_room,
        rooms::handlers::list_rooms,
        rooms::handlers::get_room,
        rooms::handlers::check_availability,
        rooms::handlers::update_room,
        rooms::handlers::update_room_status,
        rooms::handlers::delete_room,
        // Reservations
        reservations::handlers::create_reservation,
        reservations::handlers::list_reservations,
        reservations::handlers::get_reservation,
        reservations::handlers::confirm_reservation,
        reservations::handlers::check_in_reservation,
        reservations::handlers::check_out_reservation,
        reservations::handlers::cancel_reservation,
        // Dashboard
        dashboard::handlers::dashboard_summary,
    ),
    components(schemas(
        ApiResponse<EmptyData>,
        EmptyData,
        PaginatedResponse<rooms::dto::RoomDto>,
        PaginatedResponse<reservations::dto::ReservationDto>,
        auth::dto::LoginRequest,
        auth::dto::LoginResponse,
        auth::dto::RegisterRequest,
        auth::dto::ChangePasswordRequest,
        auth::dto::UserInfo,
        rooms::dto::CreateRoomRequest,
        rooms::dto::UpdateRoomRequest,
        rooms::dto::UpdateRoomStatusRequest,
        rooms::dto::RoomDto,
        rooms::dto::AvailabilityDto,
        reservations::dto::CreateReservationRequest,
        reservations::dto::ReservationDto,
        dashboard::handlers::DashboardSummaryDto,
        health::handlers::HealthDto,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service liveness"),
        (name = "Authentication", description = "Login, registration and tokens"),
        (name = "Rooms", description = "Room catalog"),
        (name = "Reservations", description = "Booking admission and lifecycle"),
        (name = "Dashboard", description = "Occupancy statistics"),
    ),
    info(
        title = "Veranda Booking API",
        description = "Hotel room reservation service",
    )
)]
struct ApiDoc;

/// Build the complete API router.
///
/// Route groups:
/// - public: health, login, register
/// - authenticated: reservations, room catalog, profile
/// - admin-gated: lifecycle transitions, dashboard (room catalog mutations
///   check the role in the handler since they share paths with listings)
pub fn create_api_router(
    repos: Arc<dyn RepositoryProvider>,
    booking: Arc<BookingService>,
    rooms_service: Arc<RoomService>,
    dashboard_service: Arc<DashboardService>,
    jwt_config: JwtConfig,
) -> Router {
    let auth_state = AuthState {
        jwt_config: jwt_config.clone(),
    };
    let state = ApiState {
        repos,
        booking,
        rooms: rooms_service,
        dashboard: dashboard_service,
        auth: auth_state.clone(),
    };

    let public = Router::new()
        .route("/health", get(health::handlers::health_check))
        .route("/api/v1/auth/login", post(auth::handlers::login))
        .route("/api/v1/auth/register", post(auth::handlers::register));

    let authenticated = Router::new()
        .route("/api/v1/auth/me", get(auth::handlers::get_current_user))
        .route(
            "/api/v1/auth/change-password",
            post(auth::handlers::change_password),
        )
        .route(
            "/api/v1/reservations",
            post(reservations::handlers::create_reservation)
                .get(reservations::handlers::list_reservations),
        )
        .route(
            "/api/v1/reservations/{reservation_id}",
            get(reservations::handlers::get_reservation),
        )
        .route(
            "/api/v1/reservations/{reservation_id}/cancel",
            post(reservations::handlers::cancel_reservation),
        )
        .route(
            "/api/v1/rooms",
            get(rooms::handlers::list_rooms).post(rooms::handlers::create_room),
        )
        .route(
            "/api/v1/rooms/{room_id}",
            get(rooms::handlers::get_room)
                .put(rooms::handlers::update_room)
                .delete(rooms::handlers::delete_room),
        )
        .route(
            "/api/v1/rooms/{room_id}/status",
            patch(rooms::handlers::update_room_status),
        )
        .route(
            "/api/v1/rooms/{room_id}/availability",
            get(rooms::handlers::check_availability),
        );

    let admin = Router::new()
        .route(
            "/api/v1/reservations/{reservation_id}/confirm",
            post(reservations::handlers::confirm_reservation),
        )
        .route(
            "/api/v1/reservations/{reservation_id}/check-in",
            post(reservations::handlers::check_in_reservation),
        )
        .route(
            "/api/v1/reservations/{reservation_id}/check-out",
            post(reservations::handlers::check_out_reservation),
        )
        .route(
            "/api/v1/dashboard/summary",
            get(dashboard::handlers::dashboard_summary),
        )
        .route_layer(middleware::from_fn(admin_middleware));

    Router::new()
        .merge(authenticated)
        .merge(admin)
        .route_layer(middleware::from_fn_with_state(auth_state, auth_middleware))
        .merge(public)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
