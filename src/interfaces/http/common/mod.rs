//! Common API types shared by all HTTP modules

pub mod validated_json;

pub use validated_json::ValidatedJson;

use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::DomainError;

/// Стандартная обёртка ответа API
///
/// Все REST-эндпоинты возвращают данные в этой обёртке.
/// При успехе: `{"success": true, "data": {...}}`,
/// при ошибке: `{"success": false, "error": "описание"}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// `true` если запрос выполнен успешно
    pub success: bool,
    /// Полезная нагрузка (данные). `null` при ошибке
    pub data: Option<T>,
    /// Описание ошибки. `null` при успехе
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Empty response for operations without return data
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EmptyData {}

/// Параметры пагинации для запросов со списками
#[derive(Debug, Deserialize, ToSchema, utoipa::IntoParams)]
pub struct PaginationParams {
    /// Номер страницы (начиная с 1). По умолчанию: 1
    #[serde(default = "default_page")]
    pub page: u64,
    /// Количество элементов на странице (1–100). По умолчанию: 20
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_page() -> u64 {
    1
}

fn default_limit() -> u64 {
    20
}

/// Ответ с пагинацией
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaginatedResponse<T> {
    /// Массив элементов на текущей странице
    pub items: Vec<T>,
    /// Общее количество элементов (по всем страницам)
    pub total: u64,
    /// Текущая страница (1-based)
    pub page: u64,
    /// Размер страницы
    pub limit: u64,
    /// Общее количество страниц
    pub total_pages: u64,
}

impl<T> PaginatedResponse<T> {
    pub fn from_result<U>(
        result: crate::shared::PaginatedResult<U>,
        map: impl Fn(U) -> T,
    ) -> Self {
        Self {
            items: result.items.into_iter().map(map).collect(),
            total: result.total,
            page: result.page,
            limit: result.limit,
            total_pages: result.total_pages,
        }
    }
}

/// HTTP status for a domain error
pub fn error_status(err: &DomainError) -> StatusCode {
    match err {
        DomainError::InvalidRange { .. } => StatusCode::BAD_REQUEST,
        DomainError::RoomNotFound(_) | DomainError::ReservationNotFound(_) => {
            StatusCode::NOT_FOUND
        }
        DomainError::RoomNotAvailable { .. }
        | DomainError::InvalidStatusTransition { .. }
        | DomainError::Conflict(_) => StatusCode::CONFLICT,
        DomainError::UnauthorizedAccess { .. } => StatusCode::FORBIDDEN,
        DomainError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Render a domain error as an API error tuple
pub fn domain_error<T>(err: DomainError) -> (StatusCode, Json<ApiResponse<T>>) {
    (error_status(&err), Json(ApiResponse::error(err.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ReservationStatus;

    #[test]
    fn error_statuses_follow_the_taxonomy() {
        assert_eq!(
            error_status(&DomainError::InvalidRange {
                reason: "x".into()
            }),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            error_status(&DomainError::RoomNotFound(1)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            error_status(&DomainError::ReservationNotFound(1)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            error_status(&DomainError::InvalidStatusTransition {
                from: ReservationStatus::Cancelled,
                to: ReservationStatus::Confirmed,
            }),
            StatusCode::CONFLICT
        );
        assert_eq!(
            error_status(&DomainError::UnauthorizedAccess {
                requester_id: "u".into(),
                reservation_id: 1,
            }),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            error_status(&DomainError::Persistence("down".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
