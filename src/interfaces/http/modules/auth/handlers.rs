//! Authentication API handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Extension, Json};
use chrono::Utc;
use tracing::info;

use crate::auth::{create_token, hash_password, verify_password, AuthenticatedUser, JwtConfig};
use crate::domain::user::{User, UserRole};
use crate::domain::RepositoryProvider;
use crate::interfaces::http::common::{ApiResponse, EmptyData, ValidatedJson};

use super::dto::*;

/// Auth state for authentication handlers
#[derive(Clone)]
pub struct AuthHandlerState {
    pub repos: Arc<dyn RepositoryProvider>,
    pub jwt_config: JwtConfig,
}

type ApiResult<T> = Result<Json<ApiResponse<T>>, (StatusCode, Json<ApiResponse<T>>)>;

fn internal_error<T>(e: impl std::fmt::Display) -> (StatusCode, Json<ApiResponse<T>>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiResponse::error(e.to_string())),
    )
}

fn unauthorized<T>(message: &str) -> (StatusCode, Json<ApiResponse<T>>) {
    (StatusCode::UNAUTHORIZED, Json(ApiResponse::error(message)))
}

fn user_info(user: &User) -> UserInfo {
    UserInfo {
        id: user.id.clone(),
        username: user.username.clone(),
        email: user.email.clone(),
        role: user.role.as_str().to_string(),
    }
}

/// Авторизация пользователя
///
/// Возвращает JWT-токен при успешной аутентификации.
/// Можно использовать как имя пользователя, так и email в поле `username`.
/// Если аккаунт деактивирован — вернёт 401.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Успешная авторизация, возвращает JWT-токен", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Неверные учётные данные или аккаунт деактивирован")
    )
)]
pub async fn login(
    State(state): State<AuthHandlerState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<LoginResponse> {
    let user = state
        .repos
        .users()
        .find_by_username_or_email(&request.username)
        .await
        .map_err(internal_error)?;

    let Some(mut user) = user else {
        return Err(unauthorized("Invalid credentials"));
    };

    if !user.is_active {
        return Err(unauthorized("Account is disabled"));
    }

    let password_valid = verify_password(&request.password, &user.password_hash).unwrap_or(false);
    if !password_valid {
        return Err(unauthorized("Invalid credentials"));
    }

    // Update last login time; best effort
    user.last_login_at = Some(Utc::now());
    let _ = state.repos.users().update(user.clone()).await;

    let token = create_token(&user.id, &user.username, user.role, &state.jwt_config)
        .map_err(internal_error)?;

    info!(username = %user.username, "User logged in");

    Ok(Json(ApiResponse::success(LoginResponse {
        token,
        token_type: "Bearer".to_string(),
        expires_in: state.jwt_config.expiration_hours * 3600,
        user: user_info(&user),
    })))
}

/// Регистрация нового пользователя
///
/// Новые пользователи всегда получают роль `guest`; администраторов
/// создаёт bootstrap при первом запуске.
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Пользователь создан", body = ApiResponse<UserInfo>),
        (status = 409, description = "Имя пользователя или email уже заняты"),
        (status = 422, description = "Некорректные данные")
    )
)]
pub async fn register(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> ApiResult<UserInfo> {
    for identifier in [&request.username, &request.email] {
        let existing = state
            .repos
            .users()
            .find_by_username_or_email(identifier)
            .await
            .map_err(internal_error)?;
        if existing.is_some() {
            return Err((
                StatusCode::CONFLICT,
                Json(ApiResponse::error("Username or email already taken")),
            ));
        }
    }

    let password_hash = hash_password(&request.password).map_err(internal_error)?;
    let now = Utc::now();
    let user = User {
        id: uuid::Uuid::new_v4().to_string(),
        username: request.username,
        email: request.email,
        password_hash,
        role: UserRole::Guest,
        is_active: true,
        created_at: now,
        updated_at: now,
        last_login_at: None,
    };

    state
        .repos
        .users()
        .save(user.clone())
        .await
        .map_err(internal_error)?;

    info!(username = %user.username, "User registered");

    Ok(Json(ApiResponse::success(user_info(&user))))
}

/// Текущий пользователь
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Информация о текущем пользователе", body = ApiResponse<UserInfo>),
        (status = 401, description = "Не авторизован")
    )
)]
pub async fn get_current_user(
    State(state): State<AuthHandlerState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> ApiResult<UserInfo> {
    let user = state
        .repos
        .users()
        .find_by_id(&auth.user_id)
        .await
        .map_err(internal_error)?;

    let Some(user) = user else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("User not found")),
        ));
    };

    Ok(Json(ApiResponse::success(user_info(&user))))
}

/// Смена пароля текущего пользователя
#[utoipa::path(
    post,
    path = "/api/v1/auth/change-password",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Пароль изменён", body = ApiResponse<EmptyData>),
        (status = 401, description = "Текущий пароль неверен")
    )
)]
pub async fn change_password(
    State(state): State<AuthHandlerState>,
    Extension(auth): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<ChangePasswordRequest>,
) -> ApiResult<EmptyData> {
    let user = state
        .repos
        .users()
        .find_by_id(&auth.user_id)
        .await
        .map_err(internal_error)?;

    let Some(mut user) = user else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("User not found")),
        ));
    };

    let current_valid =
        verify_password(&request.current_password, &user.password_hash).unwrap_or(false);
    if !current_valid {
        return Err(unauthorized("Current password is incorrect"));
    }

    user.password_hash = hash_password(&request.new_password).map_err(internal_error)?;
    user.updated_at = Utc::now();
    state
        .repos
        .users()
        .update(user)
        .await
        .map_err(internal_error)?;

    info!(user_id = %auth.user_id, "Password changed");

    Ok(Json(ApiResponse::success(EmptyData {})))
}
