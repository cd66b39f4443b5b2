//! Authentication DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Запрос на авторизацию
#[derive(Debug, Deserialize, ToSchema)]
#[schema(example = json!({
    "username": "admin",
    "password": "secret123"
}))]
pub struct LoginRequest {
    /// Имя пользователя или email
    pub username: String,
    /// Пароль
    pub password: String,
}

/// Ответ на успешную авторизацию
///
/// Содержит JWT-токен для последующих запросов.
/// Токен передаётся в заголовке `Authorization: Bearer <token>`
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    /// JWT access-токен для авторизации
    pub token: String,
    /// Тип токена (всегда `Bearer`)
    pub token_type: String,
    /// Время жизни токена в секундах
    pub expires_in: i64,
    /// Информация о пользователе
    pub user: UserInfo,
}

/// Информация о пользователе
#[derive(Debug, Serialize, ToSchema)]
pub struct UserInfo {
    /// Уникальный идентификатор пользователя (UUID)
    pub id: String,
    /// Имя пользователя
    pub username: String,
    /// Email
    pub email: String,
    /// Роль: `admin` или `guest`
    pub role: String,
}

/// Запрос на регистрацию нового пользователя
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[schema(example = json!({
    "username": "newguest",
    "email": "guest@example.com",
    "password": "secure_password_123"
}))]
pub struct RegisterRequest {
    /// Имя пользователя (от 3 до 50 символов, уникальное)
    #[validate(length(min = 3, max = 50))]
    pub username: String,
    /// Email-адрес (уникальный)
    #[validate(email)]
    pub email: String,
    /// Пароль (минимум 8 символов)
    #[validate(length(min = 8))]
    pub password: String,
}

/// Запрос на смену пароля
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ChangePasswordRequest {
    /// Текущий пароль
    pub current_password: String,
    /// Новый пароль (минимум 8 символов)
    #[validate(length(min = 8))]
    pub new_password: String,
}
