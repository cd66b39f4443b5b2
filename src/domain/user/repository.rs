//! User repository interface

use async_trait::async_trait;

use super::model::User;
use crate::domain::DomainResult;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user
    async fn save(&self, user: User) -> DomainResult<()>;

    /// Update an existing user
    async fn update(&self, user: User) -> DomainResult<()>;

    /// Find user by ID
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>>;

    /// Find user by username or email (login accepts either)
    async fn find_by_username_or_email(&self, identifier: &str) -> DomainResult<Option<User>>;

    /// Total number of users
    async fn count(&self) -> DomainResult<u64>;
}
