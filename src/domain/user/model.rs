//! User domain entity and requester identity

use chrono::{DateTime, Utc};

/// User role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserRole {
    /// Hotel staff: manages rooms and drives reservation lifecycles
    Admin,
    /// Regular guest: books and cancels own reservations
    Guest,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Guest => "guest",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "admin" => Self::Admin,
            _ => Self::Guest,
        }
    }
}

impl Default for UserRole {
    fn default() -> Self {
        Self::Guest
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Registered user
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID (UUID)
    pub id: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

/// Authenticated requester attached to each operation.
///
/// Credential verification happens at the transport layer; the services only
/// see the resulting `(id, role)` pair.
#[derive(Debug, Clone)]
pub struct Actor {
    pub id: String,
    pub role: UserRole,
}

impl Actor {
    pub fn new(id: impl Into<String>, role: UserRole) -> Self {
        Self {
            id: id.into(),
            role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_roundtrip() {
        assert_eq!(UserRole::from_str("admin"), UserRole::Admin);
        assert_eq!(UserRole::from_str("guest"), UserRole::Guest);
        assert_eq!(UserRole::from_str("bogus"), UserRole::Guest);
    }

    #[test]
    fn actor_admin_check() {
        assert!(Actor::new("u1", UserRole::Admin).is_admin());
        assert!(!Actor::new("u2", UserRole::Guest).is_admin());
    }
}
