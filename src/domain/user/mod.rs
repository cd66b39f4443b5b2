//! User domain: identity, roles and repository interface

pub mod model;
pub mod repository;

pub use model::{Actor, User, UserRole};
pub use repository::UserRepository;
