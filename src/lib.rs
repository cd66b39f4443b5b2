//! # Veranda Booking
//!
//! Hotel room reservation service: availability-checked booking admission and
//! an admin-driven reservation lifecycle over a relational store.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, rules and repository interfaces
//! - **application**: Business logic services (booking engine, catalog, stats)
//! - **infrastructure**: External concerns (database, migrations, storage)
//! - **interfaces**: REST API with Swagger documentation
//! - **auth**: JWT authentication and password hashing
//! - **shared**: Pagination and other cross-cutting helpers

pub mod application;
pub mod auth;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};

// Re-export API router
pub use interfaces::create_api_router;
