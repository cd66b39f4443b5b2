//!
//! Veranda Booking REST server.
//! Reads configuration from TOML file (~/.config/veranda-booking/config.toml).

use std::sync::Arc;

use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use veranda_booking::application::services::{BookingService, DashboardService, RoomService};
use veranda_booking::auth::{hash_password, JwtConfig};
use veranda_booking::config::AppConfig;
use veranda_booking::domain::clock::SystemClock;
use veranda_booking::domain::user::{User, UserRole};
use veranda_booking::domain::RepositoryProvider;
use veranda_booking::infrastructure::database::migrator::Migrator;
use veranda_booking::{
    create_api_router, default_config_path, init_database, DatabaseConfig,
    SeaOrmRepositoryProvider,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("BOOKING_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            // Initialize logging with configured level
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logging.level)),
                )
                .init();
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            error!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        }
    };

    info!("Starting Veranda Booking service...");

    // ── Build sub-configs from AppConfig ───────────────────────
    let db_config = DatabaseConfig {
        url: app_cfg.database.connection_url(),
    };
    info!("Database: {}", db_config.url);

    let jwt_config = JwtConfig {
        secret: app_cfg.security.jwt_secret.clone(),
        expiration_hours: app_cfg.security.jwt_expiration_hours,
        issuer: "veranda-booking".to_string(),
    };
    info!(
        "JWT configured with {}h token expiration",
        jwt_config.expiration_hours
    );

    // ── Database ───────────────────────────────────────────────
    let db = match init_database(&db_config).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    info!("Running database migrations...");
    if let Err(e) = Migrator::up(&db, None).await {
        error!("Failed to run migrations: {}", e);
        return Err(e.into());
    }
    info!("Migrations completed");

    // Initialize repository provider
    let repos: Arc<dyn RepositoryProvider> = Arc::new(SeaOrmRepositoryProvider::new(db.clone()));

    // Create default admin user if not exists
    create_default_admin(&repos, &app_cfg).await;

    // Initialize services
    let clock = Arc::new(SystemClock);
    let booking = Arc::new(BookingService::new(repos.clone(), clock.clone()));
    let rooms = Arc::new(RoomService::new(repos.clone()));
    let dashboard = Arc::new(DashboardService::new(repos.clone(), clock));

    // Create REST API router
    let api_router = create_api_router(repos, booking, rooms, dashboard, jwt_config);

    // Start REST API server with graceful shutdown
    let api_addr = format!("{}:{}", app_cfg.server.api_host, app_cfg.server.api_port);
    let listener = tokio::net::TcpListener::bind(&api_addr).await?;
    info!("REST API server listening on http://{}", api_addr);
    info!("Swagger UI available at http://{}/docs/", api_addr);

    axum::serve(listener, api_router)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for shutdown signal: {}", e);
            }
            info!("Shutdown signal received");
        })
        .await?;

    // Perform final cleanup
    if let Err(e) = db.close().await {
        warn!("Error closing database connection: {}", e);
    } else {
        info!("Database connection closed");
    }

    info!("Veranda Booking shutdown complete");
    Ok(())
}

/// Create default admin user if no users exist
async fn create_default_admin(repos: &Arc<dyn RepositoryProvider>, app_cfg: &AppConfig) {
    let users_count = repos.users().count().await.unwrap_or(0);

    if users_count == 0 {
        info!("Creating default admin user...");

        let password_hash = match hash_password(&app_cfg.admin.password) {
            Ok(hash) => hash,
            Err(e) => {
                error!("Failed to hash admin password: {}", e);
                return;
            }
        };

        let now = chrono::Utc::now();
        let admin = User {
            id: uuid::Uuid::new_v4().to_string(),
            username: app_cfg.admin.username.clone(),
            email: app_cfg.admin.email.clone(),
            password_hash,
            role: UserRole::Admin,
            is_active: true,
            created_at: now,
            updated_at: now,
            last_login_at: None,
        };

        match repos.users().save(admin).await {
            Ok(()) => {
                info!("Default admin created: {}", app_cfg.admin.email);
                warn!("Please change the admin password immediately!");
            }
            Err(e) => {
                error!("Failed to create admin user: {}", e);
            }
        }
    }
}
