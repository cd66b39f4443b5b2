pub mod handlers;

pub use handlers::DashboardAppState;
