//! Application layer: services orchestrating the domain

pub mod services;

pub use services::{BookingService, DashboardService, DashboardSummary, RoomService};
