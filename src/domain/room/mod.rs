//! Room domain: catalog entity and repository interface

pub mod model;
pub mod repository;

pub use model::{Room, RoomDraft, RoomStatus};
pub use repository::{RoomFilter, RoomRepository};
