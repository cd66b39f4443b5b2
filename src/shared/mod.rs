//! Cross-cutting helpers shared by all layers

pub mod types;

pub use types::{validate_pagination, PaginatedResult, MAX_PAGE_SIZE};
