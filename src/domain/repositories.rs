//! Repository provider: one facade over the per-aggregate repositories

use crate::domain::reservation::ReservationRepository;
use crate::domain::room::RoomRepository;
use crate::domain::user::UserRepository;

/// Unified access to all repositories, injected into the services.
///
/// Implementations hold one connection pool (or one in-memory store) and hand
/// out per-aggregate repository views of it.
pub trait RepositoryProvider: Send + Sync {
    fn rooms(&self) -> &dyn RoomRepository;
    fn reservations(&self) -> &dyn ReservationRepository;
    fn users(&self) -> &dyn UserRepository;
}
