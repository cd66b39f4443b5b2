//! SeaORM repository implementations

pub mod repository_provider;
pub mod reservation_repository;
pub mod room_repository;
pub mod user_repository;

pub use repository_provider::SeaOrmRepositoryProvider;
pub use reservation_repository::SeaOrmReservationRepository;
pub use room_repository::SeaOrmRoomRepository;
pub use user_repository::SeaOrmUserRepository;

use sea_orm::TransactionError;

use crate::domain::DomainError;

/// Map a SeaORM error into the one wrapping domain error kind.
pub(crate) fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Persistence(e.to_string())
}

/// Unwrap a transaction error: connection failures become `Persistence`,
/// domain errors raised inside the closure pass through after the rollback.
pub(crate) fn txn_err(e: TransactionError<DomainError>) -> DomainError {
    match e {
        TransactionError::Connection(e) => db_err(e),
        TransactionError::Transaction(e) => e,
    }
}
