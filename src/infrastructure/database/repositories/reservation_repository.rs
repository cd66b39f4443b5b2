//! SeaORM implementation of ReservationRepository
//!
//! `admit` and `transition` are the two write paths of the booking engine and
//! both run inside a database transaction: the availability re-check (or the
//! fresh status read) and the subsequent writes commit as one unit, so
//! concurrent colliding requests serialize at the datastore instead of racing
//! in the application.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::debug;

use crate::domain::reservation::{
    is_room_available, Reservation, ReservationDraft, ReservationFilter, ReservationRepository,
    ReservationStatus,
};
use crate::domain::room::RoomStatus;
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{reservation, room};

use super::{db_err, txn_err};

pub struct SeaOrmReservationRepository {
    db: DatabaseConnection,
}

impl SeaOrmReservationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: reservation::Model) -> Reservation {
    Reservation {
        id: m.id,
        user_id: m.user_id,
        room_id: m.room_id,
        check_in: m.check_in,
        check_out: m.check_out,
        status: ReservationStatus::from_str(&m.status),
        created_at: m.created_at,
    }
}

fn live_status_values() -> Vec<&'static str> {
    ReservationStatus::LIVE.iter().map(|s| s.as_str()).collect()
}

/// Flip the room's allocation status inside the surrounding transaction.
async fn set_room_status(
    txn: &DatabaseTransaction,
    room_id: i32,
    status: RoomStatus,
) -> DomainResult<()> {
    let existing = room::Entity::find_by_id(room_id)
        .one(txn)
        .await
        .map_err(db_err)?
        .ok_or(DomainError::RoomNotFound(room_id))?;

    let mut active: room::ActiveModel = existing.into();
    active.status = Set(status.as_str().to_string());
    active.update(txn).await.map_err(db_err)?;
    Ok(())
}

// ── ReservationRepository impl ──────────────────────────────────

#[async_trait]
impl ReservationRepository for SeaOrmReservationRepository {
    async fn admit(&self, draft: ReservationDraft) -> DomainResult<Reservation> {
        debug!(
            room_id = draft.room_id,
            user_id = %draft.user_id,
            "Admitting reservation"
        );

        let inserted = self
            .db
            .transaction::<_, reservation::Model, DomainError>(|txn| {
                Box::pin(async move {
                    let room = room::Entity::find_by_id(draft.room_id)
                        .one(txn)
                        .await
                        .map_err(db_err)?
                        .ok_or(DomainError::RoomNotFound(draft.room_id))?;
                    let room = super::room_repository::model_to_domain(room);

                    let live: Vec<Reservation> = reservation::Entity::find()
                        .filter(reservation::Column::RoomId.eq(draft.room_id))
                        .filter(reservation::Column::Status.is_in(live_status_values()))
                        .all(txn)
                        .await
                        .map_err(db_err)?
                        .into_iter()
                        .map(model_to_domain)
                        .collect();

                    if !is_room_available(&room, &live, draft.check_in, draft.check_out) {
                        return Err(DomainError::RoomNotAvailable {
                            room_id: draft.room_id,
                            check_in: draft.check_in,
                            check_out: draft.check_out,
                        });
                    }

                    let model = reservation::ActiveModel {
                        user_id: Set(draft.user_id),
                        room_id: Set(draft.room_id),
                        check_in: Set(draft.check_in),
                        check_out: Set(draft.check_out),
                        status: Set(ReservationStatus::Pending.as_str().to_string()),
                        created_at: Set(draft.created_at),
                        ..Default::default()
                    };
                    model.insert(txn).await.map_err(db_err)
                })
            })
            .await
            .map_err(txn_err)?;

        Ok(model_to_domain(inserted))
    }

    async fn transition(
        &self,
        id: i32,
        target: ReservationStatus,
    ) -> DomainResult<Reservation> {
        debug!(reservation_id = id, target = %target, "Applying transition");

        let updated = self
            .db
            .transaction::<_, reservation::Model, DomainError>(move |txn| {
                Box::pin(async move {
                    // Status is read fresh here, never taken from the caller.
                    let current = reservation::Entity::find_by_id(id)
                        .one(txn)
                        .await
                        .map_err(db_err)?
                        .ok_or(DomainError::ReservationNotFound(id))?;

                    let from = ReservationStatus::from_str(&current.status);
                    if !from.can_transition_to(target) {
                        return Err(DomainError::InvalidStatusTransition { from, to: target });
                    }

                    match (from, target) {
                        (ReservationStatus::Confirmed, ReservationStatus::CheckedIn) => {
                            set_room_status(txn, current.room_id, RoomStatus::Occupied).await?;
                        }
                        (ReservationStatus::CheckedIn, ReservationStatus::CheckedOut)
                        | (ReservationStatus::CheckedIn, ReservationStatus::Cancelled) => {
                            set_room_status(txn, current.room_id, RoomStatus::Available).await?;
                        }
                        // Cancelling before check-in never touched the room.
                        _ => {}
                    }

                    let mut active: reservation::ActiveModel = current.into();
                    active.status = Set(target.as_str().to_string());
                    active.update(txn).await.map_err(db_err)
                })
            })
            .await
            .map_err(txn_err)?;

        Ok(model_to_domain(updated))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Reservation>> {
        let model = reservation::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_live_for_room(&self, room_id: i32) -> DomainResult<Vec<Reservation>> {
        let models = reservation::Entity::find()
            .filter(reservation::Column::RoomId.eq(room_id))
            .filter(reservation::Column::Status.is_in(live_status_values()))
            .order_by_asc(reservation::Column::CheckIn)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_page(
        &self,
        filter: &ReservationFilter,
        page: u64,
        limit: u64,
    ) -> DomainResult<(Vec<Reservation>, u64)> {
        let mut query = reservation::Entity::find();
        if let Some(status) = &filter.status {
            query = query.filter(reservation::Column::Status.eq(status.as_str()));
        }
        if let Some(room_id) = filter.room_id {
            query = query.filter(reservation::Column::RoomId.eq(room_id));
        }
        if let Some(user_id) = &filter.user_id {
            query = query.filter(reservation::Column::UserId.eq(user_id));
        }
        if let Some(from) = filter.from {
            query = query.filter(reservation::Column::CheckIn.gte(from));
        }
        if let Some(to) = filter.to {
            query = query.filter(reservation::Column::CheckOut.lte(to));
        }

        let paginator = query
            .order_by_desc(reservation::Column::Id)
            .paginate(&self.db, limit);
        let total = paginator.num_items().await.map_err(db_err)?;
        let models = paginator
            .fetch_page(page.saturating_sub(1))
            .await
            .map_err(db_err)?;

        Ok((models.into_iter().map(model_to_domain).collect(), total))
    }

    async fn count_live_for_room(&self, room_id: i32) -> DomainResult<u64> {
        reservation::Entity::find()
            .filter(reservation::Column::RoomId.eq(room_id))
            .filter(reservation::Column::Status.is_in(live_status_values()))
            .count(&self.db)
            .await
            .map_err(db_err)
    }

    async fn count_by_status(&self, status: ReservationStatus) -> DomainResult<u64> {
        reservation::Entity::find()
            .filter(reservation::Column::Status.eq(status.as_str()))
            .count(&self.db)
            .await
            .map_err(db_err)
    }

    async fn count_arrivals_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> DomainResult<u64> {
        reservation::Entity::find()
            .filter(reservation::Column::Status.is_in(live_status_values()))
            .filter(reservation::Column::CheckIn.gte(from))
            .filter(reservation::Column::CheckIn.lt(to))
            .count(&self.db)
            .await
            .map_err(db_err)
    }
}
