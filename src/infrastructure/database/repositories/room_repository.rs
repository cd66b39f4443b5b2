//! SeaORM implementation of RoomRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::debug;

use crate::domain::room::{Room, RoomDraft, RoomFilter, RoomRepository, RoomStatus};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::room;

use super::db_err;

pub struct SeaOrmRoomRepository {
    db: DatabaseConnection,
}

impl SeaOrmRoomRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

pub(super) fn model_to_domain(m: room::Model) -> Room {
    Room {
        id: m.id,
        number: m.number,
        room_type: m.room_type,
        price_cents: m.price_cents,
        status: RoomStatus::from_str(&m.status),
        created_at: m.created_at,
    }
}

// ── RoomRepository impl ─────────────────────────────────────────

#[async_trait]
impl RoomRepository for SeaOrmRoomRepository {
    async fn save(&self, draft: RoomDraft) -> DomainResult<Room> {
        debug!("Saving room: {}", draft.number);

        let model = room::ActiveModel {
            number: Set(draft.number),
            room_type: Set(draft.room_type),
            price_cents: Set(draft.price_cents),
            status: Set(draft.status.as_str().to_string()),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        };
        let inserted = model.insert(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(inserted))
    }

    async fn update(&self, r: Room) -> DomainResult<()> {
        debug!("Updating room: {}", r.id);

        let existing = room::Entity::find_by_id(r.id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        if existing.is_none() {
            return Err(DomainError::RoomNotFound(r.id));
        }

        let model = room::ActiveModel {
            id: Set(r.id),
            number: Set(r.number),
            room_type: Set(r.room_type),
            price_cents: Set(r.price_cents),
            status: Set(r.status.as_str().to_string()),
            created_at: Set(r.created_at),
        };
        model.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        let result = room::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::RoomNotFound(id));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Room>> {
        let model = room::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_number(&self, number: &str) -> DomainResult<Option<Room>> {
        let model = room::Entity::find()
            .filter(room::Column::Number.eq(number))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_page(
        &self,
        filter: &RoomFilter,
        page: u64,
        limit: u64,
    ) -> DomainResult<(Vec<Room>, u64)> {
        let mut query = room::Entity::find();
        if let Some(status) = &filter.status {
            query = query.filter(room::Column::Status.eq(status.as_str()));
        }
        if let Some(room_type) = &filter.room_type {
            query = query.filter(room::Column::RoomType.eq(room_type));
        }

        let paginator = query
            .order_by_asc(room::Column::Number)
            .paginate(&self.db, limit);
        let total = paginator.num_items().await.map_err(db_err)?;
        let models = paginator
            .fetch_page(page.saturating_sub(1))
            .await
            .map_err(db_err)?;

        Ok((models.into_iter().map(model_to_domain).collect(), total))
    }

    async fn count_by_status(&self, status: RoomStatus) -> DomainResult<u64> {
        room::Entity::find()
            .filter(room::Column::Status.eq(status.as_str()))
            .count(&self.db)
            .await
            .map_err(db_err)
    }
}
