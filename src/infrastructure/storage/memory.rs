//! In-memory storage implementation
//!
//! Development and test backend implementing the same repository interfaces
//! as the SeaORM provider. One mutex guards the whole store so that the
//! check-then-insert admission path and lifecycle transitions stay atomic,
//! matching the isolation the database backend gets from transactions.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::repositories::RepositoryProvider;
use crate::domain::reservation::{
    is_room_available, Reservation, ReservationDraft, ReservationFilter, ReservationRepository,
    ReservationStatus,
};
use crate::domain::room::{Room, RoomDraft, RoomFilter, RoomRepository, RoomStatus};
use crate::domain::user::{User, UserRepository};
use crate::domain::{DomainError, DomainResult};

#[derive(Default)]
struct State {
    rooms: HashMap<i32, Room>,
    reservations: HashMap<i32, Reservation>,
    users: HashMap<String, User>,
    next_room_id: i32,
    next_reservation_id: i32,
}

type SharedState = Arc<Mutex<State>>;

fn lock(state: &SharedState) -> DomainResult<MutexGuard<'_, State>> {
    state
        .lock()
        .map_err(|_| DomainError::Persistence("store mutex poisoned".to_string()))
}

// ── Rooms ───────────────────────────────────────────────────────

pub struct InMemoryRoomRepository {
    state: SharedState,
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn save(&self, draft: RoomDraft) -> DomainResult<Room> {
        let mut state = lock(&self.state)?;
        state.next_room_id += 1;
        let room = Room {
            id: state.next_room_id,
            number: draft.number,
            room_type: draft.room_type,
            price_cents: draft.price_cents,
            status: draft.status,
            created_at: Utc::now(),
        };
        state.rooms.insert(room.id, room.clone());
        Ok(room)
    }

    async fn update(&self, room: Room) -> DomainResult<()> {
        let mut state = lock(&self.state)?;
        if !state.rooms.contains_key(&room.id) {
            return Err(DomainError::RoomNotFound(room.id));
        }
        state.rooms.insert(room.id, room);
        Ok(())
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        let mut state = lock(&self.state)?;
        state
            .rooms
            .remove(&id)
            .map(|_| ())
            .ok_or(DomainError::RoomNotFound(id))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Room>> {
        Ok(lock(&self.state)?.rooms.get(&id).cloned())
    }

    async fn find_by_number(&self, number: &str) -> DomainResult<Option<Room>> {
        Ok(lock(&self.state)?
            .rooms
            .values()
            .find(|r| r.number == number)
            .cloned())
    }

    async fn find_page(
        &self,
        filter: &RoomFilter,
        page: u64,
        limit: u64,
    ) -> DomainResult<(Vec<Room>, u64)> {
        let state = lock(&self.state)?;
        let mut matches: Vec<Room> = state
            .rooms
            .values()
            .filter(|r| filter.status.map_or(true, |s| r.status == s))
            .filter(|r| {
                filter
                    .room_type
                    .as_deref()
                    .map_or(true, |t| r.room_type == t)
            })
            .cloned()
            .collect();
        matches.sort_by(|a, b| a.number.cmp(&b.number));

        let total = matches.len() as u64;
        let start = (page.saturating_sub(1) * limit) as usize;
        let items = matches
            .into_iter()
            .skip(start)
            .take(limit as usize)
            .collect();
        Ok((items, total))
    }

    async fn count_by_status(&self, status: RoomStatus) -> DomainResult<u64> {
        Ok(lock(&self.state)?
            .rooms
            .values()
            .filter(|r| r.status == status)
            .count() as u64)
    }
}

// ── Reservations ────────────────────────────────────────────────

pub struct InMemoryReservationRepository {
    state: SharedState,
}

fn matches_filter(r: &Reservation, filter: &ReservationFilter) -> bool {
    filter.status.map_or(true, |s| r.status == s)
        && filter.room_id.map_or(true, |id| r.room_id == id)
        && filter.user_id.as_deref().map_or(true, |u| r.user_id == u)
        && filter.from.map_or(true, |from| r.check_in >= from)
        && filter.to.map_or(true, |to| r.check_out <= to)
}

#[async_trait]
impl ReservationRepository for InMemoryReservationRepository {
    async fn admit(&self, draft: ReservationDraft) -> DomainResult<Reservation> {
        // Availability check and insert under one lock: the in-memory
        // equivalent of the database transaction.
        let mut state = lock(&self.state)?;

        let room = state
            .rooms
            .get(&draft.room_id)
            .cloned()
            .ok_or(DomainError::RoomNotFound(draft.room_id))?;

        let live: Vec<Reservation> = state
            .reservations
            .values()
            .filter(|r| r.room_id == draft.room_id && r.status.is_live())
            .cloned()
            .collect();

        if !is_room_available(&room, &live, draft.check_in, draft.check_out) {
            return Err(DomainError::RoomNotAvailable {
                room_id: draft.room_id,
                check_in: draft.check_in,
                check_out: draft.check_out,
            });
        }

        state.next_reservation_id += 1;
        let reservation = Reservation {
            id: state.next_reservation_id,
            user_id: draft.user_id,
            room_id: draft.room_id,
            check_in: draft.check_in,
            check_out: draft.check_out,
            status: ReservationStatus::Pending,
            created_at: draft.created_at,
        };
        state
            .reservations
            .insert(reservation.id, reservation.clone());
        Ok(reservation)
    }

    async fn transition(
        &self,
        id: i32,
        target: ReservationStatus,
    ) -> DomainResult<Reservation> {
        let mut state = lock(&self.state)?;

        let current = state
            .reservations
            .get(&id)
            .cloned()
            .ok_or(DomainError::ReservationNotFound(id))?;

        if !current.status.can_transition_to(target) {
            return Err(DomainError::InvalidStatusTransition {
                from: current.status,
                to: target,
            });
        }

        match (current.status, target) {
            (ReservationStatus::Confirmed, ReservationStatus::CheckedIn) => {
                let room = state
                    .rooms
                    .get_mut(&current.room_id)
                    .ok_or(DomainError::RoomNotFound(current.room_id))?;
                room.status = RoomStatus::Occupied;
            }
            (ReservationStatus::CheckedIn, ReservationStatus::CheckedOut)
            | (ReservationStatus::CheckedIn, ReservationStatus::Cancelled) => {
                let room = state
                    .rooms
                    .get_mut(&current.room_id)
                    .ok_or(DomainError::RoomNotFound(current.room_id))?;
                room.status = RoomStatus::Available;
            }
            _ => {}
        }

        let updated = Reservation {
            status: target,
            ..current
        };
        state.reservations.insert(id, updated.clone());
        Ok(updated)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Reservation>> {
        Ok(lock(&self.state)?.reservations.get(&id).cloned())
    }

    async fn find_live_for_room(&self, room_id: i32) -> DomainResult<Vec<Reservation>> {
        let mut live: Vec<Reservation> = lock(&self.state)?
            .reservations
            .values()
            .filter(|r| r.room_id == room_id && r.status.is_live())
            .cloned()
            .collect();
        live.sort_by_key(|r| r.check_in);
        Ok(live)
    }

    async fn find_page(
        &self,
        filter: &ReservationFilter,
        page: u64,
        limit: u64,
    ) -> DomainResult<(Vec<Reservation>, u64)> {
        let state = lock(&self.state)?;
        let mut matches: Vec<Reservation> = state
            .reservations
            .values()
            .filter(|r| matches_filter(r, filter))
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.id.cmp(&a.id));

        let total = matches.len() as u64;
        let start = (page.saturating_sub(1) * limit) as usize;
        let items = matches
            .into_iter()
            .skip(start)
            .take(limit as usize)
            .collect();
        Ok((items, total))
    }

    async fn count_live_for_room(&self, room_id: i32) -> DomainResult<u64> {
        Ok(lock(&self.state)?
            .reservations
            .values()
            .filter(|r| r.room_id == room_id && r.status.is_live())
            .count() as u64)
    }

    async fn count_by_status(&self, status: ReservationStatus) -> DomainResult<u64> {
        Ok(lock(&self.state)?
            .reservations
            .values()
            .filter(|r| r.status == status)
            .count() as u64)
    }

    async fn count_arrivals_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> DomainResult<u64> {
        Ok(lock(&self.state)?
            .reservations
            .values()
            .filter(|r| r.status.is_live() && r.check_in >= from && r.check_in < to)
            .count() as u64)
    }
}

// ── Users ───────────────────────────────────────────────────────

pub struct InMemoryUserRepository {
    state: SharedState,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn save(&self, user: User) -> DomainResult<()> {
        let mut state = lock(&self.state)?;
        if state
            .users
            .values()
            .any(|u| u.username == user.username || u.email == user.email)
        {
            return Err(DomainError::Conflict(format!(
                "User {} already exists",
                user.username
            )));
        }
        state.users.insert(user.id.clone(), user);
        Ok(())
    }

    async fn update(&self, user: User) -> DomainResult<()> {
        let mut state = lock(&self.state)?;
        if !state.users.contains_key(&user.id) {
            return Err(DomainError::Conflict(format!(
                "User {} does not exist",
                user.id
            )));
        }
        state.users.insert(user.id.clone(), user);
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        Ok(lock(&self.state)?.users.get(id).cloned())
    }

    async fn find_by_username_or_email(&self, identifier: &str) -> DomainResult<Option<User>> {
        Ok(lock(&self.state)?
            .users
            .values()
            .find(|u| u.username == identifier || u.email == identifier)
            .cloned())
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(lock(&self.state)?.users.len() as u64)
    }
}

// ── Provider ────────────────────────────────────────────────────

/// In-memory repository provider for development and testing
pub struct InMemoryRepositoryProvider {
    rooms: InMemoryRoomRepository,
    reservations: InMemoryReservationRepository,
    users: InMemoryUserRepository,
}

impl InMemoryRepositoryProvider {
    pub fn new() -> Self {
        let state: SharedState = Arc::new(Mutex::new(State::default()));
        Self {
            rooms: InMemoryRoomRepository {
                state: state.clone(),
            },
            reservations: InMemoryReservationRepository {
                state: state.clone(),
            },
            users: InMemoryUserRepository { state },
        }
    }
}

impl Default for InMemoryRepositoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl RepositoryProvider for InMemoryRepositoryProvider {
    fn rooms(&self) -> &dyn RoomRepository {
        &self.rooms
    }

    fn reservations(&self) -> &dyn ReservationRepository {
        &self.reservations
    }

    fn users(&self) -> &dyn UserRepository {
        &self.users
    }
}
