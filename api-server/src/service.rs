use std::sync::Arc;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use room_selector::selector::{MAX_ROOMS, MIN_ROOMS};
use room_selector::{select, Room, RoomCount, SelectError};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{BookingResult, FloorPlan, RoomStatus};
use crate::store::{AvailabilityStore, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("room count must be between {MIN_ROOMS} and {MAX_ROOMS}, got {0}")]
    InvalidCount(i64),
    #[error("requested {requested} rooms but only {available} are free")]
    InsufficientCapacity { requested: usize, available: usize },
    #[error("store invariant violated: {0}")]
    StoreInvariantViolation(#[from] StoreError),
}

impl From<SelectError> for BookingError {
    fn from(err: SelectError) -> Self {
        match err {
            SelectError::InvalidCount(count) => BookingError::InvalidCount(count),
            SelectError::InsufficientCapacity {
                requested,
                available,
            } => BookingError::InsufficientCapacity {
                requested,
                available,
            },
        }
    }
}

struct ReservationState {
    store: AvailabilityStore,
    latest: Option<BookingResult>,
}

/// Owns the availability store and serializes every mutation behind one lock.
///
/// Cloning is cheap; clones share the same store.
#[derive(Clone)]
pub struct ReservationService {
    state: Arc<RwLock<ReservationState>>,
    random_density: f64,
}

impl ReservationService {
    pub fn new(store: AvailabilityStore, random_density: f64) -> Self {
        Self {
            state: Arc::new(RwLock::new(ReservationState {
                store,
                latest: None,
            })),
            random_density,
        }
    }

    pub async fn available_rooms(&self) -> Vec<Room> {
        self.state.read().await.store.available_rooms()
    }

    /// Selects `count` rooms and marks them occupied in one critical section.
    pub async fn book(&self, count: i64) -> Result<BookingResult, BookingError> {
        let count = RoomCount::new(count)?;

        let mut state = self.state.write().await;
        let available = state.store.available_rooms();
        let selection = select(count, &available)?;

        if let Err(err) = state.store.mark_occupied(&selection.rooms) {
            tracing::error!(error = %err, rooms = ?selection.rooms, "selected rooms failed to commit");
            return Err(err.into());
        }

        let booking = BookingResult {
            booking_id: Uuid::new_v4(),
            rooms: selection.rooms,
            booked_at: Utc::now(),
        };
        tracing::info!(
            booking_id = %booking.booking_id,
            rooms = ?booking.rooms,
            pass = ?selection.pass,
            "rooms booked"
        );
        state.latest = Some(booking.clone());
        Ok(booking)
    }

    /// Rooms `book(count)` would pick right now; empty when it would fail.
    pub async fn preview(&self, count: i64) -> Vec<Room> {
        let Ok(count) = RoomCount::new(count) else {
            return Vec::new();
        };

        let available = self.available_rooms().await;
        match select(count, &available) {
            Ok(selection) => selection.rooms,
            Err(err) => {
                tracing::debug!(error = %err, "preview has no feasible selection");
                Vec::new()
            }
        }
    }

    pub async fn reset(&self) {
        let mut state = self.state.write().await;
        state.store.reset_all();
        state.latest = None;
        tracing::info!("all rooms released");
    }

    /// Replaces occupancy with a fresh random draw at the configured density.
    pub async fn randomize(&self) -> usize {
        let mut rng = StdRng::from_entropy();
        self.randomize_with(&mut rng).await
    }

    pub async fn randomize_with<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let mut state = self.state.write().await;
        let occupied = state.store.randomize(self.random_density, rng);
        state.latest = None;
        tracing::info!(occupied, "occupancy randomized");
        occupied
    }

    pub async fn latest_booking(&self) -> Option<BookingResult> {
        self.state.read().await.latest.clone()
    }

    /// Every floor with its rooms, top floor first.
    pub async fn floor_plan(&self) -> Vec<FloorPlan> {
        let state = self.state.read().await;
        let layout = state.store.layout();
        (1..=layout.floor_count())
            .rev()
            .map(|floor| FloorPlan {
                floor,
                rooms: layout
                    .rooms_on_floor(floor)
                    .map(|room| RoomStatus {
                        room_number: room,
                        occupied: state.store.is_occupied(room).unwrap_or(false),
                    })
                    .collect(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use room_selector::Layout;

    fn service_with(layout: Layout) -> ReservationService {
        ReservationService::new(AvailabilityStore::new(layout), 0.4)
    }

    fn numbers(rooms: &[Room]) -> Vec<u16> {
        rooms.iter().map(|r| r.number()).collect()
    }

    #[tokio::test]
    async fn book_commits_selection() {
        let service = service_with(Layout::standard());

        let booking = service.book(3).await.unwrap();
        assert_eq!(numbers(&booking.rooms), vec![101, 102, 103]);

        let available = service.available_rooms().await;
        assert_eq!(available.len(), 94);
        assert!(booking.rooms.iter().all(|r| !available.contains(r)));
        assert_eq!(service.latest_booking().await, Some(booking));
    }

    #[tokio::test]
    async fn consecutive_bookings_never_overlap() {
        let service = service_with(Layout::standard());

        let first = service.book(5).await.unwrap();
        let second = service.book(5).await.unwrap();
        let third = service.book(2).await.unwrap();
        assert_eq!(numbers(&first.rooms), vec![101, 102, 103, 104, 105]);
        assert_eq!(numbers(&second.rooms), vec![106, 107, 108, 109, 110]);
        assert_eq!(numbers(&third.rooms), vec![201, 202]);
        assert_eq!(service.latest_booking().await, Some(third));
    }

    #[tokio::test]
    async fn invalid_count_leaves_store_unchanged() {
        let service = service_with(Layout::standard());

        for count in [0, 6, -1] {
            let err = service.book(count).await.unwrap_err();
            assert!(matches!(err, BookingError::InvalidCount(c) if c == count));
        }
        assert_eq!(service.available_rooms().await.len(), 97);
        assert_eq!(service.latest_booking().await, None);

        assert_eq!(
            BookingError::InvalidCount(6).to_string(),
            "room count must be between 1 and 5, got 6"
        );
    }

    #[tokio::test]
    async fn insufficient_capacity_leaves_store_unchanged() {
        let service = service_with(Layout::new(vec![1]));

        let err = service.book(2).await.unwrap_err();
        assert!(matches!(
            err,
            BookingError::InsufficientCapacity {
                requested: 2,
                available: 1
            }
        ));
        assert_eq!(numbers(&service.available_rooms().await), vec![101]);
    }

    #[tokio::test]
    async fn cross_floor_booking() {
        let mut store = AvailabilityStore::new(Layout::new(vec![10, 10, 10]));
        let taken: Vec<Room> = store
            .available_rooms()
            .into_iter()
            .filter(|r| ![105, 201, 308].contains(&r.number()))
            .collect();
        store.mark_occupied(&taken).unwrap();
        let service = ReservationService::new(store, 0.4);

        let booking = service.book(2).await.unwrap();
        assert_eq!(numbers(&booking.rooms), vec![105, 201]);
        assert_eq!(numbers(&service.available_rooms().await), vec![308]);
    }

    #[tokio::test]
    async fn reset_restores_full_layout() {
        let service = service_with(Layout::standard());
        service.book(4).await.unwrap();
        service.reset().await;

        assert_eq!(service.available_rooms().await.len(), 97);
        assert_eq!(service.latest_booking().await, None);
    }

    #[tokio::test]
    async fn randomize_clears_latest_booking() {
        let service = service_with(Layout::standard());
        service.book(1).await.unwrap();

        let occupied = service.randomize_with(&mut StdRng::seed_from_u64(5)).await;
        assert_eq!(occupied, 39);
        assert_eq!(service.available_rooms().await.len(), 58);
        assert_eq!(service.latest_booking().await, None);
    }

    #[tokio::test]
    async fn preview_does_not_mutate() {
        let service = service_with(Layout::standard());

        let first = service.preview(4).await;
        let second = service.preview(4).await;
        assert_eq!(first, second);
        assert_eq!(numbers(&first), vec![101, 102, 103, 104]);
        assert_eq!(service.available_rooms().await.len(), 97);

        let booking = service.book(4).await.unwrap();
        assert_eq!(booking.rooms, first);
    }

    #[tokio::test]
    async fn preview_is_empty_for_bad_requests() {
        let service = service_with(Layout::new(vec![2]));
        assert!(service.preview(0).await.is_empty());
        assert!(service.preview(6).await.is_empty());
        assert!(service.preview(3).await.is_empty());
        assert_eq!(numbers(&service.preview(2).await), vec![101, 102]);
    }

    #[tokio::test]
    async fn concurrent_bookings_are_serialized() {
        let service = service_with(Layout::standard());

        let handles: Vec<_> = (0..19)
            .map(|_| {
                let service = service.clone();
                tokio::spawn(async move { service.book(5).await })
            })
            .collect();

        let mut booked = Vec::new();
        for handle in handles {
            booked.extend(handle.await.unwrap().unwrap().rooms);
        }
        booked.sort_unstable();
        booked.dedup();
        assert_eq!(booked.len(), 95);
        assert_eq!(service.available_rooms().await.len(), 2);
        assert!(matches!(
            service.book(3).await,
            Err(BookingError::InsufficientCapacity { .. })
        ));
    }

    #[tokio::test]
    async fn floor_plan_lists_top_floor_first() {
        let service = service_with(Layout::standard());
        service.book(2).await.unwrap();

        let plan = service.floor_plan().await;
        assert_eq!(plan.len(), 10);
        assert_eq!(plan[0].floor, 10);
        assert_eq!(plan[0].rooms.len(), 7);
        assert_eq!(plan[9].floor, 1);
        assert!(plan[9].rooms[0].occupied);
        assert!(plan[9].rooms[1].occupied);
        assert!(!plan[9].rooms[2].occupied);
    }
}
