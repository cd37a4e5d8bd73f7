use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use rand::Rng;
use room_selector::{Layout, Room};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("room {0} is already occupied")]
    AlreadyOccupied(Room),
    #[error("room {0} is not part of the layout")]
    UnknownRoom(Room),
}

/// Occupancy flag for every room of a fixed layout.
#[derive(Debug, Clone)]
pub struct AvailabilityStore {
    layout: Layout,
    occupied: BTreeMap<Room, bool>,
}

impl AvailabilityStore {
    pub fn new(layout: Layout) -> Self {
        let occupied = layout.rooms().map(|room| (room, false)).collect();
        Self { layout, occupied }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Free rooms in ascending order.
    pub fn available_rooms(&self) -> Vec<Room> {
        self.occupied
            .iter()
            .filter(|&(_, occupied)| !occupied)
            .map(|(&room, _)| room)
            .collect()
    }

    /// `None` for rooms outside the layout.
    pub fn is_occupied(&self, room: Room) -> Option<bool> {
        self.occupied.get(&room).copied()
    }

    pub fn occupied_count(&self) -> usize {
        self.occupied.values().filter(|&&occupied| occupied).count()
    }

    /// Marks every room in `rooms` occupied, or none of them.
    pub fn mark_occupied(&mut self, rooms: &[Room]) -> Result<(), StoreError> {
        for (idx, &room) in rooms.iter().enumerate() {
            match self.occupied.get(&room) {
                None => return Err(StoreError::UnknownRoom(room)),
                Some(true) => return Err(StoreError::AlreadyOccupied(room)),
                Some(false) if rooms[..idx].contains(&room) => {
                    return Err(StoreError::AlreadyOccupied(room))
                }
                Some(false) => {}
            }
        }

        for room in rooms {
            self.occupied.insert(*room, true);
        }
        Ok(())
    }

    pub fn reset_all(&mut self) {
        self.occupied.values_mut().for_each(|occupied| *occupied = false);
    }

    /// Replaces occupancy with `round(density * rooms)` rooms picked uniformly.
    /// Returns the number of occupied rooms.
    pub fn randomize<R: Rng + ?Sized>(&mut self, density: f64, rng: &mut R) -> usize {
        self.reset_all();

        let rooms: Vec<Room> = self.occupied.keys().copied().collect();
        let target = (density.clamp(0.0, 1.0) * rooms.len() as f64).round() as usize;
        for &room in rooms.choose_multiple(rng, target) {
            self.occupied.insert(room, true);
        }
        target
    }
}
