use std::fmt;

use serde::{Deserialize, Serialize};

/// Floors 1..=9 carry this many rooms.
const ROOMS_PER_FLOOR: u8 = 10;
/// The top floor is shorter.
const TOP_FLOOR_ROOMS: u8 = 7;
const FLOOR_COUNT: u8 = 10;

/// A room number such as `305` (floor 3, position 5).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Room(u16);

impl Room {
    pub const fn new(number: u16) -> Self {
        Self(number)
    }

    pub fn from_parts(floor: u8, position: u8) -> Self {
        Self(floor as u16 * 100 + position as u16)
    }

    pub fn number(self) -> u16 {
        self.0
    }

    pub fn floor(self) -> u8 {
        (self.0 / 100) as u8
    }

    pub fn position(self) -> u8 {
        (self.0 % 100) as u8
    }
}

impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fixed building layout: `rooms_per_floor[i]` is the room count of floor `i + 1`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    rooms_per_floor: Vec<u8>,
}

impl Layout {
    /// Floors 1-9 with 10 rooms each and floor 10 with 7 rooms (97 rooms).
    pub fn standard() -> Self {
        let mut rooms_per_floor = vec![ROOMS_PER_FLOOR; (FLOOR_COUNT - 1) as usize];
        rooms_per_floor.push(TOP_FLOOR_ROOMS);
        Self { rooms_per_floor }
    }

    pub fn new(rooms_per_floor: Vec<u8>) -> Self {
        Self { rooms_per_floor }
    }

    pub fn floor_count(&self) -> u8 {
        self.rooms_per_floor.len() as u8
    }

    pub fn rooms_on_floor(&self, floor: u8) -> impl Iterator<Item = Room> + '_ {
        let count = floor
            .checked_sub(1)
            .and_then(|idx| self.rooms_per_floor.get(idx as usize))
            .copied()
            .unwrap_or(0);
        (1..=count).map(move |position| Room::from_parts(floor, position))
    }

    /// Every room in ascending order.
    pub fn rooms(&self) -> impl Iterator<Item = Room> + '_ {
        (1..=self.floor_count()).flat_map(|floor| self.rooms_on_floor(floor))
    }

    pub fn room_count(&self) -> usize {
        self.rooms_per_floor.iter().map(|&n| n as usize).sum()
    }

    pub fn contains(&self, room: Room) -> bool {
        let floor = room.floor();
        let position = room.position();
        floor >= 1
            && position >= 1
            && self
                .rooms_per_floor
                .get(floor as usize - 1)
                .is_some_and(|&count| position <= count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_layout_has_97_rooms() {
        let layout = Layout::standard();
        assert_eq!(layout.floor_count(), 10);
        assert_eq!(layout.room_count(), 97);
        assert_eq!(layout.rooms().count(), 97);
    }

    #[test]
    fn room_numbering_matches_floor_and_position() {
        let layout = Layout::standard();
        let first_floor: Vec<u16> = layout.rooms_on_floor(1).map(Room::number).collect();
        assert_eq!(first_floor, (101..=110).collect::<Vec<_>>());

        let top: Vec<u16> = layout.rooms_on_floor(10).map(Room::number).collect();
        assert_eq!(top, (1001..=1007).collect::<Vec<_>>());

        let room = Room::new(1007);
        assert_eq!(room.floor(), 10);
        assert_eq!(room.position(), 7);
    }

    #[test]
    fn rooms_are_ascending() {
        let rooms: Vec<Room> = Layout::standard().rooms().collect();
        assert!(rooms.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn contains_rejects_rooms_outside_layout() {
        let layout = Layout::standard();
        assert!(layout.contains(Room::new(101)));
        assert!(layout.contains(Room::new(910)));
        assert!(layout.contains(Room::new(1007)));
        assert!(!layout.contains(Room::new(1008)));
        assert!(!layout.contains(Room::new(100)));
        assert!(!layout.contains(Room::new(111)));
        assert!(!layout.contains(Room::new(1101)));
        assert!(!layout.contains(Room::new(5)));
    }

    #[test]
    fn unknown_floor_has_no_rooms() {
        let layout = Layout::new(vec![10, 10]);
        assert_eq!(layout.rooms_on_floor(0).count(), 0);
        assert_eq!(layout.rooms_on_floor(3).count(), 0);
        assert_eq!(layout.room_count(), 20);
    }
}
