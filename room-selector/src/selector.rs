use std::collections::BTreeMap;

use serde::Serialize;

use crate::layout::Room;

pub const MIN_ROOMS: i64 = 1;
pub const MAX_ROOMS: i64 = 5;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectError {
    #[error("room count must be between {MIN_ROOMS} and {MAX_ROOMS}, got {0}")]
    InvalidCount(i64),
    #[error("requested {requested} rooms but only {available} are free")]
    InsufficientCapacity { requested: usize, available: usize },
}

/// Number of rooms in one booking, always within `MIN_ROOMS..=MAX_ROOMS`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoomCount(u8);

impl RoomCount {
    pub fn new(count: i64) -> Result<Self, SelectError> {
        if (MIN_ROOMS..=MAX_ROOMS).contains(&count) {
            Ok(Self(count as u8))
        } else {
            Err(SelectError::InvalidCount(count))
        }
    }

    pub fn get(self) -> usize {
        self.0 as usize
    }
}

impl TryFrom<i64> for RoomCount {
    type Error = SelectError;

    fn try_from(count: i64) -> Result<Self, Self::Error> {
        Self::new(count)
    }
}

/// Which pass produced a selection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SelectionPass {
    SameFloor { floor: u8 },
    CrossFloor { cost: u32 },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Selection {
    /// Chosen rooms in ascending order.
    pub rooms: Vec<Room>,
    pub pass: SelectionPass,
}

/// Walking cost between two rooms: two units per floor plus one per position.
pub fn travel_time(a: Room, b: Room) -> u32 {
    a.floor().abs_diff(b.floor()) as u32 * 2 + a.position().abs_diff(b.position()) as u32
}

/// Picks `count` rooms out of `available`.
///
/// The lowest floor holding at least `count` free rooms wins outright and
/// contributes its lowest-numbered rooms. Otherwise every `count`-sized
/// combination of the sorted rooms is ranked by the sum of travel times from
/// its first (lowest) room, and the cheapest one in lexicographic order wins.
pub fn select(count: RoomCount, available: &[Room]) -> Result<Selection, SelectError> {
    let count = count.get();
    let mut rooms = available.to_vec();
    rooms.sort_unstable();
    rooms.dedup();

    if rooms.len() < count {
        return Err(SelectError::InsufficientCapacity {
            requested: count,
            available: rooms.len(),
        });
    }

    if let Some(selection) = same_floor(count, &rooms) {
        return Ok(selection);
    }

    cross_floor(count, &rooms).ok_or(SelectError::InsufficientCapacity {
        requested: count,
        available: rooms.len(),
    })
}

fn same_floor(count: usize, rooms: &[Room]) -> Option<Selection> {
    let mut floors: BTreeMap<u8, Vec<Room>> = BTreeMap::new();
    for &room in rooms {
        floors.entry(room.floor()).or_default().push(room);
    }

    floors
        .into_iter()
        .find(|(_, on_floor)| on_floor.len() >= count)
        .map(|(floor, mut on_floor)| {
            on_floor.truncate(count);
            Selection {
                rooms: on_floor,
                pass: SelectionPass::SameFloor { floor },
            }
        })
}

/// Cheapest combination under the anchored cost, `rooms` sorted and unique.
///
/// With the anchor fixed, the cost is a plain sum over the other members, so
/// the best partner set is the `count - 1` later rooms nearest to the anchor
/// (lower index first on equal cost). That set is also the lexicographically
/// first among equal-cost ones, and anchors are visited in enumeration order,
/// so keeping only strict improvements gives the same answer as trying every
/// combination.
fn cross_floor(count: usize, rooms: &[Room]) -> Option<Selection> {
    let partners = count - 1;
    let mut best: Option<(u32, Vec<Room>)> = None;

    for (idx, &anchor) in rooms.iter().enumerate() {
        let rest = &rooms[idx + 1..];
        if rest.len() < partners {
            break;
        }

        let mut nearest: Vec<(u32, usize)> = rest
            .iter()
            .enumerate()
            .map(|(j, &room)| (travel_time(anchor, room), j))
            .collect();
        nearest.sort_unstable();
        nearest.truncate(partners);

        let cost: u32 = nearest.iter().map(|&(time, _)| time).sum();
        if best.as_ref().is_some_and(|&(best_cost, _)| cost >= best_cost) {
            continue;
        }

        let mut picked: Vec<usize> = nearest.into_iter().map(|(_, j)| j).collect();
        picked.sort_unstable();

        let mut combo = Vec::with_capacity(count);
        combo.push(anchor);
        combo.extend(picked.into_iter().map(|j| rest[j]));
        best = Some((cost, combo));
    }

    best.map(|(cost, rooms)| Selection {
        rooms,
        pass: SelectionPass::CrossFloor { cost },
    })
}
