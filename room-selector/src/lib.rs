pub mod layout;
pub mod selector;

pub use layout::{Layout, Room};
pub use selector::{select, travel_time, RoomCount, SelectError, Selection, SelectionPass};
