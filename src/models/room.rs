//! Room (studio) model.
//!
//! Rooms are the columns of the timetable. They are loaded once per
//! session and never change while the session is open.

use serde::{Deserialize, Serialize};

/// A rehearsal room.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Room {
    /// Unique room identifier.
    pub id: String,
    /// Display name shown as the column header.
    pub name: String,
    /// Column position (ascending, left to right).
    pub order: u32,
}

impl Room {
    /// Creates a room with an empty name at position 0.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            order: 0,
        }
    }

    /// Sets the room name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the column position.
    pub fn with_order(mut self, order: u32) -> Self {
        self.order = order;
        self
    }
}

/// Sorts rooms into display order, keeping load order for ties.
pub fn sort_rooms(rooms: &mut [Room]) {
    rooms.sort_by_key(|r| r.order);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_builder() {
        let r = Room::new("R1").with_name("Studio A").with_order(2);
        assert_eq!(r.id, "R1");
        assert_eq!(r.name, "Studio A");
        assert_eq!(r.order, 2);
    }

    #[test]
    fn test_sort_rooms_is_stable() {
        let mut rooms = vec![
            Room::new("c").with_order(1),
            Room::new("a").with_order(0),
            Room::new("b").with_order(1),
        ];
        sort_rooms(&mut rooms);
        let ids: Vec<&str> = rooms.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["a", "c", "b"]);
    }
}
