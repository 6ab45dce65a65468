//! Scheduling input and the loader seam.
//!
//! The core never fetches data. A [`Loader`] hands over one
//! [`ScheduleInput`]: rooms in column order, slots sorted by start and
//! non-overlapping, songs, band membership and performer availability.
//! Shape problems can be listed with [`crate::validation::validate_input`]
//! before a session is opened.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;

use crate::models::{Membership, Performer, Room, Song, TimeSlot};

/// Everything a scheduling session needs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleInput {
    /// Columns, in display order.
    pub rooms: Vec<Room>,
    /// Rows, sorted by start.
    pub slots: Vec<TimeSlot>,
    /// Songs to schedule.
    pub songs: Vec<Song>,
    /// Song → performers.
    pub members: Membership,
    /// Performers with declared availability. Performers missing here
    /// are available for the whole session.
    pub performers: Vec<Performer>,
}

impl ScheduleInput {
    /// Creates an input from rooms, slots and songs.
    pub fn new(rooms: Vec<Room>, slots: Vec<TimeSlot>, songs: Vec<Song>) -> Self {
        Self {
            rooms,
            slots,
            songs,
            ..Default::default()
        }
    }

    /// Sets the membership map.
    pub fn with_members(mut self, members: Membership) -> Self {
        self.members = members;
        self
    }

    /// Adds a performer.
    pub fn with_performer(mut self, performer: Performer) -> Self {
        self.performers.push(performer);
        self
    }
}

/// Source of scheduling input (database, file, fixture).
pub trait Loader {
    /// Failure type of the source.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Produces the input for one session.
    fn load(&mut self) -> Result<ScheduleInput, Self::Error>;
}

impl Loader for ScheduleInput {
    type Error = Infallible;

    fn load(&mut self) -> Result<ScheduleInput, Infallible> {
        Ok(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimeWindow;

    #[test]
    fn test_input_builder() {
        let input = ScheduleInput::new(
            vec![Room::new("A")],
            vec![TimeSlot::parse("S1", "10:00", "10:30").unwrap()],
            vec![Song::new("E1")],
        )
        .with_members(Membership::new().with_member("E1", "p"))
        .with_performer(Performer::new("p").with_window(TimeWindow::parse("10:00", "12:00").unwrap()));

        assert_eq!(input.rooms.len(), 1);
        assert_eq!(input.members.members_of("E1").len(), 1);
        assert_eq!(input.performers.len(), 1);
    }

    #[test]
    fn test_input_from_json() {
        let json = r#"{
            "rooms": [{"id": "A", "name": "Studio A", "order": 0}],
            "slots": [{"id": "S1", "start": 600, "end": 630}],
            "songs": [{"id": "E1", "artist": "Band", "title": "Tune"}],
            "members": {"E1": ["p", "q"]},
            "performers": [{"id": "p", "availability": {"start": 600, "end": 720}}]
        }"#;
        let mut input: ScheduleInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.slots[0].end, 630);
        assert_eq!(input.members.members_of("E1").len(), 2);

        let loaded = input.load().unwrap();
        assert_eq!(loaded, input);
    }
}
