//! Timetable frame generation.
//!
//! A frame is the empty skeleton of a timetable: slots cut from a time
//! range at a fixed stride, and one room per studio name. A trailing
//! remainder shorter than the stride is dropped.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};
use crate::models::{parse_clock, Minutes, Room, TimeSlot, END_OF_DAY};

/// Frame parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameSpec {
    /// First slot start (minutes).
    pub start: Minutes,
    /// Latest slot end (minutes).
    pub end: Minutes,
    /// Slot length (minutes).
    pub interval: Minutes,
    /// Studio names, in column order.
    pub room_names: Vec<String>,
}

/// Generated slots and rooms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    /// Rows, sorted and non-overlapping.
    pub slots: Vec<TimeSlot>,
    /// Columns with `order` = position.
    pub rooms: Vec<Room>,
}

impl FrameSpec {
    /// Creates frame parameters.
    pub fn new(start: Minutes, end: Minutes, interval: Minutes) -> Self {
        Self {
            start,
            end,
            interval,
            room_names: Vec::new(),
        }
    }

    /// Creates frame parameters from `HH:MM` strings.
    pub fn parse(start: &str, end: &str, interval: Minutes) -> Result<Self> {
        Ok(Self::new(parse_clock(start)?, parse_clock(end)?, interval))
    }

    /// Adds a studio column.
    pub fn with_room(mut self, name: impl Into<String>) -> Self {
        self.room_names.push(name.into());
        self
    }

    /// Builds the frame.
    ///
    /// # Example
    /// ```
    /// use studio_schedule::frame::FrameSpec;
    ///
    /// let frame = FrameSpec::parse("10:00", "11:45", 30)
    ///     .unwrap()
    ///     .with_room("Studio A")
    ///     .with_room("Studio B")
    ///     .build()
    ///     .unwrap();
    /// // 10:00, 10:30, 11:00; 11:30-12:00 would overrun 11:45
    /// assert_eq!(frame.slots.len(), 3);
    /// assert_eq!(frame.cell_count(), 6);
    /// ```
    pub fn build(&self) -> Result<Frame> {
        if self.interval == 0 {
            return Err(ScheduleError::InvalidFrame("interval must be positive".into()));
        }
        if self.end <= self.start {
            return Err(ScheduleError::InvalidFrame(
                "end must be after start".into(),
            ));
        }
        if self.end > END_OF_DAY {
            return Err(ScheduleError::InvalidFrame("end must not be after 24:00".into()));
        }
        if self.room_names.is_empty() {
            return Err(ScheduleError::InvalidFrame("at least one room is required".into()));
        }
        if self.room_names.iter().any(|n| n.trim().is_empty()) {
            return Err(ScheduleError::InvalidFrame("every room needs a name".into()));
        }

        let mut slots = Vec::new();
        let mut t = self.start;
        while let Some(next) = t.checked_add(self.interval).filter(|&n| n <= self.end) {
            slots.push(TimeSlot::new(format!("slot-{}", slots.len() + 1), t, next)?);
            t = next;
        }

        let rooms = self
            .room_names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                Room::new(format!("room-{}", i + 1))
                    .with_name(name.trim())
                    .with_order(i as u32)
            })
            .collect();

        Ok(Frame { slots, rooms })
    }
}

impl Frame {
    /// Number of cells.
    pub fn cell_count(&self) -> usize {
        self.slots.len() * self.rooms.len()
    }

    /// Fails when `song_count` songs cannot fit.
    pub fn ensure_capacity(&self, song_count: usize) -> Result<()> {
        let cells = self.cell_count();
        if song_count > cells {
            return Err(ScheduleError::InsufficientCapacity {
                songs: song_count,
                cells,
            });
        }
        Ok(())
    }
}
