//! Time slot model.
//!
//! Slots are the rows of the timetable: fixed, non-overlapping intervals
//! sorted by start. The loader (or the frame builder) guarantees that
//! shape; the slot type itself only guarantees `start < end`.

use serde::{Deserialize, Serialize};

use super::{format_clock, parse_clock, Minutes, TimeWindow};
use crate::error::{Result, ScheduleError};

/// A schedulable time interval [start, end).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawSlot")]
pub struct TimeSlot {
    /// Unique slot identifier.
    pub id: String,
    /// Slot start (minutes, inclusive).
    pub start: Minutes,
    /// Slot end (minutes, exclusive).
    pub end: Minutes,
}

#[derive(Deserialize)]
struct RawSlot {
    id: String,
    start: Minutes,
    end: Minutes,
}

impl TryFrom<RawSlot> for TimeSlot {
    type Error = ScheduleError;

    fn try_from(raw: RawSlot) -> Result<Self> {
        Self::new(raw.id, raw.start, raw.end)
    }
}

impl TimeSlot {
    /// Creates a slot. Fails unless `start < end`.
    pub fn new(id: impl Into<String>, start: Minutes, end: Minutes) -> Result<Self> {
        let window = TimeWindow::new(start, end)?;
        Ok(Self {
            id: id.into(),
            start: window.start,
            end: window.end,
        })
    }

    /// Creates a slot from `HH:MM` clock strings.
    ///
    /// # Example
    /// ```
    /// use studio_schedule::models::TimeSlot;
    ///
    /// let slot = TimeSlot::parse("S1", "09:00", "10:00").unwrap();
    /// assert_eq!(slot.start, 540);
    /// assert_eq!(slot.label(), "09:00-10:00");
    /// ```
    pub fn parse(id: impl Into<String>, start: &str, end: &str) -> Result<Self> {
        Self::new(id, parse_clock(start)?, parse_clock(end)?)
    }

    /// The slot as a window.
    #[inline]
    pub fn window(&self) -> TimeWindow {
        TimeWindow {
            start: self.start,
            end: self.end,
        }
    }

    /// Length in minutes.
    #[inline]
    pub fn duration(&self) -> Minutes {
        self.end.saturating_sub(self.start)
    }

    /// Row label, e.g. `10:00-10:30`.
    pub fn label(&self) -> String {
        format!("{}-{}", format_clock(self.start), format_clock(self.end))
    }
}
