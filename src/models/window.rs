//! Time window model and clock-string helpers.
//!
//! # Time Model
//! All times are whole minutes from midnight of the session day. The
//! session never crosses a day boundary, but `24:00` (1440) is a valid
//! end-of-day bound.
//!
//! # Containment
//! Windows are half-open `[start, end)`. A slot fits a window iff the
//! slot's start is not before the window's start and its end is not after
//! the window's end.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};

/// Minutes from midnight.
pub type Minutes = u32;

/// Upper bound for a clock value (`24:00`).
pub const END_OF_DAY: Minutes = 24 * 60;

/// A time interval [start, end) in minutes.
///
/// Deserialization goes through [`TimeWindow::new`], so serialized input
/// cannot carry an empty or inverted window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawWindow")]
pub struct TimeWindow {
    /// Interval start (minutes, inclusive).
    pub start: Minutes,
    /// Interval end (minutes, exclusive).
    pub end: Minutes,
}

#[derive(Deserialize)]
struct RawWindow {
    start: Minutes,
    end: Minutes,
}

impl TryFrom<RawWindow> for TimeWindow {
    type Error = ScheduleError;

    fn try_from(raw: RawWindow) -> Result<Self> {
        Self::new(raw.start, raw.end)
    }
}

impl TimeWindow {
    /// Creates a validated window.
    ///
    /// Returns [`ScheduleError::InvalidWindow`] unless `start < end`.
    pub fn new(start: Minutes, end: Minutes) -> Result<Self> {
        if start >= end {
            return Err(ScheduleError::InvalidWindow { start, end });
        }
        Ok(Self { start, end })
    }

    /// Parses a window from two `HH:MM` strings.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Self::new(parse_clock(start)?, parse_clock(end)?)
    }

    /// Length in minutes (0 for an empty window).
    #[inline]
    pub fn duration(&self) -> Minutes {
        self.end.saturating_sub(self.start)
    }

    /// Whether no minute lies inside the window.
    ///
    /// Only intersections can produce empty windows; [`TimeWindow::new`]
    /// refuses them.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Whether `other` lies entirely within this window.
    #[inline]
    pub fn contains_window(&self, other: &TimeWindow) -> bool {
        other.start >= self.start && other.end <= self.end
    }

    /// Whether two windows share at least one minute.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Intersection of two windows. May be empty.
    pub fn intersect(&self, other: &Self) -> Self {
        Self {
            start: self.start.max(other.start),
            end: self.end.min(other.end),
        }
    }
}

/// Parses an `HH:MM` clock string into minutes from midnight.
///
/// Accepts single-digit hours and minutes (`9:5`), and `24:00` as the
/// end-of-day bound.
///
/// # Example
/// ```
/// use studio_schedule::models::parse_clock;
///
/// assert_eq!(parse_clock("09:30").unwrap(), 570);
/// assert_eq!(parse_clock("24:00").unwrap(), 1440);
/// assert!(parse_clock("24:30").is_err());
/// ```
pub fn parse_clock(text: &str) -> Result<Minutes> {
    let invalid = || ScheduleError::InvalidClockTime(text.to_string());

    let (h, m) = text.trim().split_once(':').ok_or_else(invalid)?;
    let hours: Minutes = h.parse().map_err(|_| invalid())?;
    let minutes: Minutes = m.parse().map_err(|_| invalid())?;
    if hours > 24 || minutes >= 60 {
        return Err(invalid());
    }

    let total = hours * 60 + minutes;
    if total > END_OF_DAY {
        return Err(invalid());
    }
    Ok(total)
}

/// Formats minutes from midnight as zero-padded `HH:MM`.
pub fn format_clock(minutes: Minutes) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_window() {
        let w = TimeWindow::new(600, 660).unwrap();
        assert_eq!(w.duration(), 60);
        assert!(!w.is_empty());
    }

    #[test]
    fn test_invalid_window_rejected() {
        assert!(matches!(
            TimeWindow::new(600, 600),
            Err(ScheduleError::InvalidWindow { start: 600, end: 600 })
        ));
        assert!(TimeWindow::new(700, 600).is_err());
    }

    #[test]
    fn test_deserialize_validates_window() {
        let w: TimeWindow = serde_json::from_str(r#"{"start":600,"end":660}"#).unwrap();
        assert_eq!(w, TimeWindow::new(600, 660).unwrap());

        assert!(serde_json::from_str::<TimeWindow>(r#"{"start":700,"end":600}"#).is_err());
        assert!(serde_json::from_str::<TimeWindow>(r#"{"start":600,"end":600}"#).is_err());
    }

    #[test]
    fn test_time_window_overlap() {
        let a = TimeWindow::new(0, 100).unwrap();
        let b = TimeWindow::new(50, 150).unwrap();
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));

        let c = TimeWindow::new(100, 200).unwrap(); // touching but not overlapping
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_contains_window() {
        let outer = TimeWindow::parse("10:00", "12:00").unwrap();
        let inner = TimeWindow::parse("10:00", "11:00").unwrap();
        let late = TimeWindow::parse("11:30", "12:30").unwrap();

        assert!(outer.contains_window(&inner));
        assert!(outer.contains_window(&outer));
        assert!(!inner.contains_window(&outer));
        assert!(!outer.contains_window(&late));
    }

    #[test]
    fn test_intersect_may_be_empty() {
        let a = TimeWindow::parse("10:00", "11:00").unwrap();
        let b = TimeWindow::parse("11:00", "12:00").unwrap();
        let i = a.intersect(&b);
        assert!(i.is_empty());
        assert_eq!(i.duration(), 0);
    }

    #[test]
    fn test_parse_clock() {
        assert_eq!(parse_clock("00:00").unwrap(), 0);
        assert_eq!(parse_clock("9:05").unwrap(), 545);
        assert_eq!(parse_clock(" 10:30 ").unwrap(), 630);
        assert_eq!(parse_clock("24:00").unwrap(), END_OF_DAY);
    }

    #[test]
    fn test_parse_clock_rejects_garbage() {
        for bad in ["", "10", "10:60", "25:00", "aa:bb", "10:-1", "99999999:00", "24:99"] {
            assert!(
                matches!(parse_clock(bad), Err(ScheduleError::InvalidClockTime(_))),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(545), "09:05");
        assert_eq!(format_clock(END_OF_DAY), "24:00");
        assert_eq!(format_clock(parse_clock("13:45").unwrap()), "13:45");
    }
}
