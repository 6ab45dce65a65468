//! Error types.
//!
//! Placement rejections ([`ConflictReason`]) are expected outcomes of
//! normal editing and are reported to the user as-is. [`ScheduleError`]
//! wraps them together with input errors, batch exhaustion and collaborator
//! failures. None of these invalidate the session: the grid stays editable
//! after any of them.

use thiserror::Error;

use crate::models::Minutes;

/// Why a single placement was refused.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConflictReason {
    /// The target cell already holds a song.
    #[error("the cell is already occupied")]
    CellOccupied,

    /// Another room in the same slot holds a song sharing a performer.
    #[error("a performer is already playing in another room at this time")]
    MemberOverlap,

    /// The slot is not inside every performer's availability window.
    #[error("some performers are not available at this time")]
    OutsideWindow,
}

/// Error type for scheduling operations.
#[derive(Error, Debug)]
pub enum ScheduleError {
    /// A placement was rejected by the conflict checker.
    #[error(transparent)]
    Conflict(#[from] ConflictReason),

    /// Slot id not present in the grid.
    #[error("unknown slot: {0}")]
    UnknownSlot(String),

    /// Room id not present in the grid.
    #[error("unknown room: {0}")]
    UnknownRoom(String),

    /// Song id not part of the session.
    #[error("unknown song: {0}")]
    UnknownSong(String),

    /// The song already occupies a cell.
    #[error("song '{song_id}' is already placed in slot '{slot_id}', room '{room_id}'")]
    AlreadyPlaced {
        /// Song that was offered again.
        song_id: String,
        /// Slot currently holding it.
        slot_id: String,
        /// Room currently holding it.
        room_id: String,
    },

    /// Auto-place ran out of trials for a song; the batch was rolled back.
    #[error("could not place all songs; add rooms or slots, or widen the time window (stuck on '{song_id}' after {attempts} attempts)")]
    AutoPlaceExhausted {
        /// First song that could not be placed.
        song_id: String,
        /// Trials spent on that song.
        attempts: usize,
    },

    /// Commit requested while songs are still unplaced.
    #[error("{remaining} song(s) still need a slot before the timetable can be saved")]
    Incomplete {
        /// Number of unplaced songs.
        remaining: usize,
    },

    /// The persister failed. The in-memory grid is unchanged.
    #[error("failed to save the timetable: {0}")]
    Persistence(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The loader failed.
    #[error("failed to load scheduling input: {0}")]
    Load(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A window with `start >= end` was constructed from input.
    #[error("invalid time window: start {start} must be before end {end}")]
    InvalidWindow {
        /// Start minute.
        start: Minutes,
        /// End minute.
        end: Minutes,
    },

    /// A clock string was not `HH:MM` within `00:00..=24:00`.
    #[error("invalid clock time '{0}', expected HH:MM")]
    InvalidClockTime(String),

    /// Frame parameters cannot produce a timetable.
    #[error("invalid frame: {0}")]
    InvalidFrame(String),

    /// Not enough cells for the songs.
    #[error("not enough cells: {songs} songs but only {cells} cells; extend the time range or add rooms")]
    InsufficientCapacity {
        /// Songs to place.
        songs: usize,
        /// Slot x room cells available.
        cells: usize,
    },
}

impl ScheduleError {
    /// The placement rejection carried by this error, if any.
    pub fn conflict(&self) -> Option<ConflictReason> {
        match self {
            ScheduleError::Conflict(reason) => Some(*reason),
            _ => None,
        }
    }

    /// Whether this error came from a collaborator (persister or loader)
    /// rather than from the scheduling rules.
    pub fn is_collaborator_failure(&self) -> bool {
        matches!(self, ScheduleError::Persistence(_) | ScheduleError::Load(_))
    }
}

/// Result type alias for scheduling operations.
pub type Result<T> = std::result::Result<T, ScheduleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_conversion() {
        let err: ScheduleError = ConflictReason::MemberOverlap.into();
        assert_eq!(err.conflict(), Some(ConflictReason::MemberOverlap));
        assert_eq!(err.to_string(), ConflictReason::MemberOverlap.to_string());
        assert!(!err.is_collaborator_failure());
    }

    #[test]
    fn test_exhausted_message_guides_user() {
        let err = ScheduleError::AutoPlaceExhausted {
            song_id: "s1".into(),
            attempts: 100,
        };
        let msg = err.to_string();
        assert!(msg.contains("add rooms or slots"));
        assert!(msg.contains("widen the time window"));
        assert!(err.conflict().is_none());
    }

    #[test]
    fn test_persistence_is_collaborator_failure() {
        let io = std::io::Error::other("disk full");
        let err = ScheduleError::Persistence(Box::new(io));
        assert!(err.is_collaborator_failure());
        assert!(err.to_string().contains("disk full"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
