//! Persistence seam.
//!
//! Saving is an atomic "replace all rows" write of the flattened grid.
//! The core calls it only when every song is placed and never retries;
//! a failed save leaves the session untouched so the user can try again.

use std::convert::Infallible;

use crate::grid::TimetableRow;

/// Destination for a finished timetable.
pub trait Persister {
    /// Failure type of the destination.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Replaces every stored row with `rows`, atomically.
    ///
    /// `rows` holds one entry per (slot, room) cell, empty cells included.
    fn replace_all(&mut self, rows: &[TimetableRow]) -> Result<(), Self::Error>;
}

/// Persister keeping the last saved timetable in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryPersister {
    rows: Vec<TimetableRow>,
    saves: usize,
}

impl MemoryPersister {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows of the last save.
    pub fn rows(&self) -> &[TimetableRow] {
        &self.rows
    }

    /// Number of successful saves.
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl Persister for MemoryPersister {
    type Error = Infallible;

    fn replace_all(&mut self, rows: &[TimetableRow]) -> Result<(), Infallible> {
        self.rows = rows.to_vec();
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(slot: &str, room: &str, song: Option<&str>) -> TimetableRow {
        TimetableRow {
            slot_id: slot.into(),
            room_id: room.into(),
            song_id: song.map(Into::into),
        }
    }

    #[test]
    fn test_memory_persister_replaces() {
        let mut p = MemoryPersister::new();
        p.replace_all(&[row("S1", "A", Some("E1")), row("S1", "B", None)])
            .unwrap();
        assert_eq!(p.rows().len(), 2);

        p.replace_all(&[row("S1", "A", None)]).unwrap();
        assert_eq!(p.rows(), &[row("S1", "A", None)]);
        assert_eq!(p.saves(), 2);
    }
}
