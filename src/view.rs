//! Read-only snapshot for the presentation layer.

use serde::Serialize;

use crate::grid::Grid;
use crate::models::{Room, Song, TimeSlot};

/// Where a session is in its lifecycle.
///
/// `Empty → PartiallyPlaced ⇄ PartiallyPlaced → FullyPlaced`; a reset
/// returns any state to `Empty`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// No cell holds a song.
    Empty,
    /// Some songs placed, some remaining.
    PartiallyPlaced,
    /// Every song placed.
    FullyPlaced,
}

impl SessionState {
    /// Derives the state from occupied and remaining counts.
    pub fn from_counts(occupied: usize, remaining: usize) -> Self {
        match (occupied, remaining) {
            (0, _) => SessionState::Empty,
            (_, 0) => SessionState::FullyPlaced,
            _ => SessionState::PartiallyPlaced,
        }
    }
}

/// One timetable row as rendered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewRow {
    /// The slot.
    pub slot: TimeSlot,
    /// `HH:MM-HH:MM` label.
    pub label: String,
    /// Cell contents, parallel to [`TimetableView::rooms`].
    pub cells: Vec<Option<Song>>,
}

/// Snapshot of a session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimetableView {
    /// Column headers.
    pub rooms: Vec<Room>,
    /// Rows in slot order.
    pub rows: Vec<ViewRow>,
    /// Songs still to place (the pick list for empty cells).
    pub remaining: Vec<Song>,
    /// Lifecycle state.
    pub state: SessionState,
}

impl TimetableView {
    /// Builds the snapshot.
    pub fn build(grid: &Grid, songs: &[Song]) -> Self {
        let rows = grid
            .slots()
            .iter()
            .enumerate()
            .map(|(si, slot)| ViewRow {
                slot: slot.clone(),
                label: slot.label(),
                cells: (0..grid.rooms().len())
                    .map(|ri| grid.cell_at(si, ri).cloned())
                    .collect(),
            })
            .collect();
        let remaining = grid.remaining_songs(songs);
        let state = SessionState::from_counts(grid.occupied_count(), remaining.len());

        Self {
            rooms: grid.rooms().to_vec(),
            rows,
            remaining,
            state,
        }
    }
}
