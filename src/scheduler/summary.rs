//! Timetable fill statistics.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Fill rate | Occupied cells / total cells |
//! | Remaining | Songs not in any cell |
//! | Per room | Occupied cells in each room column |
//! | Per slot | Occupied cells in each slot row |

use serde::Serialize;
use std::collections::HashMap;

use crate::grid::Grid;
use crate::models::Song;

/// Snapshot of how full a timetable is.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimetableSummary {
    /// Slot x room cells.
    pub total_cells: usize,
    /// Cells holding a song.
    pub occupied_cells: usize,
    /// Songs still waiting for a cell.
    pub remaining_songs: usize,
    /// Fraction of occupied cells (0.0..1.0; 0.0 for an empty grid).
    pub fill_rate: f64,
    /// Occupied cells per room id.
    pub occupied_by_room: HashMap<String, usize>,
    /// Occupied cells per slot id.
    pub occupied_by_slot: HashMap<String, usize>,
}

impl TimetableSummary {
    /// Computes the summary of a grid against the session's songs.
    pub fn calculate(grid: &Grid, songs: &[Song]) -> Self {
        let mut occupied_by_room: HashMap<String, usize> =
            grid.rooms().iter().map(|r| (r.id.clone(), 0)).collect();
        let mut occupied_by_slot: HashMap<String, usize> =
            grid.slots().iter().map(|s| (s.id.clone(), 0)).collect();

        let mut occupied = 0;
        for (slot, room, _) in grid.occupied() {
            occupied += 1;
            *occupied_by_room.entry(room.id.clone()).or_insert(0) += 1;
            *occupied_by_slot.entry(slot.id.clone()).or_insert(0) += 1;
        }

        let total = grid.cell_count();
        let fill_rate = if total > 0 {
            occupied as f64 / total as f64
        } else {
            0.0
        };

        Self {
            total_cells: total,
            occupied_cells: occupied,
            remaining_songs: grid.remaining_songs(songs).len(),
            fill_rate,
            occupied_by_room,
            occupied_by_slot,
        }
    }

    /// Free cells left.
    pub fn free_cells(&self) -> usize {
        self.total_cells - self.occupied_cells
    }
}
