//! Batch placement engines and timetable statistics.
//!
//! Both engines share one contract: place every song not yet in the grid
//! so that the placement rules hold, or fail and leave the grid exactly
//! as it was on entry.
//!
//! - `RandomPlacer`: shuffled songs, random cells, bounded trials per
//!   song. Fast, incomplete.
//! - `BacktrackingPlacer`: fail-first depth-first search with undo,
//!   bounded by a node budget. Complete within the budget.
//!
//! `TimetableSummary` reports fill rate and per-row/column occupancy.

mod backtrack;
mod random;
mod summary;

pub use backtrack::BacktrackingPlacer;
pub use random::RandomPlacer;
pub use summary::TimetableSummary;

use rand::Rng;
use serde::Serialize;

use crate::config::{PlacementStrategy, SchedulerConfig};
use crate::conflict::PlacementRules;
use crate::error::Result;
use crate::grid::Grid;
use crate::models::Song;

/// Outcome of a successful batch placement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AutoPlaceReport {
    /// Songs placed by this call.
    pub placed: usize,
    /// Random trials, or search nodes for backtracking.
    pub attempts: usize,
}

/// Places every unplaced song with the configured strategy.
pub fn auto_place<R: Rng>(
    grid: &mut Grid,
    songs: &[Song],
    rules: &PlacementRules<'_>,
    config: &SchedulerConfig,
    rng: &mut R,
) -> Result<AutoPlaceReport> {
    match config.strategy {
        PlacementStrategy::Random => RandomPlacer::new()
            .with_max_attempts(config.max_attempts_per_song)
            .place_all(grid, songs, rules, rng),
        PlacementStrategy::Backtracking => BacktrackingPlacer::new()
            .with_node_limit(config.backtrack_node_limit)
            .place_all(grid, songs, rules),
    }
}
