//! Deterministic depth-first placement.
//!
//! # Algorithm
//!
//! 1. Order unplaced songs by the number of slots they could take on the
//!    entry grid, fewest first (fail-first heuristic), ties by id.
//! 2. Depth-first: for each song try each slot in order, in the first
//!    empty room of that slot; recurse; undo on a dead end.
//! 3. Stop once every song is placed, the search space is exhausted, or
//!    the node budget is spent. On failure every placement made by the
//!    search has already been undone.
//!
//! Empty rooms of one slot are interchangeable for a song (overlap and
//! window are per slot), so only one of them is tried.
//!
//! # Reference
//! Russell & Norvig (2020), "Artificial Intelligence: A Modern Approach",
//! Ch. 6.3 (Backtracking Search for CSPs)

use tracing::{debug, info, warn};

use super::random::unique_pending;
use super::AutoPlaceReport;
use crate::config::DEFAULT_BACKTRACK_NODE_LIMIT;
use crate::conflict::PlacementRules;
use crate::error::{Result, ScheduleError};
use crate::grid::Grid;
use crate::models::Song;

/// Exhaustive placer with a node budget.
#[derive(Debug, Clone)]
pub struct BacktrackingPlacer {
    node_limit: usize,
}

struct Search<'g, 'r> {
    grid: &'g mut Grid,
    rules: &'g PlacementRules<'r>,
    songs: Vec<Song>,
    node_limit: usize,
    nodes: usize,
    deepest: usize,
}

impl BacktrackingPlacer {
    /// Creates a placer with the default node budget.
    pub fn new() -> Self {
        Self {
            node_limit: DEFAULT_BACKTRACK_NODE_LIMIT,
        }
    }

    /// Sets the node budget.
    pub fn with_node_limit(mut self, limit: usize) -> Self {
        self.node_limit = limit;
        self
    }

    /// Places every unplaced song from `songs`, all or nothing.
    ///
    /// On error the grid is exactly as it was on entry.
    pub fn place_all(
        &self,
        grid: &mut Grid,
        songs: &[Song],
        rules: &PlacementRules<'_>,
    ) -> Result<AutoPlaceReport> {
        let mut pending = unique_pending(grid, songs);
        if pending.is_empty() {
            return Ok(AutoPlaceReport::default());
        }

        let mut keyed: Vec<(usize, Song)> = pending
            .drain(..)
            .map(|s| (candidate_slots(grid, rules, &s), s))
            .collect();
        keyed.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.id.cmp(&b.1.id)));

        let mut search = Search {
            grid,
            rules,
            songs: keyed.into_iter().map(|(_, s)| s).collect(),
            node_limit: self.node_limit,
            nodes: 0,
            deepest: 0,
        };

        if search.place_from(0) {
            info!(
                placed = search.songs.len(),
                nodes = search.nodes,
                "backtracking placement complete"
            );
            return Ok(AutoPlaceReport {
                placed: search.songs.len(),
                attempts: search.nodes,
            });
        }

        let stuck = &search.songs[search.deepest.min(search.songs.len() - 1)];
        warn!(
            song = %stuck.id,
            nodes = search.nodes,
            budget_spent = search.nodes >= search.node_limit,
            "backtracking placement failed"
        );
        Err(ScheduleError::AutoPlaceExhausted {
            song_id: stuck.id.clone(),
            attempts: search.nodes,
        })
    }
}

impl Default for BacktrackingPlacer {
    fn default() -> Self {
        Self::new()
    }
}

impl Search<'_, '_> {
    /// Places songs `depth..`; returns `false` with the grid restored
    /// when that is impossible within the budget.
    fn place_from(&mut self, depth: usize) -> bool {
        if depth == self.songs.len() {
            return true;
        }
        self.deepest = self.deepest.max(depth);

        for si in 0..self.grid.slots().len() {
            if self.nodes >= self.node_limit {
                return false;
            }
            let Some(ri) = (0..self.grid.rooms().len()).find(|&ri| self.grid.cell_at(si, ri).is_none())
            else {
                continue;
            };
            let song = &self.songs[depth];
            if self.rules.check_at(self.grid, si, ri, song).is_err() {
                continue;
            }

            self.nodes += 1;
            self.grid.place_at(si, ri, song.clone());
            if self.place_from(depth + 1) {
                return true;
            }
            self.grid.clear_at(si, ri);
            debug!(song = %self.songs[depth].id, slot = %self.grid.slots()[si].id, "backtrack");
        }
        false
    }
}

/// Slots that could take `song` on the current grid.
fn candidate_slots(grid: &Grid, rules: &PlacementRules<'_>, song: &Song) -> usize {
    (0..grid.slots().len())
        .filter(|&si| (0..grid.rooms().len()).any(|ri| rules.check_at(grid, si, ri, song).is_ok()))
        .count()
}
