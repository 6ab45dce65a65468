//! Randomized greedy placement with bounded retries.
//!
//! # Algorithm
//!
//! 1. Drop songs already in the grid (and repeated ids), then shuffle the
//!    rest uniformly (Fisher-Yates).
//! 2. For each song, draw up to `max_attempts_per_song` uniformly random
//!    (slot, room) cells and place the song in the first one the rules
//!    accept. Later songs see earlier placements.
//! 3. If a song runs out of trials, undo every placement made by this
//!    call and report [`ScheduleError::AutoPlaceExhausted`].
//!
//! # Complexity
//! O(n * a * r) where n=songs, a=attempts per song, r=rooms per slot
//! (the overlap scan).
//!
//! Random sampling converges quickly for the usual few dozen cells with
//! loose constraints. It gives no completeness guarantee; see
//! [`super::BacktrackingPlacer`] for that.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info, warn};

use super::AutoPlaceReport;
use crate::config::DEFAULT_MAX_ATTEMPTS;
use crate::conflict::PlacementRules;
use crate::error::{Result, ScheduleError};
use crate::grid::Grid;
use crate::models::Song;

/// Randomized greedy placer.
///
/// # Example
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::SmallRng;
/// use studio_schedule::availability::Availability;
/// use studio_schedule::conflict::PlacementRules;
/// use studio_schedule::grid::Grid;
/// use studio_schedule::models::{Membership, Room, Song, TimeSlot, TimeWindow};
/// use studio_schedule::scheduler::RandomPlacer;
///
/// let slots = vec![
///     TimeSlot::parse("S1", "10:00", "11:00").unwrap(),
///     TimeSlot::parse("S2", "11:00", "12:00").unwrap(),
/// ];
/// let rooms = vec![Room::new("A")];
/// let mut grid = Grid::new(&slots, &rooms);
/// let members = Membership::new();
/// let availability = Availability::new(TimeWindow::parse("10:00", "24:00").unwrap());
/// let songs = vec![Song::new("E1"), Song::new("E2")];
///
/// let mut rng = SmallRng::seed_from_u64(1);
/// let report = RandomPlacer::new()
///     .place_all(&mut grid, &songs, &PlacementRules::new(&members, &availability), &mut rng)
///     .unwrap();
/// assert_eq!(report.placed, 2);
/// assert_eq!(grid.occupied_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct RandomPlacer {
    max_attempts_per_song: usize,
}

impl RandomPlacer {
    /// Creates a placer with the default trial budget (100).
    pub fn new() -> Self {
        Self {
            max_attempts_per_song: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Sets the per-song trial budget.
    pub fn with_max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts_per_song = attempts;
        self
    }

    /// Places every unplaced song from `songs`, all or nothing.
    ///
    /// On error the grid is exactly as it was on entry.
    pub fn place_all<R: Rng>(
        &self,
        grid: &mut Grid,
        songs: &[Song],
        rules: &PlacementRules<'_>,
        rng: &mut R,
    ) -> Result<AutoPlaceReport> {
        let mut pending = unique_pending(grid, songs);
        pending.shuffle(rng);

        let slot_count = grid.slots().len();
        let room_count = grid.rooms().len();
        let mut journal: Vec<(usize, usize)> = Vec::with_capacity(pending.len());
        let mut total_attempts = 0;

        for song in pending {
            let mut placed_at = None;
            let mut attempts = 0;

            if slot_count > 0 && room_count > 0 {
                while attempts < self.max_attempts_per_song {
                    attempts += 1;
                    let si = rng.random_range(0..slot_count);
                    let ri = rng.random_range(0..room_count);
                    if rules.check_at(grid, si, ri, &song).is_ok() {
                        placed_at = Some((si, ri));
                        break;
                    }
                }
            }
            total_attempts += attempts;

            match placed_at {
                Some((si, ri)) => {
                    debug!(
                        song = %song.id,
                        slot = %grid.slots()[si].id,
                        room = %grid.rooms()[ri].id,
                        attempts,
                        "placed song"
                    );
                    grid.place_at(si, ri, song);
                    journal.push((si, ri));
                }
                None => {
                    warn!(
                        song = %song.id,
                        attempts,
                        rolled_back = journal.len(),
                        "auto-place exhausted; rolling back"
                    );
                    for (si, ri) in journal.into_iter().rev() {
                        grid.clear_at(si, ri);
                    }
                    return Err(ScheduleError::AutoPlaceExhausted {
                        song_id: song.id,
                        attempts,
                    });
                }
            }
        }

        info!(
            placed = journal.len(),
            attempts = total_attempts,
            "auto-place complete"
        );
        Ok(AutoPlaceReport {
            placed: journal.len(),
            attempts: total_attempts,
        })
    }
}

impl Default for RandomPlacer {
    fn default() -> Self {
        Self::new()
    }
}

/// Songs not yet in the grid, first occurrence of each id only.
pub(crate) fn unique_pending(grid: &Grid, songs: &[Song]) -> Vec<Song> {
    let mut seen = HashSet::new();
    grid.remaining_songs(songs)
        .into_iter()
        .filter(|s| seen.insert(s.id.clone()))
        .collect()
}
