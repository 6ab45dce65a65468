//! Scheduling session: the editing API.
//!
//! A session owns everything one timetable edit needs (input data, the
//! grid, configuration and the random number generator) and is the only
//! way the grid changes. It is single-owner: every mutation takes
//! `&mut self`, and nothing runs in the background.
//!
//! Placement rejections, auto-place exhaustion and save failures are all
//! returned as [`ScheduleError`] values and leave the session editable.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::availability::Availability;
use crate::config::SchedulerConfig;
use crate::conflict::{self, PlacementRules, Violation};
use crate::error::{Result, ScheduleError};
use crate::grid::{Grid, TimetableRow};
use crate::input::{Loader, ScheduleInput};
use crate::models::{sort_rooms, Membership, Room, Song, TimeSlot};
use crate::persist::Persister;
use crate::scheduler::{self, AutoPlaceReport, TimetableSummary};
use crate::view::{SessionState, TimetableView};

/// One open timetable edit.
///
/// # Example
///
/// ```
/// use studio_schedule::input::ScheduleInput;
/// use studio_schedule::models::{Membership, Room, Song, TimeSlot};
/// use studio_schedule::persist::MemoryPersister;
/// use studio_schedule::session::SchedulingSession;
/// use studio_schedule::view::SessionState;
/// use studio_schedule::SchedulerConfig;
///
/// let input = ScheduleInput::new(
///     vec![Room::new("A"), Room::new("B")],
///     vec![
///         TimeSlot::parse("S1", "10:00", "11:00").unwrap(),
///         TimeSlot::parse("S2", "11:00", "12:00").unwrap(),
///     ],
///     vec![Song::new("E1"), Song::new("E2")],
/// )
/// .with_members(Membership::new().with_member("E1", "p").with_member("E2", "p"));
///
/// let mut session = SchedulingSession::new(input, SchedulerConfig::new().with_seed(7));
/// session.try_place_one("S1", "A", "E1").unwrap();
/// assert!(session.try_place_one("S1", "B", "E2").is_err()); // p is busy
///
/// session.auto_place().unwrap();
/// assert_eq!(session.state(), SessionState::FullyPlaced);
///
/// let mut store = MemoryPersister::new();
/// session.commit(&mut store).unwrap();
/// assert_eq!(store.rows().len(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct SchedulingSession {
    songs: Vec<Song>,
    members: Membership,
    availability: Availability,
    grid: Grid,
    config: SchedulerConfig,
    rng: StdRng,
}

impl SchedulingSession {
    /// Opens a session with an empty grid.
    ///
    /// Rooms are put into display order (`Room::order`, stable). Slots are
    /// taken as given. Unless configured, the session window runs from the
    /// first slot start to the last slot end.
    pub fn new(input: ScheduleInput, config: SchedulerConfig) -> Self {
        let ScheduleInput {
            mut rooms,
            slots,
            songs,
            members,
            performers,
        } = input;
        sort_rooms(&mut rooms);

        let session_window = config.resolve_session_window(&slots);
        let availability = Availability::from_performers(session_window, &performers);
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        debug!(
            rooms = rooms.len(),
            slots = slots.len(),
            songs = songs.len(),
            "opened scheduling session"
        );
        Self {
            grid: Grid::new(&slots, &rooms),
            songs,
            members,
            availability,
            config,
            rng,
        }
    }

    /// Opens a session from a loader.
    pub fn load<L: Loader>(loader: &mut L, config: SchedulerConfig) -> Result<Self> {
        let input = loader
            .load()
            .map_err(|e| ScheduleError::Load(Box::new(e)))?;
        Ok(Self::new(input, config))
    }

    /// Fills the grid from previously saved rows.
    ///
    /// Rows are written as-is (saved data may predate changed availability)
    /// and the resulting rule violations are returned. Cells not mentioned
    /// stay empty. Nothing is written if any row names an unknown slot,
    /// room or song.
    pub fn restore(&mut self, rows: &[TimetableRow]) -> Result<Vec<Violation>> {
        let mut restored = Grid::new(self.grid.slots(), self.grid.rooms());
        for row in rows {
            let Some(song_id) = row.song_id.as_deref() else {
                continue;
            };
            let song = self.song(song_id)?.clone();
            restored.place(&row.slot_id, &row.room_id, song)?;
        }
        self.grid = restored;

        let violations = self.audit();
        if !violations.is_empty() {
            warn!(count = violations.len(), "restored timetable breaks placement rules");
        }
        Ok(violations)
    }

    // ---- read access ----

    /// The current grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// All songs of the session.
    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    /// Columns in display order.
    pub fn rooms(&self) -> &[Room] {
        self.grid.rooms()
    }

    /// Rows.
    pub fn slots(&self) -> &[TimeSlot] {
        self.grid.slots()
    }

    /// Band membership.
    pub fn members(&self) -> &Membership {
        &self.members
    }

    /// Performer availability.
    pub fn availability(&self) -> &Availability {
        &self.availability
    }

    /// Active configuration.
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Looks up a song by id.
    pub fn song(&self, song_id: &str) -> Result<&Song> {
        self.songs
            .iter()
            .find(|s| s.id == song_id)
            .ok_or_else(|| ScheduleError::UnknownSong(song_id.to_string()))
    }

    /// Songs not in any cell, recomputed from the grid.
    pub fn remaining_songs(&self) -> Vec<Song> {
        self.grid.remaining_songs(&self.songs)
    }

    /// Lifecycle state.
    pub fn state(&self) -> SessionState {
        SessionState::from_counts(self.grid.occupied_count(), self.remaining_songs().len())
    }

    /// Snapshot for rendering.
    pub fn view(&self) -> TimetableView {
        TimetableView::build(&self.grid, &self.songs)
    }

    /// Fill statistics.
    pub fn summary(&self) -> TimetableSummary {
        TimetableSummary::calculate(&self.grid, &self.songs)
    }

    /// Every rule violation in the current grid.
    pub fn audit(&self) -> Vec<Violation> {
        conflict::audit(&self.grid, &self.rules())
    }

    fn rules(&self) -> PlacementRules<'_> {
        PlacementRules::new(&self.members, &self.availability)
    }

    // ---- manual placement ----

    /// Checks a placement without applying it.
    pub fn can_place(&self, slot_id: &str, room_id: &str, song_id: &str) -> Result<()> {
        let song = self.song(song_id)?;
        conflict::can_place(
            &self.grid,
            slot_id,
            room_id,
            song,
            &self.members,
            &self.availability,
        )
    }

    /// Places one song if the rules allow it.
    ///
    /// Fails with [`ScheduleError::AlreadyPlaced`] if the song is already
    /// in a cell, or [`ScheduleError::Conflict`] with the rejection reason.
    /// The grid is unchanged on failure.
    pub fn try_place_one(&mut self, slot_id: &str, room_id: &str, song_id: &str) -> Result<()> {
        let song = self.song(song_id)?.clone();
        if let Some((slot, room)) = self.grid.position_of(song_id) {
            return Err(ScheduleError::AlreadyPlaced {
                song_id: song.id,
                slot_id: slot.id.clone(),
                room_id: room.id.clone(),
            });
        }

        let (si, ri) = self.grid.locate(slot_id, room_id)?;
        if let Err(reason) = self.rules().check_at(&self.grid, si, ri, &song) {
            debug!(song = %song.id, slot = slot_id, room = room_id, %reason, "placement rejected");
            return Err(reason.into());
        }

        debug!(song = %song.id, slot = slot_id, room = room_id, "placed song");
        self.grid.place_at(si, ri, song);
        Ok(())
    }

    /// Empties one cell, returning the song it held.
    pub fn remove_one(&mut self, slot_id: &str, room_id: &str) -> Result<Option<Song>> {
        let removed = self.grid.clear(slot_id, room_id)?;
        if let Some(song) = &removed {
            debug!(song = %song.id, slot = slot_id, room = room_id, "removed song");
        }
        Ok(removed)
    }

    /// Empties every cell.
    pub fn reset_all(&mut self) {
        self.grid.reset_all();
        debug!("timetable reset");
    }

    // ---- batch placement ----

    /// Places every remaining song, all or nothing.
    ///
    /// On error the grid is exactly as it was before the call.
    pub fn auto_place(&mut self) -> Result<AutoPlaceReport> {
        let rules = PlacementRules::new(&self.members, &self.availability);
        scheduler::auto_place(
            &mut self.grid,
            &self.songs,
            &rules,
            &self.config,
            &mut self.rng,
        )
    }

    // ---- saving ----

    /// Hands the complete timetable to `persister`.
    ///
    /// Refuses with [`ScheduleError::Incomplete`] while songs remain. A
    /// persister failure becomes [`ScheduleError::Persistence`]; it is not
    /// retried and the session is left as it was. Returns the number of
    /// rows written.
    pub fn commit<P: Persister>(&self, persister: &mut P) -> Result<usize> {
        let remaining = self.remaining_songs().len();
        if remaining > 0 {
            return Err(ScheduleError::Incomplete { remaining });
        }

        let rows = self.grid.rows();
        if let Err(e) = persister.replace_all(&rows) {
            warn!(error = %e, "saving timetable failed");
            return Err(ScheduleError::Persistence(Box::new(e)));
        }

        info!(rows = rows.len(), "timetable saved");
        Ok(rows.len())
    }
}
