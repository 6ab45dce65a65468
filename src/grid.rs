//! Slot × room assignment grid.
//!
//! The grid is the single source of truth for what is placed where.
//! Anything derived from it (remaining songs, state, rows for saving) is
//! recomputed from the cells on demand rather than tracked alongside.
//!
//! Writes here are unconditional. Rule checks live in
//! [`crate::conflict`] and must run before [`Grid::place`].

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{Result, ScheduleError};
use crate::models::{Room, Song, TimeSlot};

/// One flattened cell, as handed to the persister.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimetableRow {
    /// Slot of the cell.
    pub slot_id: String,
    /// Room of the cell.
    pub room_id: String,
    /// Placed song, `None` for an empty cell.
    pub song_id: Option<String>,
}

/// The timetable: every (slot, room) pair exactly once, each holding at
/// most one song.
///
/// Cells are stored row-major (slot, then room) in load order. A grid is
/// only built through [`Grid::new`]; saved timetables come back as
/// [`TimetableRow`]s.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grid {
    slots: Vec<TimeSlot>,
    rooms: Vec<Room>,
    cells: Vec<Option<Song>>,
}

impl Grid {
    /// Creates an all-empty grid.
    pub fn new(slots: &[TimeSlot], rooms: &[Room]) -> Self {
        Self {
            slots: slots.to_vec(),
            rooms: rooms.to_vec(),
            cells: vec![None; slots.len() * rooms.len()],
        }
    }

    /// Rows of the grid.
    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    /// Columns of the grid.
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Total number of cells.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Whether no cell holds a song.
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    /// Resolves ids to (slot index, room index).
    pub fn locate(&self, slot_id: &str, room_id: &str) -> Result<(usize, usize)> {
        let si = self
            .slots
            .iter()
            .position(|s| s.id == slot_id)
            .ok_or_else(|| ScheduleError::UnknownSlot(slot_id.to_string()))?;
        let ri = self
            .rooms
            .iter()
            .position(|r| r.id == room_id)
            .ok_or_else(|| ScheduleError::UnknownRoom(room_id.to_string()))?;
        Ok((si, ri))
    }

    /// Content of a cell.
    pub fn get(&self, slot_id: &str, room_id: &str) -> Result<Option<&Song>> {
        let (si, ri) = self.locate(slot_id, room_id)?;
        Ok(self.cell_at(si, ri))
    }

    /// Writes a song into a cell, replacing whatever was there.
    pub fn place(&mut self, slot_id: &str, room_id: &str, song: Song) -> Result<()> {
        let (si, ri) = self.locate(slot_id, room_id)?;
        self.place_at(si, ri, song);
        Ok(())
    }

    /// Empties a cell, returning the song it held.
    pub fn clear(&mut self, slot_id: &str, room_id: &str) -> Result<Option<Song>> {
        let (si, ri) = self.locate(slot_id, room_id)?;
        Ok(self.clear_at(si, ri))
    }

    /// Empties every cell. Slots and rooms are kept.
    pub fn reset_all(&mut self) {
        self.cells.iter_mut().for_each(|c| *c = None);
    }

    /// Songs from `all_songs` not found in any cell, in input order.
    pub fn remaining_songs(&self, all_songs: &[Song]) -> Vec<Song> {
        let placed: HashSet<&str> = self.cells.iter().flatten().map(|s| s.id.as_str()).collect();
        all_songs
            .iter()
            .filter(|s| !placed.contains(s.id.as_str()))
            .cloned()
            .collect()
    }

    /// Where a song is placed, as (slot, room).
    pub fn position_of(&self, song_id: &str) -> Option<(&TimeSlot, &Room)> {
        self.occupied()
            .find(|(_, _, song)| song.id == song_id)
            .map(|(slot, room, _)| (slot, room))
    }

    /// Occupied cells in row-major order.
    pub fn occupied(&self) -> impl Iterator<Item = (&TimeSlot, &Room, &Song)> {
        let width = self.rooms.len();
        self.cells.iter().enumerate().filter_map(move |(idx, cell)| {
            cell.as_ref()
                .map(|song| (&self.slots[idx / width], &self.rooms[idx % width], song))
        })
    }

    /// Flattens the grid for saving: slot order, then room order.
    pub fn rows(&self) -> Vec<TimetableRow> {
        let mut rows = Vec::with_capacity(self.cells.len());
        for (si, slot) in self.slots.iter().enumerate() {
            for (ri, room) in self.rooms.iter().enumerate() {
                rows.push(TimetableRow {
                    slot_id: slot.id.clone(),
                    room_id: room.id.clone(),
                    song_id: self.cell_at(si, ri).map(|s| s.id.clone()),
                });
            }
        }
        rows
    }

    // ---- index-based access for the checker and engines ----

    #[inline]
    fn index(&self, si: usize, ri: usize) -> usize {
        si * self.rooms.len() + ri
    }

    /// Cell content by index.
    #[inline]
    pub(crate) fn cell_at(&self, si: usize, ri: usize) -> Option<&Song> {
        self.cells[self.index(si, ri)].as_ref()
    }

    /// Songs in a slot row, with their room index.
    pub(crate) fn row_at(&self, si: usize) -> impl Iterator<Item = (usize, &Song)> {
        let start = self.index(si, 0);
        self.cells[start..start + self.rooms.len()]
            .iter()
            .enumerate()
            .filter_map(|(ri, cell)| cell.as_ref().map(|s| (ri, s)))
    }

    #[inline]
    pub(crate) fn place_at(&mut self, si: usize, ri: usize, song: Song) {
        let idx = self.index(si, ri);
        self.cells[idx] = Some(song);
    }

    #[inline]
    pub(crate) fn clear_at(&mut self, si: usize, ri: usize) -> Option<Song> {
        let idx = self.index(si, ri);
        self.cells[idx].take()
    }
}
