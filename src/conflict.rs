//! Placement rules.
//!
//! A song may go into a cell iff, in this order of reporting:
//! 1. the cell is empty,
//! 2. no other room in the same slot holds a song sharing a performer,
//! 3. the slot lies inside the intersection of the song's performers'
//!    availability windows.
//!
//! Checks are read-only. [`audit`] applies the same rules to a whole grid,
//! e.g. one restored from storage, and lists every violation instead of
//! stopping at the first.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::availability::Availability;
use crate::error::{ConflictReason, Result};
use crate::grid::Grid;
use crate::models::{Membership, Song};

/// Membership and availability, borrowed for the duration of a check.
#[derive(Debug, Clone, Copy)]
pub struct PlacementRules<'a> {
    /// Song → performers.
    pub members: &'a Membership,
    /// Performer → window.
    pub availability: &'a Availability,
}

impl<'a> PlacementRules<'a> {
    /// Bundles the rule inputs.
    pub fn new(members: &'a Membership, availability: &'a Availability) -> Self {
        Self {
            members,
            availability,
        }
    }

    /// Checks a placement by grid indices.
    pub(crate) fn check_at(
        &self,
        grid: &Grid,
        si: usize,
        ri: usize,
        song: &Song,
    ) -> std::result::Result<(), ConflictReason> {
        if grid.cell_at(si, ri).is_some() {
            return Err(ConflictReason::CellOccupied);
        }
        if self.overlaps_in_slot(grid, si, Some(ri), song) {
            return Err(ConflictReason::MemberOverlap);
        }
        if !self.fits_window(grid, si, song) {
            return Err(ConflictReason::OutsideWindow);
        }
        Ok(())
    }

    /// Whether any song in slot `si` (other than the one in room `skip`)
    /// shares a performer with `song`.
    fn overlaps_in_slot(&self, grid: &Grid, si: usize, skip: Option<usize>, song: &Song) -> bool {
        let mine = self.members.members_of(&song.id);
        if mine.is_empty() {
            return false;
        }
        grid.row_at(si)
            .filter(|(ri, _)| Some(*ri) != skip)
            .any(|(_, other)| !mine.is_disjoint(self.members.members_of(&other.id)))
    }

    /// Whether slot `si` is inside the song's common availability.
    fn fits_window(&self, grid: &Grid, si: usize, song: &Song) -> bool {
        let window = self.availability.available_window(
            self.members.members_of(&song.id).iter().map(String::as_str),
        );
        window.contains_window(&grid.slots()[si].window())
    }
}

/// Checks whether `song` may be placed at (`slot_id`, `room_id`).
///
/// Unknown ids are reported as [`crate::ScheduleError::UnknownSlot`] /
/// [`crate::ScheduleError::UnknownRoom`]; rule violations as
/// [`crate::ScheduleError::Conflict`].
///
/// # Example
/// ```
/// use studio_schedule::availability::Availability;
/// use studio_schedule::conflict::can_place;
/// use studio_schedule::grid::Grid;
/// use studio_schedule::models::{Membership, Room, Song, TimeSlot, TimeWindow};
/// use studio_schedule::ConflictReason;
///
/// let slots = vec![TimeSlot::parse("S1", "10:00", "11:00").unwrap()];
/// let rooms = vec![Room::new("A"), Room::new("B")];
/// let mut grid = Grid::new(&slots, &rooms);
/// let members = Membership::new().with_member("X", "p").with_member("Y", "p");
/// let availability = Availability::new(TimeWindow::parse("10:00", "24:00").unwrap());
///
/// grid.place("S1", "A", Song::new("X")).unwrap();
/// let err = can_place(&grid, "S1", "B", &Song::new("Y"), &members, &availability).unwrap_err();
/// assert_eq!(err.conflict(), Some(ConflictReason::MemberOverlap));
/// ```
pub fn can_place(
    grid: &Grid,
    slot_id: &str,
    room_id: &str,
    song: &Song,
    members: &Membership,
    availability: &Availability,
) -> Result<()> {
    let (si, ri) = grid.locate(slot_id, room_id)?;
    PlacementRules::new(members, availability).check_at(grid, si, ri, song)?;
    Ok(())
}

/// A rule broken by an existing placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// What is wrong.
    pub kind: ViolationKind,
    /// Slot of the offending cell.
    pub slot_id: String,
    /// Room of the offending cell.
    pub room_id: String,
    /// Song in the offending cell.
    pub song_id: String,
}

/// Classification of grid violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViolationKind {
    /// Shares a performer with another song in the same slot.
    MemberOverlap,
    /// Slot not inside the performers' common window.
    OutsideWindow,
    /// The same song sits in more than one cell.
    DuplicatePlacement,
}

/// Lists every rule violation in a grid.
///
/// Each offending cell is reported once per kind; both songs of an
/// overlapping pair are reported. An empty result means the grid could
/// have been built through [`can_place`] alone.
pub fn audit(grid: &Grid, rules: &PlacementRules<'_>) -> Vec<Violation> {
    let mut violations = Vec::new();
    let mut seen: HashMap<&str, usize> = HashMap::new();
    let width = grid.rooms().len();

    for si in 0..grid.slots().len() {
        for ri in 0..width {
            let Some(song) = grid.cell_at(si, ri) else {
                continue;
            };
            let mut push = |kind| {
                violations.push(Violation {
                    kind,
                    slot_id: grid.slots()[si].id.clone(),
                    room_id: grid.rooms()[ri].id.clone(),
                    song_id: song.id.clone(),
                });
            };

            let count = seen.entry(song.id.as_str()).or_insert(0);
            *count += 1;
            if *count > 1 {
                push(ViolationKind::DuplicatePlacement);
            }
            if rules.overlaps_in_slot(grid, si, Some(ri), song) {
                push(ViolationKind::MemberOverlap);
            }
            if !rules.fits_window(grid, si, song) {
                push(ViolationKind::OutsideWindow);
            }
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Room, TimeSlot, TimeWindow};
    use crate::ScheduleError;

    fn session() -> TimeWindow {
        TimeWindow::parse("10:00", "24:00").unwrap()
    }

    fn grid() -> Grid {
        let slots = vec![
            TimeSlot::parse("S1", "10:00", "11:00").unwrap(),
            TimeSlot::parse("S2", "11:00", "12:00").unwrap(),
        ];
        let rooms = vec![Room::new("A"), Room::new("B"), Room::new("C")];
        Grid::new(&slots, &rooms)
    }

    fn reason(result: Result<()>) -> Option<ConflictReason> {
        result.err().and_then(|e| e.conflict())
    }

    #[test]
    fn test_empty_grid_accepts() {
        let g = grid();
        let m = Membership::new().with_member("X", "p");
        let av = Availability::new(session());
        assert!(can_place(&g, "S1", "A", &Song::new("X"), &m, &av).is_ok());
    }

    #[test]
    fn test_occupied_cell() {
        let mut g = grid();
        let m = Membership::new();
        let av = Availability::new(session());
        g.place("S1", "A", Song::new("X")).unwrap();

        assert_eq!(
            reason(can_place(&g, "S1", "A", &Song::new("Y"), &m, &av)),
            Some(ConflictReason::CellOccupied)
        );
    }

    #[test]
    fn test_occupied_reported_before_overlap() {
        let mut g = grid();
        let m = Membership::new().with_member("X", "p").with_member("Y", "p");
        let av = Availability::new(session());
        g.place("S1", "A", Song::new("X")).unwrap();

        assert_eq!(
            reason(can_place(&g, "S1", "A", &Song::new("Y"), &m, &av)),
            Some(ConflictReason::CellOccupied)
        );
    }

    #[test]
    fn test_member_overlap_scans_all_rooms() {
        let mut g = grid();
        let m = Membership::new()
            .with_member("X", "p")
            .with_member("Y", "q")
            .with_member("Z", "p");
        let av = Availability::new(session());
        // X is two rooms away from the candidate room
        g.place("S1", "A", Song::new("X")).unwrap();
        g.place("S1", "B", Song::new("Y")).unwrap();

        assert_eq!(
            reason(can_place(&g, "S1", "C", &Song::new("Z"), &m, &av)),
            Some(ConflictReason::MemberOverlap)
        );
        // different slot is fine
        assert!(can_place(&g, "S2", "C", &Song::new("Z"), &m, &av).is_ok());
    }

    #[test]
    fn test_song_without_members_never_overlaps() {
        let mut g = grid();
        let m = Membership::new().with_member("X", "p");
        let av = Availability::new(session());
        g.place("S1", "A", Song::new("X")).unwrap();
        assert!(can_place(&g, "S1", "B", &Song::new("solo"), &m, &av).is_ok());
    }

    #[test]
    fn test_outside_window() {
        let g = grid();
        let m = Membership::new().with_member("X", "p");
        let mut av = Availability::new(session());
        av.set("p", Some(TimeWindow::parse("10:00", "10:30").unwrap()));

        assert_eq!(
            reason(can_place(&g, "S1", "A", &Song::new("X"), &m, &av)),
            Some(ConflictReason::OutsideWindow)
        );
    }

    #[test]
    fn test_window_bounds_inclusive() {
        let g = grid();
        let m = Membership::new().with_member("X", "p");
        let mut av = Availability::new(session());
        av.set("p", Some(TimeWindow::parse("11:00", "12:00").unwrap()));

        assert!(can_place(&g, "S2", "A", &Song::new("X"), &m, &av).is_ok());
        assert!(can_place(&g, "S1", "A", &Song::new("X"), &m, &av).is_err());
    }

    #[test]
    fn test_slot_before_session_default() {
        let slots = vec![TimeSlot::parse("S0", "09:00", "10:00").unwrap()];
        let g = Grid::new(&slots, &[Room::new("A")]);
        let m = Membership::new().with_member("X", "p");
        let av = Availability::new(session());
        assert_eq!(
            reason(can_place(&g, "S0", "A", &Song::new("X"), &m, &av)),
            Some(ConflictReason::OutsideWindow)
        );
    }

    #[test]
    fn test_unknown_cell() {
        let g = grid();
        let m = Membership::new();
        let av = Availability::new(session());
        assert!(matches!(
            can_place(&g, "nope", "A", &Song::new("X"), &m, &av),
            Err(ScheduleError::UnknownSlot(_))
        ));
    }

    #[test]
    fn test_audit_clean_grid() {
        let mut g = grid();
        let m = Membership::new().with_member("X", "p").with_member("Y", "q");
        let av = Availability::new(session());
        g.place("S1", "A", Song::new("X")).unwrap();
        g.place("S1", "B", Song::new("Y")).unwrap();

        assert!(audit(&g, &PlacementRules::new(&m, &av)).is_empty());
    }

    #[test]
    fn test_audit_reports_everything() {
        let mut g = grid();
        let m = Membership::new()
            .with_member("X", "p")
            .with_member("Y", "p")
            .with_member("W", "late");
        let mut av = Availability::new(session());
        av.set("late", Some(TimeWindow::parse("20:00", "22:00").unwrap()));

        // bypasses the checker on purpose
        g.place("S1", "A", Song::new("X")).unwrap();
        g.place("S1", "B", Song::new("Y")).unwrap();
        g.place("S2", "A", Song::new("X")).unwrap();
        g.place("S2", "C", Song::new("W")).unwrap();

        let v = audit(&g, &PlacementRules::new(&m, &av));
        let count = |kind| v.iter().filter(|x| x.kind == kind).count();
        assert_eq!(count(ViolationKind::MemberOverlap), 2);
        assert_eq!(count(ViolationKind::DuplicatePlacement), 1);
        assert_eq!(count(ViolationKind::OutsideWindow), 1);
        assert!(v
            .iter()
            .any(|x| x.kind == ViolationKind::OutsideWindow && x.song_id == "W"));
    }
}
