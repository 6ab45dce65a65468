//! Input validation for scheduling sessions.
//!
//! Checks structural integrity of loaded data before a session opens.
//! Detects:
//! - Duplicate IDs
//! - Unsorted or overlapping slots
//! - Membership rows for songs that do not exist
//! - Unnamed rooms
//! - More songs than cells
//!
//! Sessions do not run these checks themselves; loaders are trusted to
//! deliver well-formed data, and callers opt in here.

use crate::input::ScheduleInput;
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// A slot has `start >= end`.
    EmptySlot,
    /// Slots are not sorted by start or overlap each other.
    SlotOrder,
    /// A membership entry references a song that doesn't exist.
    UnknownSong,
    /// A room has a blank name.
    UnnamedRoom,
    /// Not enough cells for the songs.
    InsufficientCapacity,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the input data for a scheduling session.
///
/// Checks:
/// 1. No duplicate room, slot, song or performer IDs
/// 2. Every slot has `start < end`
/// 3. Slots are sorted by start and do not overlap
/// 4. Membership references existing songs only
/// 5. Every room has a name
/// 6. Songs fit into slots x rooms
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(input: &ScheduleInput) -> ValidationResult {
    let mut errors = Vec::new();

    check_unique(input.rooms.iter().map(|r| r.id.as_str()), "room", &mut errors);
    check_unique(input.slots.iter().map(|s| s.id.as_str()), "slot", &mut errors);
    check_unique(input.songs.iter().map(|s| s.id.as_str()), "song", &mut errors);
    check_unique(
        input.performers.iter().map(|p| p.id.as_str()),
        "performer",
        &mut errors,
    );

    for slot in &input.slots {
        if slot.start >= slot.end {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptySlot,
                format!("Slot '{}' ends before it starts", slot.id),
            ));
        }
    }

    for pair in input.slots.windows(2) {
        let (prev, next) = (&pair[0], &pair[1]);
        if next.start < prev.start {
            errors.push(ValidationError::new(
                ValidationErrorKind::SlotOrder,
                format!("Slot '{}' starts before slot '{}'", next.id, prev.id),
            ));
        } else if next.start < prev.end {
            errors.push(ValidationError::new(
                ValidationErrorKind::SlotOrder,
                format!("Slot '{}' overlaps slot '{}'", next.id, prev.id),
            ));
        }
    }

    let song_ids: HashSet<&str> = input.songs.iter().map(|s| s.id.as_str()).collect();
    for song_id in input.members.song_ids() {
        if !song_ids.contains(song_id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownSong,
                format!("Membership references unknown song '{song_id}'"),
            ));
        }
    }

    for room in &input.rooms {
        if room.name.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnnamedRoom,
                format!("Room '{}' has no name", room.id),
            ));
        }
    }

    let cells = input.slots.len() * input.rooms.len();
    if input.songs.len() > cells {
        errors.push(ValidationError::new(
            ValidationErrorKind::InsufficientCapacity,
            format!(
                "{} songs but only {} cells; extend the time range or add rooms",
                input.songs.len(),
                cells
            ),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_unique<'a>(
    ids: impl Iterator<Item = &'a str>,
    entity: &str,
    errors: &mut Vec<ValidationError>,
) {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate {entity} ID: {id}"),
            ));
        }
    }
}
