//! Timetable domain models.
//!
//! Plain data supplied by the loader and shown by the presentation layer.
//! None of these types carry scheduling logic beyond construction checks.
//!
//! # Domain Mappings
//!
//! | studio-schedule | Live house | Rehearsal camp |
//! |-----------------|------------|----------------|
//! | Song | Entry | Band session |
//! | Performer | Band member | Participant |
//! | Room | Stage | Studio |
//! | TimeSlot | Set slot | Practice block |

mod performer;
mod room;
mod slot;
mod song;
mod window;

pub use performer::Performer;
pub use room::{sort_rooms, Room};
pub use slot::TimeSlot;
pub use song::{Membership, Song};
pub use window::{format_clock, parse_clock, Minutes, TimeWindow, END_OF_DAY};
