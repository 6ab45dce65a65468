//! Rehearsal timetable engine.
//!
//! Places songs into a grid of time slots × rooms so that no performer
//! plays in two rooms at once and every song sits inside the time its
//! performers are all available. Placement is either manual (one cell at
//! a time) or automatic (randomized greedy, or backtracking), and an
//! automatic batch is all-or-nothing.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Room`, `TimeSlot`, `Song`, `Performer`,
//!   `Membership`, `TimeWindow`
//! - **`availability`**: Per-performer windows and their intersection
//! - **`grid`**: The slot × room assignment store
//! - **`conflict`**: Placement rules and whole-grid audit
//! - **`scheduler`**: Batch placement engines and fill statistics
//! - **`session`**: `SchedulingSession`, the editing API
//! - **`frame`**: Slot/room skeleton generation from a time range
//! - **`validation`**: Input integrity checks
//! - **`input`** / **`persist`**: Loader and persister seams
//!
//! # Architecture
//!
//! All state lives in an explicit `SchedulingSession`; there are no
//! globals. The core performs no I/O: data arrives through a `Loader`
//! and leaves through a `Persister`.

pub mod availability;
pub mod config;
pub mod conflict;
pub mod error;
pub mod frame;
pub mod grid;
pub mod input;
pub mod models;
pub mod persist;
pub mod scheduler;
pub mod session;
pub mod validation;
pub mod view;

pub use config::{PlacementStrategy, SchedulerConfig};
pub use error::{ConflictReason, Result, ScheduleError};
pub use session::SchedulingSession;
